// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Toast overlay backing the [`Notifier`] capability.

use std::time::{Duration, Instant};

use eframe::egui;

use crate::models::notification::{NoticeKind, Notifier};

/// How long a toast stays on screen unless clicked away.
const TOAST_TTL: Duration = Duration::from_secs(5);
/// Older toasts are dropped beyond this many.
const MAX_TOASTS: usize = 5;

#[derive(Clone, Debug)]
struct Toast {
    id: u64,
    kind: NoticeKind,
    message: String,
    shown_at: Instant,
}

/// Queue of live toasts in arrival order.
#[derive(Debug, Default)]
pub struct ToastsModel {
    toasts: Vec<Toast>,
    next_id: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastsMsg {
    Dismiss(u64),
}

impl Notifier for ToastsModel {
    fn notify(&mut self, kind: NoticeKind, message: String) {
        match kind {
            NoticeKind::Error => tracing::debug!(%message, "Error toast"),
            _ => tracing::trace!(?kind, %message, "Toast"),
        }
        self.push_at(kind, message, Instant::now());
    }
}

impl ToastsModel {
    fn push_at(&mut self, kind: NoticeKind, message: String, now: Instant) {
        self.toasts.push(Toast {
            id: self.next_id,
            kind,
            message,
            shown_at: now,
        });
        self.next_id += 1;
        if self.toasts.len() > MAX_TOASTS {
            let overflow = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..overflow);
        }
    }

    /// Drop toasts older than their time to live.
    pub fn expire(&mut self, now: Instant) {
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < TOAST_TTL);
    }
}

pub fn update(model: &mut ToastsModel, msg: ToastsMsg) {
    match msg {
        ToastsMsg::Dismiss(id) => model.toasts.retain(|t| t.id != id),
    }
}

/// Paint live toasts in the bottom-right corner; clicking one dismisses it.
pub fn view(ctx: &egui::Context, model: &ToastsModel) -> Vec<ToastsMsg> {
    let mut msgs = Vec::new();
    if model.toasts.is_empty() {
        return msgs;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -36.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in &model.toasts {
                let (icon, color) = match toast.kind {
                    NoticeKind::Success => (
                        egui_phosphor::regular::CHECK_CIRCLE,
                        egui::Color32::from_rgb(47, 158, 68),
                    ),
                    NoticeKind::Error => (
                        egui_phosphor::regular::WARNING_CIRCLE,
                        egui::Color32::from_rgb(224, 49, 49),
                    ),
                    NoticeKind::Info => (
                        egui_phosphor::regular::INFO,
                        egui::Color32::from_rgb(28, 126, 214),
                    ),
                };
                let response = egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.0, color))
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.horizontal_wrapped(|ui| {
                            ui.label(egui::RichText::new(icon).color(color));
                            ui.label(toast.message.as_str());
                        });
                    })
                    .response
                    .interact(egui::Sense::click())
                    .on_hover_text("Click to dismiss");
                if response.clicked() {
                    msgs.push(ToastsMsg::Dismiss(toast.id));
                }
                ui.add_space(4.0);
            }
        });

    // Keep repainting so expiry happens without user input.
    ctx.request_repaint_after(Duration::from_millis(250));
    msgs
}
