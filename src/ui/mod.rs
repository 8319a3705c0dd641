// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the encrypt and decrypt workflows.
//! Handles layout, the command worker pool, and routing messages into the MVU kernel.

pub mod components;

use std::time::Instant;

use eframe::egui;

use crate::mvu::{self, AppModel, Command, Msg, Services, Workflow};
use crate::ui::components::encrypt::EncryptMsg;
use crate::ui::components::{decrypt, encrypt, toasts};

/// Stateful egui application hosting both workflows.
pub struct SealdropApp {
    model: AppModel,
    toasts: toasts::ToastsModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl SealdropApp {
    /// Spawn the command workers and build an idle application.
    pub fn new(services: Services) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().clamp(2, 4))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let services = services.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, &services);
                    let _ = msg_tx.send(msg);
                }
            });
        }
        tracing::debug!(threads, "Command workers started");

        Self {
            model: AppModel::default(),
            toasts: toasts::ToastsModel::default(),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for SealdropApp {
    /// Required by eframe 0.34; all rendering happens in `update`, which eframe still calls each frame.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    /// Drives a single UI frame: drains worker results, applies queued messages to the model,
    /// dispatches resulting commands, and renders the active workflow plus overlays.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process pending messages in arrival order.
        let msgs = std::mem::take(&mut self.inbox);
        for msg in msgs {
            let msg = match msg {
                Msg::Encrypt(EncryptMsg::CopyKey(key)) => {
                    // Clipboard lives on the egui context, so the copy happens here.
                    ctx.copy_text(key);
                    Msg::Encrypt(EncryptMsg::KeyCopied)
                }
                other => other,
            };
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands, &mut self.toasts);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }

        self.toasts.expire(Instant::now());

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("sealdrop");
                ui.separator();
                self.render_workflow_tabs(ui);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_max_width(560.0);
                match self.model.workflow {
                    Workflow::Encrypt => {
                        let msgs = encrypt::view(ui, ctx, &self.model.encrypt);
                        self.inbox.extend(msgs.into_iter().map(Msg::Encrypt));
                    }
                    Workflow::Decrypt => {
                        let msgs = decrypt::view(ui, ctx, &self.model.decrypt);
                        self.inbox.extend(msgs.into_iter().map(Msg::Decrypt));
                    }
                }
            });
        });

        for msg in toasts::view(ctx, &self.toasts) {
            toasts::update(&mut self.toasts, msg);
        }

        if self.model.pending_commands > 0 {
            // Poll for worker results while something is in flight.
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

impl SealdropApp {
    /// Segmented control switching between the two workflows.
    fn render_workflow_tabs(&mut self, ui: &mut egui::Ui) {
        let mut choice = self.model.workflow;
        ui.selectable_value(
            &mut choice,
            Workflow::Encrypt,
            format!("{} Encrypt", egui_phosphor::regular::LOCK),
        );
        ui.selectable_value(
            &mut choice,
            Workflow::Decrypt,
            format!("{} Decrypt", egui_phosphor::regular::LOCK_OPEN),
        );
        if choice != self.model.workflow {
            self.inbox.push(Msg::SelectWorkflow(choice));
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.model.pending_commands > 0 {
                let activity = match (
                    self.model.encrypt.state().is_busy(),
                    self.model.decrypt.state().is_busy(),
                ) {
                    (true, true) => "Encrypting and decrypting",
                    (true, false) => "Encrypting",
                    (false, true) => "Decrypting",
                    (false, false) => "Working",
                };
                ui.add(egui::Spinner::new().size(14.0));
                ui.label(
                    egui::RichText::new(format!(
                        "{activity}…  ({} task(s) running)",
                        self.model.pending_commands
                    ))
                    .color(egui::Color32::from_gray(68)),
                );
            } else {
                ui.label(egui::RichText::new("Ready").color(egui::Color32::from_gray(110)));
            }
        });
    }
}
