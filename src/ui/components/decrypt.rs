// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Decrypt workflow: key/PIN redemption, result window, and file download.

use std::path::PathBuf;

use eframe::egui;

use crate::logic::codec::{DownloadBlob, decode_download};
use crate::logic::request::{DecryptBody, build_decrypt_body};
use crate::logic::service::ServiceError;
use crate::models::notification::Notifier;
use crate::models::presenter::Presenter;
use crate::models::results::{DecryptResult, DecryptSection};
use crate::models::submission::SubmissionState;
use crate::models::validation::validate_decrypt_inputs;

/// Shown when a failure carries no server message.
pub const GENERIC_FAILURE: &str = "An error occurred during decryption.";

/// MVU state owned by the decrypt view. Inputs survive both success and failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecryptModel {
    key: String,
    pin: String,
    state: SubmissionState,
    result: Presenter<DecryptResult>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecryptMsg {
    KeyChanged(String),
    PinChanged(String),
    Submit,
    Completed(Result<DecryptResult, ServiceError>),
    DownloadRequested,
    /// Sink outcome: saved path, `None` if the user cancelled, or an error text.
    DownloadFinished(Result<Option<PathBuf>, String>),
    DismissResult,
}

#[derive(Debug)]
pub enum DecryptCommand {
    Submit(DecryptBody),
    SaveDownload(DownloadBlob),
}

impl DecryptModel {
    #[cfg(test)]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[cfg(test)]
    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn result(&self) -> Option<&DecryptResult> {
        self.result.current()
    }

    fn inputs_complete(&self) -> bool {
        !self.key.is_empty() && !self.pin.is_empty()
    }
}

/// Apply a message to the decrypt model.
pub fn update(
    model: &mut DecryptModel,
    msg: DecryptMsg,
    cmds: &mut Vec<DecryptCommand>,
    notifier: &mut impl Notifier,
) {
    match msg {
        DecryptMsg::KeyChanged(key) if !model.state.is_busy() => model.key = key,
        DecryptMsg::PinChanged(pin) if !model.state.is_busy() => model.pin = pin,
        DecryptMsg::KeyChanged(_) | DecryptMsg::PinChanged(_) => {
            tracing::debug!("Ignoring decrypt form edit while a request is in flight");
        }
        DecryptMsg::Submit => submit(model, cmds, notifier),
        DecryptMsg::Completed(Ok(result)) => {
            tracing::info!(
                has_text = result.decrypted_text.is_some(),
                has_file = result.decrypted_file.is_some(),
                "Decryption succeeded"
            );
            model.state = SubmissionState::Succeeded;
            model.result.show(result);
            notifier.notify_success("Decryption successful!");
        }
        DecryptMsg::Completed(Err(err)) => {
            tracing::warn!(error = %err, "Decryption failed");
            model.state = SubmissionState::Failed;
            notifier.notify_error(err.user_message(GENERIC_FAILURE));
        }
        DecryptMsg::DownloadRequested => request_download(model, cmds, notifier),
        DecryptMsg::DownloadFinished(Ok(Some(path))) => {
            tracing::info!(path = %path.display(), "Decrypted file saved");
            notifier.notify_success(format!("File saved: {}", path.display()));
        }
        DecryptMsg::DownloadFinished(Ok(None)) => notifier.notify_info("Download cancelled."),
        DecryptMsg::DownloadFinished(Err(err)) => {
            tracing::error!(error = %err, "Saving decrypted file failed");
            notifier.notify_error(format!("Failed to save file: {err}"));
        }
        DecryptMsg::DismissResult => {
            model.result.dismiss();
            if model.state == SubmissionState::Succeeded {
                model.state = SubmissionState::Idle;
            }
        }
    }
}

fn submit(model: &mut DecryptModel, cmds: &mut Vec<DecryptCommand>, notifier: &mut impl Notifier) {
    if !model.state.can_submit() {
        tracing::debug!("Decrypt already in flight; dropping duplicate submit");
        return;
    }
    if let Err(err) = validate_decrypt_inputs(&model.key, &model.pin) {
        notifier.notify_error(err.to_string());
        return;
    }

    tracing::info!("Submitting decryption");
    model.state = SubmissionState::Submitting;
    model.result.dismiss();
    cmds.push(DecryptCommand::Submit(build_decrypt_body(&model.key, &model.pin)));
}

/// Decode the returned file and hand it to the sink. Decode failures stay local to the window.
fn request_download(
    model: &DecryptModel,
    cmds: &mut Vec<DecryptCommand>,
    notifier: &mut impl Notifier,
) {
    let Some(encoded) = model.result().and_then(|r| r.decrypted_file.as_deref()) else {
        notifier.notify_error("No file data available for download.");
        return;
    };

    match decode_download(encoded) {
        Ok(blob) => cmds.push(DecryptCommand::SaveDownload(blob)),
        Err(err) => {
            tracing::error!(error = %err, "File download error");
            notifier.notify_error("Failed to process file for download.");
        }
    }
}

/// Render the redemption form and, when present, the result window.
pub fn view(ui: &mut egui::Ui, ctx: &egui::Context, model: &DecryptModel) -> Vec<DecryptMsg> {
    let mut msgs = Vec::new();
    let busy = model.state.is_busy();

    ui.heading("Decrypt");
    ui.add_space(12.0);

    ui.add_enabled_ui(!busy, |ui| {
        let mut key = model.key.clone();
        if ui
            .add(egui::TextEdit::singleline(&mut key).hint_text("Enter Key"))
            .changed()
        {
            msgs.push(DecryptMsg::KeyChanged(key));
        }
        ui.add_space(6.0);

        let mut pin = model.pin.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut pin)
                    .password(true)
                    .hint_text("Enter PIN"),
            )
            .changed()
        {
            msgs.push(DecryptMsg::PinChanged(pin));
        }
    });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        let button = egui::Button::new(format!("{} Decrypt", egui_phosphor::regular::LOCK_OPEN));
        if ui
            .add_enabled(!busy && model.inputs_complete(), button)
            .on_disabled_hover_text("Key and PIN are required")
            .clicked()
        {
            msgs.push(DecryptMsg::Submit);
        }
        if busy {
            ui.add(egui::Spinner::new().size(16.0));
        }
    });

    if let Some(result) = model.result() {
        render_result_window(ctx, result, &mut msgs);
    }

    msgs
}

fn render_result_window(ctx: &egui::Context, result: &DecryptResult, msgs: &mut Vec<DecryptMsg>) {
    egui::Window::new("Decrypted data")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            for section in result.sections() {
                match section {
                    DecryptSection::Text(text) => {
                        ui.strong("Decrypted Text:");
                        egui::ScrollArea::vertical()
                            .max_height(240.0)
                            .show(ui, |ui| {
                                ui.label(text);
                            });
                    }
                    DecryptSection::File => {
                        ui.strong("Decrypted File:");
                        if ui
                            .button(format!(
                                "{} Download File",
                                egui_phosphor::regular::CLOUD_ARROW_DOWN
                            ))
                            .clicked()
                        {
                            msgs.push(DecryptMsg::DownloadRequested);
                        }
                    }
                    DecryptSection::ExpiryStatus(status) => {
                        ui.strong("Expiry Time Status:");
                        ui.label(status);
                    }
                }
                ui.add_space(8.0);
            }

            if ui.button("Close").clicked() {
                msgs.push(DecryptMsg::DismissResult);
            }
        });
}
