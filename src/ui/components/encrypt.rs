// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Encrypt workflow: form state, submission lifecycle, and the result window.

use eframe::egui;

use crate::logic::request::{EncryptForm, UploadFile, build_encrypt_form};
use crate::logic::service::ServiceError;
use crate::models::notification::Notifier;
use crate::models::presenter::Presenter;
use crate::models::results::EncryptResult;
use crate::models::submission::SubmissionState;
use crate::models::validation::{MAX_FILE_BYTES, validate_encrypt_inputs};
use crate::utils::format_bytes;

/// Shown when a failure carries no server message.
pub const GENERIC_FAILURE: &str = "An unexpected error occurred";

/// MVU state owned by the encrypt view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncryptModel {
    pin: String,
    text: String,
    file: Option<UploadFile>,
    expiry: String,
    state: SubmissionState,
    result: Presenter<EncryptResult>,
}

/// Messages emitted by the encrypt view or produced by its commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncryptMsg {
    PinChanged(String),
    TextChanged(String),
    ExpiryChanged(String),
    RequestPickFile,
    FilePicked(Option<UploadFile>),
    FilePickFailed(String),
    ClearFile,
    Submit,
    Completed(Result<EncryptResult, ServiceError>),
    /// Copy the key; the app shell owns the clipboard and answers with `KeyCopied`.
    CopyKey(String),
    KeyCopied,
    DismissResult,
}

/// Side effects requested by the encrypt workflow.
#[derive(Debug)]
pub enum EncryptCommand {
    PickFile,
    Submit(EncryptForm),
}

impl EncryptModel {
    #[cfg(test)]
    pub fn pin(&self) -> &str {
        &self.pin
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn file(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    #[cfg(test)]
    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn result(&self) -> Option<&EncryptResult> {
        self.result.current()
    }

    fn reset_inputs(&mut self) {
        self.pin.clear();
        self.text.clear();
        self.file = None;
        self.expiry.clear();
    }
}

/// Apply a message to the encrypt model.
pub fn update(
    model: &mut EncryptModel,
    msg: EncryptMsg,
    cmds: &mut Vec<EncryptCommand>,
    notifier: &mut impl Notifier,
) {
    let locked = model.state.is_busy();
    match msg {
        EncryptMsg::PinChanged(pin) if !locked => model.pin = pin,
        EncryptMsg::TextChanged(text) if !locked => model.text = text,
        EncryptMsg::ExpiryChanged(expiry) if !locked => model.expiry = expiry,
        EncryptMsg::RequestPickFile if !locked => cmds.push(EncryptCommand::PickFile),
        EncryptMsg::FilePicked(Some(file)) if !locked => model.file = Some(file),
        EncryptMsg::FilePicked(_) => {}
        EncryptMsg::FilePickFailed(err) => {
            notifier.notify_error(format!("Could not read the selected file: {err}"));
        }
        EncryptMsg::ClearFile if !locked => model.file = None,
        EncryptMsg::PinChanged(_)
        | EncryptMsg::TextChanged(_)
        | EncryptMsg::ExpiryChanged(_)
        | EncryptMsg::RequestPickFile
        | EncryptMsg::ClearFile => {
            tracing::debug!("Ignoring encrypt form edit while a request is in flight");
        }
        EncryptMsg::Submit => submit(model, cmds, notifier),
        EncryptMsg::Completed(Ok(result)) => {
            tracing::info!(expiry_minutes = %result.expiry_minutes, "Encryption succeeded");
            model.state = SubmissionState::Succeeded;
            model.result.show(result);
            model.reset_inputs();
            notifier.notify_success("Data encrypted successfully!");
        }
        EncryptMsg::Completed(Err(err)) => {
            tracing::warn!(error = %err, "Encryption failed");
            model.state = SubmissionState::Failed;
            notifier.notify_error(err.user_message(GENERIC_FAILURE));
        }
        // Intercepted by the shell; nothing to do if it reaches us.
        EncryptMsg::CopyKey(_) => {}
        EncryptMsg::KeyCopied => notifier.notify_info("Key copied to clipboard!"),
        EncryptMsg::DismissResult => {
            model.result.dismiss();
            if model.state == SubmissionState::Succeeded {
                model.state = SubmissionState::Idle;
            }
        }
    }
}

fn submit(model: &mut EncryptModel, cmds: &mut Vec<EncryptCommand>, notifier: &mut impl Notifier) {
    if !model.state.can_submit() {
        tracing::debug!("Encrypt already in flight; dropping duplicate submit");
        return;
    }

    let file_size = model.file.as_ref().map(|f| f.size);
    let expiry_minutes = match validate_encrypt_inputs(&model.pin, &model.expiry, file_size) {
        Ok(minutes) => minutes,
        Err(err) => {
            notifier.notify_error(err.to_string());
            return;
        }
    };

    let form = build_encrypt_form(&model.pin, &model.text, model.file.as_ref(), expiry_minutes);
    tracing::info!(expiry_minutes, has_file = file_size.is_some(), "Submitting encryption");
    model.state = SubmissionState::Submitting;
    model.result.dismiss();
    cmds.push(EncryptCommand::Submit(form));
}

/// Render the encrypt form and, when present, the result window.
pub fn view(ui: &mut egui::Ui, ctx: &egui::Context, model: &EncryptModel) -> Vec<EncryptMsg> {
    let mut msgs = Vec::new();
    let busy = model.state.is_busy();

    ui.heading("Encrypt Data");
    ui.add_space(12.0);

    ui.add_enabled_ui(!busy, |ui| {
        render_file_picker(ui, model, &mut msgs);
        ui.add_space(10.0);

        ui.label("Text");
        let mut text = model.text.clone();
        if ui
            .add(
                egui::TextEdit::multiline(&mut text)
                    .hint_text("Enter text to encrypt")
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            msgs.push(EncryptMsg::TextChanged(text));
        }
        ui.add_space(10.0);

        ui.label("PIN *");
        let mut pin = model.pin.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut pin)
                    .password(true)
                    .hint_text("Enter a secure PIN"),
            )
            .changed()
        {
            msgs.push(EncryptMsg::PinChanged(pin));
        }
        ui.add_space(10.0);

        ui.label("Expiry Time (Minutes) *");
        let mut expiry = model.expiry.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut expiry)
                    .hint_text("Enter expiry time (30mins - 48hrs)")
                    .char_limit(6),
            )
            .changed()
        {
            msgs.push(EncryptMsg::ExpiryChanged(expiry));
        }
        ui.label(
            egui::RichText::new("Must be between 30 minutes and 48 hours (2880 minutes).")
                .small()
                .color(egui::Color32::from_gray(110)),
        );
    });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        let button = egui::Button::new(format!("{} Encrypt Data", egui_phosphor::regular::LOCK));
        if ui.add_enabled(!busy, button).clicked() {
            msgs.push(EncryptMsg::Submit);
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

fn render_file_picker(ui: &mut egui::Ui, model: &EncryptModel, msgs: &mut Vec<EncryptMsg>) {
    ui.label("File (Optional, max 10MB)");
    ui.horizontal(|ui| {
        if ui
            .button(format!("{} Choose file", egui_phosphor::regular::PAPERCLIP))
            .clicked()
        {
            msgs.push(EncryptMsg::RequestPickFile);
        }

        match &model.file {
            Some(file) => {
                let size = egui::RichText::new(format_bytes(file.size)).small();
                let size = if file.size > MAX_FILE_BYTES {
                    size.color(egui::Color32::from_rgb(232, 89, 12))
                } else {
                    size.color(egui::Color32::from_gray(110))
                };
                ui.label(file.name.as_str())
                    .on_hover_text(file.path.display().to_string());
                ui.label(size);
                if ui
                    .button(egui_phosphor::regular::X)
                    .on_hover_text("Remove file")
                    .clicked()
                {
                    msgs.push(EncryptMsg::ClearFile);
                }
            }
            None => {
                ui.label(egui::RichText::new("No file selected").color(egui::Color32::from_gray(150)));
            }
        }
    });
}

fn render_result_window(ctx: &egui::Context, result: &EncryptResult, msgs: &mut Vec<EncryptMsg>) {
    egui::Window::new("Encryption Successful!")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Key:");
                ui.monospace(result.key.as_str());
            });
            if ui
                .button(format!(
                    "{} Copy key to clipboard",
                    egui_phosphor::regular::CLIPBOARD
                ))
                .clicked()
            {
                msgs.push(EncryptMsg::CopyKey(result.key.clone()));
            }
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.strong("Expiry Time:");
                ui.label(result.expiry_label());
            });
            ui.add_space(8.0);
            if ui.button("Close").clicked() {
                msgs.push(EncryptMsg::DismissResult);
            }
        });
}
