// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring workflow state, messages, and commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::logic::codec::DownloadBlob;
use crate::logic::request::{DecryptBody, EncryptForm, UploadFile};
use crate::logic::service::EncryptionService;
use crate::logic::sink::FileSink;
use crate::models::notification::Notifier;
use crate::ui::components::decrypt::{self, DecryptCommand, DecryptModel, DecryptMsg};
use crate::ui::components::encrypt::{self, EncryptCommand, EncryptModel, EncryptMsg};

/// Which workflow view is in front. Both keep their state while hidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Workflow {
    #[default]
    Encrypt,
    Decrypt,
}

/// Top-level application state. The two workflows share nothing.
#[derive(Default)]
pub struct AppModel {
    pub workflow: Workflow,
    pub encrypt: EncryptModel,
    pub decrypt: DecryptModel,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

/// Application messages routed through the update function.
#[derive(Debug)]
pub enum Msg {
    SelectWorkflow(Workflow),
    Encrypt(EncryptMsg),
    Decrypt(DecryptMsg),
}

/// Commands represent side-effects executed between frames.
#[derive(Debug)]
pub enum Command {
    PickUploadFile,
    Encrypt(EncryptForm),
    Decrypt(DecryptBody),
    SaveDownload(DownloadBlob),
}

/// Capabilities commands run against, shared by all workers.
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn EncryptionService>,
    pub files: Arc<dyn FileSink>,
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>, notifier: &mut impl Notifier) {
    match msg {
        Msg::SelectWorkflow(workflow) => model.workflow = workflow,
        Msg::Encrypt(m) => {
            let mut enc_cmds = Vec::new();
            encrypt::update(&mut model.encrypt, m, &mut enc_cmds, notifier);
            cmds.extend(enc_cmds.into_iter().map(|c| match c {
                EncryptCommand::PickFile => Command::PickUploadFile,
                EncryptCommand::Submit(form) => Command::Encrypt(form),
            }));
        }
        Msg::Decrypt(m) => {
            let mut dec_cmds = Vec::new();
            decrypt::update(&mut model.decrypt, m, &mut dec_cmds, notifier);
            cmds.extend(dec_cmds.into_iter().map(|c| match c {
                DecryptCommand::Submit(body) => Command::Decrypt(body),
                DecryptCommand::SaveDownload(blob) => Command::SaveDownload(blob),
            }));
        }
    }
}

/// Execute a command on a worker thread and return the resulting message.
pub fn run_command(cmd: Command, services: &Services) -> Msg {
    match cmd {
        Command::PickUploadFile => {
            let picked = rfd::FileDialog::new()
                .set_title("Select a file to encrypt")
                .pick_file();
            match picked.map(|path| upload_from_path(&path)).transpose() {
                Ok(upload) => Msg::Encrypt(EncryptMsg::FilePicked(upload)),
                Err(err) => Msg::Encrypt(EncryptMsg::FilePickFailed(format!("{err:#}"))),
            }
        }
        Command::Encrypt(form) => Msg::Encrypt(EncryptMsg::Completed(services.api.encrypt(form))),
        Command::Decrypt(body) => Msg::Decrypt(DecryptMsg::Completed(services.api.decrypt(&body))),
        Command::SaveDownload(blob) => {
            tracing::debug!(bytes = blob.bytes.len(), mime = blob.mime, "Saving download");
            let outcome = services
                .files
                .save(&blob.bytes, blob.file_name)
                .map_err(|err| format!("{err:#}"));
            Msg::Decrypt(DecryptMsg::DownloadFinished(outcome))
        }
    }
}

/// Describe a picked file for upload without reading its contents.
fn upload_from_path(path: &Path) -> Result<UploadFile> {
    let meta = path
        .metadata()
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.bin".to_string());
    Ok(UploadFile {
        path: path.to_path_buf(),
        name,
        size: meta.len(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use tempfile::TempDir;

    use super::*;
    use crate::logic::request::FormValue;
    use crate::logic::service::ServiceError;
    use crate::logic::sink::DirectoryFileSink;
    use crate::models::notification::{NoticeKind, RecordingNotifier};
    use crate::models::results::{DecryptResult, DecryptSection, EncryptResult};
    use crate::models::submission::SubmissionState;

    /// Service double that records every call and replays canned answers.
    #[derive(Default)]
    struct FakeService {
        encrypt_calls: Mutex<Vec<EncryptForm>>,
        decrypt_calls: Mutex<Vec<DecryptBody>>,
        encrypt_reply: Option<Result<EncryptResult, ServiceError>>,
        decrypt_reply: Option<Result<DecryptResult, ServiceError>>,
    }

    impl EncryptionService for FakeService {
        fn encrypt(&self, form: EncryptForm) -> Result<EncryptResult, ServiceError> {
            self.encrypt_calls.lock().unwrap().push(form);
            self.encrypt_reply
                .clone()
                .unwrap_or_else(|| Err(ServiceError::Network("no reply configured".into())))
        }

        fn decrypt(&self, body: &DecryptBody) -> Result<DecryptResult, ServiceError> {
            self.decrypt_calls.lock().unwrap().push(body.clone());
            self.decrypt_reply
                .clone()
                .unwrap_or_else(|| Err(ServiceError::Network("no reply configured".into())))
        }
    }

    fn services(api: Arc<FakeService>, dir: &Path) -> Services {
        Services {
            api,
            files: Arc::new(DirectoryFileSink::new(dir)),
        }
    }

    /// Dispatch one message, run every command it produces, and feed results back.
    fn drive(
        model: &mut AppModel,
        msg: Msg,
        services: &Services,
        notifier: &mut RecordingNotifier,
    ) -> usize {
        let mut issued = 0;
        let mut queue = vec![msg];
        while let Some(msg) = queue.pop() {
            let mut cmds = Vec::new();
            update(model, msg, &mut cmds, notifier);
            for cmd in cmds {
                issued += 1;
                queue.push(run_command(cmd, services));
            }
        }
        issued
    }

    fn type_encrypt(model: &mut AppModel, pin: &str, text: &str, expiry: &str) {
        let mut cmds = Vec::new();
        let mut notifier = RecordingNotifier::default();
        for msg in [
            EncryptMsg::PinChanged(pin.into()),
            EncryptMsg::TextChanged(text.into()),
            EncryptMsg::ExpiryChanged(expiry.into()),
        ] {
            update(model, Msg::Encrypt(msg), &mut cmds, &mut notifier);
        }
        assert!(cmds.is_empty());
    }

    fn type_decrypt(model: &mut AppModel, key: &str, pin: &str) {
        let mut cmds = Vec::new();
        let mut notifier = RecordingNotifier::default();
        update(model, Msg::Decrypt(DecryptMsg::KeyChanged(key.into())), &mut cmds, &mut notifier);
        update(model, Msg::Decrypt(DecryptMsg::PinChanged(pin.into())), &mut cmds, &mut notifier);
        assert!(cmds.is_empty());
    }

    #[test]
    fn encrypt_scenario_posts_four_fields_and_presents_key() {
        let tmp = TempDir::new().unwrap();
        let api = Arc::new(FakeService {
            encrypt_reply: Some(Ok(EncryptResult {
                key: "abc123".into(),
                expiry_minutes: 60.into(),
            })),
            ..Default::default()
        });
        let services = services(api.clone(), tmp.path());
        let mut model = AppModel::default();
        let mut notifier = RecordingNotifier::default();

        type_encrypt(&mut model, "1234", "hello", "60");
        let issued = drive(&mut model, Msg::Encrypt(EncryptMsg::Submit), &services, &mut notifier);

        assert_eq!(issued, 1);
        let calls = api.encrypt_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let form = &calls[0];
        assert_eq!(form.text("pin"), Some("1234"));
        assert_eq!(form.text("data"), Some("hello"));
        assert_eq!(form.text("expiry_time"), Some("60"));
        assert!(form.file().is_none());

        let result = model.encrypt.result().expect("result shown");
        assert_eq!(result.key, "abc123");
        assert_eq!(result.expiry_label(), "60 minutes");
        assert_eq!(model.encrypt.pin(), "");
        assert_eq!(model.encrypt.text(), "");
        assert_eq!(model.encrypt.expiry(), "");
    }

    #[test]
    fn encrypt_with_short_expiry_never_reaches_service() {
        let tmp = TempDir::new().unwrap();
        let api = Arc::new(FakeService::default());
        let services = services(api.clone(), tmp.path());
        let mut model = AppModel::default();
        let mut notifier = RecordingNotifier::default();

        type_encrypt(&mut model, "1234", "hello", "10");
        let issued = drive(&mut model, Msg::Encrypt(EncryptMsg::Submit), &services, &mut notifier);

        assert_eq!(issued, 0);
        assert!(api.encrypt_calls.lock().unwrap().is_empty());
        assert_eq!(model.encrypt.state(), SubmissionState::Idle);
        assert_eq!(notifier.last().map(|(k, _)| *k), Some(NoticeKind::Error));
    }

    #[test]
    fn encrypt_with_picked_file_streams_it_as_file_part() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        fs::write(&path, b"attached").unwrap();
        let upload = upload_from_path(&path).unwrap();
        assert_eq!(upload.name, "notes.txt");
        assert_eq!(upload.size, 8);

        let api = Arc::new(FakeService {
            encrypt_reply: Some(Ok(EncryptResult {
                key: "k".into(),
                expiry_minutes: 30.into(),
            })),
            ..Default::default()
        });
        let services = services(api.clone(), tmp.path());
        let mut model = AppModel::default();
        let mut notifier = RecordingNotifier::default();
        type_encrypt(&mut model, "1", "", "30");
        drive(
            &mut model,
            Msg::Encrypt(EncryptMsg::FilePicked(Some(upload))),
            &services,
            &mut notifier,
        );
        drive(&mut model, Msg::Encrypt(EncryptMsg::Submit), &services, &mut notifier);

        let calls = api.encrypt_calls.lock().unwrap();
        assert!(matches!(
            calls[0].parts().iter().find(|(n, _)| *n == "file"),
            Some((_, FormValue::File(f))) if f.path == path
        ));
        assert!(model.encrypt.file().is_none(), "file cleared after success");
    }

    #[test]
    fn trigger_stays_locked_until_the_response_arrives() {
        let mut model = AppModel::default();
        let mut notifier = RecordingNotifier::default();
        type_encrypt(&mut model, "1234", "hello", "60");

        let mut cmds = Vec::new();
        update(&mut model, Msg::Encrypt(EncryptMsg::Submit), &mut cmds, &mut notifier);
        update(&mut model, Msg::Encrypt(EncryptMsg::Submit), &mut cmds, &mut notifier);
        assert_eq!(cmds.len(), 1);
        assert!(model.encrypt.state().is_busy());

        // The other workflow is unaffected while encrypt is in flight.
        type_decrypt(&mut model, "abc123", "1234");
        update(&mut model, Msg::Decrypt(DecryptMsg::Submit), &mut cmds, &mut notifier);
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[1], Command::Decrypt(_)));
    }

    #[test]
    fn decrypt_scenario_shows_text_only() {
        let tmp = TempDir::new().unwrap();
        let api = Arc::new(FakeService {
            decrypt_reply: Some(Ok(DecryptResult::new(Some("hello".into()), None, None))),
            ..Default::default()
        });
        let services = services(api.clone(), tmp.path());
        let mut model = AppModel::default();
        let mut notifier = RecordingNotifier::default();

        type_decrypt(&mut model, "abc123", "1234");
        let issued = drive(&mut model, Msg::Decrypt(DecryptMsg::Submit), &services, &mut notifier);

        assert_eq!(issued, 1);
        assert_eq!(
            api.decrypt_calls.lock().unwrap().as_slice(),
            &[DecryptBody {
                key: "abc123".into(),
                pin: "1234".into()
            }]
        );
        let result = model.decrypt.result().expect("result shown");
        assert_eq!(result.sections(), vec![DecryptSection::Text("hello")]);
    }

    #[test]
    fn decrypt_failure_surfaces_server_message_and_keeps_inputs() {
        let tmp = TempDir::new().unwrap();
        let api = Arc::new(FakeService {
            decrypt_reply: Some(Err(ServiceError::Server {
                status: 400,
                message: Some("Invalid PIN".into()),
            })),
            ..Default::default()
        });
        let services = services(api, tmp.path());
        let mut model = AppModel::default();
        let mut notifier = RecordingNotifier::default();

        type_decrypt(&mut model, "abc123", "1234");
        drive(&mut model, Msg::Decrypt(DecryptMsg::Submit), &services, &mut notifier);

        assert_eq!(
            notifier.last(),
            Some(&(NoticeKind::Error, "Invalid PIN".to_string()))
        );
        assert_eq!(model.decrypt.key(), "abc123");
        assert_eq!(model.decrypt.pin(), "1234");
        assert_eq!(model.decrypt.state(), SubmissionState::Failed);
    }

    #[test]
    fn download_writes_decoded_bytes_through_sink() {
        let tmp = TempDir::new().unwrap();
        let api = Arc::new(FakeService {
            decrypt_reply: Some(Ok(DecryptResult::new(
                None,
                Some("AAEC/w==".into()),
                Some("Expires in 42 minutes".into()),
            ))),
            ..Default::default()
        });
        let services = services(api, tmp.path());
        let mut model = AppModel::default();
        let mut notifier = RecordingNotifier::default();

        type_decrypt(&mut model, "abc123", "1234");
        drive(&mut model, Msg::Decrypt(DecryptMsg::Submit), &services, &mut notifier);
        let issued = drive(
            &mut model,
            Msg::Decrypt(DecryptMsg::DownloadRequested),
            &services,
            &mut notifier,
        );

        assert_eq!(issued, 1);
        let saved: PathBuf = tmp.path().join("decrypted_file.bin");
        assert_eq!(fs::read(&saved).unwrap(), vec![0x00, 0x01, 0x02, 0xff]);
        assert_eq!(notifier.last().map(|(k, _)| *k), Some(NoticeKind::Success));

        // Repeat downloads overwrite rather than accumulate.
        drive(
            &mut model,
            Msg::Decrypt(DecryptMsg::DownloadRequested),
            &services,
            &mut notifier,
        );
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn select_workflow_switches_view_without_touching_state() {
        let mut model = AppModel::default();
        let mut notifier = RecordingNotifier::default();
        type_encrypt(&mut model, "1234", "draft", "60");

        let mut cmds = Vec::new();
        update(&mut model, Msg::SelectWorkflow(Workflow::Decrypt), &mut cmds, &mut notifier);

        assert_eq!(model.workflow, Workflow::Decrypt);
        assert_eq!(model.encrypt.text(), "draft");
        assert!(cmds.is_empty());
    }

    #[test]
    fn upload_from_missing_path_fails() {
        let err = upload_from_path(Path::new("/nope/missing.bin")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read metadata"));
    }
}
