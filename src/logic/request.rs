// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Wire payloads for the two endpoints, built from already-validated form state.

use std::path::PathBuf;

use serde::Serialize;

/// File chosen for upload. The bytes stay on disk until the request is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    /// Display/file name sent with the part.
    pub name: String,
    pub size: u64,
}

/// Value of one multipart part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(UploadFile),
}

/// Ordered multipart body for `POST /encrypt`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptForm {
    parts: Vec<(&'static str, FormValue)>,
}

impl EncryptForm {
    #[cfg(test)]
    pub fn parts(&self) -> &[(&'static str, FormValue)] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<(&'static str, FormValue)> {
        self.parts
    }

    /// Text value of a named part, if present and textual.
    #[cfg(test)]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, v)| match v {
            FormValue::Text(t) if *n == name => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn file(&self) -> Option<&UploadFile> {
        self.parts.iter().find_map(|(_, v)| match v {
            FormValue::File(f) => Some(f),
            _ => None,
        })
    }
}

/// JSON body for `POST /decrypt`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecryptBody {
    pub key: String,
    pub pin: String,
}

/// Map the encrypt form onto `pin`, `data`, optional `file`, and `expiry_time` parts.
pub fn build_encrypt_form(
    pin: &str,
    data: &str,
    file: Option<&UploadFile>,
    expiry_minutes: u32,
) -> EncryptForm {
    let mut parts = vec![
        ("pin", FormValue::Text(pin.to_string())),
        ("data", FormValue::Text(data.to_string())),
    ];
    if let Some(file) = file {
        parts.push(("file", FormValue::File(file.clone())));
    }
    parts.push(("expiry_time", FormValue::Text(expiry_minutes.to_string())));
    EncryptForm { parts }
}

pub fn build_decrypt_body(key: &str, pin: &str) -> DecryptBody {
    DecryptBody {
        key: key.to_string(),
        pin: pin.to_string(),
    }
}
