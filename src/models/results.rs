// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Results returned by the service for each workflow.

use serde_json::Number;

/// Outcome of a successful encrypt submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptResult {
    /// Redemption key to hand to the recipient.
    pub key: String,
    /// Lifetime granted by the service. Any JSON number is accepted.
    pub expiry_minutes: Number,
}

impl EncryptResult {
    /// Human-readable expiry, e.g. `60 minutes`. Whole floats print without a fraction.
    pub fn expiry_label(&self) -> String {
        let minutes = match (self.expiry_minutes.as_i64(), self.expiry_minutes.as_f64()) {
            (Some(whole), _) => whole.to_string(),
            (None, Some(float)) => float.to_string(),
            (None, None) => self.expiry_minutes.to_string(),
        };
        format!("{minutes} minutes")
    }
}

/// Outcome of a successful decrypt redemption. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecryptResult {
    pub decrypted_text: Option<String>,
    /// Base64 transport encoding of the stored file.
    pub decrypted_file: Option<String>,
    pub expiry_status: Option<String>,
}

/// One renderable block of a decrypt result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecryptSection<'a> {
    Text(&'a str),
    File,
    ExpiryStatus(&'a str),
}

impl DecryptResult {
    /// Build a result, treating empty strings from the service as absent.
    pub fn new(
        decrypted_text: Option<String>,
        decrypted_file: Option<String>,
        expiry_status: Option<String>,
    ) -> Self {
        Self {
            decrypted_text: non_empty(decrypted_text),
            decrypted_file: non_empty(decrypted_file),
            expiry_status: non_empty(expiry_status),
        }
    }

    /// Sections to render, in display order. Absent fields are skipped.
    pub fn sections(&self) -> Vec<DecryptSection<'_>> {
        let mut sections = Vec::with_capacity(3);
        if let Some(text) = self.decrypted_text.as_deref() {
            sections.push(DecryptSection::Text(text));
        }
        if self.decrypted_file.is_some() {
            sections.push(DecryptSection::File);
        }
        if let Some(status) = self.expiry_status.as_deref() {
            sections.push(DecryptSection::ExpiryStatus(status));
        }
        sections
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
