// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Remote encryption service: the trait the workflows talk to and its HTTP implementation.

use reqwest::StatusCode;
use reqwest::blocking::{Client, multipart};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;
use crate::logic::request::{DecryptBody, EncryptForm, FormValue};
use crate::models::results::{DecryptResult, EncryptResult};

/// Failures after a submission has been accepted by the client.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx response; `message` is the service's `error` field when it sent one.
    #[error("Server error (status {status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server {
        status: u16,
        message: Option<String>,
    },
    /// 2xx response whose body does not match the expected shape.
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    /// The selected upload could not be read from disk.
    #[error("Failed to read upload: {0}")]
    Upload(String),
}

impl ServiceError {
    /// Text for the error notification, preferring what the server said.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ServiceError::Upload(_) => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Network(err.to_string())
    }
}

/// The two calls the client makes. Implementations block; callers run them off the UI thread.
pub trait EncryptionService: Send + Sync {
    fn encrypt(&self, form: EncryptForm) -> Result<EncryptResult, ServiceError>;
    fn decrypt(&self, body: &DecryptBody) -> Result<DecryptResult, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct EncryptResponse {
    key: String,
    expiry_time: serde_json::Number,
}

#[derive(Debug, Deserialize)]
struct DecryptResponse {
    decrypted_text: Option<String>,
    decrypted_file: Option<String>,
    expiry_time_status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// `reqwest`-backed service talking to `{base}/encrypt` and `{base}/decrypt`.
pub struct HttpEncryptionService {
    client: Client,
    base_url: Url,
}

impl HttpEncryptionService {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path)
            .map_err(|e| ServiceError::Network(format!("invalid endpoint {path}: {e}")))
    }
}

impl EncryptionService for HttpEncryptionService {
    fn encrypt(&self, form: EncryptForm) -> Result<EncryptResult, ServiceError> {
        let url = self.endpoint("encrypt")?;
        let has_file = form.file().is_some();
        let body = to_multipart(form)?;

        tracing::debug!(%url, has_file, "Sending encrypt request");
        let response = self.client.post(url).multipart(body).send()?;
        let status = response.status();
        let text = response.text()?;

        let parsed: EncryptResponse = parse_response(status, &text)?;
        Ok(EncryptResult {
            key: parsed.key,
            expiry_minutes: parsed.expiry_time,
        })
    }

    fn decrypt(&self, body: &DecryptBody) -> Result<DecryptResult, ServiceError> {
        let url = self.endpoint("decrypt")?;

        tracing::debug!(%url, "Sending decrypt request");
        let response = self.client.post(url).json(body).send()?;
        let status = response.status();
        let text = response.text()?;

        let parsed: DecryptResponse = parse_response(status, &text)?;
        Ok(DecryptResult::new(
            parsed.decrypted_text,
            parsed.decrypted_file,
            parsed.expiry_time_status,
        ))
    }
}

/// Convert the ordered form into a multipart body, streaming the file part from disk.
fn to_multipart(form: EncryptForm) -> Result<multipart::Form, ServiceError> {
    let mut body = multipart::Form::new();
    for (name, value) in form.into_parts() {
        body = match value {
            FormValue::Text(text) => body.text(name, text),
            FormValue::File(upload) => {
                let part = multipart::Part::file(&upload.path)
                    .map_err(|e| ServiceError::Upload(format!("{}: {e}", upload.name)))?
                    .file_name(upload.name);
                body.part(name, part)
            }
        };
    }
    Ok(body)
}

/// Interpret a response body according to its status.
fn parse_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ServiceError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty());
        tracing::warn!(status = status.as_u16(), ?message, "Service rejected request");
        return Err(ServiceError::Server {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(body).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
}
