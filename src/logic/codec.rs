// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Transport decoding for files returned by the decrypt endpoint.
//!
//! The service ships file contents as standard-alphabet base64 inside JSON.
//! Decoding is lenient the way browser `atob` is: ASCII whitespace is ignored
//! trailing padding is optional and non-zero trailing bits are tolerated.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

/// Name offered for every decrypted download; the service does not report one.
pub const DEFAULT_DOWNLOAD_NAME: &str = "decrypted_file.bin";
/// Downloads are always treated as opaque bytes.
pub const OCTET_STREAM: &str = "application/octet-stream";

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// The payload was not valid base64.
#[derive(Debug, Error)]
#[error("invalid transport encoding: {0}")]
pub struct DecodeError(#[from] base64::DecodeError);

/// Decoded file ready to hand to a [`crate::logic::sink::FileSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadBlob {
    pub bytes: Vec<u8>,
    pub file_name: &'static str,
    pub mime: &'static str,
}

/// Decode a base64 payload back to raw bytes.
pub fn decode_transport_binary(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(LENIENT.decode(compact)?)
}

/// Decode a payload and wrap it as a generic download.
pub fn decode_download(encoded: &str) -> Result<DownloadBlob, DecodeError> {
    Ok(DownloadBlob {
        bytes: decode_transport_binary(encoded)?,
        file_name: DEFAULT_DOWNLOAD_NAME,
        mime: OCTET_STREAM,
    })
}
