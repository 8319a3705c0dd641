// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Form validation for both workflows, run before any request is built.

use thiserror::Error;

/// Shortest accepted expiry (30 minutes).
pub const MIN_EXPIRY_MINUTES: i64 = 30;
/// Longest accepted expiry (48 hours).
pub const MAX_EXPIRY_MINUTES: i64 = 2880;
/// Upload size ceiling for the optional file part.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Client-side validation failures. They block submission and are recoverable by editing the form.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{fields} are required.")]
    MissingField { fields: &'static str },
    #[error("Expiry time must be between 30 and 2880 minutes.")]
    OutOfRange,
    #[error("File size exceeds the 10MB limit.")]
    FileTooLarge,
}

/// Check the encrypt form and return the parsed expiry in minutes.
///
/// `expiry` is the raw text of the expiry field; `file_size` is the byte size
/// of the selected upload, if any. Checks run in order (required fields,
/// expiry range, file size) and the first failure wins.
pub fn validate_encrypt_inputs(
    pin: &str,
    expiry: &str,
    file_size: Option<u64>,
) -> Result<u32, ValidationError> {
    let expiry = expiry.trim();
    if pin.is_empty() || expiry.is_empty() {
        return Err(ValidationError::MissingField {
            fields: "PIN and Expiry Time",
        });
    }

    let minutes = expiry
        .parse::<i64>()
        .map_err(|_| ValidationError::OutOfRange)?;
    if !(MIN_EXPIRY_MINUTES..=MAX_EXPIRY_MINUTES).contains(&minutes) {
        return Err(ValidationError::OutOfRange);
    }

    if file_size.is_some_and(|size| size > MAX_FILE_BYTES) {
        return Err(ValidationError::FileTooLarge);
    }

    // Range check above bounds the value well inside u32.
    Ok(minutes as u32)
}

/// Check that both redemption fields are filled in.
pub fn validate_decrypt_inputs(key: &str, pin: &str) -> Result<(), ValidationError> {
    if key.is_empty() || pin.is_empty() {
        return Err(ValidationError::MissingField {
            fields: "Key and PIN",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_inclusive() {
        assert_eq!(validate_encrypt_inputs("1234", "30", None), Ok(30));
        assert_eq!(validate_encrypt_inputs("1234", "2880", None), Ok(2880));
        assert_eq!(validate_encrypt_inputs("1234", " 60 ", None), Ok(60));
    }

    #[test]
    fn rejects_expiry_outside_range() {
        for raw in ["29", "10", "0", "-30", "2881", "100000"] {
            assert_eq!(
                validate_encrypt_inputs("1234", raw, None),
                Err(ValidationError::OutOfRange),
                "expiry {raw} should be rejected"
            );
        }
    }

    #[test]
    fn non_numeric_expiry_is_out_of_range() {
        assert_eq!(
            validate_encrypt_inputs("1234", "an hour", None),
            Err(ValidationError::OutOfRange)
        );
        assert_eq!(
            validate_encrypt_inputs("1234", "60.5", None),
            Err(ValidationError::OutOfRange)
        );
    }

    #[test]
    fn missing_pin_or_expiry_is_reported_first() {
        let missing = Err(ValidationError::MissingField {
            fields: "PIN and Expiry Time",
        });
        assert_eq!(validate_encrypt_inputs("", "60", None), missing);
        assert_eq!(validate_encrypt_inputs("1234", "   ", None), missing);
        // Missing fields win over an oversized file.
        assert_eq!(
            validate_encrypt_inputs("", "", Some(MAX_FILE_BYTES + 1)),
            missing
        );
    }

    #[test]
    fn file_size_limit_is_inclusive() {
        assert_eq!(
            validate_encrypt_inputs("1234", "60", Some(MAX_FILE_BYTES)),
            Ok(60)
        );
        assert_eq!(
            validate_encrypt_inputs("1234", "60", Some(MAX_FILE_BYTES + 1)),
            Err(ValidationError::FileTooLarge)
        );
    }

    #[test]
    fn messages_match_user_facing_copy() {
        assert_eq!(
            ValidationError::MissingField {
                fields: "PIN and Expiry Time"
            }
            .to_string(),
            "PIN and Expiry Time are required."
        );
        assert_eq!(
            ValidationError::OutOfRange.to_string(),
            "Expiry time must be between 30 and 2880 minutes."
        );
        assert_eq!(
            ValidationError::FileTooLarge.to_string(),
            "File size exceeds the 10MB limit."
        );
    }

    #[test]
    fn decrypt_requires_key_and_pin() {
        assert!(validate_decrypt_inputs("abc123", "1234").is_ok());
        assert_eq!(
            validate_decrypt_inputs("", "1234").unwrap_err().to_string(),
            "Key and PIN are required."
        );
        assert!(validate_decrypt_inputs("abc123", "").is_err());
    }
}
