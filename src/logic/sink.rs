// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Destinations for decrypted downloads.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Capability to persist downloaded bytes under a suggested file name.
pub trait FileSink: Send + Sync {
    /// Write `bytes`, returning where they landed, or `None` if the user backed out.
    fn save(&self, bytes: &[u8], file_name: &str) -> Result<Option<PathBuf>>;
}

/// Asks the user for a location with a native save dialog.
#[derive(Default)]
pub struct DialogFileSink;

impl FileSink for DialogFileSink {
    fn save(&self, bytes: &[u8], file_name: &str) -> Result<Option<PathBuf>> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Save decrypted file")
            .set_file_name(file_name)
            .save_file()
        else {
            return Ok(None);
        };
        write_bytes(&path, bytes)?;
        Ok(Some(path))
    }
}

/// Writes straight into a fixed directory without prompting.
pub struct DirectoryFileSink {
    dir: PathBuf,
}

impl DirectoryFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirectoryFileSink {
    fn save(&self, bytes: &[u8], file_name: &str) -> Result<Option<PathBuf>> {
        let path = self.dir.join(file_name);
        write_bytes(&path, bytes)?;
        Ok(Some(path))
    }
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
