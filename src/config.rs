// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Runtime configuration read from the environment (and optional `.env` files).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use url::Url;

/// Service used when `SEALDROP_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://encryption-bs0w.onrender.com";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are resolved against (always ends in `/`).
    pub api_base_url: Url,
    /// Overall request timeout; `None` keeps the HTTP client's default.
    pub request_timeout: Option<Duration>,
    /// Save downloads here without prompting, instead of opening a save dialog.
    pub download_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        load_dotenv_layers();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("SEALDROP_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = parse_base_url(raw_url.trim())?;

        let request_timeout = match lookup("SEALDROP_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("invalid SEALDROP_HTTP_TIMEOUT_SECS: {raw:?}"))?;
                if secs == 0 {
                    bail!("SEALDROP_HTTP_TIMEOUT_SECS must be greater than zero");
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let download_dir = lookup("SEALDROP_DOWNLOAD_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_base_url,
            request_timeout,
            download_dir,
        })
    }
}

/// Parse an http(s) base URL and force a trailing slash so relative joins append.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).with_context(|| format!("invalid SEALDROP_API_URL: {raw:?}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("SEALDROP_API_URL must use http or https, got {:?}", url.scheme());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn load_dotenv_layers() {
    for path in [".env", "../.env"] {
        let _ = dotenvy::from_path(path);
    }
}
