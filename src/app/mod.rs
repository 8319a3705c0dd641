// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring configuration and services into the egui/eframe UI.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use eframe::egui;
use egui_phosphor::Variant;

use crate::config::ClientConfig;
use crate::logic::service::HttpEncryptionService;
use crate::logic::sink::{DialogFileSink, DirectoryFileSink, FileSink};
use crate::mvu::Services;
use crate::ui::SealdropApp;

/// Build the service capabilities described by `config`.
pub fn services_from_config(config: &ClientConfig) -> Result<Services> {
    let api = HttpEncryptionService::new(config)?;
    let files: Arc<dyn FileSink> = match &config.download_dir {
        Some(dir) => Arc::new(DirectoryFileSink::new(dir)),
        None => Arc::new(DialogFileSink),
    };
    Ok(Services {
        api: Arc::new(api),
        files,
    })
}

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: ClientConfig) -> Result<()> {
    let services = services_from_config(&config)?;
    tracing::info!(api = %config.api_base_url, "Starting sealdrop");

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "sealdrop",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(SealdropApp::new(services)))
        }),
    )
    .map_err(|err| anyhow!("UI event loop failed: {err}"))
}
