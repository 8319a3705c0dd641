// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Workflow views and overlays structured for MVU-style updates.

pub mod decrypt;
pub mod encrypt;
pub mod toasts;
