// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types and validation helpers shared between UI and service logic.

pub mod notification;
pub mod presenter;
pub mod results;
pub mod submission;
pub mod validation;
