// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Service-facing logic: request construction, transport, and download handling.

pub mod codec;
pub mod request;
pub mod service;
pub mod sink;
