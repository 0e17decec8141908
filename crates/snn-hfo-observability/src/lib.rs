// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # snn-hfo-observability
//!
//! Logging setup shared by every SNN-HFO binary, with per-crate debug flag support.
//!
//! Library crates only emit `tracing` events; binaries call [`init_logging`] once
//! at startup.
//!
//! ## Features
//! - `file-logging`: JSON log files in a timestamped run folder (desktop only)

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Workspace crate names accepted by `--debug-{crate}`
pub const KNOWN_CRATES: &[&str] = &[
    "snn-hfo-config",
    "snn-hfo-npu-neural",
    "snn-hfo-npu-burst-engine",
    "snn-hfo-detection",
    "snn-hfo-runner",
];
