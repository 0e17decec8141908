// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SNN-HFO Runner
//!
//! Loads a recording dataset, drives every selected channel through the
//! encoding, simulation and detection stages, and aggregates the results.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod summary;

pub use dataset::{Channel, Dataset, Interval, Patient};
pub use error::{Result, RunnerError};
pub use pipeline::{ChannelDetection, HfoPipeline};
pub use summary::{summarize_by_label, LabelSummary, RunReport};
