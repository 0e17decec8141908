// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SNN-HFO Configuration System
//!
//! Type-safe run configuration for HFO detection with support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//! - Validation that collects every violation in one report
//!
//! ## Usage
//!
//! ```rust,no_run
//! use snn_hfo_config::{load_config, Configuration};
//!
//! let config = load_config(None, None).expect("Failed to load config");
//!
//! println!("Mode: {}", config.measurement_mode);
//! println!("Hidden neurons: {}", config.hidden_neuron_count);
//! ```
//!
//! Only `measurement_mode`, `hidden_neuron_count` and the `network` section are
//! consumed by the simulation core; everything else belongs to the runner.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod overrides;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};
pub use overrides::CustomOverrides;
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Re-export for convenience
pub use serde;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("measurement mode is outside valid range. Allowed values: iEEG, eCoG, scalp, instead got: {0}")]
    UnknownMeasurementMode(String),

    #[error("--intervals requires --patients with exactly one patient, but {patients} were specified")]
    IntervalsRequireSinglePatient { patients: usize },

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
