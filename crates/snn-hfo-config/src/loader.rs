// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, Configuration};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file searched for on disk
pub const CONFIG_FILE_NAME: &str = "snn_hfo.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `SNN_HFO_CONFIG_PATH` environment variable
/// 2. Current working directory: `./snn_hfo.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("SNN_HFO_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by SNN_HFO_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "configuration file '{}' not found in any of these locations:\n{}\n\nSet SNN_HFO_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML (including an
/// unknown measurement mode), or an override cannot be parsed
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<Configuration> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: Configuration = toml::from_str(&content)?;

    apply_environment_overrides(&mut config)?;

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SNN_HFO_DATA_PATH` -> `data_path`
/// - `SNN_HFO_MODE` -> `measurement_mode`
/// - `SNN_HFO_HIDDEN_NEURONS` -> `hidden_neuron_count`
/// - `SNN_HFO_LOG_LEVEL` -> `logging.level`
///
/// An unknown measurement mode is a configuration error, not a silent fallback.
pub fn apply_environment_overrides(config: &mut Configuration) -> ConfigResult<()> {
    if let Ok(value) = env::var("SNN_HFO_DATA_PATH") {
        config.data_path = PathBuf::from(value);
    }
    if let Ok(value) = env::var("SNN_HFO_MODE") {
        config.measurement_mode = value.parse()?;
    }
    if let Ok(value) = env::var("SNN_HFO_HIDDEN_NEURONS") {
        if let Ok(count) = value.parse::<usize>() {
            config.hidden_neuron_count = count;
        }
    }
    if let Ok(value) = env::var("SNN_HFO_LOG_LEVEL") {
        config.logging.level = value;
    }
    Ok(())
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Map of CLI arguments (e.g., `{"mode": "scalp", "hidden_neurons": "64"}`)
pub fn apply_cli_overrides(
    config: &mut Configuration,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    if let Some(value) = cli_args.get("data_path") {
        config.data_path = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("mode") {
        config.measurement_mode = value.parse()?;
    }
    if let Some(value) = cli_args.get("hidden_neurons") {
        config.hidden_neuron_count = value.parse::<usize>().map_err(|_| {
            ConfigError::InvalidValue(format!("hidden_neurons must be a positive integer, got '{}'", value))
        })?;
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    Ok(())
}
