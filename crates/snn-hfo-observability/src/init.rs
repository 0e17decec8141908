// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization
//!
//! Installs a console subscriber filtered by the per-crate debug flags and, with the
//! `file-logging` feature, a JSON file layer inside a timestamped run folder.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, ObservabilityConfig};

/// Keeps logging alive; dropping it flushes file writers.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    started_at: DateTime<Utc>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Run folder holding the log files, if file logging is active
    pub fn log_dir(&self) -> Option<&std::path::Path> {
        self.log_dir.as_deref()
    }
}

/// Folder name for a run started at `started_at`: `run_YYYYmmdd_HHMMSS`
pub fn run_folder_name(started_at: DateTime<Utc>) -> String {
    format!("run_{}", started_at.format("%Y%m%d_%H%M%S"))
}

fn make_filter(filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter).map_err(|e| anyhow!("invalid log filter '{}': {}", filter, e))
}

/// Initialize logging
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags
/// * `config` - Default level, console format and optional log directory
///
/// # Errors
/// Fails if the filter string is malformed, the log folder cannot be created, or a
/// global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &ObservabilityConfig) -> Result<LoggingGuard> {
    let started_at = Utc::now();
    let filter = debug_flags.to_filter_string(&config.level);

    let mut layers = Vec::new();

    let console_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .with_filter(make_filter(&filter)?)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(make_filter(&filter)?)
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let mut file_guard = None;
    #[allow(unused_mut)]
    let mut log_dir = None;

    #[cfg(feature = "file-logging")]
    if let Some(base) = &config.log_dir {
        use anyhow::Context;

        let run_folder = base.join(run_folder_name(started_at));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        let appender = tracing_appender::rolling::never(&run_folder, "snn-hfo.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(make_filter(&filter)?)
                .boxed(),
        );
        file_guard = Some(guard);
        log_dir = Some(run_folder);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guard: file_guard,
        started_at,
        log_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_run_folder_name() {
        let started = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(run_folder_name(started), "run_20250307_090501");
    }

    #[test]
    fn test_invalid_level_is_reported() {
        let flags = CrateDebugFlags::default();
        let config = ObservabilityConfig::with_level("snn_hfo=loud");
        assert!(init_logging(&flags, &config).is_err());
    }
}
