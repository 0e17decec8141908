// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{info, warn};

use snn_hfo_config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config, validate_config,
    Configuration, CustomOverrides, Plots,
};
use snn_hfo_observability::{debug_flags_help, init_logging, parse_debug_flags, ObservabilityConfig};
use snn_hfo_runner::{Dataset, HfoPipeline, RunReport};

/// SNN-HFO detector - spiking neural network detection of high frequency oscillations
#[derive(Parser, Debug)]
#[command(name = "snn-hfo-detect", version, author, long_about = None, after_help = debug_flags_help())]
struct Args {
    /// Measurement mode: iEEG, eCoG or scalp
    mode: String,

    /// Dataset file or directory of dataset files
    #[arg(long)]
    data_path: Option<PathBuf>,

    /// Hidden neuron count [default: 86]
    #[arg(long)]
    hidden_neurons: Option<usize>,

    /// Seconds of each interval to process
    #[arg(long)]
    duration: Option<f64>,

    /// Channels to process, 1-based
    #[arg(long, num_args = 1..)]
    channels: Option<Vec<usize>>,

    /// Patients to process
    #[arg(long, num_args = 1..)]
    patients: Option<Vec<u32>>,

    /// Intervals to process, 1-based; requires exactly one patient
    #[arg(long, num_args = 1..)]
    intervals: Option<Vec<usize>>,

    /// Views to produce: raster, detection, patient, patient_debug
    #[arg(long, num_args = 1..)]
    plot: Vec<String>,

    /// Configuration file (TOML); searched for when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn cli_overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        overrides.insert("mode".to_string(), self.mode.clone());
        if let Some(path) = &self.data_path {
            overrides.insert("data_path".to_string(), path.display().to_string());
        }
        if let Some(count) = self.hidden_neurons {
            overrides.insert("hidden_neurons".to_string(), count.to_string());
        }
        overrides
    }

    fn custom_overrides(&self) -> CustomOverrides {
        CustomOverrides {
            duration: self.duration,
            channels: self.channels.clone(),
            patients: self.patients.clone(),
            intervals: self.intervals.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // --debug-* flags belong to the logging setup, not to clap
    let args = Args::parse_from(std::env::args().filter(|arg| !arg.starts_with("--debug-")));

    if args.intervals.is_some() && args.patients.as_ref().map_or(0, Vec::len) != 1 {
        Args::command()
            .error(
                ErrorKind::ArgumentConflict,
                "--intervals requires --patients with exactly one patient",
            )
            .exit();
    }

    let mut configuration = load_configuration(&args)?;
    if !args.plot.is_empty() {
        configuration.plots = Plots::from_names(&args.plot);
    }
    validate_config(&configuration).context("invalid configuration")?;

    let debug_flags = parse_debug_flags();
    let _logging = init_logging(
        &debug_flags,
        &ObservabilityConfig::with_level(configuration.logging.level.clone()),
    )?;

    info!("[SNN-HFO] snn-hfo-detect v{}", snn_hfo_runner::VERSION);
    for name in &debug_flags.unknown {
        warn!("[SNN-HFO] --debug-{} matches no crate", name);
    }
    info!(
        "[SNN-HFO] Mode {}, {} hidden neurons, data from {}",
        configuration.measurement_mode,
        configuration.hidden_neuron_count,
        configuration.data_path.display()
    );

    let dataset = Dataset::load(&configuration.data_path)
        .with_context(|| format!("failed to load dataset from {}", configuration.data_path.display()))?;

    let overrides = args.custom_overrides();
    let mut pipeline = HfoPipeline::new(configuration.clone())?;
    let detections = pipeline.run(&dataset, &overrides)?;

    let report = RunReport::new(&configuration, detections);
    report.log_requested_views(&configuration.plots.total);
    info!(
        "[SNN-HFO] {} events across {} channels",
        report.total_events(),
        report.detections.len()
    );

    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write report to {}", path.display()))?;
            info!("[SNN-HFO] Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// File (explicit or discovered) < environment < command line
fn load_configuration(args: &Args) -> anyhow::Result<Configuration> {
    let cli = args.cli_overrides();

    if let Some(path) = &args.config {
        return load_config(Some(path.as_path()), Some(&cli))
            .with_context(|| format!("failed to load configuration from {}", path.display()));
    }

    match find_config_file() {
        Ok(path) => load_config(Some(path.as_path()), Some(&cli))
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        // An explicitly named file must exist
        Err(err) if std::env::var_os("SNN_HFO_CONFIG_PATH").is_some() => Err(err.into()),
        Err(_) => {
            let mut configuration = Configuration::default();
            apply_environment_overrides(&mut configuration)?;
            apply_cli_overrides(&mut configuration, &cli)?;
            Ok(configuration)
        }
    }
}
