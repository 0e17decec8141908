// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `snn_hfo.toml`.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Default number of neurons in the hidden layer
pub const DEFAULT_HIDDEN_NEURON_COUNT: usize = 86;

/// Default dataset directory
pub const DEFAULT_DATA_PATH: &str = "data/";

/// How the recording was captured.
///
/// The mode decides which filtered bands feed the network: eCoG uses the fast
/// ripple band (250-500 Hz), scalp uses the ripple band (80-250 Hz), iEEG uses both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum MeasurementMode {
    Ieeg,
    Ecog,
    Scalp,
}

/// Filtered frequency band of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyBand {
    /// 80-250 Hz
    Ripple,
    /// 250-500 Hz
    FastRipple,
}

impl MeasurementMode {
    pub const ALL: [MeasurementMode; 3] = [Self::Ieeg, Self::Ecog, Self::Scalp];

    /// Bands consumed by this mode, in input-layer order
    pub fn bands(&self) -> &'static [FrequencyBand] {
        match self {
            Self::Ieeg => &[FrequencyBand::Ripple, FrequencyBand::FastRipple],
            Self::Ecog => &[FrequencyBand::FastRipple],
            Self::Scalp => &[FrequencyBand::Ripple],
        }
    }

    /// Input neurons needed for this mode: one up and one down neuron per band.
    pub fn input_neuron_count(&self) -> usize {
        match self {
            Self::Ieeg => 4,
            Self::Ecog => 2,
            Self::Scalp => 2,
        }
    }
}

impl Default for MeasurementMode {
    fn default() -> Self {
        Self::Ieeg
    }
}

impl fmt::Display for MeasurementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ieeg => "iEEG",
            Self::Ecog => "eCoG",
            Self::Scalp => "scalp",
        };
        f.write_str(name)
    }
}

impl FromStr for MeasurementMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "IEEG" => Ok(Self::Ieeg),
            "ECOG" => Ok(Self::Ecog),
            "SCALP" => Ok(Self::Scalp),
            _ => Err(ConfigError::UnknownMeasurementMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for MeasurementMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MeasurementMode> for String {
    fn from(mode: MeasurementMode) -> Self {
        mode.to_string()
    }
}

/// Per-channel plots that may be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelPlotKind {
    Raster,
    Detection,
}

/// Whole-run plots that may be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalPlotKind {
    Patient,
    PatientDebug,
}

impl ChannelPlotKind {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "RASTER" => Some(Self::Raster),
            "DETECTION" => Some(Self::Detection),
            _ => None,
        }
    }
}

impl TotalPlotKind {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "PATIENT" => Some(Self::Patient),
            "PATIENT_DEBUG" => Some(Self::PatientDebug),
            _ => None,
        }
    }
}

/// Plot selections, sorted into per-channel and whole-run kinds
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Plots {
    pub channel: Vec<ChannelPlotKind>,
    pub total: Vec<TotalPlotKind>,
}

impl Plots {
    /// Sort free-form plot names into kinds. Names matching neither kind are dropped.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            channel: names
                .iter()
                .filter_map(|n| ChannelPlotKind::from_name(n.as_ref()))
                .collect(),
            total: names
                .iter()
                .filter_map(|n| TotalPlotKind::from_name(n.as_ref()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty() && self.total.is_empty()
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Configuration {
    pub data_path: PathBuf,
    pub measurement_mode: MeasurementMode,
    pub hidden_neuron_count: usize,
    pub plots: Plots,
    pub network: NetworkConfig,
    pub detection: DetectionConfig,
    pub encoding: EncodingConfig,
    pub logging: LoggingConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            measurement_mode: MeasurementMode::default(),
            hidden_neuron_count: DEFAULT_HIDDEN_NEURON_COUNT,
            plots: Plots::default(),
            network: NetworkConfig::default(),
            detection: DetectionConfig::default(),
            encoding: EncodingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Simulation network configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Integration timestep in seconds
    pub dt: f64,
    /// Seed for synapse parameter generation
    pub seed: u64,
    pub neuron: NeuronConfig,
    pub synapse: SynapseConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            dt: 100e-6,
            seed: 42,
            neuron: NeuronConfig::default(),
            synapse: SynapseConfig::default(),
        }
    }
}

/// Hidden population neuron model
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuronConfig {
    /// Membrane time constant in seconds
    pub membrane_tau: f64,
    pub resting_potential: f64,
    pub reset_potential: f64,
    pub threshold: f64,
    /// Refractory period in seconds
    pub refractory_period: f64,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            membrane_tau: 0.02,
            resting_potential: 0.0,
            reset_potential: 0.0,
            threshold: 1.0,
            refractory_period: 0.001,
        }
    }
}

/// Input to hidden synapse generation ranges
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SynapseConfig {
    pub weight_min: f64,
    pub weight_max: f64,
    /// Smallest synaptic time constant in milliseconds
    pub tau_min_ms: f64,
    /// Largest synaptic time constant in milliseconds
    pub tau_max_ms: f64,
}

impl Default for SynapseConfig {
    fn default() -> Self {
        Self {
            weight_min: 3.0,
            weight_max: 6.0,
            tau_min_ms: 3.0,
            tau_max_ms: 6.0,
        }
    }
}

/// Event boundary detector windowing, in seconds
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub step_size: f64,
    pub window_size: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            step_size: 0.01,
            window_size: 0.05,
        }
    }
}

/// Delta-modulation spike encoder settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Multiplier applied to the baseline amplitude to obtain the threshold
    pub threshold_factor: f64,
    /// Length of the leading baseline segment in seconds
    pub baseline_duration: f64,
    /// Length of each baseline amplitude window in seconds
    pub baseline_window: f64,
    /// Minimum spacing between spikes of one train in seconds (0 = off)
    pub refractory_period: f64,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            threshold_factor: 0.5,
            baseline_duration: 1.0,
            baseline_window: 0.01,
            refractory_period: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_mode_parsing_is_case_insensitive() {
        assert_eq!("iEEG".parse::<MeasurementMode>().unwrap(), MeasurementMode::Ieeg);
        assert_eq!("ECOG".parse::<MeasurementMode>().unwrap(), MeasurementMode::Ecog);
        assert_eq!("scalp".parse::<MeasurementMode>().unwrap(), MeasurementMode::Scalp);
    }

    #[test]
    fn test_unknown_measurement_mode_is_rejected() {
        let result = "meg".parse::<MeasurementMode>();
        assert!(matches!(result, Err(ConfigError::UnknownMeasurementMode(ref m)) if m == "meg"));
    }

    #[test]
    fn test_input_count_matches_bands() {
        for mode in MeasurementMode::ALL {
            assert_eq!(mode.input_neuron_count(), 2 * mode.bands().len());
        }
        assert_eq!(MeasurementMode::Ieeg.input_neuron_count(), 4);
        assert_eq!(MeasurementMode::Ecog.input_neuron_count(), 2);
        assert_eq!(MeasurementMode::Scalp.input_neuron_count(), 2);
    }

    #[test]
    fn test_plots_from_names_drops_unknown() {
        let plots = Plots::from_names(&["raster", "patient", "nonsense", "DETECTION"]);
        assert_eq!(plots.channel, vec![ChannelPlotKind::Raster, ChannelPlotKind::Detection]);
        assert_eq!(plots.total, vec![TotalPlotKind::Patient]);
    }

    #[test]
    fn test_mode_round_trips_through_toml() {
        #[derive(Deserialize, Serialize)]
        struct Wrapper {
            mode: MeasurementMode,
        }
        let parsed: Wrapper = toml::from_str("mode = \"eCoG\"").unwrap();
        assert_eq!(parsed.mode, MeasurementMode::Ecog);

        let bad: Result<Wrapper, _> = toml::from_str("mode = \"eeg\"");
        assert!(bad.is_err());
    }
}
