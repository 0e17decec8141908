// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # HFO Pipeline
//!
//! Per channel: encode the mode's bands into up/down spikes, run them through
//! the shared `SimulationCore`, and detect events in the hidden-layer response.
//!
//! One pipeline owns one core for the whole run; channels are processed strictly
//! one after another.

use serde::{Deserialize, Serialize};
use snn_hfo_config::{ChannelPlotKind, Configuration, CustomOverrides};
use snn_hfo_detection::{detect_events, DetectionResult, WindowConfig};
use snn_hfo_npu_burst_engine::SimulationCore;
use snn_hfo_npu_neural::{find_threshold, BandSpikes, DeltaEncoder, SynapseParameterSource};
use tracing::{debug, info};

use crate::dataset::{Channel, Dataset, Patient};
use crate::error::{Result, RunnerError};

/// Detection outcome of one channel of one interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDetection {
    pub patient: u32,
    /// 1-based
    pub interval: usize,
    /// 1-based
    pub channel: usize,
    pub label: String,
    /// Simulated trial length in seconds
    pub duration: f64,
    pub input_spike_count: usize,
    pub hidden_spike_count: usize,
    /// Events per second
    pub rate: f64,
    pub result: DetectionResult,
    /// Hidden-layer spike times, kept when a raster plot was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_spikes: Option<Vec<f64>>,
}

impl ChannelDetection {
    pub fn rate_per_minute(&self) -> f64 {
        self.rate * 60.0
    }
}

pub struct HfoPipeline {
    configuration: Configuration,
    core: SimulationCore,
    window: WindowConfig,
}

impl HfoPipeline {
    /// Validates the window configuration once; an invalid one fails the whole run.
    pub fn new(configuration: Configuration) -> Result<Self> {
        let window = WindowConfig::from_config(&configuration.detection)?;
        let core = SimulationCore::from_config(&configuration)?;
        Ok(Self {
            configuration,
            core,
            window,
        })
    }

    pub fn with_parameter_source(
        configuration: Configuration,
        parameter_source: Box<dyn SynapseParameterSource>,
    ) -> Result<Self> {
        let window = WindowConfig::from_config(&configuration.detection)?;
        let core = SimulationCore::new(&configuration, parameter_source)?;
        Ok(Self {
            configuration,
            core,
            window,
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn core(&self) -> &SimulationCore {
        &self.core
    }

    /// Encode the bands the measurement mode consumes, in input-layer order.
    /// A flat baseline yields no spikes for that band.
    pub fn encode_channel(&self, channel: &Channel, times: &[f64]) -> Result<Vec<BandSpikes>> {
        let encoding = &self.configuration.encoding;
        let samples = times.len();

        self.configuration
            .measurement_mode
            .bands()
            .iter()
            .map(|&band| {
                let signal = &channel.require_band(band)?[..samples];
                let threshold = find_threshold(
                    signal,
                    times,
                    encoding.baseline_duration,
                    encoding.baseline_window,
                    encoding.threshold_factor,
                )?;
                if threshold <= 0.0 {
                    debug!("[PIPELINE] '{}' {:?}: flat baseline, no spikes", channel.label, band);
                    return Ok(BandSpikes::default());
                }
                let encoder = DeltaEncoder::new(threshold, encoding.refractory_period)?;
                Ok(encoder.encode(signal, times)?)
            })
            .collect()
    }

    /// Run one channel through encoding, simulation and detection.
    ///
    /// Time is measured from the channel's first sample. `duration` truncates
    /// the channel; without it the whole channel is used.
    pub fn process_channel(
        &mut self,
        patient: u32,
        interval: usize,
        channel_number: usize,
        channel: &Channel,
        duration: Option<f64>,
    ) -> Result<ChannelDetection> {
        let (times, trial_duration) = trial_times(&channel.time, duration)
            .ok_or_else(|| RunnerError::EmptyChannel(channel.label.clone()))?;

        let bands = self.encode_channel(channel, &times)?;
        let input_spike_count = bands.iter().map(BandSpikes::spike_count).sum();

        let monitor = self.core.invoke(&bands, trial_duration)?;
        let hidden_spikes = monitor.times().to_vec();
        let result = detect_events(&hidden_spikes, trial_duration, &times, &self.window)?;

        let plots = &self.configuration.plots.channel;
        if plots.contains(&ChannelPlotKind::Detection) {
            info!(
                "[PIPELINE] patient {} interval {} '{}': intervals {:?}",
                patient, interval, channel.label, result.event_intervals
            );
        }

        Ok(ChannelDetection {
            patient,
            interval,
            channel: channel_number,
            label: channel.label.clone(),
            duration: trial_duration,
            input_spike_count,
            hidden_spike_count: hidden_spikes.len(),
            rate: result.event_rate(trial_duration),
            hidden_spikes: plots.contains(&ChannelPlotKind::Raster).then_some(hidden_spikes),
            result,
        })
    }

    /// Process every selected patient, interval and channel, in dataset order.
    pub fn run(&mut self, dataset: &Dataset, overrides: &CustomOverrides) -> Result<Vec<ChannelDetection>> {
        overrides.validate()?;

        let patients: Vec<&Patient> = match &overrides.patients {
            Some(ids) => ids.iter().map(|&id| dataset.patient(id)).collect::<Result<_>>()?,
            None => dataset.patients.iter().collect(),
        };

        let mut detections = Vec::new();
        for patient in patients {
            check_selection(&overrides.intervals, patient.intervals.len(), |interval, available| {
                RunnerError::IntervalOutOfRange {
                    patient: patient.id,
                    interval,
                    available,
                }
            })?;
            info!(
                "[PIPELINE] Patient {}: {} intervals",
                patient.id,
                patient.intervals.len()
            );

            for (interval_index, interval) in patient.intervals.iter().enumerate() {
                let interval_number = interval_index + 1;
                if !overrides.includes_interval(interval_number) {
                    continue;
                }
                check_selection(&overrides.channels, interval.channels.len(), |channel, available| {
                    RunnerError::ChannelOutOfRange { channel, available }
                })?;

                for (channel_index, channel) in interval.channels.iter().enumerate() {
                    let channel_number = channel_index + 1;
                    if !overrides.includes_channel(channel_number) {
                        continue;
                    }
                    let detection = self.process_channel(
                        patient.id,
                        interval_number,
                        channel_number,
                        channel,
                        overrides.duration,
                    )?;
                    debug!(
                        "[PIPELINE] patient {} interval {} channel {} '{}': {} events ({:.2}/min)",
                        patient.id,
                        interval_number,
                        channel_number,
                        detection.label,
                        detection.result.total_event_count,
                        detection.rate_per_minute()
                    );
                    detections.push(detection);
                }
            }
        }

        info!(
            "[PIPELINE] Processed {} channels in {} simulations",
            detections.len(),
            self.core.invocations()
        );
        Ok(detections)
    }
}

/// Sample times relative to the first sample, cut to `duration`, and the trial length.
/// `None` when fewer than two samples remain.
fn trial_times(time: &[f64], duration: Option<f64>) -> Option<(Vec<f64>, f64)> {
    let start = *time.first()?;
    let relative: Vec<f64> = time.iter().map(|t| t - start).collect();
    let samples = match duration {
        Some(limit) => relative.partition_point(|&t| t < limit),
        None => relative.len(),
    };
    if samples < 2 {
        return None;
    }

    let mut times = relative;
    times.truncate(samples);
    let period = times[1] - times[0];
    let natural = times[samples - 1] + period;
    let trial_duration = duration.map_or(natural, |limit| limit.min(natural));
    Some((times, trial_duration))
}

/// Every selected 1-based index must exist
fn check_selection(
    selection: &Option<Vec<usize>>,
    available: usize,
    error: impl Fn(usize, usize) -> RunnerError,
) -> Result<()> {
    if let Some(&index) = selection.iter().flatten().find(|&&index| index > available) {
        return Err(error(index, available));
    }
    Ok(())
}
