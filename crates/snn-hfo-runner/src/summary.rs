// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-label aggregation of channel detections and the run report

use serde::{Deserialize, Serialize};
use snn_hfo_config::{Configuration, TotalPlotKind};
use tracing::{debug, info};

use crate::pipeline::ChannelDetection;

/// Event rate of one channel label across all processed intervals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSummary {
    pub label: String,
    pub mean_rate_per_minute: f64,
    /// Population standard deviation; only defined over more than one interval
    pub std_rate_per_minute: Option<f64>,
    pub intervals: usize,
}

/// Group detections by channel label, in order of first appearance
pub fn summarize_by_label(detections: &[ChannelDetection]) -> Vec<LabelSummary> {
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
    for detection in detections {
        let rate = detection.rate_per_minute();
        match groups.iter_mut().find(|(label, _)| *label == detection.label) {
            Some((_, rates)) => rates.push(rate),
            None => groups.push((detection.label.as_str(), vec![rate])),
        }
    }

    groups
        .into_iter()
        .map(|(label, rates)| {
            let n = rates.len() as f64;
            let mean = rates.iter().sum::<f64>() / n;
            let std = (rates.len() > 1)
                .then(|| (rates.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n).sqrt());
            LabelSummary {
                label: label.to_string(),
                mean_rate_per_minute: mean,
                std_rate_per_minute: std,
                intervals: rates.len(),
            }
        })
        .collect()
}

/// Everything a run produced, written out as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub version: String,
    pub measurement_mode: String,
    pub hidden_neuron_count: usize,
    pub detections: Vec<ChannelDetection>,
    pub summary: Vec<LabelSummary>,
}

impl RunReport {
    pub fn new(configuration: &Configuration, detections: Vec<ChannelDetection>) -> Self {
        let summary = summarize_by_label(&detections);
        Self {
            version: crate::VERSION.to_string(),
            measurement_mode: configuration.measurement_mode.to_string(),
            hidden_neuron_count: configuration.hidden_neuron_count,
            detections,
            summary,
        }
    }

    pub fn total_events(&self) -> usize {
        self.detections.iter().map(|d| d.result.total_event_count).sum()
    }

    /// Emit the whole-run views that were requested
    pub fn log_requested_views(&self, plots: &[TotalPlotKind]) {
        if plots.contains(&TotalPlotKind::Patient) {
            for entry in &self.summary {
                match entry.std_rate_per_minute {
                    Some(std) => info!(
                        "[SUMMARY] {}: {:.2} ± {:.2} events/min over {} intervals",
                        entry.label, entry.mean_rate_per_minute, std, entry.intervals
                    ),
                    None => info!(
                        "[SUMMARY] {}: {:.2} events/min",
                        entry.label, entry.mean_rate_per_minute
                    ),
                }
            }
        }
        if plots.contains(&TotalPlotKind::PatientDebug) {
            for detection in &self.detections {
                debug!(
                    "[SUMMARY] patient {} interval {} {}: {} events, {} hidden spikes",
                    detection.patient,
                    detection.interval,
                    detection.label,
                    detection.result.total_event_count,
                    detection.hidden_spike_count
                );
            }
        }
    }
}
