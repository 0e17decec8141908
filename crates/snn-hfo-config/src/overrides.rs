// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-run dataset subsetting supplied on the command line

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Restricts which part of the dataset is processed.
///
/// `None` everywhere means "process everything".
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CustomOverrides {
    /// Seconds of each interval to process
    pub duration: Option<f64>,
    /// Channels to process, 1-based
    pub channels: Option<Vec<usize>>,
    pub patients: Option<Vec<u32>>,
    /// Intervals to process, 1-based. Only valid together with exactly one patient.
    pub intervals: Option<Vec<usize>>,
}

impl CustomOverrides {
    /// Check that the selection is coherent.
    ///
    /// # Errors
    ///
    /// `ConfigError::IntervalsRequireSinglePatient` when `intervals` is set without
    /// exactly one patient; `ConfigError::InvalidValue` for a non-positive duration
    /// or a zero channel/interval index.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.intervals.is_some() {
            let patients = self.patients.as_ref().map_or(0, Vec::len);
            if patients != 1 {
                return Err(ConfigError::IntervalsRequireSinglePatient { patients });
            }
        }
        if let Some(duration) = self.duration {
            if !(duration.is_finite() && duration > 0.0) {
                return Err(ConfigError::InvalidValue(format!(
                    "duration must be positive, got {}",
                    duration
                )));
            }
        }
        let zero_index = |values: &Option<Vec<usize>>| values.as_ref().is_some_and(|v| v.contains(&0));
        if zero_index(&self.channels) {
            return Err(ConfigError::InvalidValue("channels are 1-based".to_string()));
        }
        if zero_index(&self.intervals) {
            return Err(ConfigError::InvalidValue("intervals are 1-based".to_string()));
        }
        Ok(())
    }

    pub fn includes_patient(&self, patient: u32) -> bool {
        self.patients.as_ref().map_or(true, |p| p.contains(&patient))
    }

    /// `interval` is 1-based
    pub fn includes_interval(&self, interval: usize) -> bool {
        self.intervals.as_ref().map_or(true, |i| i.contains(&interval))
    }

    /// `channel` is 1-based
    pub fn includes_channel(&self, channel: usize) -> bool {
        self.channels.as_ref().map_or(true, |c| c.contains(&channel))
    }
}
