// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Recording datasets
//!
//! A dataset is one JSON file, or a directory of JSON files whose patients are
//! merged. Every channel carries its sampling times and the band-filtered
//! signals the measurement mode needs:
//!
//! ```json
//! { "patients": [ { "id": 1, "intervals": [ { "channels": [
//!     { "label": "HL1-HL2", "time": [0.0, 0.0005], "ripple": [0.1, 0.2], "fast_ripple": [0.0, 0.1] }
//! ] } ] } ] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snn_hfo_config::FrequencyBand;
use tracing::{debug, warn};

use crate::error::{Result, RunnerError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub patients: Vec<Patient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub intervals: Vec<Interval>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub label: String,
    /// Sample times in seconds
    pub time: Vec<f64>,
    /// 80-250 Hz band
    #[serde(default)]
    pub ripple: Option<Vec<f64>>,
    /// 250-500 Hz band
    #[serde(default)]
    pub fast_ripple: Option<Vec<f64>>,
}

impl Channel {
    pub fn band(&self, band: FrequencyBand) -> Option<&[f64]> {
        match band {
            FrequencyBand::Ripple => self.ripple.as_deref(),
            FrequencyBand::FastRipple => self.fast_ripple.as_deref(),
        }
    }

    /// Signal of `band`, checked against the time vector
    pub fn require_band(&self, band: FrequencyBand) -> Result<&[f64]> {
        let signal = self.band(band).ok_or_else(|| RunnerError::MissingBand {
            label: self.label.clone(),
            band,
        })?;
        if signal.len() != self.time.len() {
            return Err(RunnerError::SignalLengthMismatch {
                label: self.label.clone(),
                band,
                expected: self.time.len(),
                actual: signal.len(),
            });
        }
        Ok(signal)
    }
}

impl Dataset {
    /// Load a dataset file, or every `*.json` file of a directory in name order.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Self::load_file(path);
        }

        let entries = fs::read_dir(path).map_err(|source| RunnerError::DatasetIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(RunnerError::EmptyDataset(path.to_path_buf()));
        }

        let mut dataset = Dataset::default();
        for file in &files {
            dataset.merge(Self::load_file(file)?);
        }
        dataset.patients.sort_by_key(|p| p.id);
        Ok(dataset)
    }

    fn load_file(path: &Path) -> Result<Self> {
        debug!("[DATASET] Reading {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| RunnerError::DatasetIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| RunnerError::DatasetParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Append `other`'s patients; intervals of a patient present in both are concatenated.
    pub fn merge(&mut self, other: Dataset) {
        for patient in other.patients {
            match self.patients.iter_mut().find(|p| p.id == patient.id) {
                Some(existing) => {
                    warn!("[DATASET] Patient {} appears in several files, merging intervals", patient.id);
                    existing.intervals.extend(patient.intervals);
                }
                None => self.patients.push(patient),
            }
        }
    }

    pub fn patient(&self, id: u32) -> Result<&Patient> {
        self.patients
            .iter()
            .find(|p| p.id == id)
            .ok_or(RunnerError::PatientNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ONE_PATIENT: &str = r#"{
        "patients": [{
            "id": 2,
            "intervals": [{
                "channels": [{
                    "label": "HL1",
                    "time": [0.0, 0.001, 0.002],
                    "ripple": [0.0, 1.0, 0.0]
                }]
            }]
        }]
    }"#;

    #[test]
    fn test_load_single_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p2.json");
        fs::write(&path, ONE_PATIENT).unwrap();

        let dataset = Dataset::load(&path).unwrap();
        let patient = dataset.patient(2).unwrap();
        let channel = &patient.intervals[0].channels[0];
        assert_eq!(channel.label, "HL1");
        assert!(channel.fast_ripple.is_none());
        assert_eq!(channel.require_band(FrequencyBand::Ripple).unwrap().len(), 3);
    }

    #[test]
    fn test_load_directory_merges_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.json"), ONE_PATIENT).unwrap();
        fs::write(dir.path().join("a.json"), r#"{"patients": [{"id": 1, "intervals": []}]}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let dataset = Dataset::load(dir.path()).unwrap();
        let ids: Vec<u32> = dataset.patients.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(Dataset::load(dir.path()), Err(RunnerError::EmptyDataset(_))));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Dataset::load(&path), Err(RunnerError::DatasetParse { .. })));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = Dataset::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(RunnerError::DatasetIo { .. })));
    }

    #[test]
    fn test_band_checks() {
        let channel = Channel {
            label: "X".to_string(),
            time: vec![0.0, 0.1],
            ripple: Some(vec![1.0]),
            fast_ripple: None,
        };
        assert!(matches!(
            channel.require_band(FrequencyBand::Ripple),
            Err(RunnerError::SignalLengthMismatch { expected: 2, actual: 1, .. })
        ));
        assert!(matches!(
            channel.require_band(FrequencyBand::FastRipple),
            Err(RunnerError::MissingBand { .. })
        ));
    }

    #[test]
    fn test_unknown_patient() {
        let dataset = Dataset::default();
        assert!(matches!(dataset.patient(9), Err(RunnerError::PatientNotFound(9))));
    }
}
