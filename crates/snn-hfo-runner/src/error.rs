// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use snn_hfo_config::{ConfigError, FrequencyBand};
use snn_hfo_detection::DetectionError;
use snn_hfo_npu_burst_engine::EngineError;
use snn_hfo_npu_neural::NeuralError;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to read dataset {path}: {source}")]
    DatasetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path}: {source}")]
    DatasetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no dataset files found under {0}")]
    EmptyDataset(PathBuf),

    #[error("patient {0} not found in dataset")]
    PatientNotFound(u32),

    #[error("interval {interval} out of range, patient {patient} has {available} intervals")]
    IntervalOutOfRange {
        patient: u32,
        interval: usize,
        available: usize,
    },

    #[error("channel {channel} out of range, interval has {available} channels")]
    ChannelOutOfRange { channel: usize, available: usize },

    #[error("channel '{label}' has no {band:?} signal")]
    MissingBand { label: String, band: FrequencyBand },

    #[error("channel '{label}': {band:?} signal has {actual} samples, time vector has {expected}")]
    SignalLengthMismatch {
        label: String,
        band: FrequencyBand,
        expected: usize,
        actual: usize,
    },

    #[error("channel '{0}' has fewer than two samples in the selected duration")]
    EmptyChannel(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Neural(#[from] NeuralError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Detection(#[from] DetectionError),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
