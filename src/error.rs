//! Error types for frame lifecycle management.

use crate::types::FrameKey;
use chrono::NaiveDate;
use thiserror::Error;

/// Frame lifecycle errors
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Frame already exists for key {0}")]
    DuplicateKey(FrameKey),

    #[error("Frame not found: {0}")]
    FrameNotFound(FrameKey),

    #[error("Invalid time span: end {end} precedes start {start}")]
    InvalidSpan { start: NaiveDate, end: NaiveDate },

    #[error("Retention bound {bound} is below the keep window of {window}")]
    InvalidRetention { bound: usize, window: usize },

    #[error("Invalid swipe offset threshold: {0} (must be a finite, non-negative number)")]
    InvalidThreshold(f64),

    #[error("Frame factory failed: {0}")]
    Factory(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<config::ConfigError> for FrameError {
    fn from(err: config::ConfigError) -> Self {
        FrameError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for FrameError {
    fn from(err: serde_json::Error) -> Self {
        FrameError::Serialization(err.to_string())
    }
}
