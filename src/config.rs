//! Configuration System
//!
//! Layered configuration for frame views: built-in defaults, the user's global
//! config file, workspace config files, then `FRAMESLIDE_*` environment
//! variables. Validation reports every problem at once.

use crate::error::FrameError;
use crate::frame::manager::{DEFAULT_RETENTION_BOUND, KEEP_WINDOW};
use crate::gesture::DEFAULT_OFFSET_THRESHOLD;
use crate::granularity::GranularityKind;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameslideConfig {
    /// Frame window settings
    #[serde(default)]
    pub frames: FramesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Frame window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramesConfig {
    /// Maximum number of frames kept alive before trimming
    #[serde(default = "default_retention_bound")]
    pub retention_bound: usize,

    /// Swipe dead zone: a swipe is rejected when |dy| > |dx| - offset_threshold
    #[serde(default = "default_offset_threshold")]
    pub offset_threshold: f64,

    /// View granularity: day, week, month
    #[serde(default = "default_granularity")]
    pub granularity: GranularityKind,
}

fn default_retention_bound() -> usize {
    DEFAULT_RETENTION_BOUND
}

fn default_offset_threshold() -> f64 {
    DEFAULT_OFFSET_THRESHOLD
}

fn default_granularity() -> GranularityKind {
    GranularityKind::Day
}

impl Default for FramesConfig {
    fn default() -> Self {
        Self {
            retention_bound: default_retention_bound(),
            offset_threshold: default_offset_threshold(),
            granularity: default_granularity(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Frames(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Frames(msg) => write!(f, "Frames: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FramesConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.retention_bound < KEEP_WINDOW {
            errors.push(format!(
                "retention_bound must be at least {} (got {})",
                KEEP_WINDOW, self.retention_bound
            ));
        }
        if !self.offset_threshold.is_finite() || self.offset_threshold < 0.0 {
            errors.push(format!(
                "offset_threshold must be a non-negative number (got {})",
                self.offset_threshold
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl FrameslideConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(frame_errors) = self.frames.validate() {
            errors.extend(frame_errors.into_iter().map(ValidationError::Frames));
        }

        if !matches!(self.logging.format.as_str(), "json" | "text") {
            errors.push(ValidationError::Logging(format!(
                "format must be 'json' or 'text' (got '{}')",
                self.logging.format
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Render as TOML, e.g. to show the effective configuration.
    pub fn to_toml(&self) -> Result<String, FrameError> {
        toml::to_string_pretty(self).map_err(|e| FrameError::Serialization(e.to_string()))
    }
}

/// Loads [`FrameslideConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global config file,
    /// `config/config.toml`, `config/{FRAMESLIDE_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<FrameslideConfig, FrameError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(environment());

        let config: FrameslideConfig = builder.build()?.try_deserialize()?;
        Self::validated(config)
    }

    /// Load a single config file over the defaults.
    pub fn load_from_file(path: &Path) -> Result<FrameslideConfig, FrameError> {
        let config: FrameslideConfig = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        Self::validated(config)
    }

    fn validated(config: FrameslideConfig) -> Result<FrameslideConfig, FrameError> {
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            FrameError::Config(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        Ok(config)
    }

    /// Defaults only, no sources consulted.
    pub fn defaults() -> Result<FrameslideConfig, FrameError> {
        let config: Config = merge::merge_policy::builder_with_defaults()?.build()?;
        Ok(config.try_deserialize()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("FRAMESLIDE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
