//! Logging System
//!
//! Structured logging through `tracing`. The subscriber is configured from
//! [`LoggingConfig`], with `FRAMESLIDE_LOG*` environment variables taking
//! precedence over the config file.

use crate::error::FrameError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file")
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Enable colored output (text format, terminal output only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(".frameslide/frameslide.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

/// Initialize the global subscriber.
///
/// Priority order (highest to lowest):
/// 1. Environment variables (FRAMESLIDE_LOG, FRAMESLIDE_LOG_FORMAT, FRAMESLIDE_LOG_OUTPUT)
/// 2. The given configuration
/// 3. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), FrameError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);

    let filter = build_env_filter(config)?;
    let json = determine_format(config)? == "json";
    let output = determine_output(config)?;
    let ansi = config.color && !json && output != Output::File;

    let registry = Registry::default().with(filter);
    let layer = fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(ansi);

    // The writer type differs per branch, so each combination is built whole.
    let result = match (output, json) {
        (Output::Stdout, false) => registry.with(layer.with_writer(std::io::stdout)).try_init(),
        (Output::Stdout, true) => registry
            .with(layer.json().with_writer(std::io::stdout))
            .try_init(),
        (Output::Stderr, false) => registry.with(layer.with_writer(std::io::stderr)).try_init(),
        (Output::Stderr, true) => registry
            .with(layer.json().with_writer(std::io::stderr))
            .try_init(),
        (Output::File, false) => {
            let file = open_log_file(&config.file)?;
            registry.with(layer.with_writer(file)).try_init()
        }
        (Output::File, true) => {
            let file = open_log_file(&config.file)?;
            registry.with(layer.json().with_writer(file)).try_init()
        }
    };

    result.map_err(|e| FrameError::Config(format!("Failed to initialize logging: {}", e)))
}

fn open_log_file(path: &Path) -> Result<std::sync::Mutex<std::fs::File>, FrameError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| FrameError::Config(format!("Failed to create log directory: {}", e)))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FrameError::Config(format!("Failed to open log file {:?}: {}", path, e)))?;
    Ok(std::sync::Mutex::new(file))
}

/// Build environment filter from FRAMESLIDE_LOG or the config
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, FrameError> {
    if let Ok(filter) = EnvFilter::try_from_env("FRAMESLIDE_LOG") {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| FrameError::Config(format!("Invalid log directive: {}", e)))?,
        );
    }

    Ok(filter)
}

fn determine_format(config: &LoggingConfig) -> Result<String, FrameError> {
    if let Ok(format) = std::env::var("FRAMESLIDE_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    match config.format.as_str() {
        "json" | "text" => Ok(config.format.clone()),
        other => Err(FrameError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

fn determine_output(config: &LoggingConfig) -> Result<Output, FrameError> {
    match std::env::var("FRAMESLIDE_LOG_OUTPUT") {
        Ok(output) => parse_output(&output),
        Err(_) => parse_output(&config.output),
    }
}

fn parse_output(output: &str) -> Result<Output, FrameError> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        _ => Err(FrameError::Config(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}
