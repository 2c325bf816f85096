//! CLI parse: clap types for frameslide. No behavior; definitions only.

use crate::cli::replay::ReplayEvent;
use crate::granularity::GranularityKind;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Frameslide CLI - replay navigation against a sliding frame window
#[derive(Parser)]
#[command(name = "frameslide")]
#[command(about = "Sliding window lifecycle management for calendar frames")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay navigation events and show the retained frames
    Replay {
        /// Initial anchor date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// View granularity (day, week, month); defaults to the configured one
        #[arg(long)]
        granularity: Option<GranularityKind>,

        /// Retention bound; defaults to the configured one
        #[arg(long)]
        retention: Option<usize>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Events: goto:DATE, swipe:DX,DY,left|right, wheel:DX[,page|pixel|line],
        /// purge:DATE..DATE
        events: Vec<ReplayEvent>,
    },
    /// Print the effective configuration as TOML
    Config,
}
