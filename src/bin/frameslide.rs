//! Frameslide CLI Binary
//!
//! Replays navigation input against a sliding frame window.

use anyhow::{bail, Context, Result};
use clap::Parser;
use frameslide::cli::{
    format_replay_json, format_replay_text, run_replay, Cli, Commands, ReplayOptions,
};
use frameslide::config::{ConfigLoader, FrameslideConfig};
use frameslide::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&build_logging_config(&cli, &config))) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    match execute(&cli, &config) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<FrameslideConfig> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => ConfigLoader::load(&cli.workspace).context("Failed to load workspace config"),
    }
}

/// CLI flags override the config file, which overrides defaults.
fn build_logging_config(cli: &Cli, config: &FrameslideConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    logging
}

fn execute(cli: &Cli, config: &FrameslideConfig) -> Result<String> {
    match &cli.command {
        Commands::Replay {
            start,
            granularity,
            retention,
            format,
            events,
        } => {
            let options = ReplayOptions {
                start: *start,
                granularity: granularity.unwrap_or(config.frames.granularity),
                retention_bound: retention.unwrap_or(config.frames.retention_bound),
                offset_threshold: config.frames.offset_threshold,
            };
            let report = run_replay(&options, events).context("Replay failed")?;
            match format.as_str() {
                "json" => Ok(format_replay_json(&report)?),
                "text" => Ok(format_replay_text(&report)),
                other => bail!("Invalid output format: {} (must be 'text' or 'json')", other),
            }
        }
        Commands::Config => Ok(config.to_toml()?),
    }
}
