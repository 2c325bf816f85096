//! Merge rules: defaults and override order.

use crate::frame::manager::DEFAULT_RETENTION_BOUND;
use crate::gesture::DEFAULT_OFFSET_THRESHOLD;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("frames.retention_bound", DEFAULT_RETENTION_BOUND as i64)?
        .set_default("frames.offset_threshold", DEFAULT_OFFSET_THRESHOLD)?
        .set_default("frames.granularity", "day")
}
