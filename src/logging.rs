use crate::config::Config;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    prelude::*,
    registry,
    util::TryInitError,
};

/// Builds the filter from the configured level; unparsable directives are
/// dropped and `info` is used as the fallback.
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(&config.log_level)
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(config: &Config) -> Result<(), TryInitError> {
    registry()
        .with(fmt::Layer::default().compact())
        .with(env_filter(config))
        .try_init()
}
