use crate::models::{FieldErrorPolicy, MaskPolicy, PatchOptions};
use config::{ConfigError, Environment};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "MASKPATCH";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub mask_policy: MaskPolicy,
    pub field_error_policy: FieldErrorPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_builder(config::Config::builder())
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let s = with_defaults(builder)?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        s.try_deserialize()
    }

    pub fn patch_options(&self) -> PatchOptions {
        PatchOptions::new(self.mask_policy, self.field_error_policy)
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    builder
        .set_default("log_level", "info")?
        .set_default("mask_policy", "reject")?
        .set_default("field_error_policy", "skip")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
