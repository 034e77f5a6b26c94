//! Runtime validation of loaded configurations.

use crate::schema::Config;
use reactbot_common::Result;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> Result<()> {
        config.validate().map_err(Into::into)
    }
}
