//! Default values for every configuration section.

use crate::schema::{Config, DatabaseConfig, DiscordConfig};
use reactbot_common::UserId;

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            prefix: "!".to_string(),
            owner: UserId(0),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
        }
    }
}
