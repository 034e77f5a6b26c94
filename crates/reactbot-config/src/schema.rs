//! Configuration schema definitions.

use reactbot_common::{ReactBotError, UserId};
use serde::{Deserialize, Serialize};

/// Main configuration structure for ReactBot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Leading substring identifying a message as a command invocation.
    pub prefix: String,
    /// User id of the bot owner; owner-only commands answer to nobody else.
    pub owner: UserId,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection URL.
    pub url: String,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ReactBotError> {
        if self.discord.token.is_empty() {
            return Err(ReactBotError::Config(
                "Discord token cannot be empty".to_string(),
            ));
        }

        if self.discord.prefix.is_empty() {
            return Err(ReactBotError::Config(
                "Command prefix cannot be empty".to_string(),
            ));
        }

        if self.discord.owner.0 == 0 {
            return Err(ReactBotError::Config(
                "Owner user id must be set".to_string(),
            ));
        }

        if self.database.url.is_empty() {
            return Err(ReactBotError::Config(
                "Database URL cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
