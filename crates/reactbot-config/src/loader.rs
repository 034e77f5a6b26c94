//! Configuration loading and persistence with atomic file operations.

use crate::schema::Config;
use reactbot_common::{ReactBotError, Result, UserId};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader with atomic file operations.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads configuration from file.
    pub async fn load(&self) -> Result<Config> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ReactBotError::Config(format!(
                "could not read {}: {e}",
                self.path.display()
            ))
        })?;

        let config: Config = toml::from_str(&raw)
            .map_err(|e| ReactBotError::Config(format!("invalid configuration: {e}")))?;

        debug!(path = %self.path.display(), "loaded configuration");
        Ok(config)
    }

    /// Saves configuration to file atomically by writing to a temporary
    /// file in the same directory and renaming it over the target.
    pub async fn save(&self, config: &Config) -> Result<()> {
        let serialized = toml::to_string_pretty(config)
            .map_err(|e| ReactBotError::Config(format!("could not serialize: {e}")))?;

        let dir = self
            .path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || -> std::result::Result<(), ReactBotError> {
            let mut file = tempfile::NamedTempFile::new_in(&dir)
                .map_err(|e| ReactBotError::Config(format!("could not create temp file: {e}")))?;
            std::io::Write::write_all(&mut file, serialized.as_bytes())?;
            file.persist(&path)
                .map_err(|e| ReactBotError::Config(format!("could not persist: {e}")))?;
            Ok(())
        })
        .await
        .map_err(|e| ReactBotError::Config(format!("save task failed: {e}")))??;

        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }
}

/// Applies environment-variable overrides on top of a loaded configuration.
///
/// Recognized variables: `DISCORD_TOKEN`, `DISCORD_OWNER`, `COMMAND_PREFIX`
/// and `DATABASE_URL`.
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(token) = env::var("DISCORD_TOKEN") {
        config.discord.token = token;
    }

    if let Ok(owner) = env::var("DISCORD_OWNER") {
        if let Ok(id) = owner.parse::<u64>() {
            config.discord.owner = UserId(id);
        }
    }

    if let Ok(prefix) = env::var("COMMAND_PREFIX") {
        config.discord.prefix = prefix;
    }

    if let Ok(url) = env::var("DATABASE_URL") {
        config.database.url = url;
    }
}
