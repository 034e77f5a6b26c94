//! Main entry point for ReactBot.

use std::env;
use reactbot_bot::{BotResult, ReactBot};
use reactbot_config::{apply_env_overrides, Config, ConfigLoader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> BotResult<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reactbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ReactBot");

    // Load configuration
    let config = load_config().await?;

    // Create and start bot
    let bot = ReactBot::new(config);

    if let Err(e) = bot.start().await {
        error!("Bot failed to start: {}", e);
        return Err(e);
    }

    Ok(())
}

async fn load_config() -> BotResult<Config> {
    let path = env::var("REACTBOT_CONFIG").unwrap_or_else(|_| "reactbot.toml".to_string());

    let mut config = match ConfigLoader::new(&path).load().await {
        Ok(config) => config,
        Err(err) => {
            info!(%path, %err, "no usable configuration file, starting from defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config);
    config.validate()?;
    Ok(config)
}
