//! Gateway client setup and the event handler feeding the dispatcher.

use crate::adapter::{inbound_from_message, SerenityCache, SerenityTransport};
use crate::error::BotResult;
use reactbot_commands::{register_all, PgRankStore};
use reactbot_config::Config;
use reactbot_core::{
    CommandRegistry, CooldownTracker, DispatchConfig, Dispatcher, EntityCache, TaskQueue,
    Transport,
};
use serenity::client::{Client, Context, EventHandler};
use serenity::model::channel::Message;
use serenity::model::gateway::{GatewayIntents, Ready};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Main bot structure.
pub struct ReactBot {
    config: Arc<Config>,
}

struct Handler {
    config: Arc<Config>,
    registry: Arc<CommandRegistry>,
    cooldowns: Arc<CooldownTracker>,
    tasks: TaskQueue,
    dispatcher: OnceCell<Arc<Dispatcher>>,
}

impl Handler {
    /// The dispatcher over this connection's http and cache handles,
    /// built on first use.
    async fn dispatcher(&self, ctx: &Context) -> Arc<Dispatcher> {
        self.dispatcher
            .get_or_init(|| async {
                let transport: Arc<dyn Transport> =
                    Arc::new(SerenityTransport::new(Arc::clone(&ctx.http)));
                let cache: Arc<dyn EntityCache> = Arc::new(SerenityCache::new(
                    Arc::clone(&ctx.cache),
                    Arc::clone(&ctx.http),
                ));

                Arc::new(Dispatcher::new(
                    DispatchConfig {
                        prefix: self.config.discord.prefix.clone(),
                        owner: self.config.discord.owner,
                    },
                    Arc::clone(&self.registry),
                    Arc::clone(&self.cooldowns),
                    transport,
                    cache,
                    self.tasks.clone(),
                ))
            })
            .await
            .clone()
    }
}

#[serenity::async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "gateway session ready");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let dispatcher = self.dispatcher(&ctx).await;
        let inbound = inbound_from_message(&ctx.cache, &msg);
        dispatcher.dispatch(inbound).await;
    }
}

impl ReactBot {
    /// Creates a new bot instance.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Connects to the database and the gateway and runs until shutdown.
    pub async fn start(&self) -> BotResult<()> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&self.config.database.url)
            .await?;
        info!("database pool connected");

        let store = Arc::new(PgRankStore::new(pool));
        let registry = Arc::new(register_all(store));

        let tasks = TaskQueue::new();
        let cooldowns = Arc::new(CooldownTracker::new(tasks.clone()));

        let handler = Handler {
            config: Arc::clone(&self.config),
            registry,
            cooldowns,
            tasks: tasks.clone(),
            dispatcher: OnceCell::new(),
        };

        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_EMOJIS_AND_STICKERS
            | GatewayIntents::MESSAGE_CONTENT;

        let mut client = Client::builder(&self.config.discord.token, intents)
            .event_handler(handler)
            .await?;

        let shard_manager = client.shard_manager.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("shutdown signal received");
                    shard_manager.shutdown_all().await;
                }
                Err(err) => warn!(%err, "could not listen for shutdown signal"),
            }
        });

        client.start().await?;

        // Gateway is down; cancel pending cooldown and cleanup timers.
        tasks.shutdown().await;
        Ok(())
    }
}
