//! The `rank` command: a user's place on the guild reaction leaderboard.

use crate::store::RankStore;
use async_trait::async_trait;
use reactbot_core::parser;
use reactbot_core::{
    CachedUser, Command, CommandContext, CommandError, CommandMeta, InboundMessage, ReplyHandle,
};
use std::sync::Arc;
use std::time::Duration;

static META: CommandMeta = CommandMeta {
    usage: "[?user]",
    category: "reactions",
    cooldown: Some(Duration::from_secs(5)),
    ..CommandMeta::new("rank", "Get the rank of a user.")
};

/// Looks up the caller's (or a mentioned user's) reaction rank.
pub struct Rank {
    store: Arc<dyn RankStore>,
}

impl Rank {
    /// Creates the command over the given leaderboard store.
    #[must_use]
    pub fn new(store: Arc<dyn RankStore>) -> Self {
        Self { store }
    }

    fn resolve_target(
        ctx: &CommandContext,
        msg: &InboundMessage,
        args: &[&str],
    ) -> Result<CachedUser, CommandError> {
        match args.first() {
            Some(token) => parser::user_from_mention(ctx.cache.as_ref(), token).ok_or_else(|| {
                CommandError::InstanceNotFound("Could not find this user.".to_string())
            }),
            None => Ok(msg.author.clone()),
        }
    }
}

#[async_trait]
impl Command for Rank {
    fn meta(&self) -> &CommandMeta {
        &META
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        msg: &InboundMessage,
        args: &[&str],
    ) -> Result<Option<ReplyHandle>, CommandError> {
        let Some(guild_id) = msg.guild_id else {
            return Err(CommandError::InvalidArguments(
                "This command only works in a server.".to_string(),
            ));
        };

        let user = Self::resolve_target(ctx, msg, args)?;
        let ranked = self.store.reaction_rank(guild_id, user.id).await?;

        let content = match ranked {
            Some(rank) => format!("The user {} is ranked **number {rank}**.", user.tag),
            None => format!("The user {} does not have a rank yet.", user.tag),
        };

        let handle = ctx.transport.send(msg.channel_id, &content, false).await?;
        Ok(Some(handle))
    }
}
