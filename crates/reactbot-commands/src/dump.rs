//! The `dump` command: the full command table as JSON, for the owner.

use async_trait::async_trait;
use reactbot_core::{
    array_split, Command, CommandContext, CommandError, CommandMeta, InboundMessage, ReplyHandle,
};
use serde_json::json;
use std::time::Duration;

static META: CommandMeta = CommandMeta {
    owner_only: true,
    delete_trigger: true,
    clear_after: Some(Duration::from_secs(30)),
    ..CommandMeta::new("dump", "Dump the command table for inspection.")
};

/// Prints every registered command descriptor, one JSON object per line,
/// chunked into code blocks. The output is deleted again shortly after.
pub struct Dump;

#[async_trait]
impl Command for Dump {
    fn meta(&self) -> &CommandMeta {
        &META
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        msg: &InboundMessage,
        _args: &[&str],
    ) -> Result<Option<ReplyHandle>, CommandError> {
        let lines: Vec<String> = ctx
            .registry
            .by_category()
            .iter()
            .map(|command| {
                let meta = command.meta();
                json!({
                    "name": meta.name,
                    "category": meta.category,
                    "usage": meta.usage,
                    "min_args": meta.min_args,
                    "cooldown_secs": meta.cooldown.map(|c| c.as_secs()),
                    "owner_only": meta.owner_only,
                })
                .to_string()
            })
            .collect();

        let mut last = None;
        for chunk in array_split(lines) {
            let handle = ctx
                .transport
                .send(msg.channel_id, &chunk.join("\n"), false)
                .await?;
            last = Some(handle);
        }

        Ok(last)
    }
}
