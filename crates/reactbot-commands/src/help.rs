//! The `help` command: per-command detail or a categorized listing.

use async_trait::async_trait;
use reactbot_common::{capitalize, format_seconds};
use reactbot_core::{
    can_run, Command, CommandContext, CommandError, CommandMeta, InboundMessage, ReplyHandle,
};

static META: CommandMeta = CommandMeta {
    usage: "[?command]",
    ..CommandMeta::new(
        "help",
        "Print some information about all commands a user can execute.",
    )
};

/// Lists the commands the caller can run, or describes a single one.
pub struct Help;

impl Help {
    fn describe(ctx: &CommandContext, meta: &CommandMeta) -> String {
        let mut reply = vec![format!("**Name:** {}", capitalize(meta.name)), "-----".to_string()];
        if !meta.description.is_empty() {
            reply.push(format!("**Description:** {}", meta.description));
        }
        if !meta.usage.is_empty() {
            reply.push(format!(
                "**Usage:** {}{} {}",
                ctx.config.prefix, meta.name, meta.usage
            ));
        }
        if let Some(cooldown) = meta.cooldown {
            reply.push(format!(
                "**Cooldown:** {}",
                format_seconds(cooldown.as_secs())
            ));
        }
        reply.join("\n")
    }

    fn listing(ctx: &CommandContext, msg: &InboundMessage) -> String {
        let mut reply = vec!["**Commands:**".to_string()];

        let mut current_category = "";
        for command in ctx.registry.by_category() {
            let meta = command.meta();
            if !can_run(meta, msg.author.id, msg.member_permissions, &ctx.config) {
                continue;
            }

            if meta.category != current_category {
                current_category = meta.category;
                reply.push(format!("{}:", capitalize(meta.category)));
            }

            let mut line = format!("- {}", capitalize(meta.name));
            if !meta.description.is_empty() {
                line.push_str(&format!(": {}", meta.description));
            }
            reply.push(line);
        }

        reply.join("\n")
    }
}

#[async_trait]
impl Command for Help {
    fn meta(&self) -> &CommandMeta {
        &META
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        msg: &InboundMessage,
        args: &[&str],
    ) -> Result<Option<ReplyHandle>, CommandError> {
        let content = if let Some(&name) = args.first() {
            // Hidden commands look exactly like missing ones.
            let command = ctx
                .registry
                .get(name)
                .filter(|c| can_run(c.meta(), msg.author.id, msg.member_permissions, &ctx.config))
                .ok_or_else(|| {
                    CommandError::InstanceNotFound("Could not find this command.".to_string())
                })?;

            Self::describe(ctx, command.meta())
        } else {
            Self::listing(ctx, msg)
        };

        let handle = ctx
            .transport
            .send(msg.channel_id, &content, true)
            .await?;
        Ok(Some(handle))
    }
}
