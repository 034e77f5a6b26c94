//! The per-message dispatch state machine and failure mapping.

use crate::client::{ChannelKind, EntityCache, InboundMessage};
use crate::command::{can_run, Command, CommandContext, CommandMeta, DispatchConfig};
use crate::cooldown::CooldownTracker;
use crate::error::CommandError;
use crate::registry::CommandRegistry;
use crate::tasks::TaskQueue;
use crate::transport::{Transport, TransportError, ERROR_API_OVERLOADED, ERROR_MISSING_PERMISSIONS};
use reactbot_common::format_seconds;
use std::sync::Arc;
use tracing::{debug, error, warn};

const GENERIC_APOLOGY: &str =
    "Something went wrong trying to execute the command. Please try again later.";

/// The control core: receives inbound messages, gates them, executes the
/// matched command and maps failures to responses.
///
/// Every collaborator is injected at construction; the dispatcher holds no
/// global state.
pub struct Dispatcher {
    ctx: CommandContext,
    cooldowns: Arc<CooldownTracker>,
    tasks: TaskQueue,
}

impl Dispatcher {
    /// Creates a dispatcher over the given collaborators.
    #[must_use]
    pub fn new(
        config: DispatchConfig,
        registry: Arc<CommandRegistry>,
        cooldowns: Arc<CooldownTracker>,
        transport: Arc<dyn Transport>,
        cache: Arc<dyn EntityCache>,
        tasks: TaskQueue,
    ) -> Self {
        Self {
            ctx: CommandContext {
                config,
                transport,
                cache,
                registry,
            },
            cooldowns,
            tasks,
        }
    }

    /// The context commands execute against.
    #[must_use]
    pub fn context(&self) -> &CommandContext {
        &self.ctx
    }

    /// Handles one inbound message start to finish. Every outcome,
    /// including every failure, terminates inside this call.
    pub async fn dispatch(&self, msg: InboundMessage) {
        let config = &self.ctx.config;

        // Eligibility: addressed to the bot, from a human, in a guild text
        // channel.
        let Some(body) = msg.content.strip_prefix(&config.prefix) else {
            return;
        };
        if msg.author.bot || msg.channel_kind != ChannelKind::GuildText {
            return;
        }

        let mut tokens = body.trim().split_whitespace();
        let Some(first) = tokens.next() else { return };
        let name = first.to_lowercase();
        let args: Vec<&str> = tokens.collect();

        // Unknown commands and callers outside the ownership/permission
        // gate get no response at all.
        let Some(command) = self.ctx.registry.get(&name) else {
            debug!(command = %name, "unknown command");
            return;
        };
        let meta = command.meta();

        if !can_run(meta, msg.author.id, msg.member_permissions, config) {
            debug!(command = meta.name, author = %msg.author.id, "caller not allowed");
            return;
        }

        if let Some(remaining) = self.cooldowns.remaining(meta.name, msg.author.id) {
            let seconds = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            let notice = format!(
                "Please wait {} before using this command again.",
                format_seconds(seconds)
            );
            self.send_response(&msg, &notice).await;
            return;
        }

        if let Err(err) = self.run(command.as_ref(), &msg, &args).await {
            self.respond_to_failure(&msg, meta, err).await;
        }
    }

    async fn run(
        &self,
        command: &dyn Command,
        msg: &InboundMessage,
        args: &[&str],
    ) -> Result<(), CommandError> {
        let meta = command.meta();

        if args.len() < meta.min_args {
            return Err(CommandError::NotEnoughArguments(format!(
                "At least {} argument(s) needed.",
                meta.min_args
            )));
        }

        if meta.delete_trigger {
            // The trigger may already be gone or undeletable; neither matters.
            if let Err(err) = self.ctx.transport.delete(msg.channel_id, msg.id).await {
                debug!(command = meta.name, %err, "could not delete trigger message");
            }
        }

        let reply = command.execute(&self.ctx, msg, args).await?;

        if let Some(duration) = meta.cooldown {
            self.cooldowns.arm(meta.name, msg.author.id, duration);
        }

        if let (Some(delay), Some(handle)) = (meta.clear_after, reply) {
            let transport = Arc::clone(&self.ctx.transport);
            self.tasks.defer(delay, async move {
                if let Err(err) = transport.delete(handle.channel_id, handle.message_id).await {
                    debug!(%err, "could not delete transient reply");
                }
            });
        }

        Ok(())
    }

    async fn respond_to_failure(&self, msg: &InboundMessage, meta: &CommandMeta, err: CommandError) {
        match err {
            CommandError::NotEnoughArguments(detail) => {
                self.send_usage(msg, meta, "Not enough arguments", &detail).await;
            }
            CommandError::InvalidArguments(detail) => {
                self.send_usage(msg, meta, "Invalid arguments", &detail).await;
            }
            CommandError::InstanceNotFound(detail) => {
                self.send_response(msg, &detail).await;
            }
            CommandError::Api(TransportError::Api {
                code: ERROR_MISSING_PERMISSIONS,
                ..
            }) => {
                self.send_response(
                    msg,
                    "The bot has insufficient permissions to execute this command.",
                )
                .await;
            }
            CommandError::Api(TransportError::Api {
                code: ERROR_API_OVERLOADED,
                ..
            }) => {
                // The platform is shedding load; answering would add to it.
            }
            CommandError::Api(api) => {
                error!(command = meta.name, err = %api, "api error while executing command");
                self.send_response(msg, GENERIC_APOLOGY).await;
            }
            CommandError::Other(other) => {
                error!(command = meta.name, err = ?other, "unexpected error while executing command");
                self.send_response(msg, GENERIC_APOLOGY).await;
            }
        }
    }

    async fn send_usage(&self, msg: &InboundMessage, meta: &CommandMeta, title: &str, detail: &str) {
        let mut reply = format!("**{title}**: {detail}");
        if !meta.usage.is_empty() {
            reply.push_str(&format!(
                "\n\nExpected usage: `{}{} {}`",
                self.ctx.config.prefix, meta.name, meta.usage
            ));
        }
        self.send_response(msg, &reply).await;
    }

    async fn send_response(&self, msg: &InboundMessage, content: &str) {
        if let Err(err) = self.ctx.transport.send(msg.channel_id, content, false).await {
            warn!(%err, "could not send response");
        }
    }
}
