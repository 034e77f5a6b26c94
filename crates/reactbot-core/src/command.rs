//! The command contract: descriptor metadata, execution trait and the
//! context handed to every command body.

use crate::client::{EntityCache, InboundMessage};
use crate::error::CommandError;
use crate::registry::CommandRegistry;
use crate::transport::{ReplyHandle, Transport};
use async_trait::async_trait;
use reactbot_common::UserId;
use serenity::model::permissions::Permissions;
use std::sync::Arc;
use std::time::Duration;

/// Static metadata for one command, created once at startup.
#[derive(Debug, Clone)]
pub struct CommandMeta {
    /// Unique name; registry lookups are case-insensitive.
    pub name: &'static str,
    /// One-line description shown by `help`.
    pub description: &'static str,
    /// Argument usage string, e.g. `[?user]`; empty when there is none.
    pub usage: &'static str,
    /// Category heading the command is listed under.
    pub category: &'static str,
    /// Minimum number of arguments the caller must supply.
    pub min_args: usize,
    /// Per-user re-invocation interval, armed after a successful run.
    pub cooldown: Option<Duration>,
    /// Whether only the configured owner may invoke the command.
    pub owner_only: bool,
    /// Guild permissions the caller must hold.
    pub required_permissions: Option<Permissions>,
    /// Whether to delete the triggering message before execution.
    pub delete_trigger: bool,
    /// Delay after which the reply is deleted again.
    pub clear_after: Option<Duration>,
}

impl CommandMeta {
    /// A plain descriptor with the given name and description; everything
    /// else starts out unset.
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            usage: "",
            category: "misc",
            min_args: 0,
            cooldown: None,
            owner_only: false,
            required_permissions: None,
            delete_trigger: false,
            clear_after: None,
        }
    }
}

/// Dispatcher-facing configuration, injected at construction.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Leading substring identifying a message as a command invocation.
    pub prefix: String,
    /// The bot owner; the only account owner-only commands answer to.
    pub owner: UserId,
}

/// Shared collaborators handed to every command execution.
pub struct CommandContext {
    /// Dispatcher configuration (prefix, owner).
    pub config: DispatchConfig,
    /// Outbound transport.
    pub transport: Arc<dyn Transport>,
    /// Entity cache for mention resolution.
    pub cache: Arc<dyn EntityCache>,
    /// The command registry, for commands that enumerate commands.
    pub registry: Arc<CommandRegistry>,
}

/// Whether a caller may see and invoke a command at all.
///
/// Callers failing this check are answered with silence, both by the
/// dispatcher and by `help`'s listing.
pub fn can_run(
    meta: &CommandMeta,
    author: UserId,
    permissions: Option<Permissions>,
    config: &DispatchConfig,
) -> bool {
    if meta.owner_only && author != config.owner {
        return false;
    }

    if let Some(required) = meta.required_permissions {
        return permissions.is_some_and(|held| held.contains(required));
    }

    true
}

/// One named command: its descriptor plus the execute operation.
#[async_trait]
pub trait Command: Send + Sync {
    /// The command's static descriptor.
    fn meta(&self) -> &CommandMeta;

    /// Executes the command with the parsed argument tokens. Returns a
    /// handle to the reply when one was sent, for transient cleanup.
    async fn execute(
        &self,
        ctx: &CommandContext,
        msg: &InboundMessage,
        args: &[&str],
    ) -> Result<Option<ReplyHandle>, CommandError>;
}
