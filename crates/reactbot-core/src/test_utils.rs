//! Mock transport, cache and command implementations for tests.
//!
//! Compiled only for tests or with the `testing` feature, which downstream
//! crates enable from their dev-dependencies.

use crate::client::{
    CachedChannel, CachedEmoji, CachedMember, CachedMessage, CachedRole, CachedUser, ChannelKind,
    EntityCache, InboundMessage,
};
use crate::command::{Command, CommandContext, CommandMeta, DispatchConfig};
use crate::error::CommandError;
use crate::transport::{ReplyHandle, Transport, TransportError};
use async_trait::async_trait;
use parking_lot::Mutex;
use reactbot_common::{ChannelId, GuildId, MessageId, RoleId, UserId};
use serenity::model::permissions::Permissions;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// One message recorded by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct SentMessage {
    /// Target channel.
    pub channel_id: ChannelId,
    /// Sent content.
    pub content: String,
    /// Whether the split option was requested.
    pub split: bool,
}

/// Transport fake that records sends and deletes and can be primed to fail.
#[derive(Default)]
pub struct MockTransport {
    /// Every message sent, in order.
    pub sent: Mutex<Vec<SentMessage>>,
    /// Every `(channel, message)` deleted, in order.
    pub deleted: Mutex<Vec<(ChannelId, MessageId)>>,
    fail_send: Mutex<Option<TransportError>>,
    fail_delete: Mutex<bool>,
    next_id: AtomicU64,
}

impl MockTransport {
    /// Creates a transport that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `send` fail with `err`.
    pub fn fail_next_send(&self, err: TransportError) {
        *self.fail_send.lock() = Some(err);
    }

    /// Makes every `delete` fail from now on.
    pub fn fail_deletes(&self) {
        *self.fail_delete.lock() = true;
    }

    /// The contents of every sent message, in order.
    #[must_use]
    pub fn sent_contents(&self) -> Vec<String> {
        self.sent.lock().iter().map(|m| m.content.clone()).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        channel: ChannelId,
        content: &str,
        split: bool,
    ) -> Result<ReplyHandle, TransportError> {
        if let Some(err) = self.fail_send.lock().take() {
            return Err(err);
        }

        self.sent.lock().push(SentMessage {
            channel_id: channel,
            content: content.to_string(),
            split,
        });
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(ReplyHandle {
            channel_id: channel,
            message_id: MessageId(id),
        })
    }

    async fn delete(&self, channel: ChannelId, message: MessageId) -> Result<(), TransportError> {
        if *self.fail_delete.lock() {
            return Err(TransportError::Api {
                code: 10008,
                message: "Unknown Message".to_string(),
            });
        }

        self.deleted.lock().push((channel, message));
        Ok(())
    }
}

/// In-memory entity cache fake.
#[derive(Default)]
pub struct MockCache {
    users: HashMap<UserId, CachedUser>,
    members: HashMap<(GuildId, UserId), CachedMember>,
    roles: HashMap<(GuildId, RoleId), CachedRole>,
    channels: HashMap<(GuildId, ChannelId), CachedChannel>,
    messages: HashMap<(ChannelId, MessageId), CachedMessage>,
    emojis: Vec<CachedEmoji>,
}

impl MockCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user account.
    pub fn add_user(&mut self, id: u64, name: &str, bot: bool) -> CachedUser {
        let user = CachedUser {
            id: UserId(id),
            name: name.to_string(),
            tag: format!("{name}#0001"),
            bot,
        };
        self.users.insert(user.id, user.clone());
        user
    }

    /// Adds a membership for an already-added user.
    pub fn add_member(&mut self, guild: GuildId, user: &CachedUser, nick: Option<&str>) {
        self.members.insert(
            (guild, user.id),
            CachedMember {
                user: user.clone(),
                guild_id: guild,
                nick: nick.map(ToString::to_string),
            },
        );
    }

    /// Adds a role.
    pub fn add_role(&mut self, guild: GuildId, id: u64, name: &str) {
        self.roles.insert(
            (guild, RoleId(id)),
            CachedRole {
                id: RoleId(id),
                guild_id: guild,
                name: name.to_string(),
            },
        );
    }

    /// Adds a guild channel.
    pub fn add_channel(&mut self, guild: GuildId, id: u64, name: &str, kind: ChannelKind) {
        self.channels.insert(
            (guild, ChannelId(id)),
            CachedChannel {
                id: ChannelId(id),
                guild_id: guild,
                name: name.to_string(),
                kind,
            },
        );
    }

    /// Adds a fetchable message.
    pub fn add_message(&mut self, channel: ChannelId, id: u64, author: UserId, content: &str) {
        self.messages.insert(
            (channel, MessageId(id)),
            CachedMessage {
                id: MessageId(id),
                channel_id: channel,
                author_id: author,
                content: content.to_string(),
            },
        );
    }

    /// Adds an emoji.
    pub fn add_emoji(&mut self, emoji: CachedEmoji) {
        self.emojis.push(emoji);
    }
}

#[async_trait]
impl EntityCache for MockCache {
    fn user(&self, id: UserId) -> Option<CachedUser> {
        self.users.get(&id).cloned()
    }

    fn member(&self, guild: GuildId, user: UserId) -> Option<CachedMember> {
        self.members.get(&(guild, user)).cloned()
    }

    fn role(&self, guild: GuildId, role: RoleId) -> Option<CachedRole> {
        self.roles.get(&(guild, role)).cloned()
    }

    fn channel(&self, guild: GuildId, channel: ChannelId) -> Option<CachedChannel> {
        self.channels.get(&(guild, channel)).cloned()
    }

    async fn message(&self, channel: ChannelId, message: MessageId) -> Option<CachedMessage> {
        self.messages.get(&(channel, message)).cloned()
    }

    fn emojis(&self) -> Vec<CachedEmoji> {
        self.emojis.clone()
    }
}

/// Behavior installed on a [`StubCommand`].
pub type StubBehavior =
    Box<dyn Fn() -> Result<Option<ReplyHandle>, CommandError> + Send + Sync>;

/// Command fake with fixed metadata and a programmable outcome.
pub struct StubCommand {
    meta: CommandMeta,
    behavior: StubBehavior,
    calls: AtomicUsize,
}

impl StubCommand {
    /// A stub that succeeds without a reply.
    #[must_use]
    pub fn new(meta: CommandMeta) -> Self {
        Self::with_behavior(meta, || Ok(None))
    }

    /// A stub with a custom outcome per call.
    pub fn with_behavior<F>(meta: CommandMeta, behavior: F) -> Self
    where
        F: Fn() -> Result<Option<ReplyHandle>, CommandError> + Send + Sync + 'static,
    {
        Self {
            meta,
            behavior: Box::new(behavior),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times the stub has been executed.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Command for StubCommand {
    fn meta(&self) -> &CommandMeta {
        &self.meta
    }

    async fn execute(
        &self,
        _ctx: &CommandContext,
        _msg: &InboundMessage,
        _args: &[&str],
    ) -> Result<Option<ReplyHandle>, CommandError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        (self.behavior)()
    }
}

/// The dispatch configuration used across tests: prefix `!`, owner id 1.
#[must_use]
pub fn test_dispatch_config() -> DispatchConfig {
    DispatchConfig {
        prefix: "!".to_string(),
        owner: UserId(1),
    }
}

/// A human user snapshot with a `name#0001` tag.
#[must_use]
pub fn test_user(id: u64, name: &str) -> CachedUser {
    CachedUser {
        id: UserId(id),
        name: name.to_string(),
        tag: format!("{name}#0001"),
        bot: false,
    }
}

/// A guild-text message carrying full permissions, as most tests need.
#[must_use]
pub fn guild_message(content: &str, author: CachedUser) -> InboundMessage {
    InboundMessage {
        id: MessageId(1000),
        channel_id: ChannelId(123_456_789_012_345_678),
        guild_id: Some(GuildId(222_222_222_222_222_222)),
        author,
        channel_kind: ChannelKind::GuildText,
        content: content.to_string(),
        member_permissions: Some(Permissions::all()),
    }
}
