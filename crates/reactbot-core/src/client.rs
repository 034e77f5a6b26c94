//! Entity cache seam and the snapshot views handed out of it.
//!
//! The platform client's cache hands out short-lived guards, so the trait
//! returns small owned snapshots instead of borrows; the core never keeps
//! them past a single resolution.

use async_trait::async_trait;
use reactbot_common::{ChannelId, EmojiId, GuildId, MessageId, RoleId, UserId};
use serenity::model::permissions::Permissions;

/// Snapshot of a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedUser {
    /// User id.
    pub id: UserId,
    /// Account name.
    pub name: String,
    /// Full tag, e.g. `name#0001`.
    pub tag: String,
    /// Whether the account belongs to a bot.
    pub bot: bool,
}

/// Snapshot of a guild member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedMember {
    /// The member's user account.
    pub user: CachedUser,
    /// Guild the membership belongs to.
    pub guild_id: GuildId,
    /// Per-guild nickname, if set.
    pub nick: Option<String>,
}

/// Snapshot of a guild role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRole {
    /// Role id.
    pub id: RoleId,
    /// Guild the role belongs to.
    pub guild_id: GuildId,
    /// Role name.
    pub name: String,
}

/// Snapshot of a guild channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedChannel {
    /// Channel id.
    pub id: ChannelId,
    /// Guild the channel belongs to.
    pub guild_id: GuildId,
    /// Channel name.
    pub name: String,
    /// Channel kind.
    pub kind: ChannelKind,
}

/// Snapshot of a fetched message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedMessage {
    /// Message id.
    pub id: MessageId,
    /// Channel the message was sent in.
    pub channel_id: ChannelId,
    /// Author's user id.
    pub author_id: UserId,
    /// Raw text content.
    pub content: String,
}

/// Snapshot of an emoji known to the client.
///
/// Custom guild emoji carry an id; id-less entries are unicode emoji the
/// client tracks by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedEmoji {
    /// Custom emoji id, absent for unicode emoji.
    pub id: Option<EmojiId>,
    /// Emoji name.
    pub name: String,
    /// Whether the custom emoji is animated.
    pub animated: bool,
    /// Whether the emoji is currently usable.
    pub available: bool,
}

/// The kind of channel a message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// A standard guild text channel; the only kind commands run in.
    GuildText,
    /// A direct message channel.
    Dm,
    /// Anything else (voice, thread, news, unknown).
    Other,
}

/// One message received from the gateway, read-only to the core.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Message id.
    pub id: MessageId,
    /// Channel the message was sent in.
    pub channel_id: ChannelId,
    /// Guild context, absent for direct messages.
    pub guild_id: Option<GuildId>,
    /// Author snapshot.
    pub author: CachedUser,
    /// Kind of the originating channel.
    pub channel_kind: ChannelKind,
    /// Raw text content.
    pub content: String,
    /// The author's effective guild permissions, when known.
    pub member_permissions: Option<Permissions>,
}

/// Narrow interface to the platform client's entity cache.
#[async_trait]
pub trait EntityCache: Send + Sync {
    /// Looks up a user by id.
    fn user(&self, id: UserId) -> Option<CachedUser>;

    /// Looks up a guild member by guild and user id.
    fn member(&self, guild: GuildId, user: UserId) -> Option<CachedMember>;

    /// Looks up a guild role by id.
    fn role(&self, guild: GuildId, role: RoleId) -> Option<CachedRole>;

    /// Looks up a guild channel by id.
    fn channel(&self, guild: GuildId, channel: ChannelId) -> Option<CachedChannel>;

    /// Fetches a message by id from the channel's message store. Fetch
    /// failures of any kind resolve to `None`.
    async fn message(&self, channel: ChannelId, message: MessageId) -> Option<CachedMessage>;

    /// All emoji currently known to the client, across guilds.
    fn emojis(&self) -> Vec<CachedEmoji>;
}
