//! Serenity-backed implementations of the core transport and cache seams.
//!
//! Everything the dispatch pipeline knows about Discord goes through
//! [`Transport`] and [`EntityCache`]; this module is the only place that
//! touches serenity's http client and cache directly.

use async_trait::async_trait;
use reactbot_common::{ChannelId, EmojiId, GuildId, MessageId, RoleId, UserId};
use reactbot_core::{
    split_content, CachedChannel, CachedEmoji, CachedMember, CachedMessage, CachedRole,
    CachedUser, ChannelKind, EntityCache, InboundMessage, ReplyHandle, Transport, TransportError,
};
use serenity::http::{Http, HttpError};
use serenity::model::channel::{ChannelType, GuildChannel, Message};
use serenity::model::guild::{Emoji, Member, Role};
use serenity::model::permissions::Permissions;
use serenity::model::user::User;
use std::sync::Arc;

#[allow(clippy::cast_possible_truncation)]
fn map_error(err: serenity::Error) -> TransportError {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => TransportError::Api {
            code: response.error.code as i64,
            message: response.error.message,
        },
        other => TransportError::Platform(other.to_string()),
    }
}

/// [`Transport`] over serenity's http client.
pub struct SerenityTransport {
    http: Arc<Http>,
}

impl SerenityTransport {
    /// Wraps an http client handle.
    #[must_use]
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for SerenityTransport {
    async fn send(
        &self,
        channel: ChannelId,
        content: &str,
        split: bool,
    ) -> Result<ReplyHandle, TransportError> {
        let target = serenity::model::id::ChannelId::new(channel.0);

        let parts = if split {
            split_content(content)
        } else {
            vec![content.to_string()]
        };

        let mut handle = None;
        for part in parts {
            let message = target.say(&self.http, part).await.map_err(map_error)?;
            handle = Some(ReplyHandle {
                channel_id: channel,
                message_id: MessageId(message.id.get()),
            });
        }

        // `split_content` never returns zero parts for the non-empty
        // content commands produce.
        handle.ok_or_else(|| TransportError::Platform("empty message".to_string()))
    }

    async fn delete(&self, channel: ChannelId, message: MessageId) -> Result<(), TransportError> {
        self.http
            .delete_message(
                serenity::model::id::ChannelId::new(channel.0),
                serenity::model::id::MessageId::new(message.0),
                None,
            )
            .await
            .map_err(map_error)
    }
}

fn cached_user(user: &User) -> CachedUser {
    CachedUser {
        id: UserId(user.id.get()),
        name: user.name.clone(),
        tag: user.tag(),
        bot: user.bot,
    }
}

fn cached_member(guild: GuildId, member: &Member) -> CachedMember {
    CachedMember {
        user: cached_user(&member.user),
        guild_id: guild,
        nick: member.nick.clone(),
    }
}

fn cached_role(guild: GuildId, role: &Role) -> CachedRole {
    CachedRole {
        id: RoleId(role.id.get()),
        guild_id: guild,
        name: role.name.clone(),
    }
}

fn cached_channel(guild: GuildId, channel: &GuildChannel) -> CachedChannel {
    CachedChannel {
        id: ChannelId(channel.id.get()),
        guild_id: guild,
        name: channel.name.clone(),
        kind: channel_kind(channel.kind),
    }
}

fn cached_emoji(emoji: &Emoji) -> CachedEmoji {
    CachedEmoji {
        id: Some(EmojiId(emoji.id.get())),
        name: emoji.name.clone(),
        animated: emoji.animated,
        available: emoji.available,
    }
}

const fn channel_kind(kind: ChannelType) -> ChannelKind {
    match kind {
        ChannelType::Text => ChannelKind::GuildText,
        ChannelType::Private => ChannelKind::Dm,
        _ => ChannelKind::Other,
    }
}

/// Effective guild permissions of a member, or `None` when the member is
/// not cached.
fn member_permissions(
    cache: &serenity::cache::Cache,
    guild_id: serenity::model::id::GuildId,
    user_id: serenity::model::id::UserId,
) -> Option<Permissions> {
    let guild = cache.guild(guild_id)?;

    if guild.owner_id == user_id {
        return Some(Permissions::all());
    }

    let member = guild.members.get(&user_id)?;

    // The everyone role shares the guild's id.
    let everyone = serenity::model::id::RoleId::new(guild_id.get());
    let mut permissions = guild
        .roles
        .get(&everyone)
        .map_or_else(Permissions::empty, |role| role.permissions);
    for role_id in &member.roles {
        if let Some(role) = guild.roles.get(role_id) {
            permissions |= role.permissions;
        }
    }

    if permissions.contains(Permissions::ADMINISTRATOR) {
        return Some(Permissions::all());
    }

    Some(permissions)
}

/// Converts a gateway message into the pipeline's inbound form.
#[must_use]
pub fn inbound_from_message(cache: &serenity::cache::Cache, msg: &Message) -> InboundMessage {
    let guild_id = msg.guild_id.map(|id| GuildId(id.get()));

    let channel_kind = match msg.guild_id {
        None => ChannelKind::Dm,
        Some(gid) => cache
            .guild(gid)
            .and_then(|guild| guild.channels.get(&msg.channel_id).map(|c| c.kind))
            .map_or(ChannelKind::Other, channel_kind),
    };

    let member_permissions = msg
        .guild_id
        .and_then(|gid| member_permissions(cache, gid, msg.author.id));

    InboundMessage {
        id: MessageId(msg.id.get()),
        channel_id: ChannelId(msg.channel_id.get()),
        guild_id,
        author: cached_user(&msg.author),
        channel_kind,
        content: msg.content.clone(),
        member_permissions,
    }
}

/// [`EntityCache`] over serenity's gateway cache, falling back to http for
/// message fetches.
pub struct SerenityCache {
    cache: Arc<serenity::cache::Cache>,
    http: Arc<Http>,
}

impl SerenityCache {
    /// Wraps the gateway cache and an http client handle.
    #[must_use]
    pub fn new(cache: Arc<serenity::cache::Cache>, http: Arc<Http>) -> Self {
        Self { cache, http }
    }
}

#[async_trait]
impl EntityCache for SerenityCache {
    fn user(&self, id: UserId) -> Option<CachedUser> {
        let user = self.cache.user(serenity::model::id::UserId::new(id.0))?;
        Some(cached_user(&user))
    }

    fn member(&self, guild: GuildId, user: UserId) -> Option<CachedMember> {
        let guild_ref = self.cache.guild(serenity::model::id::GuildId::new(guild.0))?;
        let member = guild_ref
            .members
            .get(&serenity::model::id::UserId::new(user.0))?;
        Some(cached_member(guild, member))
    }

    fn role(&self, guild: GuildId, role: RoleId) -> Option<CachedRole> {
        let guild_ref = self.cache.guild(serenity::model::id::GuildId::new(guild.0))?;
        let role = guild_ref
            .roles
            .get(&serenity::model::id::RoleId::new(role.0))?;
        Some(cached_role(guild, role))
    }

    fn channel(&self, guild: GuildId, channel: ChannelId) -> Option<CachedChannel> {
        let guild_ref = self.cache.guild(serenity::model::id::GuildId::new(guild.0))?;
        let channel = guild_ref
            .channels
            .get(&serenity::model::id::ChannelId::new(channel.0))?;
        Some(cached_channel(guild, channel))
    }

    async fn message(&self, channel: ChannelId, message: MessageId) -> Option<CachedMessage> {
        let fetched = self
            .http
            .get_message(
                serenity::model::id::ChannelId::new(channel.0),
                serenity::model::id::MessageId::new(message.0),
            )
            .await
            .ok()?;

        Some(CachedMessage {
            id: MessageId(fetched.id.get()),
            channel_id: ChannelId(fetched.channel_id.get()),
            author_id: UserId(fetched.author.id.get()),
            content: fetched.content.clone(),
        })
    }

    fn emojis(&self) -> Vec<CachedEmoji> {
        let mut emojis = Vec::new();
        for guild_id in self.cache.guilds() {
            if let Some(guild) = self.cache.guild(guild_id) {
                emojis.extend(guild.emojis.values().map(cached_emoji));
            }
        }
        emojis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_kind_mapping() {
        assert_eq!(channel_kind(ChannelType::Text), ChannelKind::GuildText);
        assert_eq!(channel_kind(ChannelType::Private), ChannelKind::Dm);
        assert_eq!(channel_kind(ChannelType::Voice), ChannelKind::Other);
        assert_eq!(channel_kind(ChannelType::News), ChannelKind::Other);
    }
}
