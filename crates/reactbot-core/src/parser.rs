//! Resolving raw message tokens to cached entities.
//!
//! Absence is the normal outcome here: a stale mention, a deleted message
//! or a foreign emoji all resolve to `None`, never to an error.

use crate::client::{
    CachedChannel, CachedEmoji, CachedMember, CachedMessage, CachedRole, CachedUser, EntityCache,
};
use once_cell::sync::Lazy;
use regex::Regex;
use reactbot_common::{ChannelId, GuildId, MessageId, RoleId, UserId};

/// Approximation of the RGI emoji grammar: a flag pair, or a pictograph
/// with optional variation selector and skin tone, continued over ZWJ.
static UNICODE_EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\x{1F1E6}-\x{1F1FF}]{2}|(?:\p{Emoji_Presentation}|\p{Extended_Pictographic})\x{FE0F}?\p{Emoji_Modifier}?(?:\x{200D}(?:\p{Emoji_Presentation}|\p{Extended_Pictographic})\x{FE0F}?\p{Emoji_Modifier}?)*",
    )
    .expect("emoji pattern is valid")
});

/// An emoji token resolved by [`string_to_emoji`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedEmoji {
    /// A custom emoji known to the client.
    Custom(CachedEmoji),
    /// A plain unicode emoji.
    Unicode(String),
}

fn parse_id(token: &str) -> Option<u64> {
    token.parse::<u64>().ok().filter(|id| *id != 0)
}

/// Resolves a user from a `<@id>` / `<@!id>` mention or a raw id.
///
/// Bot accounts never resolve; commands do not act on them.
pub fn user_from_mention(cache: &dyn EntityCache, token: &str) -> Option<CachedUser> {
    let mut body = token;
    if let Some(inner) = token.strip_prefix("<@").and_then(|t| t.strip_suffix('>')) {
        body = inner.strip_prefix('!').unwrap_or(inner);
    }

    let user = cache.user(UserId(parse_id(body)?))?;
    (!user.bot).then_some(user)
}

/// Resolves a guild member from a mention or a raw id.
pub fn member_from_mention(
    cache: &dyn EntityCache,
    token: &str,
    guild: GuildId,
) -> Option<CachedMember> {
    let user = user_from_mention(cache, token)?;
    cache.member(guild, user.id)
}

/// Resolves a role from a `<@&id>` mention or a raw id.
pub fn role_from_mention(cache: &dyn EntityCache, token: &str, guild: GuildId) -> Option<CachedRole> {
    let mut body = token;
    if let Some(inner) = token.strip_prefix("<@").and_then(|t| t.strip_suffix('>')) {
        body = inner.strip_prefix('&').unwrap_or(inner);
    }

    cache.role(guild, RoleId(parse_id(body)?))
}

/// Resolves a guild channel from a raw id.
pub fn channel_from_id(cache: &dyn EntityCache, id: &str, guild: GuildId) -> Option<CachedChannel> {
    cache.channel(guild, ChannelId(parse_id(id)?))
}

/// Fetches a message by raw id from a channel's message store.
///
/// Any fetch failure (deleted message, missing access, malformed id)
/// resolves to `None`.
pub async fn message_from_id(
    cache: &dyn EntityCache,
    id: &str,
    channel: ChannelId,
) -> Option<CachedMessage> {
    match parse_id(id) {
        Some(id) => cache.message(channel, MessageId(id)).await,
        None => None,
    }
}

/// Resolves an emoji token.
///
/// An available custom emoji whose canonical form matches the token wins;
/// otherwise the first unicode emoji found inside the token is taken.
pub fn string_to_emoji(cache: &dyn EntityCache, token: &str) -> Option<ResolvedEmoji> {
    if token.is_empty() {
        return None;
    }

    let custom = cache
        .emojis()
        .into_iter()
        .filter(|emoji| emoji.available)
        .find(|emoji| canonical_form(emoji) == token);
    if let Some(emoji) = custom {
        return Some(ResolvedEmoji::Custom(emoji));
    }

    UNICODE_EMOJI
        .find(token)
        .map(|found| ResolvedEmoji::Unicode(found.as_str().to_string()))
}

/// Formats a resolved emoji back into its message representation.
///
/// Unicode emoji pass through unchanged, so the operation is idempotent on
/// plain strings; custom emoji format to `<a:name:id>` / `<:name:id>`.
pub fn string_from_emoji(emoji: &ResolvedEmoji) -> String {
    match emoji {
        ResolvedEmoji::Unicode(text) => text.clone(),
        ResolvedEmoji::Custom(custom) => canonical_form(custom),
    }
}

fn canonical_form(emoji: &CachedEmoji) -> String {
    emoji.id.map_or_else(
        || emoji.name.clone(),
        |id| {
            format!(
                "<{}:{}:{}>",
                if emoji.animated { "a" } else { "" },
                emoji.name,
                id
            )
        },
    )
}
