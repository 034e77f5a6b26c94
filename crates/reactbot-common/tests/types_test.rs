//! Tests for the core type definitions in reactbot-common.
//!
//! Covers the newtype wrappers implementing the expected traits
//! (Display, Debug, Serialize, Deserialize) and their use as map keys.

use std::collections::HashMap;
use reactbot_common::types::*;

#[test]
fn test_user_id_implements_expected_traits() {
    let user_id = UserId(987654321);

    let debug_str = format!("{:?}", user_id);
    assert_eq!(debug_str, "UserId(987654321)");

    let display_str = format!("{}", user_id);
    assert_eq!(display_str, "987654321");

    let copied_id = user_id;
    assert_eq!(user_id, copied_id);
    assert_ne!(user_id, UserId(123456789));

    let mut map = HashMap::new();
    map.insert(user_id, "test_user");
    assert_eq!(map.get(&user_id), Some(&"test_user"));
}

#[test]
fn test_id_serialization_roundtrips() {
    let user_id = UserId(987654321);
    let serialized = serde_json::to_string(&user_id).unwrap();
    assert_eq!(serialized, "987654321");
    let deserialized: UserId = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, user_id);

    let guild_id = GuildId(42);
    let serialized = serde_json::to_string(&guild_id).unwrap();
    let deserialized: GuildId = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, guild_id);

    let channel_id = ChannelId(123456789012345678);
    let serialized = serde_json::to_string(&channel_id).unwrap();
    let deserialized: ChannelId = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, channel_id);
}

#[test]
fn test_message_and_role_ids_display() {
    assert_eq!(MessageId(7).to_string(), "7");
    assert_eq!(RoleId(8).to_string(), "8");
    assert_eq!(EmojiId(9).to_string(), "9");
}

#[test]
fn test_error_display() {
    let err = ReactBotError::Config("prefix cannot be empty".to_string());
    assert_eq!(
        err.to_string(),
        "Configuration error: prefix cannot be empty"
    );

    let err = ReactBotError::Database("connection refused".to_string());
    assert_eq!(err.to_string(), "Database error: connection refused");
}
