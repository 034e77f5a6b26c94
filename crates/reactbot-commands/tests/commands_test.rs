//! End-to-end command tests driven through the dispatcher with mocked
//! transport, cache and store.

use async_trait::async_trait;
use reactbot_commands::{register_all, RankStore};
use reactbot_common::{GuildId, UserId};
use reactbot_core::test_utils::{guild_message, test_dispatch_config, test_user, MockCache, MockTransport};
use reactbot_core::{CooldownTracker, Dispatcher, TaskQueue, Transport};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{advance, sleep};

/// In-memory store mapping `(guild, user)` to a rank.
#[derive(Default)]
struct MockRankStore {
    ranks: HashMap<(GuildId, UserId), i64>,
    fail: bool,
}

impl MockRankStore {
    fn with_rank(guild: GuildId, user: UserId, rank: i64) -> Self {
        let mut ranks = HashMap::new();
        ranks.insert((guild, user), rank);
        Self { ranks, fail: false }
    }

    fn failing() -> Self {
        Self {
            ranks: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl RankStore for MockRankStore {
    async fn reaction_rank(&self, guild: GuildId, user: UserId) -> anyhow::Result<Option<i64>> {
        if self.fail {
            anyhow::bail!("connection refused");
        }
        Ok(self.ranks.get(&(guild, user)).copied())
    }
}

struct Harness {
    dispatcher: Dispatcher,
    transport: Arc<MockTransport>,
}

fn harness_with(store: MockRankStore, cache: MockCache) -> Harness {
    let registry = register_all(Arc::new(store));
    let transport = Arc::new(MockTransport::new());
    let tasks = TaskQueue::new();
    let dispatcher = Dispatcher::new(
        test_dispatch_config(),
        Arc::new(registry),
        Arc::new(CooldownTracker::new(tasks.clone())),
        Arc::clone(&transport) as Arc<dyn Transport>,
        Arc::new(cache),
        tasks,
    );

    Harness {
        dispatcher,
        transport,
    }
}

fn harness() -> Harness {
    harness_with(MockRankStore::default(), MockCache::new())
}

const GUILD: GuildId = GuildId(222_222_222_222_222_222);

#[tokio::test]
async fn test_help_for_one_command() {
    let h = harness();

    h.dispatcher
        .dispatch(guild_message("!help rank", test_user(42, "tester")))
        .await;

    let sent = h.transport.sent.lock().clone();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].split, "help output is sent with splitting enabled");
    let content = &sent[0].content;
    assert!(content.starts_with("**Name:** Rank\n-----\n"));
    assert!(content.contains("**Description:** Get the rank of a user."));
    assert!(content.contains("**Usage:** !rank [?user]"));
    assert!(content.contains("**Cooldown:** 5 seconds"));
}

#[tokio::test]
async fn test_help_lookup_is_case_insensitive() {
    let h = harness();

    h.dispatcher
        .dispatch(guild_message("!help RANK", test_user(42, "tester")))
        .await;

    assert!(h.transport.sent_contents()[0].starts_with("**Name:** Rank"));
}

#[tokio::test]
async fn test_help_listing_hides_owner_commands() {
    let h = harness();

    h.dispatcher
        .dispatch(guild_message("!help", test_user(42, "tester")))
        .await;

    let content = h.transport.sent_contents().remove(0);
    assert!(content.starts_with("**Commands:**\n"));
    assert!(content.contains("Misc:\n- Help: Print some information"));
    assert!(content.contains("Reactions:\n- Rank: Get the rank of a user."));
    assert!(!content.contains("Dump"));
}

#[tokio::test]
async fn test_help_listing_shows_everything_to_owner() {
    let h = harness();

    h.dispatcher
        .dispatch(guild_message("!help", test_user(1, "owner")))
        .await;

    let content = h.transport.sent_contents().remove(0);
    assert!(content.contains("- Dump: Dump the command table for inspection."));
    // Categories come out sorted, with misc ahead of reactions.
    let misc = content.find("Misc:").unwrap();
    let reactions = content.find("Reactions:").unwrap();
    assert!(misc < reactions);
}

#[tokio::test]
async fn test_help_for_unknown_or_hidden_command() {
    let h = harness();

    h.dispatcher
        .dispatch(guild_message("!help nosuch", test_user(42, "tester")))
        .await;
    h.dispatcher
        .dispatch(guild_message("!help dump", test_user(42, "tester")))
        .await;

    let sent = h.transport.sent_contents();
    assert_eq!(
        sent,
        vec![
            "Could not find this command.".to_string(),
            "Could not find this command.".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_rank_defaults_to_author() {
    let h = harness_with(
        MockRankStore::with_rank(GUILD, UserId(42), 3),
        MockCache::new(),
    );

    h.dispatcher
        .dispatch(guild_message("!rank", test_user(42, "tester")))
        .await;

    assert_eq!(
        h.transport.sent_contents(),
        vec!["The user tester#0001 is ranked **number 3**.".to_string()]
    );
}

#[tokio::test]
async fn test_rank_resolves_mentioned_user() {
    let mut cache = MockCache::new();
    let friend = cache.add_user(77, "friend", false);
    let h = harness_with(MockRankStore::with_rank(GUILD, friend.id, 1), cache);

    h.dispatcher
        .dispatch(guild_message("!rank <@!77>", test_user(42, "tester")))
        .await;

    assert_eq!(
        h.transport.sent_contents(),
        vec!["The user friend#0001 is ranked **number 1**.".to_string()]
    );
}

#[tokio::test]
async fn test_rank_without_standing() {
    let h = harness();

    h.dispatcher
        .dispatch(guild_message("!rank", test_user(42, "tester")))
        .await;

    assert_eq!(
        h.transport.sent_contents(),
        vec!["The user tester#0001 does not have a rank yet.".to_string()]
    );
}

#[tokio::test]
async fn test_rank_with_unresolvable_mention() {
    let h = harness();

    h.dispatcher
        .dispatch(guild_message("!rank <@999>", test_user(42, "tester")))
        .await;

    assert_eq!(
        h.transport.sent_contents(),
        vec!["Could not find this user.".to_string()]
    );
}

#[tokio::test]
async fn test_rank_store_failure_stays_internal() {
    let h = harness_with(MockRankStore::failing(), MockCache::new());

    h.dispatcher
        .dispatch(guild_message("!rank", test_user(42, "tester")))
        .await;

    let sent = h.transport.sent_contents();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("Something went wrong"));
    assert!(!sent[0].contains("connection refused"));
}

#[tokio::test(start_paused = true)]
async fn test_rank_cooldown_notice() {
    let h = harness_with(
        MockRankStore::with_rank(GUILD, UserId(42), 3),
        MockCache::new(),
    );

    h.dispatcher
        .dispatch(guild_message("!rank", test_user(42, "tester")))
        .await;
    h.dispatcher
        .dispatch(guild_message("!rank", test_user(42, "tester")))
        .await;

    let sent = h.transport.sent_contents();
    assert_eq!(sent.len(), 2);
    assert!(sent[1].contains("Please wait 5 seconds"));
}

#[tokio::test(start_paused = true)]
async fn test_dump_chunks_and_cleans_up() {
    let h = harness();

    let msg = guild_message("!dump", test_user(1, "owner"));
    let trigger = (msg.channel_id, msg.id);
    let channel = msg.channel_id;
    h.dispatcher.dispatch(msg).await;

    let sent = h.transport.sent.lock().clone();
    assert!(!sent.is_empty());
    for message in &sent {
        assert!(message.content.starts_with("```json\n"));
        assert!(message.content.ends_with("```"));
    }
    // One JSON object per registered command, across all chunks.
    let objects: usize = sent
        .iter()
        .map(|m| m.content.matches("\"name\":").count())
        .sum();
    assert_eq!(objects, 3);

    // The trigger goes right away, the output thirty seconds later.
    assert_eq!(h.transport.deleted.lock().as_slice(), &[trigger]);
    advance(Duration::from_secs(31)).await;
    sleep(Duration::from_millis(1)).await;

    let deleted = h.transport.deleted.lock().clone();
    assert_eq!(deleted.len(), 2);
    assert_eq!(deleted[1].0, channel);
}

#[tokio::test]
async fn test_dump_is_silent_for_others() {
    let h = harness();

    h.dispatcher
        .dispatch(guild_message("!dump", test_user(42, "tester")))
        .await;

    assert!(h.transport.sent.lock().is_empty());
    assert!(h.transport.deleted.lock().is_empty());
}
