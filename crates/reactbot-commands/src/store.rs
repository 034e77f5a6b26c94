//! Persistence seam for the reaction leaderboard.

use async_trait::async_trait;
use reactbot_common::{GuildId, UserId};
use sqlx::PgPool;

/// Ranks a user by reaction count within one guild.
///
/// `RANK()` over the per-guild reaction totals, ties broken by user id so
/// the ordering is stable. The join keeps users known outside the guild
/// resolvable to `NULL` instead of an empty result.
const RANK_QUERY: &str = r#"
SELECT ranked
FROM users u
         LEFT OUTER JOIN (
    SELECT "user", RANK() OVER (ORDER BY reactions DESC, "user") AS ranked
    FROM users
    WHERE guild = $1
) AS r ON r."user" = u."user"
WHERE u."user" = $2
"#;

/// Read access to the per-guild reaction standings.
#[async_trait]
pub trait RankStore: Send + Sync {
    /// The 1-based rank of `user` within `guild`, or `None` when the user
    /// has no recorded reactions there.
    async fn reaction_rank(&self, guild: GuildId, user: UserId)
        -> anyhow::Result<Option<i64>>;
}

/// [`RankStore`] backed by the bot's Postgres pool.
pub struct PgRankStore {
    pool: PgPool,
}

impl PgRankStore {
    /// Creates a store over an already-connected pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RankStore for PgRankStore {
    #[allow(clippy::cast_possible_wrap)]
    async fn reaction_rank(
        &self,
        guild: GuildId,
        user: UserId,
    ) -> anyhow::Result<Option<i64>> {
        // Snowflakes exceed i32 but fit i64 bit-for-bit.
        let ranked: Option<Option<i64>> = sqlx::query_scalar(RANK_QUERY)
            .bind(guild.0 as i64)
            .bind(user.0 as i64)
            .fetch_optional(&self.pool)
            .await?;

        Ok(ranked.flatten())
    }
}
