use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::UserId;

/// Per-user token budget.
///
/// Profiles are created lazily on first access from any entry point
/// (profile fetch, generation request, background job), so creation must
/// be race-safe: exactly one row survives per user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub user_id: UserId,
    pub token_balance: Decimal,
}

impl UserProfile {
    /// Fetch the profile for a user, creating it with the default balance
    /// if absent. Concurrent callers race harmlessly: the insert is
    /// `ON CONFLICT DO NOTHING` and every caller reads the surviving row.
    pub async fn get_or_create(user_id: UserId, pool: &PgPool) -> Result<Self> {
        sqlx::query("INSERT INTO user_profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(pool)
            .await?;

        sqlx::query_as::<_, Self>("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Atomically decrement the balance by `amount`.
    ///
    /// A relative update at the storage layer, never a read-modify-write,
    /// so concurrent jobs for the same user accumulate correctly. The
    /// balance is allowed to go negative; admission control happens at
    /// request time, not settlement time.
    pub async fn debit(user_id: UserId, amount: Decimal, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE user_profiles
            SET token_balance = token_balance - $2
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
