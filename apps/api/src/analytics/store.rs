use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::analytics::scoring::{build_tone_analysis, success_rate, ToneAnalysisEntry};
use crate::errors::AppError;
use crate::generation::labels::Tone;
use crate::models::analytics::{TonePreferenceRow, ToneRatingSummary, ToneUsageRow};
use crate::validation::score_1_to_5;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserStats {
    pub message_count: i64,
    pub customer_count: i64,
    /// Messages since the start of the current calendar month (database time zone).
    pub monthly_count: i64,
}

pub async fn get_stats(pool: &PgPool, user_id: Uuid) -> Result<UserStats, AppError> {
    let stats = sqlx::query_as::<_, UserStats>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM message_history WHERE user_id = $1) AS message_count,
            (SELECT COUNT(*) FROM customers WHERE user_id = $1) AS customer_count,
            (SELECT COUNT(*) FROM message_history
              WHERE user_id = $1 AND created_at >= date_trunc('month', now())) AS monthly_count
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(stats)
}

/// Bumps the usage counter for `tone`, creating it at 1 on first use.
pub async fn record_tone_usage(pool: &PgPool, user_id: Uuid, tone: Tone) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO user_tone_analysis (user_id, tone, usage_count, last_used_at)
        VALUES ($1, $2, 1, now())
        ON CONFLICT (user_id, tone) DO UPDATE SET
            usage_count  = user_tone_analysis.usage_count + 1,
            last_used_at = now()
        "#,
    )
    .bind(user_id)
    .bind(tone.as_str())
    .execute(pool)
    .await?;
    Ok(())
}

/// Highest preference first.
pub async fn list_tone_preferences(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<TonePreferenceRow>, AppError> {
    let rows = sqlx::query_as::<_, TonePreferenceRow>(
        "SELECT * FROM user_tone_preferences WHERE user_id = $1 ORDER BY preference_score DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn save_tone_preference(
    pool: &PgPool,
    user_id: Uuid,
    tone: Tone,
    score: i16,
) -> Result<TonePreferenceRow, AppError> {
    let score = score_1_to_5("preference_score", score)?;

    let row = sqlx::query_as::<_, TonePreferenceRow>(
        r#"
        INSERT INTO user_tone_preferences (user_id, tone, preference_score)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, tone) DO UPDATE SET
            preference_score = EXCLUDED.preference_score,
            updated_at       = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(tone.as_str())
    .bind(score)
    .fetch_one(pool)
    .await?;

    info!("Saved tone preference {}={score} for user {user_id}", tone.as_str());
    Ok(row)
}

/// Success rate of messages written in `tone`, from their ratings.
pub async fn tone_success_rate(pool: &PgPool, user_id: Uuid, tone: Tone) -> Result<f64, AppError> {
    let average: Option<f64> = sqlx::query_scalar(
        r#"
        SELECT AVG(r.rating)::float8
        FROM message_ratings r
        JOIN message_history m ON m.id = r.message_id
        WHERE r.user_id = $1 AND m.tone = $2
        "#,
    )
    .bind(user_id)
    .bind(tone.as_str())
    .fetch_one(pool)
    .await?;
    Ok(success_rate(average))
}

pub async fn tone_analysis(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ToneAnalysisEntry>, AppError> {
    let usage = sqlx::query_as::<_, ToneUsageRow>(
        "SELECT * FROM user_tone_analysis WHERE user_id = $1 ORDER BY usage_count DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let ratings = sqlx::query_as::<_, ToneRatingSummary>(
        r#"
        SELECT m.tone, COUNT(*) AS rated_count, AVG(r.rating)::float8 AS average_rating
        FROM message_ratings r
        JOIN message_history m ON m.id = r.message_id
        WHERE r.user_id = $1
        GROUP BY m.tone
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let preferences = list_tone_preferences(pool, user_id).await?;

    Ok(build_tone_analysis(&usage, &ratings, &preferences))
}
