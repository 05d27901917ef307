use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::labels::{MessageType, Tone};
use crate::models::message::{MessageHistoryRow, MessageRatingRow};
use crate::models::page_offset;
use crate::validation::score_1_to_5;

pub const MESSAGES_PER_PAGE: i64 = 20;

/// A generated message ready to be recorded.
pub struct NewMessage<'a> {
    pub user_id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: &'a str,
    pub generated_message: &'a str,
    pub message_type: MessageType,
    pub tone: Tone,
    pub what_happened: &'a str,
}

pub async fn save_message(
    pool: &PgPool,
    message: NewMessage<'_>,
) -> Result<MessageHistoryRow, AppError> {
    let row = sqlx::query_as::<_, MessageHistoryRow>(
        r#"
        INSERT INTO message_history
            (user_id, customer_id, customer_name, generated_message, message_type, tone, what_happened)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(message.user_id)
    .bind(message.customer_id)
    .bind(message.customer_name)
    .bind(message.generated_message)
    .bind(message.message_type.as_str())
    .bind(message.tone.as_str())
    .bind(message.what_happened)
    .fetch_one(pool)
    .await?;

    info!("Saved message {} for user {}", row.id, row.user_id);
    Ok(row)
}

/// Newest first, one page at a time.
pub async fn list_messages(
    pool: &PgPool,
    user_id: Uuid,
    page: u32,
) -> Result<Vec<MessageHistoryRow>, AppError> {
    let rows = sqlx::query_as::<_, MessageHistoryRow>(
        r#"
        SELECT * FROM message_history
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(MESSAGES_PER_PAGE)
    .bind(page_offset(page, MESSAGES_PER_PAGE))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_message(
    pool: &PgPool,
    user_id: Uuid,
    message_id: Uuid,
) -> Result<Option<MessageHistoryRow>, AppError> {
    let row = sqlx::query_as::<_, MessageHistoryRow>(
        "SELECT * FROM message_history WHERE id = $1 AND user_id = $2",
    )
    .bind(message_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn delete_message(
    pool: &PgPool,
    user_id: Uuid,
    message_id: Uuid,
) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM message_history WHERE id = $1 AND user_id = $2")
        .bind(message_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Rates one of the user's messages. Rating again replaces the earlier rating.
pub async fn save_rating(
    pool: &PgPool,
    user_id: Uuid,
    message_id: Uuid,
    rating: i16,
    feedback: Option<&str>,
) -> Result<MessageRatingRow, AppError> {
    let rating = score_1_to_5("rating", rating)?;

    if get_message(pool, user_id, message_id).await?.is_none() {
        return Err(AppError::NotFound(format!("message {message_id}")));
    }

    let row = sqlx::query_as::<_, MessageRatingRow>(
        r#"
        INSERT INTO message_ratings (user_id, message_id, rating, feedback)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, message_id)
        DO UPDATE SET rating = EXCLUDED.rating, feedback = EXCLUDED.feedback, created_at = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(message_id)
    .bind(rating)
    .bind(feedback.map(str::trim).filter(|f| !f.is_empty()))
    .fetch_one(pool)
    .await?;

    info!("Rated message {message_id} as {rating} for user {user_id}");
    Ok(row)
}
