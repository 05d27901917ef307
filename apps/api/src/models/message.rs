use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageHistoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub generated_message: String,
    pub message_type: String,
    pub tone: String,
    pub what_happened: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageRatingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message_id: Uuid,
    pub rating: i16,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}
