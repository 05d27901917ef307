use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A customer note joined with its customer's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustomerNoteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub note_content: String,
    pub note_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
