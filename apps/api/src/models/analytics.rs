use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TonePreferenceRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tone: String,
    pub preference_score: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ToneUsageRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tone: String,
    pub usage_count: i32,
    pub last_used_at: DateTime<Utc>,
}

/// Ratings aggregated over the messages written in one tone.
#[derive(Debug, Clone, FromRow)]
pub struct ToneRatingSummary {
    pub tone: String,
    pub rated_count: i64,
    pub average_rating: Option<f64>,
}
