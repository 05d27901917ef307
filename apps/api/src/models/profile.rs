use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::generation::prompt_builder::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub work_name: String,
    pub store_type: String,
    pub experience_years: Option<i32>,
    pub personality_type: String,
    pub speaking_style: String,
    pub age_range: String,
    pub specialty_topics: String,
    pub work_schedule: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfileRow {
    /// The subset of the stored profile that shapes prompts.
    pub fn to_prompt_profile(&self) -> UserProfile {
        UserProfile {
            work_name: Some(self.work_name.clone()),
            store_type: Some(self.store_type.clone()),
            experience_years: self.experience_years,
            personality_type: Some(self.personality_type.clone()),
            speaking_style: Some(self.speaking_style.clone()),
            specialty_topics: Some(self.specialty_topics.clone()),
        }
    }
}
