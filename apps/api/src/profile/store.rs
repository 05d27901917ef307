use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::style::{PersonalityType, SpeakingStyle, StoreType};
use crate::models::profile::UserProfileRow;
use crate::validation::max_chars;

const MAX_WORK_NAME_LENGTH: usize = 50;
const MAX_SPECIALTY_TOPICS_LENGTH: usize = 500;

/// Fields a caller may set. Absent fields keep their stored value, or the column default on first save.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub work_name: Option<String>,
    pub store_type: Option<String>,
    pub experience_years: Option<i32>,
    pub personality_type: Option<String>,
    pub speaking_style: Option<String>,
    pub age_range: Option<String>,
    pub specialty_topics: Option<String>,
    pub work_schedule: Option<String>,
}

impl ProfileUpdate {
    /// Rejects unknown style tags and out-of-range values.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.work_name {
            max_chars("work_name", name, MAX_WORK_NAME_LENGTH)?;
        }
        if let Some(topics) = &self.specialty_topics {
            max_chars("specialty_topics", topics, MAX_SPECIALTY_TOPICS_LENGTH)?;
        }
        if let Some(years) = self.experience_years {
            if !(0..=60).contains(&years) {
                return Err(AppError::Validation(
                    "experience_years must be between 0 and 60".to_string(),
                ));
            }
        }
        check_tag("store_type", self.store_type.as_deref(), |t| {
            StoreType::ALL.iter().any(|s| s.as_str() == t)
        })?;
        check_tag("personality_type", self.personality_type.as_deref(), |t| {
            PersonalityType::ALL.iter().any(|p| p.as_str() == t)
        })?;
        check_tag("speaking_style", self.speaking_style.as_deref(), |t| {
            SpeakingStyle::ALL.iter().any(|s| s.as_str() == t)
        })?;
        Ok(())
    }
}

fn check_tag(field: &str, value: Option<&str>, known: impl Fn(&str) -> bool) -> Result<(), AppError> {
    match value {
        Some(tag) if !known(tag) => Err(AppError::Validation(format!(
            "unknown {field}: {tag}"
        ))),
        _ => Ok(()),
    }
}

pub async fn get_profile(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<UserProfileRow>, AppError> {
    let row = sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: &ProfileUpdate,
) -> Result<UserProfileRow, AppError> {
    update.validate()?;

    let row = sqlx::query_as::<_, UserProfileRow>(
        r#"
        INSERT INTO user_profiles
            (user_id, work_name, store_type, experience_years, personality_type,
             speaking_style, age_range, specialty_topics, work_schedule)
        VALUES ($1, COALESCE($2, ''), COALESCE($3, 'other'), $4, COALESCE($5, 'friendly'),
                COALESCE($6, 'standard'), COALESCE($7, ''), COALESCE($8, ''), COALESCE($9, ''))
        ON CONFLICT (user_id) DO UPDATE SET
            work_name        = COALESCE($2, user_profiles.work_name),
            store_type       = COALESCE($3, user_profiles.store_type),
            experience_years = COALESCE($4, user_profiles.experience_years),
            personality_type = COALESCE($5, user_profiles.personality_type),
            speaking_style   = COALESCE($6, user_profiles.speaking_style),
            age_range        = COALESCE($7, user_profiles.age_range),
            specialty_topics = COALESCE($8, user_profiles.specialty_topics),
            work_schedule    = COALESCE($9, user_profiles.work_schedule),
            updated_at       = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(update.work_name.as_deref().map(str::trim))
    .bind(update.store_type.as_deref())
    .bind(update.experience_years)
    .bind(update.personality_type.as_deref())
    .bind(update.speaking_style.as_deref())
    .bind(update.age_range.as_deref())
    .bind(update.specialty_topics.as_deref())
    .bind(update.work_schedule.as_deref())
    .fetch_one(pool)
    .await?;

    info!("Saved profile for user {user_id}");
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_pass() {
        let update = ProfileUpdate {
            store_type: Some("snack".to_string()),
            personality_type: Some("cute".to_string()),
            speaking_style: Some("kansai".to_string()),
            experience_years: Some(0),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let update = ProfileUpdate {
            store_type: Some("casino".to_string()),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_experience_bounds() {
        let update = ProfileUpdate {
            experience_years: Some(-1),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
