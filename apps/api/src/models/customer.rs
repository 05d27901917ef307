use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::generation::prompt_builder::CustomerContext;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustomerRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub relationship: String,
    pub preferences: String,
    pub important_notes: String,
    pub birthday: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dates render in the `YYYY年MM月DD日` display form.
fn display_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y年%m月%d日").to_string())
}

impl CustomerRow {
    /// Projects the registered fields into the prompt's customer block.
    pub fn to_context(&self) -> CustomerContext {
        CustomerContext {
            company: Some(self.company.clone()),
            preferences: Some(self.preferences.clone()),
            important_notes: Some(self.important_notes.clone()),
            birthday: display_date(self.birthday),
            anniversary: display_date(self.anniversary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_context_formats_dates_and_keeps_blanks() {
        let now = Utc::now();
        let row = CustomerRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "田中".to_string(),
            company: String::new(),
            email: String::new(),
            phone: String::new(),
            relationship: String::new(),
            preferences: "釣りの話".to_string(),
            important_notes: String::new(),
            birthday: NaiveDate::from_ymd_opt(1980, 3, 7),
            anniversary: None,
            created_at: now,
            updated_at: now,
        };
        let ctx = row.to_context();
        assert_eq!(ctx.birthday.as_deref(), Some("1980年03月07日"));
        assert!(ctx.anniversary.is_none());
        assert_eq!(ctx.company.as_deref(), Some(""));
        assert_eq!(ctx.preferences.as_deref(), Some("釣りの話"));
    }
}
