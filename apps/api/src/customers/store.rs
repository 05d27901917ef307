use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::customer::CustomerRow;
use crate::models::page_offset;
use crate::validation::{customer_name, max_chars, MAX_COMPANY_NAME_LENGTH};

pub const CUSTOMERS_PER_PAGE: i64 = 50;

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub relationship: Option<String>,
    pub preferences: Option<String>,
    pub important_notes: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,
}

impl CustomerUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            customer_name(name)?;
        }
        if let Some(company) = &self.company {
            max_chars("company", company, MAX_COMPANY_NAME_LENGTH)?;
        }
        Ok(())
    }
}

/// Returns the customer named `name`, creating it on first use.
/// The name is trimmed; a concurrent insert of the same name resolves to the same row.
pub async fn get_or_create_customer(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
) -> Result<CustomerRow, AppError> {
    let name = customer_name(name)?;

    let row = sqlx::query_as::<_, CustomerRow>(
        r#"
        INSERT INTO customers (user_id, name)
        VALUES ($1, $2)
        ON CONFLICT (user_id, name) DO UPDATE SET name = EXCLUDED.name
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Most recently touched first, one page at a time.
pub async fn list_customers(
    pool: &PgPool,
    user_id: Uuid,
    page: u32,
) -> Result<Vec<CustomerRow>, AppError> {
    let rows = sqlx::query_as::<_, CustomerRow>(
        "SELECT * FROM customers WHERE user_id = $1 ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(CUSTOMERS_PER_PAGE)
    .bind(page_offset(page, CUSTOMERS_PER_PAGE))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_customer(
    pool: &PgPool,
    user_id: Uuid,
    customer_id: Uuid,
) -> Result<Option<CustomerRow>, AppError> {
    let row = sqlx::query_as::<_, CustomerRow>(
        "SELECT * FROM customers WHERE id = $1 AND user_id = $2",
    )
    .bind(customer_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Applies `update` and bumps `updated_at`. `None` when the customer does not exist.
pub async fn update_customer(
    pool: &PgPool,
    user_id: Uuid,
    customer_id: Uuid,
    update: &CustomerUpdate,
) -> Result<Option<CustomerRow>, AppError> {
    update.validate()?;

    let result = sqlx::query_as::<_, CustomerRow>(
        r#"
        UPDATE customers SET
            name            = COALESCE($3, name),
            company         = COALESCE($4, company),
            email           = COALESCE($5, email),
            phone           = COALESCE($6, phone),
            relationship    = COALESCE($7, relationship),
            preferences     = COALESCE($8, preferences),
            important_notes = COALESCE($9, important_notes),
            birthday        = COALESCE($10, birthday),
            anniversary     = COALESCE($11, anniversary),
            updated_at      = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(customer_id)
    .bind(user_id)
    .bind(update.name.as_deref().map(str::trim))
    .bind(update.company.as_deref())
    .bind(update.email.as_deref())
    .bind(update.phone.as_deref())
    .bind(update.relationship.as_deref())
    .bind(update.preferences.as_deref())
    .bind(update.important_notes.as_deref())
    .bind(update.birthday)
    .bind(update.anniversary)
    .fetch_optional(pool)
    .await;

    match result {
        Ok(row) => Ok(row),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
            "a customer with this name already exists".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Deletes the customer with its notes and message history. Returns whether a row was removed.
pub async fn delete_customer(
    pool: &PgPool,
    user_id: Uuid,
    customer_id: Uuid,
) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1 AND user_id = $2")
        .bind(customer_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        info!("Deleted customer {customer_id} for user {user_id}");
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_validation() {
        assert!(CustomerUpdate::default().validate().is_ok());

        let blank_name = CustomerUpdate {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(blank_name.validate(), Err(AppError::Validation(_))));

        let long_company = CustomerUpdate {
            company: Some("株".repeat(MAX_COMPANY_NAME_LENGTH + 1)),
            ..Default::default()
        };
        assert!(long_company.validate().is_err());
    }

    #[test]
    fn test_update_deserializes_dates() {
        let update: CustomerUpdate =
            serde_json::from_str(r#"{"birthday":"1985-12-24","preferences":"ワイン"}"#).unwrap();
        assert_eq!(update.birthday, NaiveDate::from_ymd_opt(1985, 12, 24));
        assert_eq!(update.preferences.as_deref(), Some("ワイン"));
        assert!(update.name.is_none());
    }
}
