use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::customers::store::get_or_create_customer;
use crate::errors::AppError;
use crate::models::note::CustomerNoteRow;
use crate::validation::{max_chars, require_text, MAX_NOTE_LENGTH};

pub const DEFAULT_NOTE_TYPE: &str = "general";

const NOTE_COLUMNS: &str = "n.id, n.user_id, n.customer_id, c.name AS customer_name, \
     n.note_content, n.note_type, n.created_at, n.updated_at";

fn validate_content(content: &str) -> Result<&str, AppError> {
    let content = require_text("note_content", content)?;
    max_chars("note_content", content, MAX_NOTE_LENGTH)?;
    Ok(content)
}

fn note_type_or_default(note_type: Option<&str>) -> &str {
    note_type
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_NOTE_TYPE)
}

/// Saves a note against `customer_name`, creating the customer on first use.
pub async fn save_note(
    pool: &PgPool,
    user_id: Uuid,
    customer_name: &str,
    content: &str,
    note_type: Option<&str>,
) -> Result<CustomerNoteRow, AppError> {
    let content = validate_content(content)?;
    let customer = get_or_create_customer(pool, user_id, customer_name).await?;

    let row = sqlx::query_as::<_, CustomerNoteRow>(
        r#"
        INSERT INTO customer_notes (user_id, customer_id, note_content, note_type)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, customer_id, $5::text AS customer_name,
                  note_content, note_type, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(customer.id)
    .bind(content)
    .bind(note_type_or_default(note_type))
    .bind(&customer.name)
    .fetch_one(pool)
    .await?;

    info!("Saved note {} for customer {}", row.id, customer.id);
    Ok(row)
}

/// Newest first, optionally limited to one customer by name.
pub async fn list_notes(
    pool: &PgPool,
    user_id: Uuid,
    customer_name: Option<&str>,
) -> Result<Vec<CustomerNoteRow>, AppError> {
    let customer_name = customer_name.map(str::trim).filter(|n| !n.is_empty());
    let rows = sqlx::query_as::<_, CustomerNoteRow>(&format!(
        "SELECT {NOTE_COLUMNS} FROM customer_notes n \
         JOIN customers c ON c.id = n.customer_id \
         WHERE n.user_id = $1 AND ($2::text IS NULL OR c.name = $2) \
         ORDER BY n.created_at DESC"
    ))
    .bind(user_id)
    .bind(customer_name)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_note(
    pool: &PgPool,
    user_id: Uuid,
    note_id: Uuid,
) -> Result<Option<CustomerNoteRow>, AppError> {
    let row = sqlx::query_as::<_, CustomerNoteRow>(&format!(
        "SELECT {NOTE_COLUMNS} FROM customer_notes n \
         JOIN customers c ON c.id = n.customer_id \
         WHERE n.id = $1 AND n.user_id = $2"
    ))
    .bind(note_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Notes among `note_ids` owned by the user, oldest first. Unknown ids are skipped.
pub async fn get_selected_notes(
    pool: &PgPool,
    user_id: Uuid,
    note_ids: &[Uuid],
) -> Result<Vec<CustomerNoteRow>, AppError> {
    if note_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, CustomerNoteRow>(&format!(
        "SELECT {NOTE_COLUMNS} FROM customer_notes n \
         JOIN customers c ON c.id = n.customer_id \
         WHERE n.user_id = $1 AND n.id = ANY($2) \
         ORDER BY n.created_at ASC"
    ))
    .bind(user_id)
    .bind(note_ids)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn update_note(
    pool: &PgPool,
    user_id: Uuid,
    note_id: Uuid,
    content: Option<&str>,
    note_type: Option<&str>,
) -> Result<Option<CustomerNoteRow>, AppError> {
    let content = content.map(validate_content).transpose()?;
    let note_type = note_type.map(|t| note_type_or_default(Some(t)));

    let updated: Option<Uuid> = sqlx::query_scalar(
        r#"
        UPDATE customer_notes SET
            note_content = COALESCE($3, note_content),
            note_type    = COALESCE($4, note_type),
            updated_at   = now()
        WHERE id = $1 AND user_id = $2
        RETURNING id
        "#,
    )
    .bind(note_id)
    .bind(user_id)
    .bind(content)
    .bind(note_type)
    .fetch_optional(pool)
    .await?;

    match updated {
        Some(id) => get_note(pool, user_id, id).await,
        None => Ok(None),
    }
}

pub async fn delete_note(pool: &PgPool, user_id: Uuid, note_id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM customer_notes WHERE id = $1 AND user_id = $2")
        .bind(note_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Joins note texts into one block for the notes-based prompt, one note per paragraph.
pub fn combine_note_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> String {
    texts
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_type_defaults_to_general() {
        assert_eq!(note_type_or_default(None), "general");
        assert_eq!(note_type_or_default(Some("  ")), "general");
        assert_eq!(note_type_or_default(Some("visit")), "visit");
    }

    #[test]
    fn test_content_limits() {
        assert!(validate_content("").is_err());
        assert!(validate_content(&"メ".repeat(MAX_NOTE_LENGTH)).is_ok());
        assert!(validate_content(&"メ".repeat(MAX_NOTE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_combine_skips_blank_notes() {
        let combined = combine_note_texts([" 初来店 ", "", "ゴルフ好き"]);
        assert_eq!(combined, "初来店\n\nゴルフ好き");
        assert_eq!(combine_note_texts(Vec::<&str>::new()), "");
    }
}
