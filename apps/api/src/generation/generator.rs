//! Message generation: orchestrates one request from input to stored history.
//!
//! Flow: validate → load profile → resolve customer → tone adjustment →
//!       assemble prompt → writer → persist history → record tone usage.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::store::{list_tone_preferences, record_tone_usage};
use crate::customers::store::get_or_create_customer;
use crate::errors::AppError;
use crate::generation::labels::{MessageType, Tone};
use crate::generation::prompt_builder::{
    effective_relationship_level, generate_personalized_prompt, CustomerContext, PromptRequest,
    UserProfile,
};
use crate::generation::prompts::NOTES_WHAT_HAPPENED;
use crate::generation::templates::NOTES_TEMPLATE_EVENT;
use crate::generation::tone::resolve_tone_adjustment;
use crate::generation::writer::{MessageWriter, WriteRequest};
use crate::messages::store::{save_message, NewMessage};
use crate::notes::store::{combine_note_texts, get_selected_notes};
use crate::profile::store::get_profile;
use crate::validation::{
    customer_name, max_chars, require_text, MAX_MESSAGE_LENGTH, MAX_NOTE_LENGTH,
    MAX_WHAT_HAPPENED_LENGTH,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / response models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub user_id: Uuid,
    pub customer_name: String,
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(default)]
    pub tone: Tone,
    pub what_happened: String,
    /// Overrides the adjustment derived from the stored tone preference.
    pub tone_adjustment: Option<String>,
    /// Free-text note used to infer the relationship level.
    pub note_content: Option<String>,
    pub relationship_level: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateFromNotesRequest {
    pub user_id: Uuid,
    /// Falls back to the customer of the first selected note.
    pub customer_name: Option<String>,
    /// Raw notes typed by the caller.
    pub notes: Option<String>,
    /// Stored notes to include, oldest first.
    #[serde(default)]
    pub note_ids: Vec<Uuid>,
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(default)]
    pub tone: Tone,
    pub tone_adjustment: Option<String>,
    pub relationship_level: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub message_id: Uuid,
    pub message: String,
    /// Present when the message came from a template instead of the model.
    pub note: Option<String>,
    pub customer_name: String,
    pub message_type: MessageType,
    pub tone: Tone,
    pub relationship_level: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

struct ValidatedDirect<'a> {
    customer_name: &'a str,
    what_happened: &'a str,
    note_content: Option<&'a str>,
}

fn validate_direct(request: &GenerateRequest) -> Result<ValidatedDirect<'_>, AppError> {
    let name = customer_name(&request.customer_name)?;
    let what_happened = require_text("what_happened", &request.what_happened)?;
    max_chars("what_happened", what_happened, MAX_WHAT_HAPPENED_LENGTH)?;

    let note_content = request
        .note_content
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    if let Some(note) = note_content {
        max_chars("note_content", note, MAX_NOTE_LENGTH)?;
    }

    Ok(ValidatedDirect {
        customer_name: name,
        what_happened,
        note_content,
    })
}

/// Combines typed notes (first) with the text of stored notes.
fn collect_notes_text<'a>(
    raw: Option<&'a str>,
    stored: impl IntoIterator<Item = &'a str>,
) -> Result<String, AppError> {
    let text = combine_note_texts(raw.into_iter().chain(stored));
    if text.is_empty() {
        return Err(AppError::Validation(
            "notes or note_ids must contain at least one non-empty note".to_string(),
        ));
    }
    max_chars("notes", &text, MAX_MESSAGE_LENGTH)?;
    Ok(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt assembly
// ────────────────────────────────────────────────────────────────────────────

/// Prompt for a direct request; the registered customer fields become context.
fn direct_prompt(
    profile: Option<&UserProfile>,
    request: &GenerateRequest,
    input: &ValidatedDirect<'_>,
    customer: &CustomerContext,
    tone_adjustment: &str,
) -> (String, u8) {
    let prompt_request = PromptRequest {
        profile,
        message_type_label: request.message_type.label(),
        tone_label: request.tone.label(),
        customer_name: input.customer_name,
        what_happened: input.what_happened,
        customer_context: Some(customer),
        tone_adjustment,
        note_content: input.note_content,
        relationship_level: request.relationship_level,
        notes_only: false,
    };
    (
        generate_personalized_prompt(&prompt_request),
        effective_relationship_level(&prompt_request),
    )
}

/// Prompt for a notes request: fixed event text, no customer context, notes-only restrictions.
fn notes_prompt(
    profile: Option<&UserProfile>,
    request: &GenerateFromNotesRequest,
    customer_name: &str,
    notes: &str,
    tone_adjustment: &str,
) -> (String, u8) {
    let prompt_request = PromptRequest {
        profile,
        message_type_label: request.message_type.label(),
        tone_label: request.tone.label(),
        customer_name,
        what_happened: NOTES_WHAT_HAPPENED,
        customer_context: None,
        tone_adjustment,
        note_content: Some(notes),
        relationship_level: request.relationship_level,
        notes_only: true,
    };
    (
        generate_personalized_prompt(&prompt_request),
        effective_relationship_level(&prompt_request),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Pipelines
// ────────────────────────────────────────────────────────────────────────────

async fn load_prompt_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<UserProfile>, AppError> {
    Ok(get_profile(pool, user_id)
        .await?
        .map(|row| row.to_prompt_profile()))
}

/// Usage counters are statistics only; a failed update is logged and the message still returned.
async fn record_usage(pool: &PgPool, user_id: Uuid, tone: Tone) {
    if let Err(e) = record_tone_usage(pool, user_id, tone).await {
        warn!("Failed to record tone usage {} for user {user_id}: {e}", tone.as_str());
    }
}

/// Generates a message from a customer name and a description of what happened.
pub async fn generate_message(
    pool: &PgPool,
    writer: &dyn MessageWriter,
    request: GenerateRequest,
) -> Result<GenerateResponse, AppError> {
    let input = validate_direct(&request)?;

    let profile = load_prompt_profile(pool, request.user_id).await?;
    let customer = get_or_create_customer(pool, request.user_id, input.customer_name).await?;
    let preferences = list_tone_preferences(pool, request.user_id).await?;
    let adjustment =
        resolve_tone_adjustment(request.tone_adjustment.as_deref(), request.tone, &preferences);

    let (prompt, level) = direct_prompt(
        profile.as_ref(),
        &request,
        &input,
        &customer.to_context(),
        &adjustment,
    );
    info!(
        "Generating {} / {} message for customer {} via {} (level {level}, {} prompt chars)",
        request.message_type.as_str(),
        request.tone.as_str(),
        customer.id,
        writer.backend(),
        prompt.chars().count()
    );

    let written = writer
        .write(&WriteRequest {
            prompt: &prompt,
            message_type: request.message_type,
            tone: request.tone,
            customer_name: &customer.name,
            what_happened: input.what_happened,
        })
        .await?;

    let saved = save_message(
        pool,
        NewMessage {
            user_id: request.user_id,
            customer_id: customer.id,
            customer_name: &customer.name,
            generated_message: &written.message,
            message_type: request.message_type,
            tone: request.tone,
            what_happened: input.what_happened,
        },
    )
    .await?;
    record_usage(pool, request.user_id, request.tone).await;

    Ok(GenerateResponse {
        message_id: saved.id,
        message: written.message,
        note: written.note,
        customer_name: customer.name,
        message_type: request.message_type,
        tone: request.tone,
        relationship_level: level,
    })
}

/// Generates a message using only the supplied notes as source material.
pub async fn generate_from_notes(
    pool: &PgPool,
    writer: &dyn MessageWriter,
    request: GenerateFromNotesRequest,
) -> Result<GenerateResponse, AppError> {
    let selected = get_selected_notes(pool, request.user_id, &request.note_ids).await?;
    if selected.len() < request.note_ids.len() {
        warn!(
            "{} of {} requested notes not found for user {}",
            request.note_ids.len() - selected.len(),
            request.note_ids.len(),
            request.user_id
        );
    }

    let notes = collect_notes_text(
        request.notes.as_deref(),
        selected.iter().map(|n| n.note_content.as_str()),
    )?;

    let requested_name = request
        .customer_name
        .as_deref()
        .filter(|n| !n.trim().is_empty());
    let name = match (requested_name, selected.first()) {
        (Some(name), _) => name,
        (None, Some(note)) => note.customer_name.as_str(),
        (None, None) => {
            return Err(AppError::Validation("customer_name is required".to_string()));
        }
    };

    let profile = load_prompt_profile(pool, request.user_id).await?;
    let customer = get_or_create_customer(pool, request.user_id, name).await?;
    let preferences = list_tone_preferences(pool, request.user_id).await?;
    let adjustment =
        resolve_tone_adjustment(request.tone_adjustment.as_deref(), request.tone, &preferences);

    let (prompt, level) =
        notes_prompt(profile.as_ref(), &request, &customer.name, &notes, &adjustment);
    info!(
        "Generating {} / {} message from {} note(s) for customer {} via {} (level {level})",
        request.message_type.as_str(),
        request.tone.as_str(),
        selected.len() + usize::from(request.notes.is_some()),
        customer.id,
        writer.backend()
    );

    let written = writer
        .write(&WriteRequest {
            prompt: &prompt,
            message_type: request.message_type,
            tone: request.tone,
            customer_name: &customer.name,
            what_happened: NOTES_TEMPLATE_EVENT,
        })
        .await?;

    let saved = save_message(
        pool,
        NewMessage {
            user_id: request.user_id,
            customer_id: customer.id,
            customer_name: &customer.name,
            generated_message: &written.message,
            message_type: request.message_type,
            tone: request.tone,
            what_happened: &notes,
        },
    )
    .await?;
    record_usage(pool, request.user_id, request.tone).await;

    Ok(GenerateResponse {
        message_id: saved.id,
        message: written.message,
        note: written.note,
        customer_name: customer.name,
        message_type: request.message_type,
        tone: request.tone,
        relationship_level: level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::prompts::NOTES_ONLY_RESTRICTIONS;

    fn direct(name: &str, what: &str) -> GenerateRequest {
        GenerateRequest {
            user_id: Uuid::nil(),
            customer_name: name.to_string(),
            message_type: MessageType::Thanks,
            tone: Tone::Friendly,
            what_happened: what.to_string(),
            tone_adjustment: None,
            note_content: None,
            relationship_level: None,
        }
    }

    fn from_notes(level: Option<i64>) -> GenerateFromNotesRequest {
        GenerateFromNotesRequest {
            user_id: Uuid::nil(),
            customer_name: Some("高橋".to_string()),
            notes: None,
            note_ids: Vec::new(),
            message_type: MessageType::FollowUp,
            tone: Tone::Polite,
            tone_adjustment: None,
            relationship_level: level,
        }
    }

    #[test]
    fn test_request_defaults_and_alias() {
        let req: GenerateRequest = serde_json::from_str(&format!(
            r#"{{"user_id":"{}","customer_name":"佐藤","what_happened":"来店","message_type":"thank_you"}}"#,
            Uuid::nil()
        ))
        .unwrap();
        assert_eq!(req.message_type, MessageType::Thanks);
        assert_eq!(req.tone, Tone::Polite);
        assert!(req.relationship_level.is_none());
    }

    #[test]
    fn test_direct_validation() {
        assert!(validate_direct(&direct("佐藤", "ボトルを入れてくれた")).is_ok());
        assert!(matches!(
            validate_direct(&direct("  ", "来店")),
            Err(AppError::Validation(_))
        ));
        assert!(validate_direct(&direct("佐藤", " ")).is_err());
        assert!(validate_direct(&direct("佐藤", &"あ".repeat(MAX_WHAT_HAPPENED_LENGTH + 1))).is_err());

        let trimmed = direct(" 佐藤 ", " 来店 ");
        let v = validate_direct(&trimmed).unwrap();
        assert_eq!(v.customer_name, "佐藤");
        assert_eq!(v.what_happened, "来店");
    }

    #[test]
    fn test_collect_notes_text() {
        let text = collect_notes_text(Some("今日は誕生日"), ["前回はワイン"]).unwrap();
        assert_eq!(text, "今日は誕生日\n\n前回はワイン");
        assert!(collect_notes_text(None, Vec::<&str>::new()).is_err());
        assert!(collect_notes_text(Some("  "), [""]).is_err());
        let long = "メ".repeat(MAX_MESSAGE_LENGTH + 1);
        assert!(collect_notes_text(Some(&long), Vec::<&str>::new()).is_err());
    }

    #[test]
    fn test_direct_prompt_includes_customer_context() {
        let req = direct("佐藤", "ボトルを入れてくれた");
        let input = validate_direct(&req).unwrap();
        let ctx = CustomerContext {
            company: Some("佐藤商事".to_string()),
            ..Default::default()
        };
        let (prompt, level) = direct_prompt(None, &req, &input, &ctx, "");
        assert!(prompt.contains("- お客様名: 佐藤"));
        assert!(prompt.contains("- 会社: 佐藤商事"));
        assert!(prompt.contains("ボトルを入れてくれた"));
        assert!(!prompt.contains(NOTES_ONLY_RESTRICTIONS));
        assert_eq!(level, 3);
    }

    #[test]
    fn test_notes_prompt_uses_fixed_event_and_restrictions() {
        let req = from_notes(None);
        let (prompt, level) = notes_prompt(None, &req, "高橋", "初めてお会いしました", "");
        assert!(prompt.contains(NOTES_WHAT_HAPPENED));
        assert!(prompt.contains(NOTES_ONLY_RESTRICTIONS));
        assert!(!prompt.contains("- 会社:"));
        assert_eq!(level, 1);
    }

    #[test]
    fn test_notes_prompt_honours_explicit_level() {
        let req = from_notes(Some(5));
        let (_, level) = notes_prompt(None, &req, "高橋", "初めてお会いしました", "");
        assert_eq!(level, 5);
    }
}
