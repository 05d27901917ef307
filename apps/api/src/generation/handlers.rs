//! Axum route handlers for the Messages API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{
    generate_from_notes, generate_message, GenerateFromNotesRequest, GenerateRequest,
    GenerateResponse,
};
use crate::generation::labels::{MessageType, Tone};
use crate::generation::templates::render_template;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(default)]
    pub tone: Tone,
    pub customer_name: Option<String>,
    pub what_happened: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub message: String,
    pub message_type: MessageType,
    pub tone: Tone,
}

/// POST /api/v1/messages/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let response = generate_message(&state.db, state.writer.as_ref(), request).await?;
    Ok(Json(response))
}

/// POST /api/v1/messages/generate-from-notes
pub async fn handle_generate_from_notes(
    State(state): State<AppState>,
    Json(request): Json<GenerateFromNotesRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let response = generate_from_notes(&state.db, state.writer.as_ref(), request).await?;
    Ok(Json(response))
}

/// POST /api/v1/messages/preview
///
/// Renders the canned template without calling the model or touching the database.
pub async fn handle_preview(Json(request): Json<PreviewRequest>) -> Json<PreviewResponse> {
    Json(preview(request))
}

fn preview(request: PreviewRequest) -> PreviewResponse {
    let message = render_template(
        request.message_type,
        request.tone,
        request.customer_name.as_deref().unwrap_or(""),
        request.what_happened.as_deref().unwrap_or(""),
    );
    PreviewResponse {
        message,
        message_type: request.message_type,
        tone: request.tone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_defaults() {
        let out = preview(PreviewRequest::default());
        assert_eq!(out.message_type, MessageType::Thanks);
        assert_eq!(out.tone, Tone::Polite);
        assert!(out.message.starts_with("田中太郎様"));
        assert!(out.message.contains("商品をご購入いただき"));
    }

    #[test]
    fn test_preview_with_input() {
        let req: PreviewRequest = serde_json::from_str(
            r#"{"message_type":"celebration","tone":"casual","customer_name":"伊藤","what_happened":"お誕生日"}"#,
        )
        .unwrap();
        let out = preview(req);
        assert!(out.message.starts_with("伊藤さん"));
        assert!(out.message.contains("お誕生日、おめでとうございます！"));
    }
}
