use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::messages::store::{
    delete_message, get_message, list_messages, save_rating, MESSAGES_PER_PAGE,
};
use crate::models::message::{MessageHistoryRow, MessageRatingRow};
use crate::models::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    pub user_id: Uuid,
    #[serde(default)]
    pub page: u32,
}

#[derive(Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageHistoryRow>,
    pub page: u32,
    pub per_page: i64,
}

#[derive(Debug, Deserialize)]
pub struct RateMessageRequest {
    pub user_id: Uuid,
    pub rating: i16,
    pub feedback: Option<String>,
}

fn message_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("message {id}"))
}

/// GET /api/v1/messages
pub async fn handle_list_messages(
    State(state): State<AppState>,
    Query(params): Query<MessageListQuery>,
) -> Result<Json<MessageListResponse>, AppError> {
    let page = params.page.max(1);
    let messages = list_messages(&state.db, params.user_id, page).await?;
    Ok(Json(MessageListResponse {
        messages,
        page,
        per_page: MESSAGES_PER_PAGE,
    }))
}

/// GET /api/v1/messages/:id
pub async fn handle_get_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<MessageHistoryRow>, AppError> {
    get_message(&state.db, params.user_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| message_not_found(id))
}

/// DELETE /api/v1/messages/:id
pub async fn handle_delete_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if delete_message(&state.db, params.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(message_not_found(id))
    }
}

/// POST /api/v1/messages/:id/rating
pub async fn handle_rate_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RateMessageRequest>,
) -> Result<Json<MessageRatingRow>, AppError> {
    let rating = save_rating(
        &state.db,
        req.user_id,
        id,
        req.rating,
        req.feedback.as_deref(),
    )
    .await?;
    Ok(Json(rating))
}
