use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::UserProfileRow;
use crate::models::UserIdQuery;
use crate::profile::store::{get_profile, upsert_profile, ProfileUpdate};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveProfileRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub profile: ProfileUpdate,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<UserProfileRow>, AppError> {
    get_profile(&state.db, params.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("profile for user {}", params.user_id)))
}

/// PUT /api/v1/profile
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Json(req): Json<SaveProfileRequest>,
) -> Result<Json<UserProfileRow>, AppError> {
    let profile = upsert_profile(&state.db, req.user_id, &req.profile).await?;
    Ok(Json(profile))
}
