use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::scoring::ToneAnalysisEntry;
use crate::analytics::store::{
    get_stats, list_tone_preferences, save_tone_preference, tone_analysis, tone_success_rate,
    UserStats,
};
use crate::errors::AppError;
use crate::generation::labels::Tone;
use crate::models::analytics::TonePreferenceRow;
use crate::models::UserIdQuery;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ToneAnalysisResponse {
    pub tones: Vec<ToneAnalysisEntry>,
}

#[derive(Serialize)]
pub struct TonePreferencesResponse {
    pub preferences: Vec<TonePreferenceRow>,
}

#[derive(Debug, Deserialize)]
pub struct SaveTonePreferenceRequest {
    pub user_id: Uuid,
    pub tone: Tone,
    pub preference_score: i16,
}

#[derive(Serialize)]
pub struct ToneSuccessRateResponse {
    pub tone: Tone,
    pub success_rate: f64,
}

fn parse_tone(tag: &str) -> Result<Tone, AppError> {
    Tone::from_tag(tag).ok_or_else(|| AppError::Validation(format!("unknown tone: {tag}")))
}

/// GET /api/v1/stats
pub async fn handle_get_stats(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<UserStats>, AppError> {
    Ok(Json(get_stats(&state.db, params.user_id).await?))
}

/// GET /api/v1/tones/analysis
pub async fn handle_tone_analysis(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ToneAnalysisResponse>, AppError> {
    let tones = tone_analysis(&state.db, params.user_id).await?;
    Ok(Json(ToneAnalysisResponse { tones }))
}

/// GET /api/v1/tones/:tone/success-rate
pub async fn handle_tone_success_rate(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ToneSuccessRateResponse>, AppError> {
    let tone = parse_tone(&tag)?;
    let success_rate = tone_success_rate(&state.db, params.user_id, tone).await?;
    Ok(Json(ToneSuccessRateResponse { tone, success_rate }))
}

/// GET /api/v1/tones/preferences
pub async fn handle_list_tone_preferences(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<TonePreferencesResponse>, AppError> {
    let preferences = list_tone_preferences(&state.db, params.user_id).await?;
    Ok(Json(TonePreferencesResponse { preferences }))
}

/// PUT /api/v1/tones/preferences
pub async fn handle_save_tone_preference(
    State(state): State<AppState>,
    Json(req): Json<SaveTonePreferenceRequest>,
) -> Result<Json<TonePreferenceRow>, AppError> {
    let row = save_tone_preference(&state.db, req.user_id, req.tone, req.preference_score).await?;
    Ok(Json(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tone() {
        assert_eq!(parse_tone("casual").unwrap(), Tone::Casual);
        assert!(matches!(parse_tone("rude"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_save_request_accepts_tone_tag() {
        let req: SaveTonePreferenceRequest = serde_json::from_str(&format!(
            r#"{{"user_id":"{}","tone":"formal","preference_score":4}}"#,
            Uuid::nil()
        ))
        .unwrap();
        assert_eq!(req.tone, Tone::Formal);
        assert_eq!(req.preference_score, 4);
    }
}
