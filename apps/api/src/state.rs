use std::sync::Arc;

use sqlx::PgPool;

use crate::generation::writer::MessageWriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Gemini when an API key is configured, canned templates otherwise.
    pub writer: Arc<dyn MessageWriter>,
}
