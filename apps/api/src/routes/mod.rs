pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analytics::handlers as analytics;
use crate::customers::handlers as customers;
use crate::generation::handlers as generation;
use crate::messages::handlers as messages;
use crate::notes::handlers as notes;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation
        .route("/api/v1/messages/generate", post(generation::handle_generate))
        .route(
            "/api/v1/messages/generate-from-notes",
            post(generation::handle_generate_from_notes),
        )
        .route("/api/v1/messages/preview", post(generation::handle_preview))
        // Message history
        .route("/api/v1/messages", get(messages::handle_list_messages))
        .route(
            "/api/v1/messages/:id",
            get(messages::handle_get_message).delete(messages::handle_delete_message),
        )
        .route(
            "/api/v1/messages/:id/rating",
            post(messages::handle_rate_message),
        )
        // Customers
        .route(
            "/api/v1/customers",
            get(customers::handle_list_customers).post(customers::handle_create_customer),
        )
        .route(
            "/api/v1/customers/:id",
            get(customers::handle_get_customer)
                .patch(customers::handle_update_customer)
                .delete(customers::handle_delete_customer),
        )
        // Notes
        .route(
            "/api/v1/notes",
            get(notes::handle_list_notes).post(notes::handle_save_note),
        )
        .route(
            "/api/v1/notes/:id",
            get(notes::handle_get_note)
                .patch(notes::handle_update_note)
                .delete(notes::handle_delete_note),
        )
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_save_profile),
        )
        // Analytics
        .route("/api/v1/stats", get(analytics::handle_get_stats))
        .route("/api/v1/tones/analysis", get(analytics::handle_tone_analysis))
        .route(
            "/api/v1/tones/preferences",
            get(analytics::handle_list_tone_preferences).put(analytics::handle_save_tone_preference),
        )
        .route(
            "/api/v1/tones/:tone/success-rate",
            get(analytics::handle_tone_success_rate),
        )
        .with_state(state)
}
