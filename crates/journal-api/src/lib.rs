pub mod comments;
pub mod entries;
pub mod error;
pub mod reactions;
pub mod state;

use axum::{
    Json, Router,
    routing::{get, post},
};

use crate::state::AppState;

/// All journal routes, bound to `state`. Cross-cutting layers (CORS,
/// tracing) are added by the server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/add_entry", post(entries::add_entry))
        .route("/get_entries", get(entries::get_entries))
        .route("/react/{entry_id}/{reaction_type}", post(reactions::react))
        .route("/add_comment", post(comments::add_comment))
        .route("/get_comments/{entry_id}", get(comments::get_comments))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
