use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::debug;

use journal_types::api::ReactResponse;
use journal_types::models::ReactionKind;

use crate::error::ApiError;
use crate::state::{AppState, run_db};

/// Unknown reaction types are accepted and leave the counters unchanged.
pub async fn react(
    State(state): State<AppState>,
    Path((entry_id, reaction_type)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = ReactionKind::from(reaction_type.as_str());
    if kind.column().is_none() {
        debug!(%entry_id, %kind, "Ignoring unknown reaction type");
    }

    let reactions = run_db(&state, move |db| db.react(&entry_id, &kind)).await?;

    Ok(Json(ReactResponse {
        success: true,
        reactions,
    }))
}
