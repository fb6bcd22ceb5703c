use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use journal_types::api::{CreateEntryRequest, CreateEntryResponse};

use crate::error::ApiError;
use crate::state::{AppState, run_db};

pub async fn add_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let author = req.author.unwrap_or_default();
    let title = req.title.unwrap_or_default();
    let body = req.entry.unwrap_or_default();

    let entry = run_db(&state, move |db| db.create_entry(&author, &title, &body)).await?;

    info!(id = %entry.id, author = %entry.author, "Entry posted");

    Ok((
        StatusCode::CREATED,
        Json(CreateEntryResponse {
            success: true,
            id: entry.id,
        }),
    ))
}

pub async fn get_entries(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let entries = run_db(&state, |db| db.list_entries()).await?;
    Ok(Json(entries))
}
