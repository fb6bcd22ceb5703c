use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use journal_types::api::{AddCommentRequest, SuccessResponse};

use crate::error::ApiError;
use crate::state::{AppState, run_db};

pub async fn add_comment(
    State(state): State<AppState>,
    payload: Result<Json<AddCommentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let entry_id = req.entry_id.unwrap_or_default();
    let author = req.author.unwrap_or_default();
    let body = req.comment.unwrap_or_default();

    run_db(&state, move |db| db.add_comment(&entry_id, &author, &body)).await?;

    Ok((StatusCode::CREATED, Json(SuccessResponse { success: true })))
}

pub async fn get_comments(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = run_db(&state, move |db| db.list_comments(&entry_id)).await?;
    Ok(Json(comments))
}
