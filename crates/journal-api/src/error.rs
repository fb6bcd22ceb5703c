use std::time::Duration;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use journal_db::StoreError;
use journal_types::api::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Body was not a JSON object of the expected shape, or lacked the
    /// JSON content type.
    #[error("Invalid request body: {}", .0.body_text())]
    Payload(#[from] JsonRejection),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::Validation { .. }) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Payload(rejection) => rejection.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage details stay in the log.
        let message = if status.is_server_error() {
            error!("{}", self);
            "Storage error".to_string()
        } else {
            warn!("{}", self);
            self.to_string()
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}
