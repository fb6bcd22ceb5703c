use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use journal_db::Database;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Upper bound on a single store call, including time queued for the
    /// blocking pool.
    pub op_timeout: Duration,
}

impl AppStateInner {
    pub fn new(db: Database, op_timeout: Duration) -> AppState {
        Arc::new(Self { db, op_timeout })
    }
}

/// Run a blocking store call off the async runtime, bounded by the
/// configured operation timeout.
///
/// A timed-out call is abandoned, not cancelled: its write may still land.
pub async fn run_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> journal_db::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = state.clone();
    let task = tokio::task::spawn_blocking(move || f(&db.db));

    match tokio::time::timeout(state.op_timeout, task).await {
        Ok(joined) => {
            let result = joined.map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                ApiError::Join(e)
            })?;
            Ok(result?)
        }
        Err(_) => {
            error!("Store operation exceeded {:?}", state.op_timeout);
            Err(ApiError::Timeout(state.op_timeout))
        }
    }
}
