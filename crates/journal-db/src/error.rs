use thiserror::Error;

/// Failure of a single store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was missing or blank. Nothing was written.
    #[error("{field} is required")]
    Validation { field: &'static str },

    /// The targeted entry does not exist. Nothing was written.
    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("DB lock poisoned: {0}")]
    Poisoned(String),
}

impl StoreError {
    /// True for failures of the storage layer itself rather than of the input.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Poisoned(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
