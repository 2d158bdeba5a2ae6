//! Error types for board operations.
//!
//! Placement itself never fails: unknown keys and ids are silent no-ops and
//! unusable geometry falls back to defaults. These errors cover the edges
//! where data enters the engine (catalog feeds, settings files, storage).

use thiserror::Error;

use crate::store::StoreError;

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors that can occur while feeding data into the board.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Catalog, layout or settings (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Layout settings failed validation.
    #[error("Invalid layout settings: {0}")]
    InvalidSettings(String),

    /// The persistence backend failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A placed item identifier could not be parsed.
    #[error("Invalid item id: {0}")]
    InvalidId(String),

    /// Reading a settings or catalog file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
