//! Service Layer Error Types
//!
//! Queries and targeted mutations on the store are total: an unknown id is a
//! no-op, not an error. The errors below only arise at the edges, where data
//! comes from outside (ingestion events, configuration).

use crate::models::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteStoreError {
    /// Ingested note failed validation
    #[error("Note validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// The ingestion worker has shut down
    #[error("Ingestion channel closed")]
    IngestionClosed,

    /// The ingestion queue is at capacity
    #[error("Ingestion queue full")]
    IngestionQueueFull,

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NoteStoreError {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
