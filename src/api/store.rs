use std::fmt;

use async_trait::async_trait;

use super::types::{Note, NoteDraft};

/// Errors that can occur talking to the notes service.
/// Transport and application failures are kept as distinct variants for
/// logging, even though the UI reacts to both the same way.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The remote note collection, as far as this client is concerned.
///
/// The server owns persistence and assigns every id; the client's only
/// state-reconciliation mechanism is calling [`NoteStore::list`] again.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Fetches the full collection, in server order.
    async fn list(&self) -> Result<Vec<Note>, ApiError>;

    /// Creates a note from the draft. The server picks the id.
    async fn create(&self, draft: &NoteDraft) -> Result<Note, ApiError>;

    /// Replaces title and content of the note with the given id.
    async fn update(&self, id: i64, draft: &NoteDraft) -> Result<(), ApiError>;

    /// Removes the note with the given id.
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}
