use serde::{Deserialize, Serialize};

/// A note as the remote service owns it.
///
/// The `id` is assigned by the server and is opaque to this client: we never
/// generate one, never change one, and only ever hand it back in request
/// paths. Title and content are free text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// The create/update payload: everything about a note except its id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// A draft may only be sent to the server when both fields carry
    /// something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}
