//! The remote-service boundary: wire types, the [`NoteStore`] seam, and the
//! reqwest-backed implementation. Nothing in here knows about the TUI.

pub mod http;
pub mod store;
pub mod types;

pub use http::HttpNoteStore;
pub use store::{ApiError, NoteStore};
pub use types::{Note, NoteDraft};
