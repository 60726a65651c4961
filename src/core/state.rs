//! # Application State
//!
//! Core business state for MemoTime. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: Arc<dyn NoteStore>   // remote note collection
//! ├── server: String              // base URL, for display
//! ├── notes: Vec<Note>            // owned view-model of the last fetch
//! ├── status_message: String      // status bar text
//! ├── is_loading: bool            // a request is in flight
//! └── editing: Option<i64>        // note id the input panel is editing
//! ```
//!
//! `notes` is rebuilt wholesale from the server response on every refresh and
//! never mutated in place, so rendering it is idempotent. State changes only
//! happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::{Note, NoteStore};

pub struct App {
    pub store: Arc<dyn NoteStore>,
    /// Base URL of the service, kept for the title bar.
    pub server: String,
    /// The last note list the server gave us, in server order.
    pub notes: Vec<Note>,
    pub status_message: String,
    /// True from the moment a request is spawned until its response (and, for
    /// mutations, the follow-up refresh) has been folded back in.
    pub is_loading: bool,
    /// When set, submitting the input panel updates this note instead of
    /// creating a new one.
    pub editing: Option<i64>,
}

impl App {
    pub fn new(store: Arc<dyn NoteStore>, server: String) -> Self {
        Self {
            store,
            server,
            notes: Vec::new(),
            status_message: String::from("Welcome to MemoTime!"),
            is_loading: false,
            editing: None,
        }
    }

    pub fn note_by_id(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }
}
