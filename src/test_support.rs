//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiError, Note, NoteDraft, NoteStore};
use crate::core::action::{Action, update};
use crate::core::state::App;

/// An in-memory note collection for tests that don't need a real server.
/// Behaves like the service: assigns ids, honors server ordering, and can be
/// told to fail its next call with a 500.
pub struct MockStore {
    notes: Mutex<Vec<Note>>,
    next_id: Mutex<i64>,
    fail_next: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            notes: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Makes the next store call fail with a 500, then recovers.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), ApiError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            Err(ApiError::Api {
                status: 500,
                message: "mock failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteStore for MockStore {
    async fn list(&self) -> Result<Vec<Note>, ApiError> {
        self.check_failure()?;
        Ok(self.notes.lock().unwrap().clone())
    }

    async fn create(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        self.check_failure()?;
        let mut next_id = self.next_id.lock().unwrap();
        let note = Note {
            id: *next_id,
            title: draft.title.clone(),
            content: draft.content.clone(),
        };
        *next_id += 1;
        self.notes.lock().unwrap().push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: i64, draft: &NoteDraft) -> Result<(), ApiError> {
        self.check_failure()?;
        let mut notes = self.notes.lock().unwrap();
        match notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.title = draft.title.clone();
                note.content = draft.content.clone();
                Ok(())
            }
            None => Err(ApiError::Api {
                status: 404,
                message: "note not found".to_string(),
            }),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.check_failure()?;
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Err(ApiError::Api {
                status: 404,
                message: "note not found".to_string(),
            });
        }
        Ok(())
    }
}

/// Creates a test App backed by a fresh MockStore.
pub fn test_app() -> (App, Arc<MockStore>) {
    let store = Arc::new(MockStore::new());
    let app = App::new(store.clone(), "http://test.local".to_string());
    (app, store)
}

/// Creates a test App whose view-model already holds the given notes.
pub fn test_app_with_notes(notes: Vec<Note>) -> (App, Arc<MockStore>) {
    let (mut app, store) = test_app();
    app.notes = notes;
    (app, store)
}

/// Runs an action through the reducer, then keeps executing I/O effects
/// against the store until the app settles. Mirrors the tui event loop
/// without the terminal.
pub async fn drive(app: &mut App, store: &MockStore, action: Action) {
    let mut effect = update(app, action);
    while let Some(next) = crate::tui::execute_effect(store, effect).await {
        effect = update(app, next);
    }
}
