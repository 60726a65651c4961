//! # Actions
//!
//! Everything that can happen in MemoTime becomes an `Action`.
//! User presses Enter on the input panel? That's `Action::SubmitDraft`.
//! The list fetch lands? That's `Action::NotesLoaded(result)`.
//!
//! The `update()` function takes the current state and an action and returns
//! an `Effect` describing what the shell should do next. No side effects
//! here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The request lifecycle the reducer enforces is deliberately small:
//!
//! ```text
//! idle ──submit──▶ in-flight ──ok──▶ refresh ──loaded──▶ idle
//!                      │
//!                      └──err──▶ idle (nothing visible changes)
//! ```
//!
//! A refresh effect is only ever emitted from `MutationSettled`, never from
//! the submission itself, so the follow-up read always observes the write.

use log::warn;

use crate::api::{ApiError, Note, NoteDraft};
use crate::core::state::App;

/// Which write is in flight. Carried through the background task so the
/// settled action knows what it is reporting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

#[derive(Debug)]
pub enum Action {
    /// The input panel was submitted. Creates a note, or updates the one
    /// being edited.
    SubmitDraft { title: String, content: String },
    /// Start editing the note with the given id.
    BeginEdit(i64),
    /// Leave edit mode without submitting.
    CancelEdit,
    /// Delete the note with the given id.
    SubmitDelete(i64),
    /// Re-fetch the collection (startup, or the refresh key).
    Refresh,
    /// Background task: the list fetch finished.
    NotesLoaded(Result<Vec<Note>, ApiError>),
    /// Background task: a write finished.
    MutationSettled {
        kind: Mutation,
        result: Result<(), ApiError>,
    },
    Quit,
}

/// What the shell must do after a state transition. The reducer never
/// performs I/O itself; it hands these back to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Spawn a GET of the full collection. `clear_draft` tells the shell to
    /// empty the input fields first (set after a successful create/update).
    FetchNotes { clear_draft: bool },
    /// Spawn a POST with the draft.
    CreateNote(NoteDraft),
    /// Spawn a PUT for the given id.
    UpdateNote { id: i64, draft: NoteDraft },
    /// Spawn a DELETE for the given id.
    DeleteNote(i64),
    /// Load the note into the input fields for editing.
    PopulateDraft(Note),
    /// Empty the input fields.
    ClearDraft,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitDraft { title, content } => {
            if app.is_loading {
                return Effect::None;
            }
            let draft = NoteDraft { title, content };
            // Client-side guard: an incomplete draft never reaches the network.
            if !draft.is_complete() {
                app.status_message = String::from("Title and content are both required");
                return Effect::None;
            }
            app.is_loading = true;
            match app.editing {
                Some(id) => {
                    app.status_message = String::from("Saving note...");
                    Effect::UpdateNote { id, draft }
                }
                None => {
                    app.status_message = String::from("Adding note...");
                    Effect::CreateNote(draft)
                }
            }
        }

        Action::BeginEdit(id) => match app.note_by_id(id).cloned() {
            Some(note) => {
                app.editing = Some(id);
                app.status_message = format!("Editing \"{}\"", note.title);
                Effect::PopulateDraft(note)
            }
            None => Effect::None,
        },

        Action::CancelEdit => {
            if app.editing.take().is_some() {
                app.status_message = count_status(&app.notes);
                Effect::ClearDraft
            } else {
                Effect::None
            }
        }

        Action::SubmitDelete(id) => {
            if app.is_loading || app.note_by_id(id).is_none() {
                return Effect::None;
            }
            app.is_loading = true;
            app.status_message = String::from("Deleting note...");
            Effect::DeleteNote(id)
        }

        Action::Refresh => {
            if app.is_loading {
                return Effect::None;
            }
            app.is_loading = true;
            Effect::FetchNotes { clear_draft: false }
        }

        Action::MutationSettled { kind, result } => match result {
            Ok(()) => {
                // Only now, with the write acknowledged, is the read issued.
                let clear_draft = matches!(kind, Mutation::Create | Mutation::Update);
                if clear_draft {
                    app.editing = None;
                }
                app.status_message = String::from(match kind {
                    Mutation::Create => "Note added",
                    Mutation::Update => "Note saved",
                    Mutation::Delete => "Note deleted",
                });
                Effect::FetchNotes { clear_draft }
            }
            Err(e) => {
                // A failed write changes nothing visible: the list stays as
                // rendered, the draft stays populated, and there is no retry.
                warn!("{:?} failed: {}", kind, e);
                app.is_loading = false;
                app.status_message = count_status(&app.notes);
                Effect::None
            }
        },

        Action::NotesLoaded(result) => {
            app.is_loading = false;
            match result {
                Ok(notes) => {
                    app.status_message = count_status(&notes);
                    // Wholesale replacement, never an in-place patch.
                    app.notes = notes;
                }
                Err(e) => {
                    // The previous list keeps rendering untouched.
                    warn!("list fetch failed: {}", e);
                }
            }
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

fn count_status(notes: &[Note]) -> String {
    match notes.len() {
        0 => String::from("No notes yet"),
        1 => String::from("1 note"),
        n => format!("{} notes", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{drive, test_app, test_app_with_notes};

    fn submit(title: &str, content: &str) -> Action {
        Action::SubmitDraft {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    // ==========================================================================
    // Client-side guard: incomplete drafts never spawn a request
    // ==========================================================================

    #[test]
    fn test_empty_title_never_issues_request() {
        let (mut app, _store) = test_app();
        let effect = update(&mut app, submit("", "content"));
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_empty_content_never_issues_request() {
        let (mut app, _store) = test_app();
        let effect = update(&mut app, submit("title", ""));
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_whitespace_only_fields_are_blocked() {
        let (mut app, _store) = test_app();
        let effect = update(&mut app, submit("   ", "\t\n"));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.status_message, "Title and content are both required");
    }

    // ==========================================================================
    // Submission and the in-flight gate
    // ==========================================================================

    #[test]
    fn test_submit_create_emits_create_effect() {
        let (mut app, _store) = test_app();
        let effect = update(&mut app, submit("A", "1"));
        assert_eq!(effect, Effect::CreateNote(NoteDraft::new("A", "1")));
        assert!(app.is_loading);
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let (mut app, _store) = test_app();
        app.is_loading = true;
        assert_eq!(update(&mut app, submit("A", "1")), Effect::None);
        assert_eq!(update(&mut app, Action::Refresh), Effect::None);
    }

    #[test]
    fn test_delete_of_unknown_id_is_ignored() {
        let (mut app, _store) = test_app();
        assert_eq!(update(&mut app, Action::SubmitDelete(42)), Effect::None);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_delete_of_known_id_emits_delete_effect() {
        let (mut app, _store) = test_app_with_notes(vec![Note {
            id: 7,
            title: "A".to_string(),
            content: "1".to_string(),
        }]);
        assert_eq!(update(&mut app, Action::SubmitDelete(7)), Effect::DeleteNote(7));
        assert!(app.is_loading);
    }

    // ==========================================================================
    // Refresh ordering: the read is only issued once the write has settled
    // ==========================================================================

    #[test]
    fn test_refresh_is_emitted_by_settle_not_by_submit() {
        let (mut app, _store) = test_app();

        let effect = update(&mut app, submit("A", "1"));
        assert!(matches!(effect, Effect::CreateNote(_)));

        let effect = update(
            &mut app,
            Action::MutationSettled {
                kind: Mutation::Create,
                result: Ok(()),
            },
        );
        assert_eq!(effect, Effect::FetchNotes { clear_draft: true });
    }

    #[test]
    fn test_delete_success_refreshes_without_clearing_draft() {
        let (mut app, _store) = test_app();
        app.is_loading = true;
        let effect = update(
            &mut app,
            Action::MutationSettled {
                kind: Mutation::Delete,
                result: Ok(()),
            },
        );
        assert_eq!(effect, Effect::FetchNotes { clear_draft: false });
    }

    // ==========================================================================
    // Failure: nothing visible changes
    // ==========================================================================

    #[test]
    fn test_failed_mutation_leaves_notes_unchanged() {
        let notes = vec![
            Note {
                id: 1,
                title: "A".to_string(),
                content: "1".to_string(),
            },
            Note {
                id: 2,
                title: "B".to_string(),
                content: "2".to_string(),
            },
        ];
        let (mut app, _store) = test_app_with_notes(notes.clone());
        app.is_loading = true;

        let effect = update(
            &mut app,
            Action::MutationSettled {
                kind: Mutation::Update,
                result: Err(ApiError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }),
            },
        );

        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert_eq!(app.notes, notes);
    }

    #[test]
    fn test_failed_update_keeps_edit_mode() {
        let (mut app, _store) = test_app_with_notes(vec![Note {
            id: 3,
            title: "A".to_string(),
            content: "1".to_string(),
        }]);
        update(&mut app, Action::BeginEdit(3));
        update(&mut app, submit("A2", "1"));

        update(
            &mut app,
            Action::MutationSettled {
                kind: Mutation::Update,
                result: Err(ApiError::Network("connection refused".to_string())),
            },
        );
        // The draft stays addressed at the same note so the user can retry.
        assert_eq!(app.editing, Some(3));
    }

    #[test]
    fn test_failed_fetch_keeps_previous_list() {
        let notes = vec![Note {
            id: 1,
            title: "A".to_string(),
            content: "1".to_string(),
        }];
        let (mut app, _store) = test_app_with_notes(notes.clone());
        app.is_loading = true;

        update(
            &mut app,
            Action::NotesLoaded(Err(ApiError::Network("timeout".to_string()))),
        );
        assert_eq!(app.notes, notes);
        assert!(!app.is_loading);
    }

    // ==========================================================================
    // Edit mode
    // ==========================================================================

    #[test]
    fn test_begin_edit_routes_submit_to_update() {
        let note = Note {
            id: 9,
            title: "Title".to_string(),
            content: "Body".to_string(),
        };
        let (mut app, _store) = test_app_with_notes(vec![note.clone()]);

        let effect = update(&mut app, Action::BeginEdit(9));
        assert_eq!(effect, Effect::PopulateDraft(note));

        // Submitting the values exactly as displayed is an idempotent round
        // trip: the same title/content go back to the same id.
        let effect = update(&mut app, submit("Title", "Body"));
        assert_eq!(
            effect,
            Effect::UpdateNote {
                id: 9,
                draft: NoteDraft::new("Title", "Body"),
            }
        );
    }

    #[test]
    fn test_begin_edit_of_unknown_id_is_ignored() {
        let (mut app, _store) = test_app();
        assert_eq!(update(&mut app, Action::BeginEdit(5)), Effect::None);
        assert!(app.editing.is_none());
    }

    #[test]
    fn test_cancel_edit_clears_draft() {
        let (mut app, _store) = test_app_with_notes(vec![Note {
            id: 1,
            title: "A".to_string(),
            content: "1".to_string(),
        }]);
        update(&mut app, Action::BeginEdit(1));
        assert_eq!(update(&mut app, Action::CancelEdit), Effect::ClearDraft);
        assert!(app.editing.is_none());

        // Cancelling outside edit mode is a no-op.
        assert_eq!(update(&mut app, Action::CancelEdit), Effect::None);
    }

    // ==========================================================================
    // View-model replacement
    // ==========================================================================

    #[test]
    fn test_notes_loaded_replaces_list_wholesale() {
        let (mut app, _store) = test_app_with_notes(vec![Note {
            id: 1,
            title: "old".to_string(),
            content: "old".to_string(),
        }]);
        app.is_loading = true;

        let fresh = vec![
            Note {
                id: 2,
                title: "B".to_string(),
                content: "2".to_string(),
            },
            Note {
                id: 3,
                title: "C".to_string(),
                content: "3".to_string(),
            },
        ];
        update(&mut app, Action::NotesLoaded(Ok(fresh.clone())));
        assert_eq!(app.notes, fresh);
        assert_eq!(app.status_message, "2 notes");
    }

    #[test]
    fn test_quit() {
        let (mut app, _store) = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    // ==========================================================================
    // End-to-end against the mock store (reducer + effects + follow-ups)
    // ==========================================================================

    #[tokio::test]
    async fn test_create_adds_exactly_one_note_with_fresh_id() {
        let (mut app, store) = test_app();
        drive(&mut app, &store, Action::Refresh).await;
        assert!(app.notes.is_empty());

        drive(&mut app, &store, submit("A", "1")).await;

        assert_eq!(app.notes.len(), 1);
        assert_eq!(app.notes[0].title, "A");
        assert_eq!(app.notes[0].content, "1");
        let first_id = app.notes[0].id;

        drive(&mut app, &store, submit("B", "2")).await;
        assert_eq!(app.notes.len(), 2);
        assert_ne!(app.notes[1].id, first_id);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_that_note() {
        let (mut app, store) = test_app();
        drive(&mut app, &store, submit("A", "1")).await;
        drive(&mut app, &store, submit("B", "2")).await;
        let doomed = app.notes[0].id;

        drive(&mut app, &store, Action::SubmitDelete(doomed)).await;

        assert_eq!(app.notes.len(), 1);
        assert!(app.note_by_id(doomed).is_none());
    }

    #[tokio::test]
    async fn test_unedited_update_round_trips_same_values() {
        let (mut app, store) = test_app();
        drive(&mut app, &store, submit("Title", "Body")).await;
        let id = app.notes[0].id;

        drive(&mut app, &store, Action::BeginEdit(id)).await;
        drive(&mut app, &store, submit("Title", "Body")).await;

        assert_eq!(app.notes.len(), 1);
        assert_eq!(app.notes[0].title, "Title");
        assert_eq!(app.notes[0].content, "Body");
        assert_eq!(app.notes[0].id, id);
    }

    #[tokio::test]
    async fn test_failed_mutation_end_to_end_leaves_display_state() {
        let (mut app, store) = test_app();
        drive(&mut app, &store, submit("A", "1")).await;
        let before = app.notes.clone();

        store.fail_next();
        drive(&mut app, &store, Action::SubmitDelete(before[0].id)).await;

        assert_eq!(app.notes, before);
        assert!(!app.is_loading);
    }
}
