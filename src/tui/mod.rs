//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm. The core
//! reducer decides what happens; this loop decides what it looks like and
//! performs the I/O the reducer asks for: every `Effect` that talks to the
//! service is run on a spawned tokio task, and the result comes back into the
//! loop as an `Action` over an mpsc channel. The UI thread never blocks on
//! the network.
//!
//! ## Input modes
//!
//! - **Compose**: keystrokes edit the input panel. Enter submits the draft
//!   (create, or update while a row is loaded for editing). Esc switches to
//!   List.
//! - **List**: Up/Down move the row selection, `e` edits, `d` deletes, `r`
//!   refreshes, `q` quits. Esc switches back to Compose.
//!
//! ## Redraw Strategy
//!
//! The loop only redraws after an input event or a background result. The
//! poll timeout shrinks while a request is in flight so responses are folded
//! in promptly; idle, it sleeps up to half a second per iteration.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{HttpNoteStore, NoteStore};
use crate::core::action::{Action, Effect, Mutation, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputPanel, NoteListState, PanelEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Text editing in the input panel.
    Compose,
    /// Navigate note rows with arrow keys and single-letter commands.
    List,
}

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub note_list: NoteListState,
    pub input_panel: InputPanel,
    pub input_mode: InputMode,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            note_list: NoteListState::new(),
            input_panel: InputPanel::new(),
            input_mode: InputMode::Compose, // User expects to type immediately
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let store: Arc<dyn NoteStore> = Arc::new(HttpNoteStore::new(config.base_url.clone()));
    let mut app = App::new(store, config.base_url);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions coming back from background request tasks
    let (tx, rx) = mpsc::channel();

    // Load the existing notes before the first frame is drawn
    let mut should_quit = dispatch(&mut app, &mut tui, &tx, Action::Refresh);

    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        // Sync component props with App/TUI state
        tui.input_panel.dimmed = matches!(tui.input_mode, InputMode::List);
        tui.input_panel.editing = app.editing.is_some();

        // Only draw when something changed
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short while a request is in flight so its
        // result is folded in promptly, long when idle.
        let timeout = if app.is_loading {
            std::time::Duration::from_millis(120)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit |= dispatch(&mut app, &mut tui, &tx, Action::Quit);
                continue;
            }

            // Mouse hover — always active regardless of mode
            if let TuiEvent::MouseMove(_col, row) = event {
                let frame_area = terminal.get_frame().area();
                let scroll_offset = tui.note_list.scroll_state.offset().y;
                tui.note_list.hovered_index = ui::hit_test_note(
                    row,
                    frame_area,
                    scroll_offset,
                    &tui.note_list.prefix_heights,
                );
                continue;
            }

            // Mouse click — select the row and drop into list mode
            if let TuiEvent::MouseClick(_col, row) = event {
                let frame_area = terminal.get_frame().area();
                let scroll_offset = tui.note_list.scroll_state.offset().y;
                if let Some(idx) = ui::hit_test_note(
                    row,
                    frame_area,
                    scroll_offset,
                    &tui.note_list.prefix_heights,
                ) {
                    tui.note_list.selected_index = Some(idx);
                    tui.input_mode = InputMode::List;
                }
                continue;
            }

            // Scroll events — always go to the note list regardless of mode
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.note_list.handle_event(&event);
                continue;
            }

            // Modal event dispatch
            match tui.input_mode {
                InputMode::Compose => {
                    if matches!(event, TuiEvent::Escape) {
                        if app.editing.is_some() {
                            // Abandon the edit; the panel is cleared via Effect::ClearDraft
                            should_quit |= dispatch(&mut app, &mut tui, &tx, Action::CancelEdit);
                        } else {
                            tui.input_mode = InputMode::List;
                            if tui.note_list.selected_index.is_none() && !app.notes.is_empty() {
                                tui.note_list.selected_index = Some(0);
                            }
                        }
                        continue;
                    }

                    // InputPanel handles everything else
                    if let Some(panel_event) = tui.input_panel.handle_event(&event) {
                        match panel_event {
                            PanelEvent::Submit { title, content } => {
                                should_quit |= dispatch(
                                    &mut app,
                                    &mut tui,
                                    &tx,
                                    Action::SubmitDraft { title, content },
                                );
                            }
                            PanelEvent::ContentChanged => {}
                        }
                    }
                }
                InputMode::List => {
                    let selected_id = tui
                        .note_list
                        .selected_index
                        .and_then(|idx| app.notes.get(idx))
                        .map(|note| note.id);

                    match event {
                        TuiEvent::Escape => {
                            tui.input_mode = InputMode::Compose;
                        }
                        TuiEvent::CursorUp => tui.note_list.select_prev(app.notes.len()),
                        TuiEvent::CursorDown => tui.note_list.select_next(app.notes.len()),
                        // Enter or `e` loads the selected row into the panel
                        TuiEvent::Submit | TuiEvent::InputChar('e') => {
                            if let Some(id) = selected_id {
                                should_quit |=
                                    dispatch(&mut app, &mut tui, &tx, Action::BeginEdit(id));
                            }
                        }
                        TuiEvent::InputChar('d') => {
                            if let Some(id) = selected_id {
                                should_quit |=
                                    dispatch(&mut app, &mut tui, &tx, Action::SubmitDelete(id));
                            }
                        }
                        TuiEvent::InputChar('r') => {
                            should_quit |= dispatch(&mut app, &mut tui, &tx, Action::Refresh);
                        }
                        TuiEvent::InputChar('q') => {
                            should_quit |= dispatch(&mut app, &mut tui, &tx, Action::Quit);
                        }
                        _ => {}
                    }
                }
            }
        }

        // Fold in results from background request tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= dispatch(&mut app, &mut tui, &tx, action);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Runs an action through the reducer and applies the resulting effect.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, tui: &mut TuiState, tx: &mpsc::Sender<Action>, action: Action) -> bool {
    let effect = update(app, action);
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::PopulateDraft(note) => {
            tui.input_panel.set_draft(&note);
            tui.input_mode = InputMode::Compose;
            false
        }
        Effect::ClearDraft => {
            tui.input_panel.clear();
            false
        }
        Effect::FetchNotes { clear_draft } => {
            if clear_draft {
                tui.input_panel.clear();
            }
            spawn_effect(
                app.store.clone(),
                Effect::FetchNotes { clear_draft: false },
                tx.clone(),
            );
            false
        }
        effect @ (Effect::CreateNote(_) | Effect::UpdateNote { .. } | Effect::DeleteNote(_)) => {
            spawn_effect(app.store.clone(), effect, tx.clone());
            false
        }
    }
}

/// Spawns the I/O for an effect and routes the follow-up action back into
/// the event loop.
fn spawn_effect(store: Arc<dyn NoteStore>, effect: Effect, tx: mpsc::Sender<Action>) {
    info!("Spawning request: {:?}", effect);
    tokio::spawn(async move {
        if let Some(action) = execute_effect(store.as_ref(), effect).await
            && tx.send(action).is_err()
        {
            warn!("Failed to deliver request result: receiver dropped");
        }
    });
}

/// Runs the I/O an effect asks for and returns the follow-up action, if any.
/// Factored out of the spawn path so tests can drive the same transitions
/// without a terminal or a runtime channel.
pub async fn execute_effect(store: &dyn NoteStore, effect: Effect) -> Option<Action> {
    match effect {
        Effect::FetchNotes { .. } => Some(Action::NotesLoaded(store.list().await)),
        Effect::CreateNote(draft) => Some(Action::MutationSettled {
            kind: Mutation::Create,
            result: store.create(&draft).await.map(|_| ()),
        }),
        Effect::UpdateNote { id, draft } => Some(Action::MutationSettled {
            kind: Mutation::Update,
            result: store.update(id, &draft).await,
        }),
        Effect::DeleteNote(id) => Some(Action::MutationSettled {
            kind: Mutation::Delete,
            result: store.delete(id).await,
        }),
        Effect::None | Effect::Quit | Effect::PopulateDraft(_) | Effect::ClearDraft => None,
    }
}
