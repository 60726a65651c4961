//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Two patterns, mirroring how the rest of the tui layer is built:
//!
//! - **Stateless (props-based)**: `TitleBar`, `NoteCard`, `EmptyState`.
//!   Created fresh each frame from whatever data they need to draw.
//! - **Stateful (event-driven)**: `InputPanel` and `NoteListState`. These own
//!   local state (buffers, cursor, scroll, selection) and emit high-level
//!   events through the `EventHandler` trait.
//!
//! Each component file contains everything related to that component: state
//! types, event types, rendering, event handling, and tests.

pub mod empty_state;
pub mod input_panel;
pub mod note_card;
pub mod note_list;
pub mod title_bar;

pub use empty_state::EmptyState;
pub use input_panel::{InputPanel, PanelEvent};
pub use note_card::NoteCard;
pub use note_list::{NoteList, NoteListState};
pub use title_bar::TitleBar;
