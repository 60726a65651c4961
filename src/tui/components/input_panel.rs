//! # InputPanel Component
//!
//! The two-field form at the bottom of the screen: one line for the title,
//! one for the content. Used both for composing new notes and, once a row's
//! values have been loaded with [`InputPanel::set_draft`], for editing an
//! existing one.
//!
//! ## State Management
//!
//! The field buffers and cursor positions are internal state. `dimmed` and
//! `editing` are props from the event loop: `dimmed` while the user is in
//! list mode, `editing` while a row is loaded for update (borders switch to
//! yellow so the mode is visible).
//!
//! Submitting does NOT clear the fields. The service decides whether the
//! draft was accepted; the event loop clears the panel only after a
//! successful create or update.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::api::Note;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows each field box occupies (1 text line + 2 border lines).
const FIELD_HEIGHT: u16 = 3;
/// Rows the whole panel needs.
pub const PANEL_HEIGHT: u16 = FIELD_HEIGHT * 2;

/// Which of the two fields has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
}

/// High-level events emitted by the InputPanel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// User pressed Enter. Carries both buffers verbatim; emptiness is the
    /// reducer's concern, not the panel's.
    Submit { title: String, content: String },
    ContentChanged,
}

/// A single-line edit buffer with a byte-offset cursor.
#[derive(Default)]
struct FieldState {
    buffer: String,
    cursor: usize,
}

impl FieldState {
    fn set(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = prev_char_boundary(&self.buffer, self.cursor);
        self.buffer.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        let next = next_char_boundary(&self.buffer, self.cursor);
        self.buffer.drain(self.cursor..next);
        true
    }

    fn left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = prev_char_boundary(&self.buffer, self.cursor);
        true
    }

    fn right(&mut self) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        self.cursor = next_char_boundary(&self.buffer, self.cursor);
        true
    }

    /// Returns the visible tail of the buffer and the cursor's column within
    /// it. Long lines scroll horizontally so the cursor stays in view.
    fn clipped(&self, width: u16) -> (&str, u16) {
        let width = width as usize;
        if width == 0 {
            return ("", 0);
        }
        let mut start = 0;
        let mut cursor_col = self.buffer[..self.cursor].width();
        while cursor_col >= width {
            let step = next_char_boundary(&self.buffer, start);
            cursor_col -= self.buffer[start..step].width();
            start = step;
        }
        (&self.buffer[start..], cursor_col as u16)
    }
}

/// Largest byte index `< pos` that sits on a char boundary.
fn prev_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos.saturating_sub(1);
    while p > 0 && !s.is_char_boundary(p) {
        p -= 1;
    }
    p
}

/// Smallest byte index `> pos` that sits on a char boundary.
fn next_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos + 1;
    while p < s.len() && !s.is_char_boundary(p) {
        p += 1;
    }
    p.min(s.len())
}

pub struct InputPanel {
    title: FieldState,
    content: FieldState,
    pub focus: Field,
    /// Prop: rendered de-emphasized while the user navigates the list.
    pub dimmed: bool,
    /// Prop: true while the panel holds an existing note for update.
    pub editing: bool,
}

impl Default for InputPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPanel {
    pub fn new() -> Self {
        Self {
            title: FieldState::default(),
            content: FieldState::default(),
            focus: Field::Title,
            dimmed: false,
            editing: false,
        }
    }

    /// Load an existing note's values for editing.
    pub fn set_draft(&mut self, note: &Note) {
        self.title.set(&note.title);
        self.content.set(&note.content);
        self.focus = Field::Title;
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
        self.focus = Field::Title;
    }

    pub fn title_text(&self) -> &str {
        &self.title.buffer
    }

    pub fn content_text(&self) -> &str {
        &self.content.buffer
    }

    fn focused_field(&mut self) -> &mut FieldState {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Content => &mut self.content,
        }
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: Field,
        label: &str,
    ) {
        let state = match field {
            Field::Title => &self.title,
            Field::Content => &self.content,
        };
        let has_focus = self.focus == field && !self.dimmed;

        let base = if self.editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Green)
        };
        let border_style = if has_focus {
            base
        } else {
            base.add_modifier(Modifier::DIM)
        };

        let inner_width = area.width.saturating_sub(2);
        let (visible, cursor_col) = state.clipped(inner_width);

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title(label.to_string())
            .border_style(border_style)
            .title_style(border_style);
        frame.render_widget(Paragraph::new(visible).block(block).style(base), area);

        if has_focus {
            frame.set_cursor_position((area.x + 1 + cursor_col, area.y + 1));
        }
    }
}

impl Component for InputPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [title_area, content_area] =
            Layout::vertical([Constraint::Length(FIELD_HEIGHT), Constraint::Length(FIELD_HEIGHT)])
                .areas(area);

        let title_label = if self.editing { "Title (editing)" } else { "Title" };
        self.render_field(frame, title_area, Field::Title, title_label);
        self.render_field(frame, content_area, Field::Content, "Content");
    }
}

impl EventHandler for InputPanel {
    type Event = PanelEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.focused_field().insert_char(*c);
                Some(PanelEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Pasted newlines would be invisible in a one-line field.
                let flat = text.replace(['\r', '\n'], " ");
                self.focused_field().insert_str(&flat);
                Some(PanelEvent::ContentChanged)
            }
            TuiEvent::Backspace => self
                .focused_field()
                .backspace()
                .then_some(PanelEvent::ContentChanged),
            TuiEvent::Delete => self
                .focused_field()
                .delete()
                .then_some(PanelEvent::ContentChanged),
            TuiEvent::CursorLeft => self
                .focused_field()
                .left()
                .then_some(PanelEvent::ContentChanged),
            TuiEvent::CursorRight => self
                .focused_field()
                .right()
                .then_some(PanelEvent::ContentChanged),
            TuiEvent::CursorHome => {
                self.focused_field().cursor = 0;
                Some(PanelEvent::ContentChanged)
            }
            TuiEvent::CursorEnd => {
                let field = self.focused_field();
                field.cursor = field.buffer.len();
                Some(PanelEvent::ContentChanged)
            }
            TuiEvent::Tab => {
                self.focus = match self.focus {
                    Field::Title => Field::Content,
                    Field::Content => Field::Title,
                };
                Some(PanelEvent::ContentChanged)
            }
            TuiEvent::CursorUp => {
                self.focus = Field::Title;
                Some(PanelEvent::ContentChanged)
            }
            TuiEvent::CursorDown => {
                self.focus = Field::Content;
                Some(PanelEvent::ContentChanged)
            }
            TuiEvent::Submit => Some(PanelEvent::Submit {
                title: self.title.buffer.clone(),
                content: self.content.buffer.clone(),
            }),
            _ => None,
        }
    }
}
