//! # NoteList Component
//!
//! Scrollable view of the note collection, one [`NoteCard`] per row, in
//! server order.
//!
//! `NoteList` is a transient component (created each frame) that wraps
//! `&'a mut NoteListState` (persistent scroll/selection state) and the note
//! slice (props). Row heights and their running totals are recomputed during
//! the render pass; the event loop uses the cached `prefix_heights` for mouse
//! hit testing.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Note;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::note_card::NoteCard;
use crate::tui::event::TuiEvent;

/// Scroll and selection state for the note list.
/// Must be persisted in the parent TuiState.
pub struct NoteListState {
    pub scroll_state: ScrollViewState,
    /// Per-row heights from the last render.
    pub heights: Vec<u16>,
    /// Running totals of `heights`, for hit testing and scroll-to-selected.
    pub prefix_heights: Vec<u16>,
    /// Row selected via keyboard or click.
    pub selected_index: Option<usize>,
    /// Row currently under the mouse cursor.
    pub hovered_index: Option<usize>,
    /// Last known viewport height (for scroll clamping between frames).
    pub viewport_height: u16,
}

impl Default for NoteListState {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            selected_index: None,
            hovered_index: None,
            viewport_height: 0,
        }
    }

    /// Drop a selection that no longer points at a row. Called after each
    /// refresh, since the view-model is rebuilt wholesale and may shrink.
    pub fn clamp_selection(&mut self, len: usize) {
        if let Some(idx) = self.selected_index
            && idx >= len
        {
            self.selected_index = len.checked_sub(1);
        }
        if len == 0 {
            self.hovered_index = None;
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(idx) => idx.saturating_sub(1),
            None => 0,
        });
        self.scroll_to_selected();
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(idx) => (idx + 1).min(len - 1),
            None => 0,
        });
        self.scroll_to_selected();
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let total: u16 = self.heights.iter().sum();
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected row is fully visible.
    /// If the row is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        if idx >= self.prefix_heights.len() {
            return;
        }

        let row_top = if idx == 0 {
            0
        } else {
            self.prefix_heights[idx - 1]
        };
        let row_bottom = self.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if row_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: row_top });
        } else if row_bottom > offset_y + self.viewport_height {
            let new_y = row_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }
}

/// EventHandler is implemented on `NoteListState` rather than `NoteList`
/// because event handling needs the persistent scroll state, while `NoteList`
/// is recreated each frame with fresh props.
impl EventHandler for NoteListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
                None
            }
            _ => None,
        }
    }
}

/// Scrollable note collection view, created fresh each frame.
pub struct NoteList<'a> {
    pub state: &'a mut NoteListState,
    pub notes: &'a [Note],
}

impl<'a> NoteList<'a> {
    pub fn new(state: &'a mut NoteListState, notes: &'a [Note]) -> Self {
        Self { state, notes }
    }
}

impl<'a> Component for NoteList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        self.state.clamp_selection(self.notes.len());

        // Recompute the layout for this frame. The list is rebuilt wholesale
        // on every refresh, so there is nothing stable enough to cache across
        // frames; the row count stays small in practice.
        let heights: Vec<u16> = self
            .notes
            .iter()
            .map(|note| NoteCard::calculate_height(note, content_width))
            .collect();
        let prefix_heights: Vec<u16> = heights
            .iter()
            .scan(0u16, |acc, h| {
                *acc += h;
                Some(*acc)
            })
            .collect();
        let total_height: u16 = heights.iter().sum();
        self.state.heights = heights;
        self.state.prefix_heights = prefix_heights;

        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height.max(1)))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (i, note) in self.notes.iter().enumerate() {
            let height = self.state.heights[i];
            let card = NoteCard::new(
                note,
                self.state.hovered_index == Some(i),
                self.state.selected_index == Some(i),
            );
            scroll_view.render_widget(card, Rect::new(0, y_offset, content_width, height));
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn make_notes(n: usize) -> Vec<Note> {
        (0..n)
            .map(|i| Note {
                id: i as i64 + 1,
                title: format!("Note {}", i + 1),
                content: format!("content {}", i + 1),
            })
            .collect()
    }

    #[test]
    fn test_selection_moves_and_saturates() {
        let mut state = NoteListState::new();

        state.select_next(3);
        assert_eq!(state.selected_index, Some(0));
        state.select_next(3);
        state.select_next(3);
        state.select_next(3); // Already at the end
        assert_eq!(state.selected_index, Some(2));

        state.select_prev(3);
        assert_eq!(state.selected_index, Some(1));
        state.select_prev(3);
        state.select_prev(3); // Already at the start
        assert_eq!(state.selected_index, Some(0));
    }

    #[test]
    fn test_selection_on_empty_list_is_noop() {
        let mut state = NoteListState::new();
        state.select_next(0);
        assert_eq!(state.selected_index, None);
    }

    #[test]
    fn test_clamp_selection_after_shrink() {
        let mut state = NoteListState::new();
        state.selected_index = Some(4);
        state.clamp_selection(2);
        assert_eq!(state.selected_index, Some(1));

        state.clamp_selection(0);
        assert_eq!(state.selected_index, None);
    }

    #[test]
    fn test_render_builds_prefix_heights() {
        let backend = TestBackend::new(40, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let notes = make_notes(3);
        let mut state = NoteListState::new();

        terminal
            .draw(|f| {
                let mut list = NoteList::new(&mut state, &notes);
                list.render(f, f.area());
            })
            .unwrap();

        assert_eq!(state.heights.len(), 3);
        assert_eq!(state.prefix_heights.len(), 3);
        // Single-line content → 3 rows per card, running totals 3/6/9.
        assert_eq!(state.prefix_heights, vec![3, 6, 9]);
    }

    #[test]
    fn test_render_shows_titles_in_order() {
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let notes = make_notes(2);
        let mut state = NoteListState::new();

        terminal
            .draw(|f| {
                let mut list = NoteList::new(&mut state, &notes);
                list.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        let first = text.find("Note 1").unwrap();
        let second = text.find("Note 2").unwrap();
        assert!(first < second, "rows must keep server order");
    }
}
