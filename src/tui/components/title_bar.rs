//! # TitleBar Component
//!
//! Single-line status bar at the top of the screen: application name, the
//! server it talks to, and the transient status message. Purely
//! presentational; all three values arrive as props.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    /// Base URL of the notes service.
    pub server: String,
    /// Transient status (e.g. "3 notes", "Adding note...").
    pub status_message: String,
    /// Whether a request is currently in flight.
    pub is_loading: bool,
}

impl TitleBar {
    pub fn new(server: String, status_message: String, is_loading: bool) -> Self {
        Self {
            server,
            status_message,
            is_loading,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.is_loading {
            format!(
                "MemoTime Notes ({}) | {} | ...",
                self.server, self.status_message
            )
        } else if self.status_message.is_empty() {
            format!("MemoTime Notes ({})", self.server)
        } else {
            format!("MemoTime Notes ({}) | {}", self.server, self.status_message)
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}
