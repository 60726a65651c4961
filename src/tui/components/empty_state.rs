//! # EmptyState Component
//!
//! Shown in place of the note list when the collection is empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct EmptyState {
    /// True while the initial fetch is still out; shows a quieter message.
    pub is_loading: bool,
}

impl EmptyState {
    pub fn new(is_loading: bool) -> Self {
        Self { is_loading }
    }
}

impl Component for EmptyState {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut text_lines = Vec::new();

        if self.is_loading {
            text_lines.push(Line::from(Span::styled(
                "Fetching notes...",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            text_lines.push(Line::from(Span::styled(
                "No notes yet",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            text_lines.push(Line::from(Span::styled(
                "Type a title and content below, then press Enter",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let version_text = format!("MemoTime v{}", env!("CARGO_PKG_VERSION"));
        text_lines.push(Line::from(Span::styled(
            version_text,
            Style::default().fg(Color::DarkGray),
        )));

        let text_height = text_lines.len() as u16;
        let vertical_layout = Layout::vertical([Constraint::Length(text_height)])
            .flex(Flex::Center)
            .split(area);

        let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, vertical_layout[0]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(empty: &mut EmptyState) -> String {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                empty.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_idle_empty_state_shows_hint() {
        let text = render_to_text(&mut EmptyState::new(false));
        assert!(text.contains("No notes yet"));
        assert!(text.contains("press Enter"));
    }

    #[test]
    fn test_loading_empty_state_shows_fetching() {
        let text = render_to_text(&mut EmptyState::new(true));
        assert!(text.contains("Fetching notes..."));
        assert!(!text.contains("No notes yet"));
    }
}
