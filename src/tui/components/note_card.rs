use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::api::Note;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single note as a bordered card:
/// the title sits in the border, the content wraps inside.
///
/// `NoteCard` is a transient component, created fresh each frame with the
/// data it needs. Hover and selection flags come from the parent `NoteList`,
/// which tracks them persistently.
#[derive(Clone, Copy)]
pub struct NoteCard<'a> {
    pub note: &'a Note,
    /// Whether this card is currently under the mouse cursor.
    pub is_hovered: bool,
    /// Whether this card is selected in list mode.
    pub is_selected: bool,
}

impl<'a> NoteCard<'a> {
    pub fn new(note: &'a Note, is_hovered: bool, is_selected: bool) -> Self {
        Self {
            note,
            is_hovered,
            is_selected,
        }
    }

    /// Calculate the height required for this note at the given width.
    ///
    /// Uses `textwrap` to predict the wrapped content height *without*
    /// rendering. The options must match Ratatui's `Paragraph` wrapping so
    /// calculated and actual heights stay 1:1; the parent needs them to
    /// agree for scroll positions and hit testing.
    pub fn calculate_height(note: &Note, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            // Return 1 row so the card still occupies space in the layout.
            return 1;
        }

        let content = note.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

impl<'a> Widget for NoteCard<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = Style::default().fg(Color::Green);

        // Selection overrides hover: cyan border for selected, bright for
        // hover, dim otherwise.
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else if self.is_hovered {
            style
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(format!(" {} ", self.note.title))
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style.add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let paragraph = Paragraph::new(self.note.content.trim())
            .style(style)
            .wrap(Wrap { trim: true });
        paragraph.render(inner_area, buf);
    }
}

impl<'a> Component for NoteCard<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
