use crate::core::state::App;
use crate::tui::components::input_panel::PANEL_HEIGHT;
use crate::tui::components::{EmptyState, NoteList, TitleBar};
use crate::tui::component::Component;
use crate::tui::{InputMode, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(PANEL_HEIGHT), Length(1)]);
    let [title_area, list_area, panel_area, hint_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        app.server.clone(),
        app.status_message.clone(),
        app.is_loading,
    );
    title_bar.render(frame, title_area);

    if app.notes.is_empty() {
        // Nothing to hit-test against while the hint screen is up.
        tui.note_list.heights.clear();
        tui.note_list.prefix_heights.clear();
        EmptyState::new(app.is_loading).render(frame, list_area);
    } else {
        NoteList::new(&mut tui.note_list, &app.notes).render(frame, list_area);
    }

    tui.input_panel.render(frame, panel_area);

    let hint = match tui.input_mode {
        InputMode::Compose => "Enter save | Tab switch field | Esc browse notes | Ctrl+C quit",
        InputMode::List => "Up/Down select | e edit | d delete | r refresh | Esc compose | q quit",
    };
    frame.render_widget(
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
        hint_area,
    );
}

/// Hit test: given a screen Y coordinate, find which note row (if any) is at
/// that position. Recomputes the frame layout to locate the list area, then
/// walks the cached prefix heights.
pub fn hit_test_note(
    screen_y: u16,
    frame_area: Rect,
    scroll_offset_y: u16,
    prefix_heights: &[u16],
) -> Option<usize> {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(PANEL_HEIGHT), Length(1)]);
    let [_title_area, list_area, _panel_area, _hint_area] = layout.areas(frame_area);

    if screen_y < list_area.y || screen_y >= list_area.y + list_area.height {
        return None;
    }

    let content_y = (screen_y - list_area.y) + scroll_offset_y;
    prefix_heights.iter().position(|&end| content_y < end)
}
