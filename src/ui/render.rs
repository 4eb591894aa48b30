//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and the layout helper
//! that splits the screen into header, entry list, output pane and status line.
//!
//! This module stays “pure rendering”: it reads the app state and the theme and produces
//! widgets, without owning any codews core logic.

use crate::app::AppState;
use crate::ui::{panes, widgets};
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Screen areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunks {
    pub header: Rect,
    pub entries: Rect,
    pub output: Rect,
    pub footer: Rect,
}

/// Render function which draws the entire terminal UI for codews on each frame.
pub fn render(frame: &mut Frame, app: &AppState) {
    let theme = app.config().theme();
    let session = app.session();
    let chunks = layout_chunks(frame.area());

    widgets::draw_header(
        frame,
        chunks.header,
        &shorten_home_path(session.current_dir()),
        theme,
    );
    panes::draw_entries(frame, chunks.entries, session, theme);
    panes::draw_output(frame, chunks.output, app.output(), theme);
    widgets::draw_status_line(frame, chunks.footer, app.status(), theme);
}

/// Splits the frame: one header line, the two panes side by side (40/60), one status line.
pub fn layout_chunks(area: Rect) -> Chunks {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    Chunks {
        header: rows[0],
        entries: panes[0],
        output: panes[1],
        footer: rows[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_chunks_cover_the_screen() {
        let size = Rect::new(0, 0, 100, 30);
        let chunks = layout_chunks(size);

        assert_eq!(chunks.header.height, 1);
        assert_eq!(chunks.footer.height, 1);
        assert_eq!(chunks.footer.y, 29);
        assert_eq!(chunks.entries.height, 28);
        assert_eq!(chunks.entries.width + chunks.output.width, 100);
        assert_eq!(chunks.entries.width, 40);
    }
}
