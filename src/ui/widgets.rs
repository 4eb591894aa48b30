//! Widgets for codews: the path header, the status footer and the modal dialogs.
//!
//! Dialogs are drawn on top of whatever is already in the frame buffer. The terminal module
//! restores the last full frame first, so the file list stays visible behind them.

use crate::config::Theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Draws the current directory as a single header line.
pub fn draw_header(frame: &mut Frame, area: Rect, path: &str, theme: &Theme) {
    let line = Line::from(Span::styled(
        path.to_string(),
        theme.path_style().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draws the latest log message in the footer line.
pub fn draw_status_line(frame: &mut Frame, area: Rect, status: &str, theme: &Theme) {
    let line = Line::from(Span::styled(status.to_string(), theme.status_line_style()));
    frame.render_widget(Paragraph::new(line), area);
}

/// Centered popup area taking `percent_x` of the width and `height` rows.
pub fn popup_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Yes/no question with the answer keys in the title.
pub fn draw_confirm_dialog(frame: &mut Frame, message: &str, theme: &Theme) {
    let area = popup_area(frame.area(), 50, 5);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .title_bottom(Line::from(" [y]es / [n]o ").alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(theme.accent_style())
        .style(theme.widget_style());

    let text = Paragraph::new(format!("\n{}", message))
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(text, area);
}

/// Single line text input with a visible cursor.
pub fn draw_input_dialog(
    frame: &mut Frame,
    title: &str,
    input: &str,
    cursor_pos: usize,
    theme: &Theme,
) {
    let area = popup_area(frame.area(), 50, 3);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(theme.accent_style())
        .style(theme.widget_style());

    let visible_width = area.width.saturating_sub(2) as usize;
    let (visible, cursor_offset) = input_field_view(input, cursor_pos, visible_width);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(visible.to_string(), Style::default())))
            .block(block),
        area,
    );

    let cursor_x = area.x + 1 + cursor_offset.min(visible_width.saturating_sub(1)) as u16;
    frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
}

/// Helper function to calculate cursor offset for cursor moving
/// Handles horizontal truncation, variable width with unicode_width and clamps cursor to buffer.
pub fn input_field_view(input_text: &str, cursor_pos: usize, visible_width: usize) -> (&str, usize) {
    let cursor_pos = cursor_pos.min(input_text.len());
    if input_text.width() <= visible_width {
        return (input_text, input_text[..cursor_pos].width());
    }

    let mut current_w = 0;
    let mut start = 0;
    for (idx, ch) in input_text.char_indices().rev() {
        current_w += ch.width().unwrap_or(0);
        if current_w > visible_width {
            start = idx + ch.len_utf8();
            break;
        }
    }

    let cursor_offset = if cursor_pos < start {
        0
    } else {
        input_text[start..cursor_pos].width()
    };

    (&input_text[start..], cursor_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_view_fits() {
        assert_eq!(input_field_view("hello", 5, 10), ("hello", 5));
        assert_eq!(input_field_view("hello", 2, 10), ("hello", 2));
    }

    #[test]
    fn input_view_scrolls_to_the_end() {
        let (visible, offset) = input_field_view("abcdefghij", 10, 4);
        assert_eq!(visible, "ghij");
        assert_eq!(offset, 4);
    }

    #[test]
    fn input_view_counts_wide_chars() {
        let (visible, offset) = input_field_view("日本語", 9, 4);
        assert_eq!(visible, "本語");
        assert_eq!(offset, 4);
    }

    #[test]
    fn popup_stays_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = popup_area(area, 50, 5);
        assert_eq!(popup.height, 5);
        assert!(popup.x + popup.width <= 80);
        assert!(popup.y + popup.height <= 24);
    }
}
