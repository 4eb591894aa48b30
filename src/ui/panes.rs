//! UI pane drawing module for codews.
//!
//! Draws the entry list (left) and the runner output (right). Entry labels are parsed from
//! their markup into styled spans here; the raw names are never shown directly.
//!
//! Used internally by ui::render

use crate::app::{OutputLog, WorkspaceSession};
use crate::config::Theme;
use crate::core::markup::{CLASS_DIR, CLASS_EXEC, parse_label};

use ansi_to_tui::IntoText;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Styles used for rendering entry labels
pub struct PaneStyles {
    pub item: Style,
    pub dir: Style,
    pub exec: Style,
    pub selection: Style,
}

impl PaneStyles {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            item: theme.entry_style(),
            dir: theme.directory_style(),
            exec: theme.executable_style(),
            selection: theme.selection_style(),
        }
    }

    /// Style for a markup class, with the selection colors laid over it.
    pub fn get_style(&self, class: Option<&str>, is_selected: bool) -> Style {
        let mut style = match class {
            Some(CLASS_DIR) => self.dir,
            Some(CLASS_EXEC) => self.exec,
            _ => self.item,
        };

        if is_selected {
            if let Some(bg) = self.selection.bg
                && bg != Color::Reset
            {
                style = style.bg(bg);
            }

            if let Some(fg) = self.selection.fg
                && fg != Color::Reset
            {
                style = style.fg(fg);
            }
        }
        style
    }
}

/// Turns one markup label into a styled line.
pub fn label_line(label: &str, styles: &PaneStyles, is_selected: bool) -> Line<'static> {
    let spans: Vec<Span<'static>> = parse_label(label)
        .into_iter()
        .map(|(class, text)| Span::styled(text, styles.get_style(class.as_deref(), is_selected)))
        .collect();
    Line::from(spans)
}

fn pane_block(title: &str, accent: Style) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(accent)
        .title(format!(" {title} "))
}

/// Draws the entry list of the current directory with the selection highlighted.
pub fn draw_entries(frame: &mut Frame, area: Rect, session: &WorkspaceSession, theme: &Theme) {
    let block = pane_block("Files", theme.accent_style());
    let styles = PaneStyles::from_theme(theme);

    if session.entries().is_empty() {
        let line = Line::from(Span::styled("[Empty]", styles.item));
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let selected = session.selected_idx();
    let items: Vec<ListItem> = session
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, entry)| ListItem::new(label_line(entry.label(), &styles, idx == selected)))
        .collect();

    let mut state = ListState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(
        List::new(items)
            .block(block)
            .highlight_style(Style::default())
            .highlight_symbol(theme.selection_icon())
            .scroll_padding(2),
        area,
        &mut state,
    );
}

/// Draws the tail of the runner output that fits the pane, ANSI colors included.
pub fn draw_output(frame: &mut Frame, area: Rect, output: &OutputLog, theme: &Theme) {
    let block = pane_block("Output", theme.accent_style());
    if output.is_empty() {
        let line = Line::from(Span::styled("[No output]", theme.entry_style()));
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;

    let raw = output.tail(visible).collect::<Vec<_>>().join("\n");
    let text = raw.into_text().unwrap_or_else(|_| Text::from(raw));

    frame.render_widget(
        Paragraph::new(text)
            .style(theme.entry_style())
            .block(block),
        area,
    );
}
