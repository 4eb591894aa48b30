//! Terminal rendering and event loop for codews.
//!
//! Handles setup/teardown of raw mode and the alternate screen, redraws, and key/resize events.
//! Also provides the terminal side of two ports:
//! - [ModalPrompter] answers [Prompter] calls with dialogs drawn over the last frame. It runs
//!   its own blocking read loop, so the control thread waits for the answer.
//! - Interactive [RunRequest]s (the text editor, foreground runs) get the real terminal: the TUI
//!   is suspended while they run and restored afterwards.

use crate::app::{AppState, Outcome, Prompter};
use crate::config::Theme;
use crate::core::proc::RunRequest;
use crate::ui::{self, widgets};

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use std::io::{self, BufRead, Stdout, Write};
use std::process::ExitStatus;
use std::time::Duration;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until quit. Returns an std::io::Error if terminal setup or teardown fails.
pub fn run_terminal(app: &mut AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    result
}

/// Main event loop of codews: drains runner and watcher events, draws the UI, polls for keys
/// and dispatches them to the app. Returns on quit.
fn event_loop(terminal: &mut Tui, app: &mut AppState) -> io::Result<()> {
    let mut last_frame = Buffer::empty(Rect::default());
    let mut changed = true;

    app.open_initial();

    loop {
        changed |= app.tick();

        for request in app.take_interactive() {
            run_interactive(terminal, &request)?;
            changed = true;
        }

        if changed {
            let completed = terminal.draw(|f| ui::render(f, app))?;
            last_frame = completed.buffer.clone();
            changed = false;
        }

        if !event::poll(Duration::from_millis(16))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = app.lookup(key) {
                    let theme = app.config().theme();
                    let mut prompter = ModalPrompter::new(terminal, &last_frame, theme);
                    if app.handle_action(action, &mut prompter) == Outcome::Quit {
                        break;
                    }
                    changed = true;
                }
            }
            Event::Resize(_, _) => changed = true,
            _ => {}
        }
    }
    Ok(())
}

/// Hands the terminal to a foreground command and restores the TUI when it exits.
fn run_interactive(terminal: &mut Tui, request: &RunRequest) -> io::Result<()> {
    let Some(mut cmd) = request.to_command() else {
        return Ok(());
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;

    tracing::info!(command = %request.display(), "running in foreground");
    let status = cmd.status();

    if request.pauses_after() {
        wait_for_enter(&status)?;
    }

    execute!(terminal.backend_mut(), EnterAlternateScreen, Hide)?;
    enable_raw_mode()?;
    terminal.clear()?;

    match status {
        Ok(status) if !status.success() => {
            tracing::warn!(command = %request.display(), %status, "foreground command failed")
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(command = %request.display(), error = %e, "cannot run"),
    }
    Ok(())
}

/// Leaves the finished command's output on screen until Enter is pressed.
fn wait_for_enter(status: &io::Result<ExitStatus>) -> io::Result<()> {
    let outcome = match status {
        Ok(status) => match status.code() {
            Some(0) => "[done]".to_string(),
            Some(code) => format!("[exited with status {code}]"),
            None => "[terminated]".to_string(),
        },
        Err(e) => format!("[cannot run: {e}]"),
    };

    let mut stdout = io::stdout();
    write!(stdout, "\n{outcome} Press Enter to return to codews.")?;
    stdout.flush()?;
    io::stdin().lock().read_line(&mut String::new())?;
    Ok(())
}

/// [Prompter] drawing modal dialogs over the last rendered frame.
pub struct ModalPrompter<'t> {
    terminal: &'t mut Tui,
    background: &'t Buffer,
    theme: &'t Theme,
}

impl<'t> ModalPrompter<'t> {
    pub fn new(terminal: &'t mut Tui, background: &'t Buffer, theme: &'t Theme) -> Self {
        Self {
            terminal,
            background,
            theme,
        }
    }

    /// Draws the saved frame with `draw` on top.
    fn redraw(&mut self, draw: impl FnOnce(&mut Frame)) -> io::Result<()> {
        let background = self.background;
        self.terminal.draw(|f| {
            let area = f.area().intersection(background.area);
            let buf = f.buffer_mut();
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    buf[(x, y)] = background[(x, y)].clone();
                }
            }
            draw(f);
        })?;
        Ok(())
    }
}

impl Prompter for ModalPrompter<'_> {
    fn confirm(&mut self, message: &str) -> bool {
        let theme = self.theme;
        loop {
            if let Err(e) = self.redraw(|f| widgets::draw_confirm_dialog(f, message, theme)) {
                tracing::error!(error = %e, "cannot draw dialog");
                return false;
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('y' | 'Y') | KeyCode::Enter => return true,
                    KeyCode::Char('n' | 'N') | KeyCode::Esc => return false,
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "cannot read terminal event");
                    return false;
                }
            }
        }
    }

    fn prompt_text(&mut self, title: &str) -> Option<String> {
        let theme = self.theme;
        let mut input = LineInput::default();
        loop {
            let drawn = self.redraw(|f| {
                widgets::draw_input_dialog(f, title, input.text(), input.cursor(), theme)
            });
            if let Err(e) = drawn {
                tracing::error!(error = %e, "cannot draw dialog");
                return None;
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Enter => return Some(input.into_text()),
                    KeyCode::Esc => return None,
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Delete => input.delete(),
                    KeyCode::Left => input.left(),
                    KeyCode::Right => input.right(),
                    KeyCode::Home => input.home(),
                    KeyCode::End => input.end(),
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        input.insert(c)
                    }
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "cannot read terminal event");
                    return None;
                }
            }
        }
    }
}

/// Single line edit buffer. The cursor is a byte offset on a char boundary.
#[derive(Debug, Default)]
struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    fn text(&self) -> &str {
        &self.text
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn into_text(self) -> String {
        self.text
    }

    fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.text.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    fn left(&mut self) {
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    fn right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn home(&mut self) {
        self.cursor = 0;
    }

    fn end(&mut self) {
        self.cursor = self.text.len();
    }
}
