//! main.rs
//! Entry point for codews

use codews::app::{AppState, WorkspaceSession};
use codews::config::Config;
use codews::core::terminal;
use codews::utils::cli::{CliAction, handle_args};
use codews::utils::logging;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        tracing::error!(panic = %info, "panic");
        eprintln!("\n[codews] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    if let CliAction::Exit = handle_args() {
        return Ok(());
    }

    let config = Config::load();

    let mut log_guard = logging::init();
    if log_guard.is_none() {
        eprintln!("[codews] Warning: logging is disabled, cannot create the log directory.");
    }

    let missing = config.viewers().missing();
    if !missing.is_empty() {
        tracing::warn!(?missing, "configured viewers not found on PATH");
    }

    let session = match WorkspaceSession::start(&config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("\n[codews] Error: {}", e);
            drop(log_guard);
            std::process::exit(1);
        }
    };
    tracing::info!(root = %session.root().display(), "session started");

    let mut app = AppState::new(&config, session);
    if let Some(rx) = log_guard.as_mut().and_then(|g| g.take_status_rx()) {
        app = app.with_status_rx(rx);
    }

    terminal::run_terminal(&mut app)
}
