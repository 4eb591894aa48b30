//! Tracing setup for codews.
//!
//! The TUI owns stdout, so the global subscriber has two outputs under one `EnvFilter`:
//! - a fmt layer writing to a daily rolling file in [log_dir]
//! - [StatusLayer], which renders each event on one line for the status line
//!
//! The filter comes from `CODEWS_LOG` and defaults to `codews=info,cws=info`, which covers both
//! the library (`codews`) and the binary (`cws`).

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use std::fmt::{self, Write};
use std::path::PathBuf;

const LOG_ENV: &str = "CODEWS_LOG";
const LOG_FILE: &str = "codews.log";
const DEFAULT_FILTER: &str = "codews=info,cws=info";

/// Keeps the file writer alive. Dropping it flushes the log file.
pub struct LoggingGuard {
    _file: WorkerGuard,
    status_rx: Option<Receiver<String>>,
}

impl LoggingGuard {
    /// Takes the receiver of status lines. Only the first call gets it.
    pub fn take_status_rx(&mut self) -> Option<Receiver<String>> {
        self.status_rx.take()
    }
}

/// Sends every event it sees, as `message key=value ...`, over a channel.
///
/// Warnings and errors are prefixed so they stand out in the status line.
pub struct StatusLayer {
    tx: Sender<String>,
}

impl StatusLayer {
    pub fn new() -> (Self, Receiver<String>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl<S: Subscriber> Layer<S> for StatusLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut line = StatusLine::default();
        event.record(&mut line);
        let _ = self.tx.send(line.finish(*event.metadata().level()));
    }
}

#[derive(Default)]
struct StatusLine {
    message: String,
    fields: String,
}

impl StatusLine {
    fn finish(self, level: Level) -> String {
        let prefix = if level == Level::ERROR {
            "error: "
        } else if level == Level::WARN {
            "warning: "
        } else {
            ""
        };
        format!("{prefix}{}{}", self.message, self.fields)
    }
}

impl Visit for StatusLine {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Directory the log files go to.
pub fn log_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("codews")
        .join("logs")
}

/// Installs the global subscriber.
///
/// Returns `None` if the log directory cannot be created or a subscriber is already set; the
/// application then runs without logs.
pub fn init() -> Option<LoggingGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE);
    let (file_writer, file_guard) = tracing_appender::non_blocking(appender);
    let (status, status_rx) = StatusLayer::new();
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .with(status)
        .try_init()
        .ok()?;

    tracing::info!(log_dir = %dir.display(), "logging to file");

    Some(LoggingGuard {
        _file: file_guard,
        status_rx: Some(status_rx),
    })
}
