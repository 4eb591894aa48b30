//! Filesystem change notifications for the current directory.
//!
//! Wraps a [notify] watcher that follows the session's current directory (non-recursive).
//! Events are only a hint to re-list: [DirWatcher::take_pending] collapses whatever arrived
//! since the last call into a single boolean.

use crate::error::Result;

use crossbeam_channel::{Receiver, unbounded};
use notify::event::EventKind;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};

use std::path::{Path, PathBuf};
use std::time::Duration;

const WATCHER_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Watches one directory at a time for create, delete and modify events.
pub struct DirWatcher {
    watcher: RecommendedWatcher,
    event_rx: Receiver<notify::Event>,
    watched: Option<PathBuf>,
}

impl DirWatcher {
    /// Creates the watcher. Nothing is watched until [DirWatcher::follow] is called.
    pub fn new() -> Result<Self> {
        let (tx, event_rx) = unbounded();
        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| {
                let Ok(event) = res else { return };
                if is_relevant(&event.kind) {
                    let _ = tx.send(event);
                }
            },
            Config::default().with_poll_interval(WATCHER_POLL_INTERVAL),
        )?;

        Ok(Self {
            watcher,
            event_rx,
            watched: None,
        })
    }

    /// Moves the watch to `dir`. Failing to watch the new directory is logged, not fatal.
    pub fn follow(&mut self, dir: &Path) {
        if self.watched.as_deref() == Some(dir) {
            return;
        }

        if let Some(old) = self.watched.take()
            && let Err(e) = self.watcher.unwatch(&old)
        {
            tracing::debug!(path = %old.display(), error = %e, "unwatch failed");
        }

        match self.watcher.watch(dir, RecursiveMode::NonRecursive) {
            Ok(()) => self.watched = Some(dir.to_path_buf()),
            Err(e) => tracing::warn!(path = %dir.display(), error = %e, "cannot watch directory"),
        }

        // anything queued belongs to the previous directory
        while self.event_rx.try_recv().is_ok() {}
    }

    #[inline]
    pub fn watched(&self) -> Option<&Path> {
        self.watched.as_deref()
    }

    /// Drains pending events. Returns true if at least one arrived.
    pub fn take_pending(&self) -> bool {
        let mut any = false;
        while self.event_rx.try_recv().is_ok() {
            any = true;
        }
        any
    }
}

fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(_)
    )
}
