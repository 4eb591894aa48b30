//! Runner output kept for the output pane.
//!
//! [OutputLog] is a bounded line buffer fed with [RunnerEvent]s. Once full, the oldest lines are
//! dropped. Lines are stored as received, ANSI escapes included; the pane renders them.

use crate::core::proc::{RunRequest, RunnerEvent};

use std::collections::VecDeque;

pub struct OutputLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl OutputLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The last `n` lines, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &str> {
        let skip = self.lines.len().saturating_sub(n);
        self.lines.iter().skip(skip).map(String::as_str)
    }

    /// Records one runner event. Interactive requests are handed back to the caller.
    pub fn apply(&mut self, event: RunnerEvent) -> Option<RunRequest> {
        match event {
            RunnerEvent::Clear => self.clear(),
            RunnerEvent::Started(cmd) => self.push(format!("$ {cmd}")),
            RunnerEvent::Line(line) => self.push(line),
            RunnerEvent::Exited(Some(0)) => self.push("[done]".to_string()),
            RunnerEvent::Exited(Some(code)) => self.push(format!("[exited with status {code}]")),
            RunnerEvent::Exited(None) => self.push("[terminated]".to_string()),
            RunnerEvent::Interactive(request) => return Some(request),
        }
        None
    }
}
