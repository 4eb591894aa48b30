//! Shared fakes for the codews integration tests.
//!
//! [RecordingRunner] keeps every run request instead of spawning it, [ScriptedPrompter] answers
//! prompts from queues and records what it was asked.

#![allow(dead_code)]

use codews::app::Prompter;
use codews::core::{CommandRunner, RunRequest};

use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Default)]
pub struct RecordingRunner {
    requests: RefCell<Vec<RunRequest>>,
}

impl RecordingRunner {
    pub fn requests(&self) -> Vec<RunRequest> {
        self.requests.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl CommandRunner for RecordingRunner {
    fn spawn(&self, request: RunRequest) {
        self.requests.borrow_mut().push(request);
    }
}

#[derive(Default)]
pub struct ScriptedPrompter {
    confirms: VecDeque<bool>,
    texts: VecDeque<Option<String>>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn confirming(answer: bool) -> Self {
        Self {
            confirms: VecDeque::from([answer]),
            ..Self::default()
        }
    }

    pub fn answering(text: Option<&str>) -> Self {
        Self {
            texts: VecDeque::from([text.map(String::from)]),
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirms.pop_front().unwrap_or(false)
    }

    fn prompt_text(&mut self, title: &str) -> Option<String> {
        self.asked.push(title.to_string());
        self.texts.pop_front().flatten()
    }
}
