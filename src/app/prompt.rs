//! The prompting port.
//!
//! The dispatcher asks for confirmation and the session asks for new names through [Prompter].
//! Both calls block until the user answers. The terminal front end implements it with modal
//! dialogs; tests use scripted answers.

pub trait Prompter {
    /// Asks a yes/no question. Returns true only on an explicit yes.
    fn confirm(&mut self, message: &str) -> bool;

    /// Asks for a line of text. `None` means the user cancelled.
    fn prompt_text(&mut self, title: &str) -> Option<String>;
}

/// Answers every prompt with no: confirmations are declined, text input is cancelled.
///
/// Used for actions raised by navigation itself, where nobody is asked.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unattended;

impl Prompter for Unattended {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }

    fn prompt_text(&mut self, _title: &str) -> Option<String> {
        None
    }
}
