//! The user-facing side of a macro: notifications and confirmations.

use std::collections::VecDeque;

/// Where a macro reports back to the person who triggered it.
pub trait Interaction {
    /// Shows a message; returns once the user has seen it.
    fn alert(&mut self, message: &str);

    /// Asks a yes/no question. `true` means yes.
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

/// An [`Interaction`] that answers confirmations from a script and records
/// everything it was shown.
///
/// Once the scripted answers run out every further confirmation is declined.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInteraction {
    answers: VecDeque<bool>,
    pub alerts: Vec<String>,
    pub prompts: Vec<(String, String)>,
}

impl ScriptedInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }
}

impl Interaction for ScriptedInteraction {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.prompts.push((title.to_string(), message.to_string()));
        self.answers.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declines_once_answers_run_out() {
        let mut ui = ScriptedInteraction::answering([true]);
        assert!(ui.confirm("Confirm", "first?"));
        assert!(!ui.confirm("Confirm", "second?"));
        assert_eq!(ui.prompts.len(), 2);
    }
}
