//! Terminal side of macro alerts and confirmations.

use std::io::{self, BufRead, IsTerminal, Write};

use tracing::{debug, warn};

use faixa_core::Interaction;

/// Alerts go to stderr; confirmations are read from stdin.
///
/// Without a terminal on stdin every confirmation is declined unless
/// `assume_yes` is set. Alerts are only echoed when `alerts` is set, since
/// the summary table already carries the outcome message.
pub struct TerminalInteraction<W = io::Stderr> {
    assume_yes: bool,
    alerts: Option<W>,
}

impl TerminalInteraction {
    pub fn new(assume_yes: bool, echo_alerts: bool) -> Self {
        Self::with_alert_writer(assume_yes, echo_alerts.then(io::stderr))
    }
}

impl<W: Write> TerminalInteraction<W> {
    pub fn with_alert_writer(assume_yes: bool, alerts: Option<W>) -> Self {
        Self { assume_yes, alerts }
    }
}

impl<W: Write> Interaction for TerminalInteraction<W> {
    fn alert(&mut self, message: &str) {
        match &mut self.alerts {
            Some(out) => {
                if writeln!(out, "{message}").is_err() {
                    warn!("failed to write alert");
                }
            }
            None => debug!(message, "alert left to the summary"),
        }
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            debug!(title, "confirmed by --yes");
            return true;
        }
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            warn!(title, "stdin is not a terminal, declining; pass --yes to confirm");
            return false;
        }
        eprint!("{title}: {message} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}
