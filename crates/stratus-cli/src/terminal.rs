//! Terminal output collaborator.
//!
//! Commands never print directly; they write through [`Ui`] so the same
//! command code drives a real terminal or a buffer in tests.

use std::io::{self, BufRead, IsTerminal, Write};

const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Where command output goes.
pub trait Ui {
    /// Writes one line of regular output.
    fn say(&mut self, message: &str);

    /// Writes a warning line.
    fn warn(&mut self, message: &str);

    /// Marks the current step as successful.
    fn ok(&mut self);

    /// Marks the invocation as failed, followed by the reason.
    fn failed(&mut self, message: &str);

    /// Marks the invocation as failed because a precondition of `command`
    /// does not hold. Nothing was attempted against the server.
    fn failed_requirement(&mut self, command: &str, reason: &str);

    /// Marks the invocation as failed because of malformed arguments.
    fn failed_with_usage(&mut self, usage: &str, reason: &str);

    /// Asks a yes/no question; anything but `y`/`yes` is a no.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// [`Ui`] on stdout/stdin, colored when stdout is a terminal and
/// `NO_COLOR` is unset.
pub struct TerminalUi {
    color: bool,
}

impl TerminalUi {
    /// Creates a terminal UI, detecting color support.
    pub fn new() -> Self {
        let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self { color }
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&self, text: &str) {
        let mut out = io::stdout().lock();
        // A closed stdout (e.g. `stratus orgs | head -1`) is not an error worth reporting.
        let _ = writeln!(out, "{text}");
    }
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui for TerminalUi {
    fn say(&mut self, message: &str) {
        self.line(message);
    }

    fn warn(&mut self, message: &str) {
        self.line(&self.paint(YELLOW, message));
    }

    fn ok(&mut self) {
        self.line(&self.paint(GREEN, "OK"));
    }

    fn failed(&mut self, message: &str) {
        self.line(&self.paint(RED, "FAILED"));
        self.line(message);
    }

    fn failed_requirement(&mut self, command: &str, reason: &str) {
        self.line(&self.paint(RED, "FAILED"));
        self.line(&format!("Cannot run '{command}': precondition not met."));
        self.line(reason);
    }

    fn failed_with_usage(&mut self, usage: &str, reason: &str) {
        self.line(&self.paint(RED, "FAILED"));
        self.line("Incorrect Usage.");
        if !reason.is_empty() {
            self.line(reason);
        }
        self.line("");
        self.line(&format!("{}: {usage}", self.paint(BOLD, "USAGE")));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        {
            let mut out = io::stdout().lock();
            let _ = write!(out, "{prompt}> ");
            let _ = out.flush();
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_affirmative(&answer)
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// [`Ui`] that keeps every line in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct BufferUi {
    pub outputs: Vec<String>,
    pub prompts: Vec<String>,
    pub confirm_answer: bool,
    pub usage_failed: bool,
    pub requirement_failed: bool,
}

#[cfg(test)]
impl BufferUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            ..Self::default()
        }
    }

    /// Index of the first line containing every fragment, searching from `from`.
    pub fn find_from(&self, from: usize, fragments: &[&str]) -> Option<usize> {
        self.outputs
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, line)| fragments.iter().all(|f| line.contains(f)))
            .map(|(i, _)| i)
    }

    /// Whether lines matching each fragment group appear in order.
    pub fn contains_in_order(&self, groups: &[&[&str]]) -> bool {
        let mut from = 0;
        for fragments in groups {
            match self.find_from(from, fragments) {
                Some(i) => from = i + 1,
                None => return false,
            }
        }
        true
    }

    pub fn contains(&self, fragments: &[&str]) -> bool {
        self.find_from(0, fragments).is_some()
    }
}

#[cfg(test)]
impl Ui for BufferUi {
    fn say(&mut self, message: &str) {
        self.outputs.extend(message.lines().map(str::to_string));
        if message.is_empty() {
            self.outputs.push(String::new());
        }
    }

    fn warn(&mut self, message: &str) {
        self.say(message);
    }

    fn ok(&mut self) {
        self.outputs.push("OK".to_string());
    }

    fn failed(&mut self, message: &str) {
        self.outputs.push("FAILED".to_string());
        self.say(message);
    }

    fn failed_requirement(&mut self, command: &str, reason: &str) {
        self.requirement_failed = true;
        self.outputs.push("FAILED".to_string());
        self.outputs.push(format!("Cannot run '{command}': precondition not met."));
        self.say(reason);
    }

    fn failed_with_usage(&mut self, usage: &str, reason: &str) {
        self.usage_failed = true;
        self.outputs.push("FAILED".to_string());
        self.outputs.push("Incorrect Usage.".to_string());
        self.say(reason);
        self.outputs.push(format!("USAGE: {usage}"));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_confirms() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("YES"));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("nope"));
    }

    #[test]
    fn buffer_matches_groups_in_order() {
        let mut ui = BufferUi::new();
        ui.say("Getting info for org my-org as my-user...");
        ui.ok();
        assert!(ui.contains_in_order(&[&["Getting info", "my-org"], &["OK"]]));
        assert!(!ui.contains_in_order(&[&["OK"], &["Getting info"]]));
    }
}
