//! Interactive side of `audit --fix`.

use crate::views::{FixSummaryView, Style};
use gitid_runtime::{FixInteraction, FixStep, FixSummary};
use std::io::{BufRead, Write};

/// Drives the rewrite workflow over a reader/writer pair (stdin/stdout in the binary)
pub struct ConsoleFixInteraction<R, W> {
    input: R,
    output: W,
    style: Style,
}

impl ConsoleFixInteraction<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio(style: Style) -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout(), style)
    }
}

impl<R: BufRead, W: Write> ConsoleFixInteraction<R, W> {
    pub fn new(input: R, output: W, style: Style) -> Self {
        Self {
            input,
            output,
            style,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    // console write errors are ignored
    fn say(&mut self, text: &str) {
        let _ = write!(self.output, "{}", text);
        let _ = self.output.flush();
    }
}

impl<R: BufRead, W: Write> FixInteraction for ConsoleFixInteraction<R, W> {
    fn show_summary(&mut self, summary: &FixSummary) {
        let text = FixSummaryView::new(summary, self.style).to_string();
        self.say(&text);
        self.say("\n");
    }

    fn show_signature_warning(&mut self) {
        let text = format!(
            "{} Rewriting history changes every affected commit hash and invalidates \
             their GPG/SSH signatures.\n\n",
            self.style.bad("WARNING:")
        );
        self.say(&text);
    }

    fn prompt_confirmation(&mut self, phrase: &str) -> gitid_runtime::Result<String> {
        let text = format!("Type '{}' to continue: ", phrase);
        self.say(&text);
        let mut reply = String::new();
        self.input.read_line(&mut reply)?;
        Ok(reply)
    }

    fn show_progress(&mut self, step: &FixStep) {
        let text = match step {
            FixStep::CreatingBackup => "Creating mirror backup...\n".to_string(),
            FixStep::BackupCreated(path) => format!("Backup created at {}\n", path.display()),
            FixStep::Rewriting { entries } => {
                format!("Rewriting history ({} email mapping(s))...\n", entries)
            }
            FixStep::RemovingRemotes => "Removing remotes...\n".to_string(),
        };
        self.say(&text);
    }

    fn show_warning(&mut self, message: &str) {
        let text = format!("{} {}\n", self.style.warn("Warning:"), message);
        self.say(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_returns_raw_reply() {
        let mut ui = ConsoleFixInteraction::new(
            "rewrite history\n".as_bytes(),
            Vec::new(),
            Style::plain(),
        );

        let reply = ui.prompt_confirmation("rewrite history").unwrap();
        assert_eq!(reply, "rewrite history\n");

        let output = String::from_utf8(ui.into_output()).unwrap();
        assert_eq!(output, "Type 'rewrite history' to continue: ");
    }

    #[test]
    fn test_prompt_at_eof_is_empty() {
        let mut ui = ConsoleFixInteraction::new("".as_bytes(), Vec::new(), Style::plain());
        assert_eq!(ui.prompt_confirmation("rewrite history").unwrap(), "");
    }

    #[test]
    fn test_progress_lines() {
        let mut ui = ConsoleFixInteraction::new("".as_bytes(), Vec::new(), Style::plain());
        ui.show_progress(&FixStep::Rewriting { entries: 2 });
        ui.show_warning("could not remove remote 'origin'");

        let output = String::from_utf8(ui.into_output()).unwrap();
        assert_eq!(
            output,
            "Rewriting history (2 email mapping(s))...\nWarning: could not remove remote 'origin'\n"
        );
    }
}
