//! Terminal output
//!
//! Human-readable lines go through `colored`; with `--json` the handlers emit
//! a single JSON document instead and the decorative lines are suppressed.

use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Output formatter shared by all command handlers
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    /// Create a formatter; `no_color` turns off ANSI colors process-wide
    #[must_use]
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color || json {
            colored::control::set_override(false);
        }
        Self { json }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{} {}", "✓".green().bold(), message);
        }
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        if !self.json {
            eprintln!("{} {}", "Error:".red().bold(), message);
        }
    }

    /// Print a warning to stderr
    pub fn warning(&self, message: &str) {
        if !self.json {
            eprintln!("{} {}", "Warning:".yellow().bold(), message);
        }
    }

    /// Print an informational line
    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    /// Print a value as pretty JSON regardless of mode
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a value as JSON, only in JSON mode
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        if self.json {
            self.print_json(value)?;
        }
        Ok(())
    }

    /// A progress bar of `len` steps, hidden in JSON mode
    #[must_use]
    pub fn progress_bar(&self, len: u64, message: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        let style = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_flag() {
        assert!(OutputFormatter::new(true, true).is_json());
        assert!(!OutputFormatter::new(false, true).is_json());
    }

    #[test]
    fn test_progress_bar_hidden_in_json_mode() {
        let bar = OutputFormatter::new(true, true).progress_bar(10, "sim");
        assert!(bar.is_hidden());
    }
}
