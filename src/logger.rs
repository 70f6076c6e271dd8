//! Hierarchical progress logger
//!
//! Each nesting level has its own line prefix:
//!
//! ```text
//! ==> retrieving base firmware files
//!  -> bluetooth
//!     copying '.../crbtfw21.tlv' to 'qca/crbtfw21.tlv'
//! ```
//!
//! Levels deeper than the last prefix reuse it.

use std::fmt::Display;

use console::Style;

const PREFIXES: [&str; 3] = ["==> ", " -> ", "    "];

/// Indentation-scoped logger; cheap to copy, holds no state beyond its depth
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    level: usize,
    quiet: bool,
}

impl Logger {
    /// Top-level logger. With `quiet`, info lines are dropped.
    pub fn new(quiet: bool) -> Self {
        Self { level: 0, quiet }
    }

    /// Logger one level deeper
    pub fn sub(&self) -> Self {
        Self {
            level: self.level + 1,
            quiet: self.quiet,
        }
    }

    fn prefix(&self) -> &'static str {
        PREFIXES[self.level.min(PREFIXES.len() - 1)]
    }

    fn prefix_style(&self) -> Style {
        match self.level {
            0 => Style::new().bold().green(),
            1 => Style::new().bold().blue(),
            _ => Style::new(),
        }
    }

    /// Format an info line without terminal styling
    pub fn format_info(&self, msg: impl Display) -> String {
        format!("{}{}", self.prefix(), msg)
    }

    /// Format a warning line without terminal styling
    pub fn format_warn(&self, msg: impl Display) -> String {
        format!("{}WARNING: {}", self.prefix(), msg)
    }

    /// Format an error line without terminal styling
    pub fn format_error(&self, msg: impl Display) -> String {
        format!("{}ERROR: {}", self.prefix(), msg)
    }

    /// Style a formatted line: the prefix by level, the rest with `body`
    fn render(&self, line: &str, body: &Style) -> String {
        let (prefix, rest) = line.split_at(self.prefix().len());
        format!(
            "{}{}",
            self.prefix_style().apply_to(prefix),
            body.apply_to(rest)
        )
    }

    pub fn info(&self, msg: impl Display) {
        if self.quiet {
            return;
        }
        println!("{}", self.render(&self.format_info(msg), &Style::new()));
    }

    pub fn warn(&self, msg: impl Display) {
        let body = Style::new().yellow().for_stderr();
        eprintln!("{}", self.render(&self.format_warn(msg), &body));
    }

    pub fn error(&self, msg: impl Display) {
        let body = Style::new().red().for_stderr();
        eprintln!("{}", self.render(&self.format_error(msg), &body));
    }
}
