//! Human-readable console report
//!
//! Every diagnostic step prints one status line prefixed with a glyph,
//! optionally followed by indented detail lines.

use std::fmt::Display;
use std::io::{self, Write};

pub const SUCCESS: &str = "✓";
pub const WARNING: &str = "⚠";
pub const FAILURE: &str = "✗";
pub const INFO: &str = "ℹ";

const RULE_WIDTH: usize = 50;

/// Writes report lines to a console or buffer.
///
/// Write errors are ignored; the outcome of a check never depends on them.
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn success(&mut self, message: impl Display) {
        self.status(SUCCESS, message);
    }

    pub fn warning(&mut self, message: impl Display) {
        self.status(WARNING, message);
    }

    pub fn failure(&mut self, message: impl Display) {
        self.status(FAILURE, message);
    }

    pub fn info(&mut self, message: impl Display) {
        self.status(INFO, message);
    }

    /// Indented line under the previous status line
    pub fn detail(&mut self, message: impl Display) {
        self.line(format_args!("  {}", message));
    }

    pub fn header(&mut self, title: impl Display) {
        self.line(format_args!("🔌 {}", title));
    }

    pub fn rule(&mut self) {
        self.line("=".repeat(RULE_WIDTH));
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn line(&mut self, message: impl Display) {
        let _ = writeln!(self.out, "{}", message);
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn status(&mut self, glyph: &str, message: impl Display) {
        self.line(format_args!("{} {}", glyph, message));
    }
}

#[cfg(test)]
pub(crate) fn buffered() -> Reporter<Vec<u8>> {
    Reporter::new(Vec::new())
}

#[cfg(test)]
pub(crate) fn output(reporter: Reporter<Vec<u8>>) -> String {
    String::from_utf8(reporter.into_inner()).unwrap()
}
