//! Progress reporting
//!
//! Every mutating step emits one human-readable line. Lines go through a
//! [`Reporter`] so callers decide where they end up: the terminal in the CLI,
//! an in-memory buffer in tests.

use std::io::Write;

use tracing::{info, warn};

/// Sink for progress lines
pub trait Reporter {
    /// Emit a single progress line
    fn line(&mut self, message: &str);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn line(&mut self, message: &str) {
        (**self).line(message);
    }
}

/// Prints progress lines to stdout exactly as reported
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutReporter {
    /// Suppress output
    pub quiet: bool,
}

impl StdoutReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    fn write_line(&self, out: &mut impl Write, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(out, "{}", message)
    }
}

impl Reporter for StdoutReporter {
    fn line(&mut self, message: &str) {
        info!(message, "progress");
        if let Err(e) = self.write_line(&mut std::io::stdout().lock(), message) {
            warn!(error = %e, "failed to write progress line");
        }
    }
}

/// Collects progress lines in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    lines: Vec<String>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines reported so far, oldest first
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Reporter for MemoryReporter {
    fn line(&mut self, message: &str) {
        info!(message, "progress");
        self.lines.push(message.to_string());
    }
}

/// Format a `<subject> <field>: <previous> -> <next>` progress line
pub fn change_line(subject: &str, field: &str, previous: impl std::fmt::Display, next: impl std::fmt::Display) -> String {
    format!("{} {}: {} -> {}", subject, field, previous, next)
}
