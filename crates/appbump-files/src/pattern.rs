//! Regex-located version fields
//!
//! Version fields in project files are found with a single pattern whose first
//! capture group is the value. Reads take the first match; writes replace the
//! captured span only, so everything around it keeps its formatting.

use std::path::Path;
use std::sync::LazyLock;

use appbump_core::error::{FieldError, Result};
use regex::Regex;

/// How many matches a replacement touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrences {
    /// Only the first match
    First,
    /// Every match, for fields repeated once per build configuration
    All,
}

/// A named field pattern with exactly one capture group
pub struct FieldPattern {
    field: &'static str,
    regex: LazyLock<Regex>,
}

impl FieldPattern {
    pub const fn new(field: &'static str, init: fn() -> Regex) -> Self {
        Self {
            field,
            regex: LazyLock::new(init),
        }
    }

    /// Field name used in errors and progress output
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Captured value of the first match, if any
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Captured value of the first match, or a pattern-not-found error
    pub fn extract<'t>(&self, text: &'t str, file: &Path) -> Result<&'t str> {
        self.find(text).ok_or_else(|| {
            FieldError::PatternNotFound {
                field: self.field.to_string(),
                file: file.to_path_buf(),
            }
            .into()
        })
    }

    /// First captured value parsed as a build counter
    pub fn extract_number(&self, text: &str, file: &Path) -> Result<u64> {
        let value = self.extract(text, file)?;
        value.trim().parse::<u64>().map_err(|_| {
            FieldError::InvalidNumber {
                field: self.field.to_string(),
                value: value.to_string(),
                file: file.to_path_buf(),
            }
            .into()
        })
    }

    /// Replace the captured span of matching occurrences with `value`.
    ///
    /// `value` is inserted literally; `$` has no special meaning.
    pub fn replace(&self, text: &str, value: &str, occurrences: Occurrences) -> String {
        let limit = match occurrences {
            Occurrences::First => 1,
            Occurrences::All => usize::MAX,
        };

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in self.regex.captures_iter(text).take(limit) {
            if let Some(m) = caps.get(1) {
                out.push_str(&text[last..m.start()]);
                out.push_str(value);
                last = m.end();
            }
        }
        out.push_str(&text[last..]);
        out
    }
}

impl std::fmt::Debug for FieldPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldPattern")
            .field("field", &self.field)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}
