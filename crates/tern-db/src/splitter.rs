//! Statement splitter
//!
//! Splits script text on a fixed delimiter, by default a semicolon directly
//! followed by a line break. This is not a SQL parser: a delimiter inside a
//! string literal or a procedure body splits the statement too. Scripts that
//! need such text must keep the semicolon off the end of the line or use a
//! different delimiter.

/// Default statement delimiter
pub const DEFAULT_DELIMITER: &str = ";\n";

/// Splits script text into statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSplitter {
    delimiter: String,
}

impl StatementSplitter {
    /// Create a splitter using `delimiter`
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    /// The delimiter in use
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Split `script` into trimmed, non-empty statements.
    ///
    /// CRLF line endings are normalized first. A single trailing `;` is
    /// removed from each statement, which covers the last statement of a
    /// file that does not end with a newline.
    pub fn split(&self, script: &str) -> Vec<String> {
        let normalized = script.replace("\r\n", "\n");
        normalized
            .split(self.delimiter.as_str())
            .map(|fragment| {
                let fragment = fragment.trim();
                fragment.strip_suffix(';').unwrap_or(fragment).trim_end()
            })
            .filter(|statement| !statement.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for StatementSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}
