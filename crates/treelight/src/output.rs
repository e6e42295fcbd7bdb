//! Output formatting for the CLI.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Text,
    /// JSON for programmatic use.
    Json,
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

/// Write rendered markup to stdout unchanged.
pub fn print_markup(markup: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(markup.as_bytes())?;
    handle.flush()
}

/// Format one entry of the language listing.
pub fn format_language(name: &str, bundled: bool) -> String {
    if bundled {
        format!("{name} {}", "(bundled grammar)".dimmed())
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_language_plain() {
        assert_eq!(format_language("toml", false), "toml");
    }

    #[test]
    fn test_format_language_bundled() {
        colored::control::set_override(false);
        assert_eq!(format_language("rust", true), "rust (bundled grammar)");
        colored::control::unset_override();
    }
}
