//! Grammars and highlight queries compiled into the binary.
//!
//! These back the `bundled` source kind and the fallback used when a
//! directory or remote source ships a query without a `grammar.wasm`.
//!
//! ## Adding a New Language
//!
//! 1. Add the grammar crate to the workspace dependencies
//! 2. Add its name to [`NAMES`] (kept sorted)
//! 3. Add arms to [`language`] and [`highlights`]

use tree_sitter::Language;

/// Names of the compiled-in languages, sorted.
pub const NAMES: &[&str] = &["javascript", "json", "python", "rust"];

/// Get the tree-sitter grammar for a compiled-in language.
#[must_use]
pub fn language(name: &str) -> Option<Language> {
    match name {
        "javascript" => Some(tree_sitter_javascript::LANGUAGE.into()),
        "json" => Some(tree_sitter_json::LANGUAGE.into()),
        "python" => Some(tree_sitter_python::LANGUAGE.into()),
        "rust" => Some(tree_sitter_rust::LANGUAGE.into()),
        _ => None,
    }
}

/// Get the upstream highlight query shipped with a compiled-in grammar.
#[must_use]
pub fn highlights(name: &str) -> Option<&'static str> {
    match name {
        // JavaScript uses HIGHLIGHT_QUERY (no S)
        "javascript" => Some(tree_sitter_javascript::HIGHLIGHT_QUERY),
        "json" => Some(tree_sitter_json::HIGHLIGHTS_QUERY),
        "python" => Some(tree_sitter_python::HIGHLIGHTS_QUERY),
        "rust" => Some(tree_sitter_rust::HIGHLIGHTS_QUERY),
        _ => None,
    }
}

/// Whether a grammar with this name is compiled in.
#[must_use]
pub fn is_bundled(name: &str) -> bool {
    NAMES.contains(&name)
}
