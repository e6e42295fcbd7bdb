//! Error types for treelight operations.

use std::io;
use thiserror::Error;

/// The error type for treelight operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error while reading a local artifact or configuration file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The request for an artifact could not be completed.
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        /// The artifact URL.
        url: String,
        /// The underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Failed to fetch {url}: HTTP {status}")]
    HttpStatus {
        /// The artifact URL.
        url: String,
        /// The status code returned.
        status: u16,
    },

    /// The grammar artifact could not be loaded by the engine.
    #[error("Failed to load grammar for '{language}': {message}")]
    GrammarLoad {
        /// Language whose grammar failed to load.
        language: String,
        /// Engine-provided detail.
        message: String,
    },

    /// The highlight query failed to compile against its grammar.
    #[error("Failed to compile highlight query for '{language}': {message}")]
    QueryCompile {
        /// Language whose query failed to compile.
        language: String,
        /// Engine-provided detail.
        message: String,
    },

    /// A wasm grammar was supplied to a build without wasm support.
    #[error("Grammar for '{language}' is a wasm module; rebuild with the `wasm` feature")]
    WasmUnsupported {
        /// Language whose grammar could not be loaded.
        language: String,
    },

    /// No grammar with this name is compiled into the binary.
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// The language name cannot be used to build artifact paths.
    #[error("Invalid language name: '{0}'. Use letters, digits, '_' or '-'")]
    InvalidLanguageName(String),

    /// `highlight` was called before any language was installed.
    #[error("No active language. Call set_language first.")]
    NoActiveLanguage,

    /// The engine did not produce a syntax tree.
    #[error("Failed to parse source as '{language}'")]
    Parse {
        /// The active language.
        language: String,
    },

    /// A capture reported by the engine could not be spliced.
    #[error("Render error: {0}")]
    Render(#[from] treelight_render::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized Result type for treelight operations.
pub type Result<T> = std::result::Result<T, Error>;
