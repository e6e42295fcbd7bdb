//! Grammar and query artifact providers.
//!
//! A provider turns a language name into the two artifacts a session needs:
//! a grammar and the source of its highlight query. Several backends are
//! available:
//!
//! - **Remote**: fetches `treesitter/{name}/grammar.wasm` and
//!   `treesitter/{name}/highlights.scm` relative to a base URL
//! - **Directory**: reads the same layout from a local directory
//! - **Bundled**: grammars and queries compiled into the binary
//! - **Memory**: an in-process map, for embedding and tests
//!
//! # Architecture
//!
//! The provider trait is async because the remote and directory backends do
//! I/O. It is object-safe, so sessions hold a `Box<dyn GrammarProvider>` and
//! the backend is picked at runtime from configuration via
//! [`create_provider`].
//!
//! # Example
//!
//! ```no_run
//! use treelight::provider::{GrammarProvider, RemoteProvider};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = RemoteProvider::new("https://example.com/app/")?;
//!     let artifacts = provider.load("rust").await?;
//!     println!("query is {} bytes", artifacts.highlights.len());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use crate::config::{SourceConfig, SourceKind};
use crate::engine::GrammarArtifact;
use crate::error::{Error, Result};

mod bundled;
mod directory;
mod http;
mod memory;

pub use bundled::BundledProvider;
pub use directory::DirectoryProvider;
pub use http::RemoteProvider;
pub use memory::MemoryProvider;

/// Directory holding per-language artifact directories.
pub const ARTIFACT_ROOT: &str = "treesitter";

/// File name of a compiled grammar module.
pub const GRAMMAR_FILE: &str = "grammar.wasm";

/// File name of a highlight query.
pub const HIGHLIGHTS_FILE: &str = "highlights.scm";

/// File listing available languages, one per line.
pub const LANGUAGES_FILE: &str = "languages.csv";

/// Maximum length of a language name.
pub const MAX_LANGUAGE_NAME_LENGTH: usize = 64;

/// Artifacts needed to install a language into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageArtifacts {
    /// The grammar, either compiled in or as a module.
    pub grammar: GrammarArtifact,
    /// Highlight query source.
    pub highlights: String,
}

/// Source of grammar and query artifacts.
///
/// Implementations must be `Send + Sync` so a session can be shared across
/// tasks behind a [`crate::session::SessionHandle`].
#[async_trait]
pub trait GrammarProvider: Send + Sync {
    /// Fetch the grammar and highlight query for `language`.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidLanguageName` if the name cannot form an artifact path
    /// - `Error::Fetch`, `Error::HttpStatus` or `Error::Io` if retrieval fails
    /// - `Error::UnknownLanguage` if the provider has nothing under that name
    async fn load(&self, language: &str) -> Result<LanguageArtifacts>;

    /// List the languages this provider can load, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing itself cannot be retrieved.
    async fn languages(&self) -> Result<Vec<String>>;

    /// Human-readable description of where artifacts come from.
    fn describe(&self) -> String;
}

/// Check that a language name is safe to interpolate into an artifact path.
///
/// Names must be 1-64 characters of ASCII letters, digits, `_` or `-`.
///
/// # Errors
///
/// Returns `Error::InvalidLanguageName` otherwise.
pub fn validate_language_name(language: &str) -> Result<()> {
    let valid = !language.is_empty()
        && language.len() <= MAX_LANGUAGE_NAME_LENGTH
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidLanguageName(language.to_string()))
    }
}

/// Relative path of a language's grammar module.
#[must_use]
pub fn grammar_path(language: &str) -> String {
    format!("{ARTIFACT_ROOT}/{language}/{GRAMMAR_FILE}")
}

/// Relative path of a language's highlight query.
#[must_use]
pub fn highlights_path(language: &str) -> String {
    format!("{ARTIFACT_ROOT}/{language}/{HIGHLIGHTS_FILE}")
}

/// Relative path of the language listing.
#[must_use]
pub fn languages_path() -> String {
    format!("{ARTIFACT_ROOT}/{LANGUAGES_FILE}")
}

/// Parse a language listing: one name per line, extra CSV columns ignored.
pub(crate) fn parse_language_list(content: &str) -> Vec<String> {
    let mut names: Vec<String> = content
        .lines()
        .filter_map(|line| line.split(',').next())
        .map(str::trim)
        .filter(|name| validate_language_name(name).is_ok())
        .map(str::to_string)
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Whether providers pair queries with compiled-in grammars by default.
///
/// Without the `wasm` feature a fetched grammar module cannot be loaded, so
/// only the query is fetched.
#[must_use]
pub fn default_bundled_grammars() -> bool {
    !cfg!(feature = "wasm")
}

/// Create a provider from configuration.
///
/// Construction does no I/O; artifacts are read on the first
/// [`GrammarProvider::load`].
///
/// # Errors
///
/// Returns `Error::Config` if the source kind needs a location and none was
/// given, or the location is not a valid URL for a remote source.
pub fn create_provider(config: &SourceConfig) -> Result<Box<dyn GrammarProvider>> {
    let location = || {
        config.location.clone().ok_or_else(|| {
            Error::Config(format!("source kind '{}' requires a location", config.kind))
        })
    };

    let provider: Box<dyn GrammarProvider> = match config.kind {
        SourceKind::Bundled => Box::new(BundledProvider),
        SourceKind::Directory => Box::new(
            DirectoryProvider::new(location()?).with_bundled_grammars(config.bundled_grammars),
        ),
        SourceKind::Remote => Box::new(
            RemoteProvider::new(&location()?)?.with_bundled_grammars(config.bundled_grammars),
        ),
    };

    tracing::debug!(provider = %provider.describe(), "Created grammar provider");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::simple("rust")]
    #[case::dashed("c-sharp")]
    #[case::underscored("tree_sitter_x")]
    #[case::digits("python3")]
    fn test_valid_language_names(#[case] name: &str) {
        assert!(validate_language_name(name).is_ok());
    }

    #[rstest]
    #[case::empty("")]
    #[case::traversal("../etc")]
    #[case::slash("a/b")]
    #[case::space("two words")]
    #[case::query("rust?x=1")]
    fn test_invalid_language_names(#[case] name: &str) {
        assert!(matches!(
            validate_language_name(name),
            Err(Error::InvalidLanguageName(_))
        ));
    }

    #[test]
    fn test_name_too_long() {
        let name = "a".repeat(MAX_LANGUAGE_NAME_LENGTH + 1);
        assert!(validate_language_name(&name).is_err());
    }

    #[test]
    fn test_artifact_paths() {
        assert_eq!(grammar_path("rust"), "treesitter/rust/grammar.wasm");
        assert_eq!(highlights_path("rust"), "treesitter/rust/highlights.scm");
        assert_eq!(languages_path(), "treesitter/languages.csv");
    }

    #[test]
    fn test_parse_language_list() {
        let names = parse_language_list("rust\npython, Python\n\n  toml  \nrust\n../bad\n");
        assert_eq!(names, vec!["python", "rust", "toml"]);
    }

    #[tokio::test]
    async fn test_create_bundled_provider() {
        let provider = create_provider(&SourceConfig::default()).unwrap();
        assert!(provider.languages().await.unwrap().contains(&"rust".to_string()));
    }

    #[test]
    fn test_create_remote_without_location() {
        let config = SourceConfig {
            kind: SourceKind::Remote,
            ..SourceConfig::default()
        };
        let Err(err) = create_provider(&config) else {
            panic!("expected missing-location error");
        };
        assert!(matches!(err, Error::Config(ref m) if m.contains("requires a location")));
    }

    #[test]
    fn test_create_remote_with_bad_url() {
        let config = SourceConfig {
            kind: SourceKind::Remote,
            location: Some("ftp://example.com/".to_string()),
            ..SourceConfig::default()
        };
        let Err(err) = create_provider(&config) else {
            panic!("expected invalid URL error");
        };
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_create_directory_provider() {
        let config = SourceConfig {
            kind: SourceKind::Directory,
            location: Some("site".to_string()),
            ..SourceConfig::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.describe(), "directory site");
    }
}
