//! In-process provider.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{GrammarProvider, LanguageArtifacts, validate_language_name};
use crate::engine::GrammarArtifact;
use crate::error::{Error, Result};

/// Serves artifacts registered at runtime.
///
/// Useful when the host application already has the grammar bytes and query
/// text (embedded assets, a cache) and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    artifacts: HashMap<String, LanguageArtifacts>,
}

impl MemoryProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register artifacts for a language, replacing any previous entry.
    #[must_use]
    pub fn with_language(
        mut self,
        language: &str,
        grammar: GrammarArtifact,
        highlights: &str,
    ) -> Self {
        self.insert(language, grammar, highlights);
        self
    }

    /// Register artifacts for a language, replacing any previous entry.
    pub fn insert(&mut self, language: &str, grammar: GrammarArtifact, highlights: &str) {
        self.artifacts.insert(
            language.to_string(),
            LanguageArtifacts {
                grammar,
                highlights: highlights.to_string(),
            },
        );
    }
}

#[async_trait]
impl GrammarProvider for MemoryProvider {
    async fn load(&self, language: &str) -> Result<LanguageArtifacts> {
        validate_language_name(language)?;
        self.artifacts
            .get(language)
            .cloned()
            .ok_or_else(|| Error::UnknownLanguage(language.to_string()))
    }

    async fn languages(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.artifacts.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn describe(&self) -> String {
        format!("memory ({} languages)", self.artifacts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_load() {
        let provider = MemoryProvider::new().with_language("toy", GrammarArtifact::Bundled, "q");
        let artifacts = provider.load("toy").await.unwrap();
        assert_eq!(artifacts.highlights, "q");
        assert_eq!(provider.languages().await.unwrap(), vec!["toy"]);
    }

    #[tokio::test]
    async fn test_missing_language() {
        let err = MemoryProvider::new().load("toy").await.unwrap_err();
        assert!(matches!(err, Error::UnknownLanguage(_)));
    }
}
