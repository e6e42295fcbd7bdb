//! Provider backed by grammars compiled into the binary.

use async_trait::async_trait;

use super::{GrammarProvider, LanguageArtifacts, validate_language_name};
use crate::bundled;
use crate::engine::GrammarArtifact;
use crate::error::{Error, Result};

/// Serves the compiled-in grammars with their upstream highlight queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledProvider;

#[async_trait]
impl GrammarProvider for BundledProvider {
    async fn load(&self, language: &str) -> Result<LanguageArtifacts> {
        validate_language_name(language)?;
        let highlights = bundled::highlights(language)
            .ok_or_else(|| Error::UnknownLanguage(language.to_string()))?;

        Ok(LanguageArtifacts {
            grammar: GrammarArtifact::Bundled,
            highlights: highlights.to_string(),
        })
    }

    async fn languages(&self) -> Result<Vec<String>> {
        Ok(bundled::NAMES.iter().map(ToString::to_string).collect())
    }

    fn describe(&self) -> String {
        "bundled grammars".to_string()
    }
}
