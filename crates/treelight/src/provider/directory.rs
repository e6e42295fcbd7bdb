//! Provider reading artifacts from a local directory.
//!
//! Expects the same layout a remote source serves:
//!
//! ```text
//! <root>/treesitter/<language>/grammar.wasm
//! <root>/treesitter/<language>/highlights.scm
//! ```
//!
//! A language directory without `grammar.wasm` is paired with the bundled
//! grammar of the same name, which lets a directory override only the query.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{
    ARTIFACT_ROOT, GrammarProvider, HIGHLIGHTS_FILE, LanguageArtifacts, grammar_path,
    highlights_path, validate_language_name,
};
use crate::bundled;
use crate::engine::GrammarArtifact;
use crate::error::Result;

/// Reads grammar and query artifacts from disk.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
    bundled_grammars: bool,
}

impl DirectoryProvider {
    /// Create a provider rooted at `root` (the directory containing `treesitter/`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            bundled_grammars: super::default_bundled_grammars(),
        }
    }

    /// Skip `grammar.wasm` entirely and always use bundled grammars.
    #[must_use]
    pub fn with_bundled_grammars(mut self, bundled_grammars: bool) -> Self {
        self.bundled_grammars = bundled_grammars;
        self
    }

    /// The directory containing `treesitter/`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_grammar(&self, language: &str) -> Result<GrammarArtifact> {
        if self.bundled_grammars {
            return Ok(GrammarArtifact::Bundled);
        }

        let path = self.root.join(grammar_path(language));
        match fs::read(&path).await {
            Ok(bytes) => Ok(GrammarArtifact::Module(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound && bundled::is_bundled(language) => {
                tracing::debug!(
                    path = %path.display(),
                    language,
                    "No grammar module on disk, using bundled grammar"
                );
                Ok(GrammarArtifact::Bundled)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl GrammarProvider for DirectoryProvider {
    async fn load(&self, language: &str) -> Result<LanguageArtifacts> {
        validate_language_name(language)?;

        let grammar = self.read_grammar(language).await?;
        let highlights = fs::read_to_string(self.root.join(highlights_path(language))).await?;

        Ok(LanguageArtifacts {
            grammar,
            highlights,
        })
    }

    async fn languages(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(self.root.join(ARTIFACT_ROOT)).await?;

        while let Some(entry) = entries.next_entry().await? {
            let Some(name) = entry.file_name().to_str().map(ToString::to_string) else {
                continue;
            };
            if validate_language_name(&name).is_err() {
                continue;
            }
            if fs::try_exists(entry.path().join(HIGHLIGHTS_FILE)).await? {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}
