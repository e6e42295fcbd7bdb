//! Provider fetching artifacts over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{
    GrammarProvider, LanguageArtifacts, grammar_path, highlights_path, languages_path,
    parse_language_list, validate_language_name,
};
use crate::engine::GrammarArtifact;
use crate::error::{Error, Result};

/// Fetches artifacts relative to a base URL.
///
/// Paths are resolved the way a page resolves them against its base URI:
/// `https://host/app/` + `treesitter/rust/highlights.scm`. A base without a
/// trailing slash is treated as a directory.
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    client: Client,
    base: Url,
    bundled_grammars: bool,
}

impl RemoteProvider {
    /// Create a provider for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `base` is not an absolute http(s) URL.
    pub fn new(base: &str) -> Result<Self> {
        let mut base =
            Url::parse(base).map_err(|e| Error::Config(format!("Invalid base URL '{base}': {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Base URL must use http or https, got '{}'",
                base.scheme()
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base,
            bundled_grammars: super::default_bundled_grammars(),
        })
    }

    /// Fetch only queries and pair them with bundled grammars.
    #[must_use]
    pub fn with_bundled_grammars(mut self, bundled_grammars: bool) -> Self {
        self.bundled_grammars = bundled_grammars;
        self
    }

    /// The base URL artifact paths are resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve an artifact path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the joined URL is invalid.
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid artifact path '{path}': {e}")))
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = self.url(path)?;
        tracing::debug!(%url, "Fetching artifact");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| Error::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let response = self.get(path).await?;
        let url = response.url().to_string();
        response
            .text()
            .await
            .map_err(|source| Error::Fetch { url, source })
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let response = self.get(path).await?;
        let url = response.url().to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| Error::Fetch { url, source })?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl GrammarProvider for RemoteProvider {
    async fn load(&self, language: &str) -> Result<LanguageArtifacts> {
        validate_language_name(language)?;

        let grammar = if self.bundled_grammars {
            GrammarArtifact::Bundled
        } else {
            GrammarArtifact::Module(self.get_bytes(&grammar_path(language)).await?)
        };
        let highlights = self.get_text(&highlights_path(language)).await?;

        Ok(LanguageArtifacts {
            grammar,
            highlights,
        })
    }

    async fn languages(&self) -> Result<Vec<String>> {
        let content = self.get_text(&languages_path()).await?;
        Ok(parse_language_list(&content))
    }

    fn describe(&self) -> String {
        format!("remote {}", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::trailing_slash(
        "https://example.com/app/",
        "https://example.com/app/treesitter/rust/grammar.wasm"
    )]
    #[case::no_trailing_slash(
        "https://example.com/app",
        "https://example.com/app/treesitter/rust/grammar.wasm"
    )]
    #[case::root("http://localhost:8080", "http://localhost:8080/treesitter/rust/grammar.wasm")]
    fn test_grammar_url(#[case] base: &str, #[case] expected: &str) {
        let provider = RemoteProvider::new(base).unwrap();
        assert_eq!(provider.url(&grammar_path("rust")).unwrap().as_str(), expected);
    }

    #[test]
    fn test_highlights_url_is_sibling() {
        let provider = RemoteProvider::new("https://example.com/").unwrap();
        assert_eq!(
            provider.url(&highlights_path("python")).unwrap().as_str(),
            "https://example.com/treesitter/python/highlights.scm"
        );
    }

    #[rstest]
    #[case::relative("treesitter/")]
    #[case::file_scheme("file:///tmp/")]
    fn test_rejects_bad_base(#[case] base: &str) {
        assert!(matches!(RemoteProvider::new(base), Err(Error::Config(_))));
    }
}
