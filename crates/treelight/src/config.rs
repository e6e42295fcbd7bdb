//! Configuration management for treelight.
//!
//! Configuration lives in `treelight.yaml`:
//!
//! ```yaml
//! source:
//!   kind: remote
//!   location: https://example.com/app/
//!   bundled-grammars: false
//! render:
//!   escape: html
//!   order: engine
//!   class-prefix: hl-
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use treelight_render::{Escape, MatchOrder, RenderOptions};

use crate::error::{Error, Result};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "treelight.yaml";

/// Maximum length of a class prefix.
pub const MAX_CLASS_PREFIX_LENGTH: usize = 32;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Where grammars and queries come from.
    pub source: SourceConfig,
    /// How matches are rendered.
    pub render: RenderConfig,
}

/// Artifact source section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourceConfig {
    /// Backend kind.
    pub kind: SourceKind,
    /// Directory path or base URL, required for `directory` and `remote`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Use compiled-in grammars and fetch only the queries.
    pub bundled_grammars: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            location: None,
            bundled_grammars: crate::provider::default_bundled_grammars(),
        }
    }
}

/// Artifact backend kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Grammars and queries compiled into the binary.
    #[default]
    Bundled,
    /// A local directory containing `treesitter/`.
    Directory,
    /// An HTTP(S) base URL serving `treesitter/`.
    Remote,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => write!(f, "bundled"),
            Self::Directory => write!(f, "directory"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Rendering section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderConfig {
    /// Escaping of source text.
    pub escape: EscapeMode,
    /// Match ordering before the overlap pass.
    pub order: OrderMode,
    /// Prefix for class tokens.
    pub class_prefix: String,
}

/// Escaping mode as written in configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Escape HTML special characters.
    #[default]
    Html,
    /// Embed text as-is.
    #[serde(rename = "none")]
    Verbatim,
}

/// Match ordering as written in configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    /// Engine order.
    #[default]
    Engine,
    /// Sorted by start offset.
    Start,
}

impl RenderConfig {
    /// Convert to renderer options.
    #[must_use]
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            escape: match self.escape {
                EscapeMode::Html => Escape::Html,
                EscapeMode::Verbatim => Escape::Verbatim,
            },
            order: match self.order {
                OrderMode::Engine => MatchOrder::Engine,
                OrderMode::Start => MatchOrder::Start,
            },
            class_prefix: self.class_prefix.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Config` if
    /// it is not valid YAML or fails validation.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `treelight.yaml` from `dir` if present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists.
    pub async fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if fs::try_exists(&path).await? {
            Self::load(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.source.kind != SourceKind::Bundled && self.source.location.is_none() {
            return Err(Error::Config(format!(
                "source kind '{}' requires a location",
                self.source.kind
            )));
        }
        validate_class_prefix(&self.render.class_prefix)
    }
}

/// Validate a class prefix.
///
/// Prefixes are at most 32 characters of ASCII letters, digits, `-` or `_`.
///
/// # Errors
///
/// Returns `Error::Config` otherwise.
pub fn validate_class_prefix(prefix: &str) -> Result<()> {
    if prefix.len() > MAX_CLASS_PREFIX_LENGTH {
        return Err(Error::Config(format!(
            "class prefix must be at most {MAX_CLASS_PREFIX_LENGTH} characters"
        )));
    }
    if !prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::Config(format!(
            "class prefix '{prefix}' may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}
