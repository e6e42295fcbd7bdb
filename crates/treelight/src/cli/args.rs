//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use std::path::PathBuf;

use clap::Parser;

use super::validators::{validate_class_prefix, validate_language, validate_scope};
use crate::theme::DEFAULT_SCOPE;

/// Arguments for the `highlight` command
#[derive(Parser, Debug, Clone)]
pub struct HighlightArgs {
    /// File to highlight (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Language to parse the input as (e.g. "rust", "python")
    #[arg(short, long, value_parser = validate_language)]
    pub language: String,

    /// Embed source text without HTML escaping
    ///
    /// Only use this with trusted input.
    #[arg(long)]
    pub raw: bool,

    /// Sort matches by start offset before resolving overlaps
    #[arg(long)]
    pub sort: bool,

    /// Prefix prepended to every class token (e.g. "hl-")
    #[arg(long, value_parser = validate_class_prefix)]
    pub class_prefix: Option<String>,

    /// Wrap the output in `<pre><code class="language-NAME">`
    #[arg(short, long)]
    pub wrap: bool,
}

/// Arguments for the `languages` command
#[derive(Parser, Debug, Clone)]
pub struct LanguagesArgs {}

/// Arguments for the `css` command
#[derive(Parser, Debug, Clone)]
pub struct CssArgs {
    /// Base16/Base24 scheme file (YAML)
    pub scheme: PathBuf,

    /// Selector the rules are scoped to
    #[arg(short, long, default_value = DEFAULT_SCOPE, value_parser = validate_scope)]
    pub scope: String,

    /// Class prefix used when rendering (defaults to the configured prefix)
    #[arg(long, value_parser = validate_class_prefix)]
    pub class_prefix: Option<String>,
}
