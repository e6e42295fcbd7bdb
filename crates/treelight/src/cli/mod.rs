//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `highlight`: Render a file (or stdin) as class-tagged HTML
//! - `languages`: List the languages the configured source provides
//! - `css`: Generate a stylesheet from a Base16/Base24 scheme
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format
//! - `--config`: Configuration file (default: `./treelight.yaml` if present)
//! - `--source-dir` / `--base-url`: Override the configured artifact source
//!
//! # Example
//!
//! ```bash
//! treelight highlight src/main.rs --language rust --wrap
//! treelight --base-url https://example.com/app/ highlight -l python script.py
//! treelight css schemes/ocean.yaml --scope .snippet
//! ```

mod args;
mod execute;
mod validators;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{CssArgs, HighlightArgs, LanguagesArgs};
pub use validators::{validate_base_url, validate_class_prefix, validate_language, validate_scope};

use crate::config::{Config, SourceKind};
use crate::output::OutputMode;

/// Treelight - tree-sitter syntax highlighting for code snippets
///
/// Parses source text with a tree-sitter grammar, runs the grammar's
/// highlight query and wraps every capture in a `<span class="...">`.
#[derive(Parser, Debug)]
#[command(name = "treelight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: ./treelight.yaml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Load artifacts from a directory containing `treesitter/`
    #[arg(long, global = true, conflicts_with = "base_url")]
    pub source_dir: Option<PathBuf>,

    /// Fetch artifacts relative to this base URL
    #[arg(long, global = true, value_parser = validate_base_url)]
    pub base_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Highlight a file or stdin
    ///
    /// Writes the source with every highlight capture wrapped in a
    /// `<span class="...">` element. Text is HTML-escaped unless `--raw`.
    Highlight(HighlightArgs),

    /// List available languages
    ///
    /// Shows the languages the configured source can load.
    Languages(LanguagesArgs),

    /// Generate a stylesheet from a color scheme
    ///
    /// Maps highlight classes to the scheme's palette following the Base16
    /// styling guide.
    Css(CssArgs),
}

impl Cli {
    /// Parse arguments from the process command line.
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse arguments from an iterator, for tests.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Run the selected command.
    ///
    /// # Errors
    ///
    /// Returns any configuration, provider, session or IO error.
    pub async fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Highlight(args)) => {
                let config = self.resolve_config().await?;
                execute::execute_highlight(&config, args, output_mode).await
            }
            Some(Commands::Languages(args)) => {
                let config = self.resolve_config().await?;
                execute::execute_languages(&config, args, output_mode).await
            }
            Some(Commands::Css(args)) => {
                let config = self.resolve_config().await?;
                execute::execute_css(&config, args, output_mode).await
            }
            None => {
                println!("Treelight syntax highlighter");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }

    /// Load configuration and apply the global source overrides.
    async fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).await?,
            None => Config::discover(&std::env::current_dir()?).await?,
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.source_dir {
            config.source.kind = SourceKind::Directory;
            config.source.location = Some(dir.display().to_string());
        }
        if let Some(url) = &self.base_url {
            config.source.kind = SourceKind::Remote;
            config.source.location = Some(url.clone());
        }
    }
}
