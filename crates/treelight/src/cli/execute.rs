//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use treelight_render::{Escape, MatchOrder, RenderOptions};

use super::args::{CssArgs, HighlightArgs, LanguagesArgs};
use crate::bundled;
use crate::config::Config;
use crate::output::{self, OutputMode};
use crate::provider::create_provider;
use crate::session::Session;
use crate::theme::Base24Scheme;

/// Execute the highlight command
pub async fn execute_highlight(
    config: &Config,
    args: &HighlightArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let text = read_input(args).await?;
    let options = render_options(config, args);

    let provider = create_provider(&config.source)?;
    tracing::debug!(provider = %provider.describe(), language = %args.language, "Highlighting");

    let mut session: Session = Session::new(provider).with_options(options);
    session
        .set_language(&args.language)
        .await
        .with_context(|| format!("Failed to load language '{}'", args.language))?;
    let mut html = session.highlight(&text)?;

    if args.wrap {
        html = wrap_code_block(&args.language, &html);
    }

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "language": args.language,
                "html": html,
            }))?;
        }
        OutputMode::Text => output::print_markup(&html)?,
    }

    Ok(())
}

/// Execute the languages command
pub async fn execute_languages(
    config: &Config,
    _args: &LanguagesArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let provider = create_provider(&config.source)?;
    let languages = provider
        .languages()
        .await
        .with_context(|| format!("Failed to list languages from {}", provider.describe()))?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "source": provider.describe(),
                "languages": languages,
            }))?;
        }
        OutputMode::Text => {
            if languages.is_empty() {
                println!("No languages available from {}", provider.describe());
            }
            for name in &languages {
                println!("{}", output::format_language(name, bundled::is_bundled(name)));
            }
        }
    }

    Ok(())
}

/// Execute the css command
pub async fn execute_css(config: &Config, args: &CssArgs, output_mode: OutputMode) -> Result<()> {
    let scheme = Base24Scheme::load(&args.scheme)
        .await
        .with_context(|| format!("Failed to load scheme {}", args.scheme.display()))?;
    let class_prefix = args
        .class_prefix
        .as_deref()
        .unwrap_or(&config.render.class_prefix);
    let css = scheme.stylesheet(&args.scope, class_prefix);

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "name": scheme.name,
                "author": scheme.author,
                "variant": scheme.variant,
                "css": css,
            }))?;
        }
        OutputMode::Text => output::print_markup(&css)?,
    }

    Ok(())
}

async fn read_input(args: &HighlightArgs) -> Result<String> {
    match &args.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Merge configured render options with command-line flags.
fn render_options(config: &Config, args: &HighlightArgs) -> RenderOptions {
    let mut options = config.render.options();
    if args.raw {
        options.escape = Escape::Verbatim;
    }
    if args.sort {
        options.order = MatchOrder::Start;
    }
    if let Some(prefix) = &args.class_prefix {
        options.class_prefix.clone_from(prefix);
    }
    options
}

fn wrap_code_block(language: &str, html: &str) -> String {
    format!("<pre><code class=\"language-{language}\">{html}</code></pre>\n")
}
