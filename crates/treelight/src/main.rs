//! Treelight CLI binary.

use anyhow::Result;
use treelight::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the treelight CLI.
///
/// Logs go to stderr so stdout carries only the rendered output.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Example: RUST_LOG=treelight=debug,treelight_render=trace treelight highlight ...
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("treelight=info,treelight_render=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting treelight CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Treelight CLI completed successfully");
    Ok(())
}
