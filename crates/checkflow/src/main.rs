//! Checkflow CLI binary.

use anyhow::Result;
use checkflow::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the checkflow CLI.
///
/// Every command is a short sequence of file reads and writes, so a
/// current-thread runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=checkflow=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("checkflow=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting checkflow CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Checkflow CLI completed successfully");
    Ok(())
}
