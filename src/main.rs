//! CLI entry point for the scatter gallery layout tool

use clap::Parser;
use gallery_scatter::io::cli::{Cli, GalleryProcessor};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> gallery_scatter::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.quiet { "error" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut processor = GalleryProcessor::new(cli);
    processor.process().await.map(|_| ())
}
