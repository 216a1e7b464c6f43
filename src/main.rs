use anyhow::Result;
use clap::Parser;
use landgraph::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries JSON, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.execute()
}
