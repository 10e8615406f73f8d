//! Music Digest - fetch lyrics, music news and charts from the command line.

use clap::Parser;
use music_digest::cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr, so JSON on stdout stays clean)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("music_digest=info".parse()?))
        .init();

    cli::run_command(&args)
}
