mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "buildstamp=error"
    } else if cli.verbose {
        "buildstamp=debug"
    } else {
        "buildstamp=info"
    };

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Init { force } => commands::init::run(force),
        Commands::Fingerprint { selection, format } => commands::fingerprint::run(selection, format),
        Commands::Check {
            target,
            selection,
            update,
            strict,
            cache_dir,
        } => commands::check::run(target, selection, update, strict, cache_dir),
        Commands::Layout { options } => commands::layout::run(options),
        Commands::Clean { cache_dir, target } => commands::clean::run(cache_dir, target),
    }
}
