mod api;
mod cli;
mod config;
mod error;
mod model;
mod query;
mod stats;
mod store;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Bare `taskdeck` serves with config-file defaults
    let command = cli.command.unwrap_or(Commands::Serve {
        port: None,
        host: None,
        demo: false,
    });

    match command {
        Commands::Serve { port, host, demo } => {
            tokio::runtime::Runtime::new()
                .expect("Failed to create tokio runtime")
                .block_on(async {
                    cli::serve::execute(port, host, demo).await;
                });
        }
    }
}
