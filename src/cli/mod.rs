//! CLI module

pub mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version)]
#[command(about = "In-memory task-tracking REST API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind (overrides the config file)
        #[arg(long)]
        host: Option<String>,
        /// Seed the store with demo tasks
        #[arg(long)]
        demo: bool,
    },
}
