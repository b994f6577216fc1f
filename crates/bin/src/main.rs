//! Ideaboard binary: serves the board over HTTP and WebSocket.

mod cli;
mod output;

mod commands {
    pub mod health;
    pub mod list;
    pub mod serve;
}

use clap::Parser;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        None => commands::serve::run(&cli.serve).await,
        Some(Commands::Serve(args)) => commands::serve::run(&args).await,
        Some(Commands::Health(args)) => commands::health::run(&args).await,
        Some(Commands::List(args)) => commands::list::run(&args).await,
    }
}
