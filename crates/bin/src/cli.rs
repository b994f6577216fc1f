//! CLI argument definitions for the Ideaboard binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ideaboard real-time idea sharing server
#[derive(Parser, Debug)]
#[command(name = "ideaboard")]
#[command(about = "Ideaboard: share ideas, like them, watch them arrive live")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server options, used when no subcommand is given
    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Ideaboard server (the default)
    Serve(ServeArgs),
    /// Check health of a running Ideaboard server
    Health(HealthArgs),
    /// Print the ideas stored in a data directory
    List(ListArgs),
}

/// Location of the persisted idea document
#[derive(clap::Args, Debug, Clone)]
pub struct StoreArgs {
    /// Data directory holding db.json
    #[arg(short = 'D', long, default_value = ".", env = "IDEABOARD_DATA_DIR")]
    pub data_dir: PathBuf,
}

/// Arguments for the serve command
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "IDEABOARD_HOST")]
    pub host: String,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Directory of static assets served at the site root
    #[arg(long, default_value = "public", env = "IDEABOARD_STATIC_DIR")]
    pub static_dir: PathBuf,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Port of the server to check
    #[arg(short, long, default_value_t = 3000, env = "PORT")]
    pub port: u16,

    /// Host of the server to check
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}

/// Arguments for the list command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
