//! CLI argument definitions.

use clap::Parser;

use crate::commands::Command;

/// Command-line client for the portal API.
#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(author, version = env!("PORTAL_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL (defaults to $PUBLIC_API_URL, then http://localhost:8000/api)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}
