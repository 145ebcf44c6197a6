//! Receipt commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use portal::ApiClient;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ReceiptCommand {
    #[command(subcommand)]
    pub command: ReceiptSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ReceiptSubcommand {
    /// Fetch a single receipt
    Get {
        /// Receipt ID
        id: String,
    },
}

pub async fn run(cmd: ReceiptCommand, client: &ApiClient) -> Result<()> {
    session::require_login(client)?;

    let value: Value = match cmd.command {
        ReceiptSubcommand::Get { id } => client
            .receipt(&id)
            .await
            .context("Failed to get receipt")?,
    };

    output::json_pretty(&value)
}
