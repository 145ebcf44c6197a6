//! File commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use portal::ApiClient;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct FilesCommand {
    #[command(subcommand)]
    pub command: FilesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FilesSubcommand {
    /// List files
    List,

    /// Fetch a single file
    Get {
        /// File ID
        id: String,
    },

    /// Create a file
    Create {
        /// File fields as a JSON object
        #[arg(long)]
        data: String,
    },
}

pub async fn run(cmd: FilesCommand, client: &ApiClient) -> Result<()> {
    session::require_login(client)?;

    let value: Value = match cmd.command {
        FilesSubcommand::List => client.files().await.context("Failed to list files")?,
        FilesSubcommand::Get { id } => client.file(&id).await.context("Failed to get file")?,
        FilesSubcommand::Create { data } => {
            let data: Value = serde_json::from_str(&data).context("--data is not valid JSON")?;
            client
                .create_file(&data)
                .await
                .context("Failed to create file")?
        }
    };

    output::json_pretty(&value)
}
