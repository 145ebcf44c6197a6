//! Magic-link login commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use portal::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct MagicLinkCommand {
    #[command(subcommand)]
    pub command: MagicLinkSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum MagicLinkSubcommand {
    /// Email a one-time login link
    Request {
        /// Account email
        #[arg(long)]
        email: String,
    },

    /// Log in with the token from the emailed link
    Verify {
        /// Token from the link
        #[arg(long)]
        token: String,
    },
}

pub async fn run(cmd: MagicLinkCommand, client: &ApiClient) -> Result<()> {
    match cmd.command {
        MagicLinkSubcommand::Request { email } => {
            let response = client
                .request_magic_link(&email)
                .await
                .context("Failed to send magic link")?;
            output::success(&response.message);
        }
        MagicLinkSubcommand::Verify { token } => {
            let auth = client
                .verify_magic_link(&token)
                .await
                .context("Failed to verify magic link")?;
            output::success("Logged in successfully");
            println!();
            output::field("Email", &auth.user.email);
        }
    }
    Ok(())
}
