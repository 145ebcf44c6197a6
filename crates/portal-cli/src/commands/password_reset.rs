//! Password reset commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use portal::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct PasswordResetCommand {
    #[command(subcommand)]
    pub command: PasswordResetSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PasswordResetSubcommand {
    /// Email a password-reset token
    Request {
        /// Account email
        #[arg(long)]
        email: String,
    },

    /// Set a new password with a reset token
    Confirm {
        /// Token from the reset email
        #[arg(long)]
        token: String,

        /// The new password
        #[arg(long)]
        new_password: String,
    },
}

pub async fn run(cmd: PasswordResetCommand, client: &ApiClient) -> Result<()> {
    let response = match cmd.command {
        PasswordResetSubcommand::Request { email } => client
            .request_password_reset(&email)
            .await
            .context("Failed to request password reset")?,
        PasswordResetSubcommand::Confirm {
            token,
            new_password,
        } => client
            .confirm_password_reset(&token, &new_password)
            .await
            .context("Failed to reset password")?,
    };

    output::success(&response.message);
    Ok(())
}
