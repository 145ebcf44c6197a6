//! Delete account command implementation.
//!
//! On success the stored credential is cleared as well.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use portal::ApiClient;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct DeleteAccountArgs {
    /// Current password, required by the server to confirm deletion
    #[arg(long)]
    pub password: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn run(args: DeleteAccountArgs, client: &ApiClient) -> Result<()> {
    session::require_login(client)?;

    if !args.force {
        eprint!("This will permanently delete your account. Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let response = client
        .delete_account(&args.password)
        .await
        .context("Failed to delete account")?;

    if let Err(e) = client.logout() {
        output::warn(&format!("Account deleted but credential not cleared: {}", e));
    }

    output::success(&response.message);
    Ok(())
}
