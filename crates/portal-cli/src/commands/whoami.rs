//! Whoami command implementation.
//!
//! A rejected credential (HTTP 401) is cleared so the next command starts
//! from a clean, logged-out state.

use anyhow::{Context, Result, bail};
use clap::Args;

use portal::{ApiClient, User};

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the raw account record as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, client: &ApiClient) -> Result<()> {
    session::require_login(client)?;

    let user = match client.current_user().await {
        Ok(user) => user,
        Err(e) if e.is_unauthorized() => {
            client.logout().context("Failed to clear credential")?;
            bail!("Session expired ({}). Run 'portal login' again.", e);
        }
        Err(e) => return Err(e).context("Failed to load account"),
    };

    if args.json {
        return output::json_pretty(&user);
    }

    print_user(&user);
    Ok(())
}

fn print_user(user: &User) {
    let joined = user
        .joined_at()
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| user.date_joined.clone());

    output::field("Email", &user.email);
    output::field("ID", &user.id.to_string());
    output::field("Member since", &joined);
    output::field("Status", if user.is_active { "Active" } else { "Inactive" });
}
