//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use portal::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(_args: LogoutArgs, client: &ApiClient) -> Result<()> {
    client.logout().context("Failed to clear credential")?;
    output::success("Logged out");
    Ok(())
}
