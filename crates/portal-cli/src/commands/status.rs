//! Status command implementation.

use anyhow::Result;
use clap::Args;

use portal::ApiClient;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, client: &ApiClient) -> Result<()> {
    let state = if client.is_authenticated() {
        "authenticated"
    } else {
        "not authenticated"
    };

    output::field("Status", state);
    output::field("API", &client.config().base_url.to_string());
    output::field("Credential file", &session::credential_path()?.display().to_string());

    Ok(())
}
