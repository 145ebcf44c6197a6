//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use portal::{ApiClient, Credentials};

use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, client: &ApiClient) -> Result<()> {
    eprintln!("{}", "Logging in...".dimmed());

    let auth = client
        .login(&Credentials::new(&args.email, &args.password))
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Email", &auth.user.email);
    output::field("API", &client.config().base_url.to_string());

    Ok(())
}
