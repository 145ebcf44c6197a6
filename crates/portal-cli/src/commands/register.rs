//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use portal::{ApiClient, Credentials};

use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: RegisterArgs, client: &ApiClient) -> Result<()> {
    eprintln!("{}", "Registering...".dimmed());

    let auth = client
        .register(&Credentials::new(&args.email, &args.password))
        .await
        .context("Failed to register")?;

    output::success("Account created");
    println!();
    output::field("Email", &auth.user.email);
    output::field("ID", &auth.user.id.to_string());

    Ok(())
}
