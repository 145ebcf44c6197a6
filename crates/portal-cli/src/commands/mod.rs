//! Subcommand implementations.

mod delete_account;
mod files;
mod login;
mod logout;
mod magic_link;
mod password_reset;
mod receipt;
mod register;
mod status;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

use portal::ApiClient;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account and log in
    Register(register::RegisterArgs),

    /// Log in with email and password
    Login(login::LoginArgs),

    /// Passwordless login via emailed link
    MagicLink(magic_link::MagicLinkCommand),

    /// Show the logged-in account
    Whoami(whoami::WhoamiArgs),

    /// Forget the stored credential
    Logout(logout::LogoutArgs),

    /// Show whether a credential is stored
    Status(status::StatusArgs),

    /// Reset a forgotten password
    PasswordReset(password_reset::PasswordResetCommand),

    /// Permanently delete the logged-in account
    DeleteAccount(delete_account::DeleteAccountArgs),

    /// File operations
    Files(files::FilesCommand),

    /// Receipt operations
    Receipt(receipt::ReceiptCommand),
}

pub async fn handle(cmd: Command, client: &ApiClient) -> Result<()> {
    match cmd {
        Command::Register(args) => register::run(args, client).await,
        Command::Login(args) => login::run(args, client).await,
        Command::MagicLink(cmd) => magic_link::run(cmd, client).await,
        Command::Whoami(args) => whoami::run(args, client).await,
        Command::Logout(args) => logout::run(args, client),
        Command::Status(args) => status::run(args, client),
        Command::PasswordReset(cmd) => password_reset::run(cmd, client).await,
        Command::DeleteAccount(args) => delete_account::run(args, client).await,
        Command::Files(cmd) => files::run(cmd, client).await,
        Command::Receipt(cmd) => receipt::run(cmd, client).await,
    }
}
