//! Endpoint paths and request bodies.

use serde::Serialize;

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const REGISTER: &str = "/auth/register";

pub const LOGIN: &str = "/auth/login";

pub const MAGIC_LINK_REQUEST: &str = "/auth/magic-link/request";

pub const MAGIC_LINK_VERIFY: &str = "/auth/magic-link/verify";

pub const CURRENT_USER: &str = "/auth/me";

pub const PASSWORD_RESET_REQUEST: &str = "/auth/password-reset/request";

pub const PASSWORD_RESET_CONFIRM: &str = "/auth/password-reset/confirm";

pub const DELETE_ACCOUNT: &str = "/auth/account/delete";

pub const FILES: &str = "/files";

pub const RECEIPTS: &str = "/receipts";

// ============================================================================
// Request Bodies
// ============================================================================

/// Body for register and login.
#[derive(Debug, Serialize)]
pub struct PasswordAuthRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body for magic-link and password-reset requests.
#[derive(Debug, Serialize)]
pub struct EmailRequest<'a> {
    pub email: &'a str,
}

/// Body for magic-link verification.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub token: &'a str,
}

/// Body for password-reset confirmation.
#[derive(Debug, Serialize)]
pub struct PasswordResetConfirmRequest<'a> {
    pub token: &'a str,
    pub new_password: &'a str,
}

/// Body for account deletion.
#[derive(Debug, Serialize)]
pub struct DeleteAccountRequest<'a> {
    pub password: &'a str,
}

/// Error body shape. Every field is optional.
#[derive(Debug, serde::Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
