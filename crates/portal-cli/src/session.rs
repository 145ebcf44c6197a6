//! Client construction and credential location.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use tracing::debug;

use portal::{ApiClient, ApiUrl, ClientConfig, FileStore};

/// Path of the persisted credential file.
pub fn credential_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "portal").context("Could not determine data directory")?;

    Ok(dirs.data_dir().join("credentials.json"))
}

/// Build the client: `--api-url` wins over the environment.
pub fn client(api_url: Option<&str>) -> Result<ApiClient> {
    let config = match api_url {
        Some(url) => ClientConfig::new(ApiUrl::new(url).context("Invalid --api-url")?),
        None => ClientConfig::from_env().context("Invalid PUBLIC_API_URL")?,
    };

    let path = credential_path()?;
    debug!(path = %path.display(), api_url = %config.base_url, "Building client");

    let store = Arc::new(FileStore::new(path));
    ApiClient::new(config, store).context("Failed to create API client")
}

/// Refuse to continue without a stored credential.
pub fn require_login(client: &ApiClient) -> Result<()> {
    if !client.is_authenticated() {
        bail!("Not logged in. Run 'portal login' first.");
    }
    Ok(())
}
