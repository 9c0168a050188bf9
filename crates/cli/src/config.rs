//! Remote store settings for the `shop` binary.
//!
//! Each setting is resolved in order: command-line flag, environment
//! variable, config file, built-in default. Only the base URL has no default.
//!
//! # Example
//!
//! ```toml
//! [store]
//! base_url = "https://my-shop.example.com"
//! user_id = "u1"
//! auth_token = "<token>"
//! ```

use std::path::Path;

use serde::Deserialize;
use shop_remote::{RemoteConfig, DEFAULT_USER_ID};

pub(crate) const ENV_BASE_URL: &str = "SHOP_BASE_URL";
pub(crate) const ENV_USER_ID: &str = "SHOP_USER_ID";
pub(crate) const ENV_AUTH_TOKEN: &str = "SHOP_AUTH_TOKEN";

/// Contents of a config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FileConfig {
    #[serde(default)]
    pub(crate) store: StoreSection,
}

/// `[store]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StoreSection {
    pub(crate) base_url: Option<String>,
    pub(crate) user_id: Option<String>,
    pub(crate) auth_token: Option<String>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub(crate) base_url: Option<String>,
    pub(crate) user_id: Option<String>,
    pub(crate) auth_token: Option<String>,
}

/// Read and parse a config file.
pub(crate) fn read_config_file(path: &Path) -> Result<FileConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// Combine flags, environment (via `env`) and file into a [`RemoteConfig`].
pub(crate) fn resolve(
    overrides: Overrides,
    env: impl Fn(&str) -> Option<String>,
    file: FileConfig,
) -> Result<RemoteConfig, String> {
    let base_url = overrides
        .base_url
        .or_else(|| env(ENV_BASE_URL))
        .or(file.store.base_url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            format!(
                "no remote store configured: pass --base-url, set {}, or add base_url to the config file",
                ENV_BASE_URL
            )
        })?;

    let user_id = overrides
        .user_id
        .or_else(|| env(ENV_USER_ID))
        .or(file.store.user_id)
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

    let auth_token = overrides
        .auth_token
        .or_else(|| env(ENV_AUTH_TOKEN))
        .or(file.store.auth_token);

    let mut config = RemoteConfig::new(base_url).with_user(user_id);
    config.auth_token = auth_token;
    Ok(config)
}
