//! CLI configuration — thin wrapper around `backdesk_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --token, etc.).

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use backdesk_api::ShopClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use backdesk_config::{
    Config, Profile, config_path, load_config_or_default, resolve_token, save_config, store_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build an authenticated `ShopClient` from the config file, the active
/// profile, and CLI flag overrides. Flags win over profile values.
pub fn build_client(global: &GlobalOpts) -> Result<Arc<ShopClient>, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    // 1. Base URL (flag > profile)
    let url_str = match (global.api_url.as_deref(), profile) {
        (Some(flag), _) => flag,
        (None, Some(p)) => p.api_url.as_str(),
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "api-url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. Token (flag > credential chain)
    let token = match global.token.as_deref() {
        Some(flag) => SecretString::from(flag.to_owned()),
        None => {
            let p = profile.ok_or_else(|| CliError::NoToken {
                profile: profile_name.clone(),
            })?;
            resolve_token(p, &profile_name).map_err(|_| CliError::NoToken {
                profile: profile_name.clone(),
            })?
        }
    };

    // 3. Timeout (flag > profile > defaults)
    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(cfg.defaults.timeout);

    let client = ShopClient::with_timeout(url, token, Duration::from_secs(timeout))
        .map_err(|e| CliError::Network {
            message: e.to_string(),
        })?;
    tracing::debug!(profile = %profile_name, url = %client.base_url(), "api client ready");
    Ok(Arc::new(client))
}
