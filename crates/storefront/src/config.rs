//! CLI configuration: thin wrapper around `storefront_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --timeout, --insecure).

use storefront_core::StoreConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use storefront_config::{
    Config, Profile, config_path, credentials_path, load_config_or_default,
    profile_to_store_config, save_config,
};

/// A profile after flag overrides, ready to build a `Storefront`.
#[derive(Debug)]
pub struct Resolved {
    pub profile_name: String,
    pub profile: Profile,
    pub store: StoreConfig,
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate the active profile + global flags into a `StoreConfig`.
///
/// Flag values take priority over profile values, which take priority
/// over `[defaults]`. Without a profile, `--api-url` alone is enough.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = config
        .profiles
        .get(&profile_name)
        .cloned()
        .unwrap_or_default();

    // Flags (and their env vars) override the profile
    let mut effective = profile.clone();
    if let Some(url) = global.api_url.as_deref().filter(|u| !u.is_empty()) {
        effective.api_url = url.to_owned();
    }
    if effective.api_url.is_empty() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }
    if global.timeout.is_some() {
        effective.timeout = global.timeout;
    }
    if global.insecure {
        effective.insecure = Some(true);
    }

    let store = profile_to_store_config(&effective, &config.defaults)?;

    Ok(Resolved {
        profile_name,
        profile,
        store,
    })
}
