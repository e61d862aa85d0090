//! CLI configuration: thin wrapper around `hoteldesk_config` that applies
//! `GlobalOpts` flag overrides (--api-url, --timeout, --output).

use clap::ValueEnum;

use hoteldesk_core::ClientConfig;

use crate::cli::{ColorMode, GlobalOpts};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use hoteldesk_config::{
    Config, ConfigError, DEFAULT_PROFILE, Profile, config_path, load_config_or_default,
    save_config, validate_api_url,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Fill unset output/color flags from `[defaults]`. Unknown values in the
/// file are ignored.
pub fn apply_defaults(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = ValueEnum::from_str(&config.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ValueEnum::from_str(&config.defaults.color, true).ok();
    }
}

pub fn color_mode(global: &GlobalOpts) -> ColorMode {
    global.color.unwrap_or(ColorMode::Auto)
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config
        .active_profile_name(global.profile.as_deref())
        .to_owned()
}

/// Build the runtime client config. Flags take priority over profile
/// values.
pub fn resolve_client_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ClientConfig, CliError> {
    let (_, profile) = config
        .profile(global.profile.as_deref())
        .map_err(|e| match e {
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: available_profiles(config),
            },
            other => other.into(),
        })?;

    let url = validate_api_url(global.api_url.as_deref().unwrap_or(&profile.api_url))?;
    let timeout = global
        .timeout
        .unwrap_or_else(|| config.timeout_for(&profile));

    Ok(ClientConfig::new(url).with_timeout_secs(timeout))
}

pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
