//! Shared configuration for the hoteldesk CLI and TUI.
//!
//! TOML profiles with environment overrides, and translation to
//! `hoteldesk_core::ClientConfig`. Both binaries depend on this crate; the
//! CLI layers its global flags on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hoteldesk_core::{ClientConfig, DEFAULT_API_URL};

/// Profile used when neither the file nor the caller names one.
pub const DEFAULT_PROFILE: &str = "default";

/// Prefix for environment overrides (`HOTELDESK_DEFAULTS__TIMEOUT=10`).
pub const ENV_PREFIX: &str = "HOTELDESK_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named API profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// CLI output format: table, json, json-compact, yaml, plain.
    #[serde(default = "default_output")]
    pub output: String,

    /// auto, always, never.
    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout in seconds; 0 waits indefinitely.
    #[serde(default)]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: 0,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// A named API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// API root, e.g. "https://management-hotel.onrender.com".
    pub api_url: String,

    /// Overrides `defaults.timeout`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            timeout: None,
        }
    }
}

impl Profile {
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        validate_api_url(api_url)?;
        Ok(Self {
            api_url: api_url.trim().to_owned(),
            timeout: None,
        })
    }
}

/// Reject anything that isn't an absolute http(s) URL.
pub fn validate_api_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url = url::Url::parse(raw.trim()).map_err(|e| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("{e}: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("expected http or https, got '{}'", url.scheme()),
        });
    }
    Ok(url)
}

// ── Profile resolution ──────────────────────────────────────────────

impl Config {
    /// Name of the profile to use: explicit, else `default_profile`, else
    /// "default".
    pub fn active_profile_name<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
    }

    /// Look up a profile by name.
    ///
    /// An unnamed or implicit "default" profile that isn't in the file falls
    /// back to the built-in API URL; an explicitly named missing profile is
    /// an error.
    pub fn profile(&self, explicit: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let name = self.active_profile_name(explicit);
        match self.profiles.get(name) {
            Some(profile) => Ok((name.to_owned(), profile.clone())),
            None if explicit.is_none() || name == DEFAULT_PROFILE => {
                Ok((name.to_owned(), Profile::default()))
            }
            None => Err(ConfigError::UnknownProfile { name: name.into() }),
        }
    }

    /// Effective timeout for `profile`, in seconds.
    pub fn timeout_for(&self, profile: &Profile) -> u64 {
        profile.timeout.unwrap_or(self.defaults.timeout)
    }

    /// Build the runtime config for a profile, no flag overrides.
    pub fn client_config(&self, explicit: Option<&str>) -> Result<ClientConfig, ConfigError> {
        let (_, profile) = self.profile(explicit)?;
        let url = validate_api_url(&profile.api_url)?;
        Ok(ClientConfig::new(url).with_timeout_secs(self.timeout_for(&profile)))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "hoteldesk", "hoteldesk").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".config").join("hoteldesk")
}

/// Directory for TUI log files.
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "hoteldesk", "hoteldesk").map_or_else(
        || dirs_fallback().join("logs"),
        |dirs| dirs.data_local_dir().join("logs"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit path + environment. A missing file is not an
/// error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
