//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use hoteldesk_config::ConfigError;
use hoteldesk_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Network error: {message}")]
    #[diagnostic(
        code(hoteldesk::network),
        help(
            "Check that the API is running and reachable.\n\
             Try: hoteldesk status"
        )
    )]
    Network { message: String },

    #[error("{status} from {url}")]
    #[diagnostic(
        code(hoteldesk::api_unavailable),
        help("Set a different API with: hoteldesk config set-url <URL>")
    )]
    ApiUnavailable { url: String, status: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Error: {message}")]
    #[diagnostic(code(hoteldesk::api_error))]
    Api { status: u16, message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(hoteldesk::not_found),
        help("Run: hoteldesk {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(hoteldesk::invalid_input))]
    InvalidInput { message: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hoteldesk::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(hoteldesk::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: hoteldesk config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(hoteldesk::config),
        help("Inspect the file with: hoteldesk config show")
    )]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(hoteldesk::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Internal error: {0}")]
    #[diagnostic(code(hoteldesk::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Network { .. } | Self::ApiUnavailable { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } | Self::Api { status: 404, .. } => exit_code::NOT_FOUND,
            Self::InvalidInput { .. }
            | Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Like `From<CoreError>`, but uses `fallback` when the server gave no
    /// message of its own.
    pub fn from_core(err: CoreError, fallback: &str) -> Self {
        match err {
            CoreError::ApiFailure { status, message } => Self::Api {
                status,
                message: message.unwrap_or_else(|| fallback.to_owned()),
            },
            other => other.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NetworkFailure { message } => CliError::Network { message },
            CoreError::ApiFailure { status, message } => CliError::Api {
                status,
                message: message.unwrap_or_else(|| format!("request failed with HTTP {status}")),
            },
            CoreError::ValidationFailure(e) => CliError::InvalidInput {
                message: e.to_string(),
            },
            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
