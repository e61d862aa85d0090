use thiserror::Error;

/// Top-level error type for the `hoteldesk-api` crate.
///
/// Splits failures into two families the rest of the workspace cares about:
/// the request never got an answer (`Transport`), or the server answered
/// with a non-success status (`Api`). `hoteldesk-core` maps these into
/// user-facing notices.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, reset, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL cannot have path segments appended
    /// (e.g. `mailto:` or `data:` URLs).
    #[error("Base URL cannot be used for API requests: {0}")]
    InvalidBaseUrl(String),

    /// The underlying `reqwest::Client` could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Server answered with a non-success status. `message` carries the
    /// `{ "error": "..." }` payload when the server sent one.
    #[error("API error (HTTP {status}): {}", message.as_deref().unwrap_or("no error message"))]
    Api {
        status: u16,
        message: Option<String>,
    },
}

impl Error {
    /// Returns `true` if no HTTP response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The HTTP status code, when the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The server-provided error message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
