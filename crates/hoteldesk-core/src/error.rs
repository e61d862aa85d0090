// ── Core error types ──
//
// User-facing errors from hoteldesk-core. The `From<hoteldesk_api::Error>`
// impl folds transport-layer errors into the three families the UI reports:
// network failures, API rejections, and local validation failures.

use thiserror::Error;

/// A booking or form input that was rejected before any request was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Check-out date must be after check-in date")]
    CheckOutNotAfterCheckIn,

    #[error("Number of guests exceeds room capacity (max: {max})")]
    CapacityExceeded { max: u32 },

    #[error("Please select a guest")]
    MissingGuest,

    #[error("Please select a room")]
    MissingRoom,

    #[error("Number of guests must be at least 1")]
    NoGuests,

    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be a valid number")]
    InvalidNumber { field: &'static str },

    #[error("{field} must be a date in YYYY-MM-DD format")]
    InvalidDate { field: &'static str },
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote errors ────────────────────────────────────────────────
    /// No response arrived (connection refused, DNS, timeout, reset).
    #[error("Network error: {message}")]
    NetworkFailure { message: String },

    /// The server answered with a non-success status.
    #[error("API error (HTTP {status}): {}", message.as_deref().unwrap_or("no error message"))]
    ApiFailure {
        status: u16,
        message: Option<String>,
    },

    // ── Local errors ─────────────────────────────────────────────────
    #[error(transparent)]
    ValidationFailure(#[from] ValidationError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The transient notice shown to the user for this failure.
    ///
    /// `fallback` is used when the server rejected the request without an
    /// error message of its own (e.g. "Failed to save room").
    pub fn notice(&self, fallback: &str) -> String {
        match self {
            Self::NetworkFailure { message } => format!("Network error: {message}"),
            Self::ApiFailure { message, .. } => {
                format!("Error: {}", message.as_deref().unwrap_or(fallback))
            }
            Self::ValidationFailure(e) => e.to_string(),
            Self::Config { .. } => self.to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. })
    }

    /// HTTP status of an API rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hoteldesk_api::Error> for CoreError {
    fn from(err: hoteldesk_api::Error) -> Self {
        match err {
            hoteldesk_api::Error::Transport(e) => CoreError::NetworkFailure {
                message: if e.is_timeout() {
                    "request timed out".into()
                } else {
                    e.to_string()
                },
            },
            hoteldesk_api::Error::Api { status, message } => {
                CoreError::ApiFailure { status, message }
            }
            hoteldesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            hoteldesk_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("API URL cannot be used: {url}"),
            },
            hoteldesk_api::Error::ClientBuild(message) => CoreError::Config { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_notice_prefers_server_message() {
        let err = CoreError::ApiFailure {
            status: 400,
            message: Some("Room already exists".into()),
        };
        assert_eq!(err.notice("Failed to save room"), "Error: Room already exists");
    }

    #[test]
    fn api_notice_falls_back_to_generic() {
        let err = CoreError::ApiFailure {
            status: 500,
            message: None,
        };
        assert_eq!(err.notice("Failed to delete guest"), "Error: Failed to delete guest");
    }

    #[test]
    fn network_notice() {
        let err = CoreError::NetworkFailure {
            message: "connection refused".into(),
        };
        assert_eq!(err.notice("unused"), "Network error: connection refused");
        assert!(err.is_network());
    }

    #[test]
    fn validation_notice_is_the_message() {
        let err = CoreError::from(ValidationError::CapacityExceeded { max: 2 });
        assert_eq!(
            err.notice("Failed to create booking"),
            "Number of guests exceeds room capacity (max: 2)"
        );
    }

    #[test]
    fn api_error_maps_to_api_failure() {
        let err = CoreError::from(hoteldesk_api::Error::Api {
            status: 404,
            message: None,
        });
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn client_setup_errors_map_to_config() {
        let err = CoreError::from(hoteldesk_api::Error::InvalidBaseUrl("mailto:desk".into()));
        assert!(matches!(err, CoreError::Config { .. }));
        assert_eq!(
            err.notice("unused"),
            "Configuration error: API URL cannot be used: mailto:desk"
        );
        assert_eq!(err.status(), None);
        assert!(!err.is_network());
    }
}
