//! Catalog failure kinds.

use thiserror::Error;

/// Failure of a single catalog request.
///
/// Callers that only need a display message can treat both kinds alike.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The request never produced an HTTP response (connectivity, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),
    /// TMDB answered with a non-2xx status or a body that could not be decoded.
    #[error("TMDB API error{}: {message}", status_suffix(.status))]
    Upstream {
        /// HTTP status code, if the failure came from a response status.
        status: Option<u16>,
        /// Error detail, taken from the TMDB error body when available.
        message: String,
    },
}

/// Renders the optional ` (HTTP nnn)` part of an upstream error.
#[allow(clippy::ref_option)]
fn status_suffix(status: &Option<u16>) -> String {
    status.map_or_else(String::new, |s| format!(" (HTTP {s})"))
}

impl CatalogError {
    /// Builds an upstream error from an HTTP status and message.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a rate-limit rejection (HTTP 429).
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Upstream { status: Some(429), .. })
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::upstream(status.as_u16(), err.to_string());
        }
        if err.is_decode() {
            return Self::Upstream {
                status: None,
                message: err.to_string(),
            };
        }
        Self::Network(err.to_string())
    }
}
