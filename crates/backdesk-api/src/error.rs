use thiserror::Error;

/// Top-level error type for the `backdesk-api` crate.
///
/// Covers every failure mode at the HTTP boundary: authentication,
/// transport, server rejections, and malformed payloads. `backdesk-core`
/// folds these into its user-facing taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Bearer token rejected by the server (HTTP 401).
    #[error("authentication rejected: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request exceeded the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Server ──────────────────────────────────────────────────────
    /// The server rejected the request (non-2xx or `success: false`).
    /// Carries the server-provided message when the response had one.
    #[error("API error: {message}")]
    Api { message: String, status: Option<u16> },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body did not match the expected envelope shape.
    #[error("deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// The server-provided rejection message, if there was one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_are_transient_server_rejections_are_not() {
        assert!(Error::Timeout { timeout_secs: 5 }.is_transient());
        let rejected = Error::Api {
            message: "duplicate name".into(),
            status: Some(422),
        };
        assert!(!rejected.is_transient());
    }

    #[test]
    fn server_message_is_exposed_only_when_present() {
        let rejected = Error::Api {
            message: "duplicate name".into(),
            status: Some(409),
        };
        assert_eq!(rejected.server_message(), Some("duplicate name"));

        let blank = Error::Api {
            message: String::new(),
            status: Some(500),
        };
        assert_eq!(blank.server_message(), None);
    }
}
