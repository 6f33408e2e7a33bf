use thiserror::Error;

/// User-facing error taxonomy for controller operations.
///
/// Three-way split mirrors what the notification sink shows: local
/// validation, server rejection, transport failure. `Busy` is the
/// duplicate-submission guard; it never reaches the network.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input rejected before any network call was made.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// The server was reachable and rejected the request.
    /// Carries the server-provided message when there was one.
    #[error("{message}")]
    Remote { message: String },

    /// The request could not complete (unreachable, timeout, garbage body).
    #[error("network error: {message}")]
    Network { message: String },

    /// Another mutation is still in flight on this collection.
    #[error("a {operation} request is already in flight")]
    Busy { operation: &'static str },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<backdesk_api::Error> for CoreError {
    fn from(err: backdesk_api::Error) -> Self {
        use backdesk_api::Error as Api;
        match err {
            Api::Authentication { message } => Self::Remote { message },
            api @ Api::Api { .. } => Self::Remote {
                message: api
                    .server_message()
                    .unwrap_or("request rejected by the server")
                    .to_owned(),
            },
            Api::Transport(e) => Self::Network {
                message: e.to_string(),
            },
            other @ (Api::Timeout { .. } | Api::InvalidUrl(_) | Api::Deserialization { .. }) => {
                Self::Network {
                    message: other.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_rejection_folds_to_remote_with_message() {
        let api = backdesk_api::Error::Api {
            message: "name already exists".into(),
            status: Some(422),
        };
        match CoreError::from(api) {
            CoreError::Remote { message } => assert_eq!(message, "name already exists"),
            other => panic!("expected Remote, got: {other:?}"),
        }
    }

    #[test]
    fn blank_server_message_folds_to_a_generic_remote_message() {
        let api = backdesk_api::Error::Api {
            message: String::new(),
            status: Some(500),
        };
        match CoreError::from(api) {
            CoreError::Remote { message } => {
                assert_eq!(message, "request rejected by the server");
            }
            other => panic!("expected Remote, got: {other:?}"),
        }
    }

    #[test]
    fn timeout_folds_to_network() {
        let api = backdesk_api::Error::Timeout { timeout_secs: 15 };
        assert!(matches!(CoreError::from(api), CoreError::Network { .. }));
    }
}
