//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use backdesk_config::ConfigError;
use backdesk_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the API: {message}")]
    #[diagnostic(
        code(backdesk::network),
        help(
            "Check that the API is running and the base URL is correct.\n\
             Increase --timeout if the server is slow."
        )
    )]
    Network { message: String },

    // ── Authentication / configuration ───────────────────────────────

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(backdesk::no_token),
        help(
            "Store one with: backdesk config set-token --profile {profile}\n\
             Or set the BACKDESK_TOKEN environment variable."
        )
    )]
    NoToken { profile: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(backdesk::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: backdesk config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(backdesk::no_config),
        help(
            "Create one with: backdesk config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(backdesk::config))]
    Config(#[from] ConfigError),

    // ── Remote ───────────────────────────────────────────────────────

    #[error("The server rejected the request: {message}")]
    #[diagnostic(code(backdesk::rejected))]
    Rejected { message: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(help("Run: backdesk {list_command} to see available {resource_type}s"))]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(backdesk::validation))]
    Validation { field: String, reason: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Network { .. } => exit_code::CONNECTION,
            Self::NoToken { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Remote { message } => CliError::Rejected { message },

            CoreError::Network { message } => CliError::Network { message },

            CoreError::Busy { operation } => CliError::Rejected {
                message: format!("a {operation} request is already in flight"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_distinguish_failure_classes() {
        let rejected = CliError::from(CoreError::Remote {
            message: "nope".into(),
        });
        assert_eq!(rejected.exit_code(), exit_code::REJECTED);

        let network = CliError::from(CoreError::Network {
            message: "refused".into(),
        });
        assert_eq!(network.exit_code(), exit_code::CONNECTION);

        let validation = CliError::from(CoreError::Validation {
            message: "blank".into(),
        });
        assert_eq!(validation.exit_code(), exit_code::USAGE);
    }
}
