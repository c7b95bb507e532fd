//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use genie_config::ConfigError;
use genie_core::{ApiError, CommandError, CoreError, HubError, SessionError, StateError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the Rituals API")]
    #[diagnostic(
        code(genie::connection_failed),
        help("Check your network connection, or the --base-url override if set.")
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(genie::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Login failed: {reason}")]
    #[diagnostic(
        code(genie::auth_failed),
        help(
            "Verify the email and password for your Rituals account.\n\
             Run: genie config init"
        )
    )]
    AuthFailed { reason: String },

    #[error("No {what} configured")]
    #[diagnostic(
        code(genie::no_credentials),
        help(
            "Configure credentials with: genie config init\n\
             Or set GENIE_EMAIL and GENIE_PASSWORD."
        )
    )]
    NoCredentials { what: String },

    // ── Device ───────────────────────────────────────────────────────

    #[error("No diffuser found on this account")]
    #[diagnostic(
        code(genie::no_hubs),
        help("Register the diffuser with the Rituals app first.")
    )]
    NoHubs,

    #[error("The fan is off; speed was not changed")]
    #[diagnostic(code(genie::fan_off), help("Turn it on first with: genie on"))]
    FanOff,

    #[error("Update accepted, but the new state could not be read back")]
    #[diagnostic(
        code(genie::unconfirmed),
        help("Run: genie status to check the current state")
    )]
    Unconfirmed {
        #[source]
        source: StateError,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(genie::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(genie::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(genie::config))]
    Config(ConfigError),

    #[error(transparent)]
    #[diagnostic(
        code(genie::storage),
        help("Check permissions on the storage directory, or pass --ephemeral.")
    )]
    Storage(#[from] genie_core::StoreError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {message}")]
    #[diagnostic(code(genie::render))]
    Render { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoEmail => CliError::NoCredentials {
                what: "email".into(),
            },
            ConfigError::NoPassword { email } => CliError::NoCredentials {
                what: format!("password for '{email}'"),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        if err.api_error().is_some_and(ApiError::is_timeout) {
            return CliError::Timeout;
        }

        match err {
            CoreError::Session(SessionError::Api(source))
            | CoreError::Hub(HubError::Api(source))
            | CoreError::State(StateError::Api(source))
            | CoreError::Command(CommandError::Api(source))
                if source.is_connect() =>
            {
                CliError::ConnectionFailed { source }
            }

            CoreError::Session(SessionError::Store(e)) | CoreError::Hub(HubError::Store(e)) => {
                CliError::Storage(e)
            }
            CoreError::Session(e) => CliError::AuthFailed {
                reason: e.to_string(),
            },

            CoreError::Hub(HubError::NoHubs) => CliError::NoHubs,

            CoreError::Command(CommandError::Unconfirmed(source)) => {
                CliError::Unconfirmed { source }
            }

            CoreError::Store(e) => CliError::Storage(e),

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            other => CliError::ApiError {
                message: other.to_string(),
            },
        }
    }
}

impl From<StateError> for CliError {
    fn from(err: StateError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CoreError::from(err).into()
    }
}
