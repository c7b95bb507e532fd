// ── Core error types ──
//
// One error per component, each wrapping the raw `genie_api::Error`
// (bad status, bad body, transport) plus whatever "the call worked but the
// answer is useless" cases that component can hit. `CoreError` is the
// umbrella the bridge and its hosts deal in.

use thiserror::Error;

use crate::store::StoreError;

/// Failure to obtain an account hash.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("login request failed: {0}")]
    Api(#[from] genie_api::Error),

    #[error("login response did not contain an account hash")]
    MissingAccountHash,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure to resolve the hub identifier.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("hub list request failed: {0}")]
    Api(#[from] genie_api::Error),

    #[error("no hubs registered to this account")]
    NoHubs,

    #[error("first hub list entry has no hub object")]
    MalformedEntry,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure to pull the device state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state request failed: {0}")]
    Api(#[from] genie_api::Error),

    #[error("state response did not contain a hub")]
    MissingHub,

    #[error("hub state is missing attribute '{field}'")]
    MissingAttribute { field: &'static str },
}

/// Failure to apply a write.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("update request failed: {0}")]
    Api(#[from] genie_api::Error),

    /// The write was accepted but the confirming pull failed, so the
    /// snapshot does not reflect it yet.
    #[error("update accepted but state could not be refreshed: {0}")]
    Unconfirmed(#[source] StateError),
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Hub(#[from] HubError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The API-layer error underneath, if this failure came off the wire.
    pub fn api_error(&self) -> Option<&genie_api::Error> {
        match self {
            Self::Session(SessionError::Api(e))
            | Self::Hub(HubError::Api(e))
            | Self::State(StateError::Api(e))
            | Self::Command(
                CommandError::Api(e) | CommandError::Unconfirmed(StateError::Api(e)),
            ) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if the request never reached the API.
    pub fn is_connect(&self) -> bool {
        self.api_error().is_some_and(genie_api::Error::is_connect)
    }

    /// Returns `true` for failures during login.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Session(_))
    }
}
