// ── Session bootstrap ──
//
// The account hash is the session token. It is restored from the store
// when present and only fetched from the login endpoint when it is not.
// Once held it never changes for the life of the process.

use std::fmt;
use std::sync::Arc;

use genie_api::GenieClient;
use secrecy::SecretString;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::error::SessionError;
use crate::store::{ACCOUNT_HASH_KEY, CredentialStore};

/// An authenticated account, identified by its account hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    account_hash: String,
}

impl Session {
    pub fn new(account_hash: impl Into<String>) -> Self {
        Self {
            account_hash: account_hash.into(),
        }
    }

    pub fn account_hash(&self) -> &str {
        &self.account_hash
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("account_hash", &"[REDACTED]")
            .finish()
    }
}

/// Opaque hub (device) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HubId(String);

impl HubId {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a device call needs: who is asking and which hub.
///
/// Built once at startup and handed to every state and command
/// operation, instead of living as mutable fields on a platform object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceContext {
    session: Session,
    hub: HubId,
}

impl DeviceContext {
    pub fn new(session: Session, hub: HubId) -> Self {
        Self { session, hub }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn hub(&self) -> &HubId {
        &self.hub
    }
}

/// Owns the account hash for the lifetime of the process.
pub struct SessionManager {
    client: GenieClient,
    store: Arc<dyn CredentialStore>,
    email: String,
    password: SecretString,
    session: OnceCell<Session>,
}

impl SessionManager {
    pub fn new(
        client: GenieClient,
        store: Arc<dyn CredentialStore>,
        email: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            client,
            store,
            email: email.into(),
            password,
            session: OnceCell::new(),
        }
    }

    /// The session, if one has been established.
    pub fn session(&self) -> Option<&Session> {
        self.session.get()
    }

    /// Restore the session from the store, or log in to create one.
    ///
    /// Idempotent once it succeeds: later calls return the held session
    /// without touching the store or the network. A failure leaves no
    /// session behind and nothing persisted.
    pub async fn ensure_session(&self) -> Result<Session, SessionError> {
        self.session
            .get_or_try_init(|| self.restore_or_login())
            .await
            .cloned()
    }

    async fn restore_or_login(&self) -> Result<Session, SessionError> {
        if let Some(hash) = self
            .store
            .get(ACCOUNT_HASH_KEY)?
            .filter(|hash| !hash.is_empty())
        {
            info!("account hash restored from storage");
            return Ok(Session::new(hash));
        }

        info!("logging in");
        let response = self
            .client
            .login(&self.email, &self.password)
            .await
            .inspect_err(|e| error!(error = %e, "login failed"))?;

        let Some(hash) = response.account_hash.filter(|hash| !hash.is_empty()) else {
            error!("login failed: response carried no account hash");
            return Err(SessionError::MissingAccountHash);
        };

        self.store.set(ACCOUNT_HASH_KEY, &hash)?;
        info!("logged in successfully");
        Ok(Session::new(hash))
    }
}
