// ── Hub resolution ──
//
// The hub hash is scoped to the account. It is restored from the store
// when present; otherwise the first hub in the account's list is taken
// as-is and persisted. There is no selection policy.

use std::sync::Arc;

use genie_api::{GenieClient, Hub};
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::error::HubError;
use crate::session::{HubId, Session};
use crate::store::{CredentialStore, HUB_HASH_KEY};

/// Owns the hub identifier for the lifetime of the process.
pub struct HubResolver {
    client: GenieClient,
    store: Arc<dyn CredentialStore>,
    hub: OnceCell<HubId>,
}

impl HubResolver {
    pub fn new(client: GenieClient, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            client,
            store,
            hub: OnceCell::new(),
        }
    }

    /// The resolved hub, if any.
    pub fn hub(&self) -> Option<&HubId> {
        self.hub.get()
    }

    /// Restore the hub hash from the store, or resolve it from the account.
    pub async fn ensure_hub(&self, session: &Session) -> Result<HubId, HubError> {
        self.hub
            .get_or_try_init(|| self.restore_or_resolve(session))
            .await
            .cloned()
    }

    /// Fetch every hub on the account without persisting anything.
    ///
    /// Entries whose `hub` object is null are skipped.
    pub async fn list_hubs(&self, session: &Session) -> Result<Vec<Hub>, HubError> {
        let hubs = self
            .client
            .list_hubs(session.account_hash())
            .await
            .inspect_err(|e| error!(error = %e, "hub list request failed"))?;
        Ok(hubs.into_iter().filter_map(|entry| entry.hub).collect())
    }

    async fn restore_or_resolve(&self, session: &Session) -> Result<HubId, HubError> {
        if let Some(hash) = self.store.get(HUB_HASH_KEY)?.filter(|hash| !hash.is_empty()) {
            info!("hub hash restored from storage");
            return Ok(HubId::new(hash));
        }

        info!("resolving hub hash");
        let entries = self
            .client
            .list_hubs(session.account_hash())
            .await
            .inspect_err(|e| error!(error = %e, "hub list request failed"))?;

        let Some(first) = entries.into_iter().next() else {
            error!("no hubs found");
            return Err(HubError::NoHubs);
        };
        let Some(hub) = first.hub else {
            error!("first hub entry is empty");
            return Err(HubError::MalformedEntry);
        };

        self.store.set(HUB_HASH_KEY, &hub.hash)?;
        info!(hub = %hub.hash, "hub resolved");
        Ok(HubId::new(hub.hash))
    }
}
