// ── Bridge ──
//
// Wires the components together and runs the startup sequence:
// session → hub → first pull → accessory. Each step needs the previous
// one's output, so they run strictly in order.

use std::sync::Arc;

use genie_api::{GenieClient, Hub, TransportConfig};
use tracing::{debug, info, warn};

use crate::accessory::FanAccessory;
use crate::command::CommandDispatcher;
use crate::config::BridgeConfig;
use crate::error::CoreError;
use crate::hub::HubResolver;
use crate::session::{DeviceContext, SessionManager};
use crate::state::StateSynchronizer;
use crate::store::{CredentialStore, clear_identifiers};

/// The main entry point for accessory hosts.
pub struct Bridge {
    config: BridgeConfig,
    store: Arc<dyn CredentialStore>,
    sessions: SessionManager,
    hubs: HubResolver,
    state: Arc<StateSynchronizer>,
    commands: Arc<CommandDispatcher>,
}

impl Bridge {
    /// Create a bridge talking to the configured host. Does NOT connect;
    /// call [`start()`](Self::start).
    pub fn new(config: BridgeConfig, store: Arc<dyn CredentialStore>) -> Result<Self, CoreError> {
        let base_url = config.resolved_base_url()?;
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = GenieClient::new(base_url, &transport).map_err(|e| CoreError::Config {
            message: e.to_string(),
        })?;
        Ok(Self::with_client(config, store, client))
    }

    /// Create a bridge around an existing API client.
    pub fn with_client(
        config: BridgeConfig,
        store: Arc<dyn CredentialStore>,
        client: GenieClient,
    ) -> Self {
        let sessions = SessionManager::new(
            client.clone(),
            Arc::clone(&store),
            config.email.clone(),
            config.password.clone(),
        );
        let hubs = HubResolver::new(client.clone(), Arc::clone(&store));
        let state = Arc::new(StateSynchronizer::new(client.clone()));
        let commands = Arc::new(CommandDispatcher::new(client, Arc::clone(&state)));

        Self {
            config,
            store,
            sessions,
            hubs,
            state,
            commands,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn state(&self) -> &Arc<StateSynchronizer> {
        &self.state
    }

    pub fn commands(&self) -> &Arc<CommandDispatcher> {
        &self.commands
    }

    /// Establish the session and hub, pull once, and build the accessory.
    ///
    /// Login or hub failures abort startup. A failing first pull does not:
    /// the accessory is still created, just without serial and firmware.
    pub async fn start(&self) -> Result<FanAccessory, CoreError> {
        let session = self.sessions.ensure_session().await?;
        let hub = self.hubs.ensure_hub(&session).await?;
        let ctx = DeviceContext::new(session, hub);

        if let Err(e) = self.state.pull(&ctx).await {
            warn!(error = %e, "initial state pull failed");
        }

        info!(name = %self.config.name, hub = %ctx.hub(), "accessory ready");
        Ok(FanAccessory::new(
            self.config.name.clone(),
            ctx,
            Arc::clone(&self.state),
            Arc::clone(&self.commands),
        ))
    }

    /// All hubs on the account. Logs in if needed; persists nothing else.
    pub async fn list_hubs(&self) -> Result<Vec<Hub>, CoreError> {
        let session = self.sessions.ensure_session().await?;
        Ok(self.hubs.list_hubs(&session).await?)
    }

    /// Drop both persisted identifiers so the next start logs in afresh.
    pub fn forget(&self) -> Result<(), CoreError> {
        clear_identifiers(self.store.as_ref())?;
        debug!("persisted credentials cleared");
        Ok(())
    }
}
