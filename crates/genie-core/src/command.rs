// ── Command dispatch ──
//
// Writes never touch the snapshot directly. Each accepted write is followed
// by a pull, so the snapshot only ever shows what the server confirmed.
// Writes for the device are serialized: a second write waits until the
// first one's confirming pull has landed.

use std::sync::Arc;

use genie_api::{AttributePatch, GenieClient};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::error::CommandError;
use crate::session::DeviceContext;
use crate::speed::SpeedLevel;
use crate::state::{DeviceSnapshot, StateSynchronizer};

pub struct CommandDispatcher {
    client: GenieClient,
    state: Arc<StateSynchronizer>,
    write_lock: Mutex<()>,
}

impl CommandDispatcher {
    pub fn new(client: GenieClient, state: Arc<StateSynchronizer>) -> Self {
        Self {
            client,
            state,
            write_lock: Mutex::new(()),
        }
    }

    /// Turn the fan on or off, then pull the confirmed state.
    pub async fn set_power(
        &self,
        ctx: &DeviceContext,
        on: bool,
    ) -> Result<Arc<DeviceSnapshot>, CommandError> {
        self.dispatch(ctx, AttributePatch::Fan(on)).await
    }

    /// Write a speed level, then pull the confirmed state.
    ///
    /// Does not check the power state. Callers only send this while the
    /// last known state is on.
    pub async fn set_speed_level(
        &self,
        ctx: &DeviceContext,
        level: SpeedLevel,
    ) -> Result<Arc<DeviceSnapshot>, CommandError> {
        self.dispatch(ctx, AttributePatch::Speed(level.as_wire().to_owned()))
            .await
    }

    async fn dispatch(
        &self,
        ctx: &DeviceContext,
        patch: AttributePatch,
    ) -> Result<Arc<DeviceSnapshot>, CommandError> {
        let _guard = self.write_lock.lock().await;

        self.client
            .update_attribute(ctx.hub().as_str(), &patch)
            .await
            .inspect_err(|e| {
                error!(hub = %ctx.hub(), attr = patch.key(), error = %e, "update hub failed");
            })?;

        info!(hub = %ctx.hub(), attr = patch.key(), value = patch.value(), "updated hub");

        self.state.pull(ctx).await.map_err(CommandError::Unconfirmed)
    }
}
