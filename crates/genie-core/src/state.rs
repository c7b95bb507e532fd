// ── Device state snapshot ──
//
// The only local view of the device. Replaced wholesale by each successful
// pull through an atomic pointer swap, so readers see either the previous
// snapshot or the new one, never a mix. Failed pulls leave it untouched.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use genie_api::{GenieClient, Hub};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StateError;
use crate::session::DeviceContext;
use crate::speed::{PowerState, SpeedLevel, to_percent};

/// A complete, consistent copy of one pull.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceSnapshot {
    pub power: PowerState,
    /// `None` when the device reported a level outside `1..=3`.
    pub speed_level: Option<SpeedLevel>,
    pub pulled_at: DateTime<Utc>,
    /// Full wire record, including passthrough attributes and sensors.
    pub hub: Hub,
}

impl DeviceSnapshot {
    /// Build a snapshot from a pulled hub.
    ///
    /// `fanc` and `speedc` must be present; everything else is optional.
    pub fn from_hub(hub: Hub, pulled_at: DateTime<Utc>) -> Result<Self, StateError> {
        let fanc = hub
            .attributes
            .fanc
            .as_deref()
            .ok_or(StateError::MissingAttribute { field: "fanc" })?;
        let speedc = hub
            .attributes
            .speedc
            .as_deref()
            .ok_or(StateError::MissingAttribute { field: "speedc" })?;

        Ok(Self {
            power: PowerState::from_wire(fanc),
            speed_level: SpeedLevel::from_wire(speedc),
            pulled_at,
            hub,
        })
    }

    pub fn hash(&self) -> &str {
        &self.hub.hash
    }

    pub fn is_on(&self) -> bool {
        self.power.is_on()
    }

    /// Accessory-facing speed, 0 when off.
    pub fn speed_percent(&self) -> u8 {
        to_percent(self.speed_level, self.power)
    }

    /// Serial number ("hublot").
    pub fn serial(&self) -> Option<&str> {
        self.hub.hublot.as_deref()
    }

    pub fn firmware(&self) -> Option<&str> {
        self.hub
            .sensors
            .as_ref()
            .and_then(|s| s.versionc.as_deref())
    }

    pub fn room(&self) -> Option<&str> {
        self.hub.attributes.roomc.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.hub.title.as_deref()
    }
}

/// Pulls device state and holds the latest snapshot.
pub struct StateSynchronizer {
    client: GenieClient,
    snapshot: ArcSwapOption<DeviceSnapshot>,
}

impl StateSynchronizer {
    pub fn new(client: GenieClient) -> Self {
        Self {
            client,
            snapshot: ArcSwapOption::empty(),
        }
    }

    /// Fetch the hub state and replace the snapshot.
    ///
    /// On any failure the previous snapshot stays in place.
    pub async fn pull(&self, ctx: &DeviceContext) -> Result<Arc<DeviceSnapshot>, StateError> {
        let envelope = self
            .client
            .get_hub(ctx.hub().as_str())
            .await
            .inspect_err(|e| warn!(hub = %ctx.hub(), error = %e, "state pull failed"))?;

        let Some(hub) = envelope.hub else {
            warn!(hub = %ctx.hub(), "state pull returned no hub");
            return Err(StateError::MissingHub);
        };

        let snapshot = Arc::new(
            DeviceSnapshot::from_hub(hub, Utc::now())
                .inspect_err(|e| warn!(hub = %ctx.hub(), error = %e, "state pull incomplete"))?,
        );
        self.snapshot.store(Some(Arc::clone(&snapshot)));

        debug!(
            hub = %ctx.hub(),
            power = %snapshot.power,
            speed = snapshot.speed_percent(),
            "snapshot replaced"
        );
        Ok(snapshot)
    }

    /// The last successfully pulled snapshot.
    pub fn snapshot(&self) -> Option<Arc<DeviceSnapshot>> {
        self.snapshot.load_full()
    }

    /// When the current snapshot was pulled.
    pub fn last_pull(&self) -> Option<DateTime<Utc>> {
        self.snapshot.load().as_ref().map(|s| s.pulled_at)
    }

    /// How old the current snapshot is, or `None` if never pulled.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_pull().map(|t| Utc::now() - t)
    }
}
