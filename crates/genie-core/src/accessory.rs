// ── Fan accessory adapter ──
//
// The surface an accessory host drives: characteristic getters and setters
// for power and speed plus static device information. Getters always pull
// and never fail; setters report failures but never echo the attempted
// value, the next pull decides what is shown.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::command::CommandDispatcher;
use crate::error::CommandError;
use crate::session::DeviceContext;
use crate::speed::{SpeedLevel, to_level};
use crate::state::{DeviceSnapshot, StateSynchronizer};

pub const MANUFACTURER: &str = "Rituals";
pub const MODEL: &str = "Perfume Genie";

/// Static device information, captured when the accessory is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessoryInfo {
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub serial: String,
    pub firmware: String,
    pub hub: String,
}

/// Derived control values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccessoryState {
    pub on: bool,
    /// 0..=100
    pub speed: u8,
}

impl AccessoryState {
    fn from_snapshot(snapshot: Option<&DeviceSnapshot>) -> Self {
        snapshot.map_or_else(Self::default, |s| Self {
            on: s.is_on(),
            speed: s.speed_percent(),
        })
    }
}

pub struct FanAccessory {
    ctx: DeviceContext,
    state: Arc<StateSynchronizer>,
    commands: Arc<CommandDispatcher>,
    info: AccessoryInfo,
}

impl FanAccessory {
    /// Create the accessory. Device information is read from whatever
    /// snapshot exists right now and is not refreshed afterwards.
    pub fn new(
        name: impl Into<String>,
        ctx: DeviceContext,
        state: Arc<StateSynchronizer>,
        commands: Arc<CommandDispatcher>,
    ) -> Self {
        let snapshot = state.snapshot();
        let info = AccessoryInfo {
            name: name.into(),
            manufacturer: MANUFACTURER.into(),
            model: MODEL.into(),
            serial: snapshot
                .as_deref()
                .and_then(DeviceSnapshot::serial)
                .unwrap_or_default()
                .to_owned(),
            firmware: snapshot
                .as_deref()
                .and_then(DeviceSnapshot::firmware)
                .unwrap_or_default()
                .to_owned(),
            hub: ctx.hub().to_string(),
        };

        Self {
            ctx,
            state,
            commands,
            info,
        }
    }

    pub fn info(&self) -> &AccessoryInfo {
        &self.info
    }

    pub fn context(&self) -> &DeviceContext {
        &self.ctx
    }

    /// The last pulled snapshot, without pulling.
    pub fn snapshot(&self) -> Option<Arc<DeviceSnapshot>> {
        self.state.snapshot()
    }

    // ── Getters ──────────────────────────────────────────────────────

    /// Pull and report both control values.
    pub async fn state(&self) -> AccessoryState {
        AccessoryState::from_snapshot(self.refresh().await.as_deref())
    }

    pub async fn get_on(&self) -> bool {
        let on = self.state().await.on;
        info!(on, "get characteristic on");
        on
    }

    pub async fn get_speed(&self) -> u8 {
        let speed = self.state().await.speed;
        info!(speed, "get characteristic speed");
        speed
    }

    /// Pull, falling back to the retained snapshot when the pull fails.
    async fn refresh(&self) -> Option<Arc<DeviceSnapshot>> {
        match self.state.pull(&self.ctx).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "using last known state");
                self.state.snapshot()
            }
        }
    }

    // ── Setters ──────────────────────────────────────────────────────

    pub async fn set_on(&self, on: bool) -> Result<(), CommandError> {
        info!(on, "set characteristic on");
        self.commands.set_power(&self.ctx, on).await?;
        Ok(())
    }

    /// Map the percentage to a level and write it.
    ///
    /// Only writes while the last known power state is on; otherwise
    /// nothing is sent and `Ok(None)` is returned.
    pub async fn set_speed(&self, percent: u8) -> Result<Option<SpeedLevel>, CommandError> {
        let powered = self.state.snapshot().is_some_and(|s| s.is_on());
        if !powered {
            info!(percent, "fan is off, speed not sent");
            return Ok(None);
        }

        let level = to_level(percent);
        info!(percent, %level, "set characteristic speed");
        self.commands.set_speed_level(&self.ctx, level).await?;
        Ok(Some(level))
    }
}
