//! Status and device information views.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use genie_core::{Bridge, DeviceSnapshot, FanAccessory, SpeedLevel};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
pub struct StatusView {
    pub hub: String,
    pub title: Option<String>,
    pub room: Option<String>,
    pub on: bool,
    /// 0..=100, 0 while off.
    pub speed: u8,
    pub level: Option<SpeedLevel>,
    pub pulled_at: DateTime<Utc>,
}

impl From<&DeviceSnapshot> for StatusView {
    fn from(s: &DeviceSnapshot) -> Self {
        Self {
            hub: s.hash().to_owned(),
            title: s.title().map(str::to_owned),
            room: s.room().map(str::to_owned),
            on: s.is_on(),
            speed: s.speed_percent(),
            level: s.speed_level,
            pulled_at: s.pulled_at,
        }
    }
}

/// The snapshot taken at startup, or a fresh pull if that one failed.
pub async fn current(
    bridge: &Bridge,
    accessory: &FanAccessory,
) -> Result<Arc<DeviceSnapshot>, CliError> {
    match accessory.snapshot() {
        Some(snapshot) => Ok(snapshot),
        None => Ok(bridge.state().pull(accessory.context()).await?),
    }
}

/// Render a snapshot in the selected format.
pub fn print_status(snapshot: &DeviceSnapshot, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let view = StatusView::from(snapshot);
    let out = output::render_single(
        &global.output,
        &view,
        |v| {
            output::detail_lines(&[
                ("Hub", v.title.clone().unwrap_or_else(|| v.hub.clone())),
                ("Room", v.room.clone().unwrap_or_else(|| "-".into())),
                ("Power", output::power_label(v.on, color)),
                (
                    "Speed",
                    match v.level {
                        Some(level) if v.on => format!("{}% ({level})", v.speed),
                        _ => format!("{}%", v.speed),
                    },
                ),
                ("Updated", v.pulled_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            ])
        },
        |v| format!("{} {}", if v.on { "on" } else { "off" }, v.speed),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn status(
    bridge: &Bridge,
    accessory: &FanAccessory,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let snapshot = current(bridge, accessory).await?;
    print_status(&snapshot, global)
}

pub fn info(accessory: &FanAccessory, global: &GlobalOpts) -> Result<(), CliError> {
    let info = accessory.info();
    let out = output::render_single(
        &global.output,
        info,
        |i| {
            output::detail_lines(&[
                ("Name", i.name.clone()),
                ("Manufacturer", i.manufacturer.clone()),
                ("Model", i.model.clone()),
                ("Serial", i.serial.clone()),
                ("Firmware", i.firmware.clone()),
                ("Hub", i.hub.clone()),
            ])
        },
        |i| i.serial.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
