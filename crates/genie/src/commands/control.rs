//! Power and speed handlers.

use genie_core::{Bridge, FanAccessory};

use crate::cli::{GlobalOpts, SpeedArgs};
use crate::error::CliError;

use super::status;

pub async fn power(accessory: &FanAccessory, on: bool, global: &GlobalOpts) -> Result<(), CliError> {
    accessory.set_on(on).await?;
    match accessory.snapshot() {
        Some(snapshot) => status::print_status(&snapshot, global),
        None => Ok(()),
    }
}

pub async fn speed(
    bridge: &Bridge,
    accessory: &FanAccessory,
    args: &SpeedArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // The power check reads the last snapshot; make sure there is one.
    status::current(bridge, accessory).await?;

    if accessory.set_speed(args.percent).await?.is_none() {
        return Err(CliError::FanOff);
    }
    match accessory.snapshot() {
        Some(snapshot) => status::print_status(&snapshot, global),
        None => Ok(()),
    }
}
