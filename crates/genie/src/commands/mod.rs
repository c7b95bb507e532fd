//! Command dispatch: bridges CLI args -> accessory calls -> output formatting.

pub mod config_cmd;
pub mod control;
pub mod forget;
pub mod hubs;
pub mod status;

use genie_core::Bridge;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command that needs an account session.
pub async fn dispatch(cmd: Command, bridge: &Bridge, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Hubs => hubs::handle(bridge, global).await,
        Command::Status => status::status(bridge, &bridge.start().await?, global).await,
        Command::Info => status::info(&bridge.start().await?, global),
        Command::On => control::power(&bridge.start().await?, true, global).await,
        Command::Off => control::power(&bridge.start().await?, false, global).await,
        Command::Speed(args) => control::speed(bridge, &bridge.start().await?, &args, global).await,
        // Forget, Config and Completions are handled before a bridge exists
        Command::Forget | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
