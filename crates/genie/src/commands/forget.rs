//! Forget the persisted identifiers.

use genie_core::clear_identifiers;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let store = config::open_store(&cfg, global);
    clear_identifiers(store.as_ref())?;
    if !global.quiet {
        eprintln!("Account and hub hashes forgotten; the next run logs in again");
    }
    Ok(())
}
