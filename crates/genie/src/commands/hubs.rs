//! Hub listing.

use tabled::Tabled;

use genie_core::{Bridge, Hub, PowerState};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct HubRow {
    #[tabled(rename = "Hash")]
    hash: String,
    #[tabled(rename = "Name")]
    title: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Fan")]
    fan: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
}

impl From<&Hub> for HubRow {
    fn from(h: &Hub) -> Self {
        Self {
            hash: h.hash.clone(),
            title: h.title.clone().unwrap_or_default(),
            serial: h.hublot.clone().unwrap_or_default(),
            fan: h
                .attributes
                .fanc
                .as_deref()
                .map(|raw| PowerState::from_wire(raw).to_string())
                .unwrap_or_default(),
            firmware: h
                .sensors
                .as_ref()
                .and_then(|s| s.versionc.clone())
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(bridge: &Bridge, global: &GlobalOpts) -> Result<(), CliError> {
    let hubs = bridge.list_hubs().await?;
    let out = output::render_list(&global.output, &hubs, |h| HubRow::from(h), |h| h.hash.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
