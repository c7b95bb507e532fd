// Hub endpoints: account hub list, per-hub state and attribute updates.

use serde_json::json;
use tracing::debug;

use crate::client::GenieClient;
use crate::error::Error;
use crate::models::HubEnvelope;

/// A single-attribute write.
///
/// The API only ever receives one key per update, nested as
/// `{"attr": {"<key>": "<value>"}}` and sent as a string inside the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributePatch {
    /// `fanc`: `"1"` turns the fan on, `"0"` off.
    Fan(bool),
    /// `speedc`: raw speed level (`"1"`..`"3"`).
    Speed(String),
}

impl AttributePatch {
    /// The attribute key this patch writes.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Fan(_) => "fanc",
            Self::Speed(_) => "speedc",
        }
    }

    /// The wire value for the attribute.
    pub fn value(&self) -> &str {
        match self {
            Self::Fan(true) => "1",
            Self::Fan(false) => "0",
            Self::Speed(level) => level,
        }
    }

    /// Serialize to the JSON string carried in the `json` form field.
    pub fn to_json(&self) -> String {
        let mut attr = serde_json::Map::new();
        attr.insert(self.key().to_owned(), json!(self.value()));
        json!({ "attr": attr }).to_string()
    }
}

impl GenieClient {
    /// List every hub registered to the account.
    ///
    /// `GET /api/account/hubs/{account_hash}`
    pub async fn list_hubs(&self, account_hash: &str) -> Result<Vec<HubEnvelope>, Error> {
        let url = self.endpoint(&["api", "account", "hubs", account_hash])?;
        self.get_json(url).await
    }

    /// Fetch the current state of one hub.
    ///
    /// `GET /api/account/hub/{hub_hash}`
    pub async fn get_hub(&self, hub_hash: &str) -> Result<HubEnvelope, Error> {
        let url = self.endpoint(&["api", "account", "hub", hub_hash])?;
        self.get_json(url).await
    }

    /// Write one attribute on a hub.
    ///
    /// `POST /api/hub/update/attr` with form fields `hub` and `json`.
    /// The response body carries nothing useful and is discarded.
    pub async fn update_attribute(&self, hub_hash: &str, patch: &AttributePatch) -> Result<(), Error> {
        let url = self.endpoint(&["api", "hub", "update", "attr"])?;
        let payload = patch.to_json();

        debug!(hub = hub_hash, attr = patch.key(), value = patch.value(), "updating attribute");

        let form = [("hub", hub_hash), ("json", payload.as_str())];
        self.post_form(url, &form).await?;
        Ok(())
    }
}
