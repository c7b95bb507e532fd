// ── Runtime bridge configuration ──
//
// Describes *how* to reach the cloud and *who* to log in as. Never touches
// disk; `genie-config` builds one of these from files and env vars.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::CoreError;

/// Name given to the accessory when none is configured.
pub const DEFAULT_ACCESSORY_NAME: &str = "Genie";

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Accessory display name.
    pub name: String,
    pub email: String,
    pub password: SecretString,
    /// API host override. `None` means the production host.
    pub base_url: Option<Url>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl BridgeConfig {
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            name: DEFAULT_ACCESSORY_NAME.into(),
            email: email.into(),
            password,
            base_url: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// The API host to talk to.
    pub fn resolved_base_url(&self) -> Result<Url, CoreError> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => Url::parse(genie_api::DEFAULT_BASE_URL).map_err(|e| CoreError::Config {
                message: format!("invalid default base URL: {e}"),
            }),
        }
    }
}
