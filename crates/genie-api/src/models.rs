// Genie API response types
//
// The cloud API is loose about which fields it returns, so everything that
// the bridge does not strictly need is optional. Only `hub.hash` is required
// at this layer; `genie-core` decides which attributes it cannot live without.
// Passthrough fields decode leniently: a null or mistyped value reads as
// `None` rather than failing the whole record.

use serde::{Deserialize, Serialize};

// ── Login ────────────────────────────────────────────────────────────

/// Body of `POST /ocapi/login`.
///
/// A `200` with a `null` (or missing) `account_hash` is still a failed login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub account_hash: Option<String>,
}

// ── Hub ──────────────────────────────────────────────────────────────

/// Wrapper used by both hub endpoints: `{ "hub": { ... } }`.
///
/// The state endpoint occasionally answers `{ "hub": null }`, hence the
/// `Option`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubEnvelope {
    #[serde(default)]
    pub hub: Option<Hub>,
}

/// A single diffuser as reported by the cloud.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hub {
    /// Opaque identifier used in every per-device URL.
    pub hash: String,
    /// Serial number printed on the device.
    #[serde(default, deserialize_with = "lenient::string")]
    pub hublot: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub status: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub current_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub ping_update: Option<String>,
    /// A null or malformed block reads as empty.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub attributes: Attributes,
    #[serde(default, deserialize_with = "lenient::option")]
    pub sensors: Option<Sensors>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Writable device attributes. Every value is a stringly-typed digit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Fan power: `"0"` off, `"1"` on.
    #[serde(default, deserialize_with = "lenient::string")]
    pub fanc: Option<String>,
    /// Fan speed level: `"1"`..`"3"`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub speedc: Option<String>,
    /// Room size setting.
    #[serde(default, deserialize_with = "lenient::string")]
    pub roomc: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub resetc: Option<String>,
}

/// Read-only sensor block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sensors {
    #[serde(default, deserialize_with = "lenient::option")]
    pub wific: Option<SensorReading>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub fillc: Option<SensorReading>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub rfidc: Option<SensorReading>,
    /// Firmware version string.
    #[serde(default, deserialize_with = "lenient::string")]
    pub versionc: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub ipc: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub rpsc: Option<SensorReading>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub resetc: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub chipidc: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub errorc: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub onlinec: Option<SensorReading>,
}

/// Shape shared by all object-valued sensors (wifi, fill level, cartridge, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(default, deserialize_with = "lenient::option")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub sensor_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub discover_image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub discover_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub min_value: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub max_value: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub interval: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub updated_at: Option<String>,
    #[serde(default, rename = "default", deserialize_with = "lenient::option")]
    pub is_default: Option<i64>,
}

// ── Lenient decoding ─────────────────────────────────────────────────

mod lenient {
    use serde::Deserialize;
    use serde::de::{DeserializeOwned, Deserializer};
    use serde_json::Value;

    /// Decode `T`, or `None` when the value is null or has another shape.
    pub fn option<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(de)?;
        Ok(serde_json::from_value(value).ok())
    }

    pub fn or_default<'de, D, T>(de: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(option(de)?.unwrap_or_default())
    }

    /// Strings pass through; numbers and booleans are kept as their text.
    pub fn string<'de, D>(de: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(de)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hub_tolerates_sparse_payload() {
        let envelope: HubEnvelope =
            serde_json::from_value(json!({ "hub": { "hash": "h1", "attributes": { "fanc": "0" } } }))
                .expect("sparse hub should parse");
        let hub = envelope.hub.expect("hub present");
        assert_eq!(hub.hash, "h1");
        assert_eq!(hub.attributes.fanc.as_deref(), Some("0"));
        assert!(hub.attributes.speedc.is_none());
        assert!(hub.sensors.is_none());
    }

    #[test]
    fn hub_keeps_unknown_fields() {
        let hub: Hub = serde_json::from_value(json!({
            "hash": "h1",
            "hublot": "LOT-42",
            "status": 1,
            "attributes": { "fanc": "1", "speedc": "3", "roomc": "2" },
            "sensors": {
                "versionc": "4.0",
                "wific": { "id": 7, "title": "Good", "default": 1 }
            },
            "mystery": true
        }))
        .expect("full hub should parse");

        assert_eq!(hub.hublot.as_deref(), Some("LOT-42"));
        assert_eq!(hub.status, Some(1));
        let sensors = hub.sensors.expect("sensors present");
        assert_eq!(sensors.versionc.as_deref(), Some("4.0"));
        let wifi = sensors.wific.expect("wifi present");
        assert_eq!(wifi.is_default, Some(1));
        assert_eq!(hub.extra.get("mystery"), Some(&json!(true)));
    }

    #[test]
    fn mistyped_metadata_reads_as_none() {
        let hub: Hub = serde_json::from_value(json!({
            "hash": "h1",
            "status": "1",
            "title": null,
            "attributes": { "fanc": 1, "speedc": "2", "roomc": [] },
            "sensors": {
                "versionc": 4,
                "wific": { "min_value": 0, "title": "Good" },
                "fillc": "full"
            }
        }))
        .expect("mistyped metadata should not fail the hub");

        assert_eq!(hub.status, None);
        assert_eq!(hub.title, None);
        assert_eq!(hub.attributes.fanc.as_deref(), Some("1"));
        assert_eq!(hub.attributes.speedc.as_deref(), Some("2"));
        assert_eq!(hub.attributes.roomc, None);
        let sensors = hub.sensors.expect("sensors present");
        assert_eq!(sensors.versionc.as_deref(), Some("4"));
        assert!(sensors.fillc.is_none());
        let wifi = sensors.wific.expect("wifi present");
        assert_eq!(wifi.min_value.as_deref(), Some("0"));
        assert_eq!(wifi.title.as_deref(), Some("Good"));
    }

    #[test]
    fn null_attributes_read_as_empty() {
        let hub: Hub = serde_json::from_value(json!({ "hash": "h1", "attributes": null }))
            .expect("null attributes should parse");
        assert_eq!(hub.attributes, Attributes::default());
    }

    #[test]
    fn null_hub_parses_as_none() {
        let envelope: HubEnvelope =
            serde_json::from_value(json!({ "hub": null })).expect("null hub should parse");
        assert!(envelope.hub.is_none());
    }

    #[test]
    fn login_without_hash() {
        let login: LoginResponse =
            serde_json::from_value(json!({ "error": "bad" })).expect("should parse");
        assert!(login.account_hash.is_none());
    }
}
