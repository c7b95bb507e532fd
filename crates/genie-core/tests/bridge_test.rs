#![allow(clippy::unwrap_used)]
// Startup sequence tests for `Bridge` using wiremock.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use genie_core::{
    ACCOUNT_HASH_KEY, Bridge, BridgeConfig, CoreError, CredentialStore, FileStore, HUB_HASH_KEY,
    HubError, MemoryStore, SessionError,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn config(server: &MockServer) -> BridgeConfig {
    let mut config = BridgeConfig::new("me@example.com", SecretString::from("pw".to_string()));
    config.name = "Diffuser".into();
    config.base_url = Some(Url::parse(&server.uri()).unwrap());
    config
}

fn bridge(server: &MockServer, store: &Arc<MemoryStore>) -> Bridge {
    let store: Arc<dyn CredentialStore> = Arc::clone(store) as Arc<dyn CredentialStore>;
    Bridge::new(config(server), store).unwrap()
}

async fn mount_login(server: &MockServer, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/ocapi/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "account_hash": "ah1" })))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_hub_list(server: &MockServer, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/api/account/hubs/ah1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "hub": { "hash": "h1", "attributes": { "fanc": "0" } } },
            { "hub": { "hash": "h2", "attributes": { "fanc": "1" } } }
        ])))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_state(server: &MockServer, fanc: &str, speedc: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/api/account/hub/h1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hub": {
                "hash": "h1",
                "hublot": "LOT-0001",
                "attributes": { "fanc": fanc, "speedc": speedc },
                "sensors": { "versionc": "4.2.0" }
            }
        })))
        .expect(expected)
        .mount(server)
        .await;
}

// ── Bootstrap ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_fresh_store_runs_login_hub_state_in_order() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_hub_list(&server, 1).await;
    mount_state(&server, "1", "2", 1).await;

    let store = Arc::new(MemoryStore::new());
    let accessory = bridge(&server, &store).start().await.unwrap();

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_owned())
        .collect();
    assert_eq!(
        paths,
        vec!["/ocapi/login", "/api/account/hubs/ah1", "/api/account/hub/h1"]
    );

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(ACCOUNT_HASH_KEY).unwrap().as_deref(), Some("ah1"));
    assert_eq!(store.get(HUB_HASH_KEY).unwrap().as_deref(), Some("h1"));

    assert_eq!(accessory.context().hub().as_str(), "h1");
    assert_eq!(accessory.info().serial, "LOT-0001");
    assert_eq!(accessory.info().firmware, "4.2.0");
    assert_eq!(accessory.info().name, "Diffuser");

    server.verify().await;
}

#[tokio::test]
async fn test_populated_store_skips_login_and_hub_list() {
    let server = MockServer::start().await;
    mount_login(&server, 0).await;
    mount_hub_list(&server, 0).await;
    mount_state(&server, "1", "3", 1).await;

    let store = Arc::new(MemoryStore::new());
    store.set(ACCOUNT_HASH_KEY, "ah1").unwrap();
    store.set(HUB_HASH_KEY, "h1").unwrap();

    let accessory = bridge(&server, &store).start().await.unwrap();

    assert_eq!(accessory.snapshot().unwrap().speed_percent(), 100);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    server.verify().await;
}

#[tokio::test]
async fn test_empty_stored_values_count_as_missing() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_hub_list(&server, 1).await;
    mount_state(&server, "0", "1", 1).await;

    let store = Arc::new(MemoryStore::new());
    store.set(ACCOUNT_HASH_KEY, "").unwrap();
    store.set(HUB_HASH_KEY, "").unwrap();

    bridge(&server, &store).start().await.unwrap();

    assert_eq!(store.get(ACCOUNT_HASH_KEY).unwrap().as_deref(), Some("ah1"));
    server.verify().await;
}

#[tokio::test]
async fn test_identifiers_survive_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_hub_list(&server, 1).await;
    mount_state(&server, "1", "1", 2).await;

    for _ in 0..2 {
        let store: Arc<dyn CredentialStore> = Arc::new(FileStore::new(dir.path().join("storage")));
        Bridge::new(config(&server), store).unwrap().start().await.unwrap();
    }

    server.verify().await;
}

#[tokio::test]
async fn test_start_is_idempotent() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_hub_list(&server, 1).await;
    mount_state(&server, "1", "1", 2).await;

    let store = Arc::new(MemoryStore::new());
    let bridge = bridge(&server, &store);
    bridge.start().await.unwrap();
    bridge.start().await.unwrap();

    server.verify().await;
}

// ── Bootstrap failures ──────────────────────────────────────────────

#[tokio::test]
async fn test_login_without_account_hash_fails_and_persists_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocapi/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "account_hash": null })))
        .mount(&server)
        .await;
    mount_hub_list(&server, 0).await;

    let store = Arc::new(MemoryStore::new());
    let result = bridge(&server, &store).start().await;

    assert!(
        matches!(result, Err(CoreError::Session(SessionError::MissingAccountHash))),
        "got: {:?}",
        result.err()
    );
    assert!(store.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn test_login_http_error_is_session_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocapi/login"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let err = bridge(&server, &store).start().await.err().unwrap();

    assert!(err.is_auth());
    assert_eq!(err.api_error().and_then(genie_api::Error::status), Some(403));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_empty_hub_list_is_hub_error() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/api/account/hubs/ah1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let result = bridge(&server, &store).start().await;

    assert!(matches!(result, Err(CoreError::Hub(HubError::NoHubs))));
    assert_eq!(store.get(HUB_HASH_KEY).unwrap(), None);
    // The login itself still succeeded and was kept.
    assert_eq!(store.get(ACCOUNT_HASH_KEY).unwrap().as_deref(), Some("ah1"));
}

#[tokio::test]
async fn test_failed_initial_pull_still_builds_accessory() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_hub_list(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/api/account/hub/h1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let accessory = bridge(&server, &store).start().await.unwrap();

    assert!(accessory.snapshot().is_none());
    assert_eq!(accessory.info().serial, "");
    assert_eq!(accessory.info().firmware, "");
    assert_eq!(accessory.info().manufacturer, "Rituals");
}

// ── Other bridge operations ─────────────────────────────────────────

#[tokio::test]
async fn test_list_hubs_persists_nothing_but_session() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_hub_list(&server, 1).await;

    let store = Arc::new(MemoryStore::new());
    let hubs = bridge(&server, &store).list_hubs().await.unwrap();

    let hashes: Vec<&str> = hubs.iter().map(|h| h.hash.as_str()).collect();
    assert_eq!(hashes, vec!["h1", "h2"]);
    assert_eq!(store.get(HUB_HASH_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_forget_clears_both_keys() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    store.set(ACCOUNT_HASH_KEY, "ah1").unwrap();
    store.set(HUB_HASH_KEY, "h1").unwrap();

    bridge(&server, &store).forget().unwrap();

    assert!(store.is_empty());
}

// ── End-to-end ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_power_off_overrides_stored_speed_level() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_hub_list(&server, 1).await;
    mount_state(&server, "0", "2", 2).await;

    let store = Arc::new(MemoryStore::new());
    let accessory = bridge(&server, &store).start().await.unwrap();
    let state = accessory.state().await;

    assert!(!state.on);
    assert_eq!(state.speed, 0);
    server.verify().await;
}
