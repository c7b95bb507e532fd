// ── Persisted credential store ──
//
// Two string records survive restarts: the account hash and the hub hash.
// The store is a dumb key/value box; deciding what an empty or missing
// value means belongs to the session and hub resolvers.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key under which the account hash (session token) is persisted.
pub const ACCOUNT_HASH_KEY: &str = "rituals_account_hash";

/// Key under which the hub hash (device identifier) is persisted.
pub const HUB_HASH_KEY: &str = "rituals_hub_hash";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store key '{key}'")]
    InvalidKey { key: String },

    #[error("credential store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persisted string key/value storage.
pub trait CredentialStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write (or overwrite) a value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Remove both persisted identifiers so the next start logs in afresh.
pub fn clear_identifiers(store: &dyn CredentialStore) -> Result<(), StoreError> {
    store.remove(ACCOUNT_HASH_KEY)?;
    store.remove(HUB_HASH_KEY)
}
