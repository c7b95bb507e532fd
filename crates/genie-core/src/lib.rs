// genie-core: Session bootstrap, state synchronization and fan control
// between genie-api and an accessory host (CLI, HomeKit bridge, ...).

pub mod accessory;
pub mod bridge;
pub mod command;
pub mod config;
pub mod error;
pub mod hub;
pub mod session;
pub mod speed;
pub mod state;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use accessory::{AccessoryInfo, AccessoryState, FanAccessory};
pub use bridge::Bridge;
pub use command::CommandDispatcher;
pub use config::{BridgeConfig, DEFAULT_ACCESSORY_NAME};
pub use error::{CommandError, CoreError, HubError, SessionError, StateError};
pub use hub::HubResolver;
pub use session::{DeviceContext, HubId, Session, SessionManager};
pub use speed::{PowerState, SpeedLevel, to_level, to_percent};
pub use state::{DeviceSnapshot, StateSynchronizer};
pub use store::{
    ACCOUNT_HASH_KEY, CredentialStore, FileStore, HUB_HASH_KEY, MemoryStore, StoreError,
    clear_identifiers,
};

pub use genie_api::{Error as ApiError, Hub};
