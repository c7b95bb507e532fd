// genie-api: Async Rust client for the Rituals Perfume Genie cloud API

pub mod auth;
pub mod client;
pub mod error;
pub mod hubs;
pub mod models;
pub mod transport;

pub use client::{FORM_CONTENT_TYPE, GenieClient};
pub use error::Error;
pub use hubs::AttributePatch;
pub use models::{Attributes, Hub, HubEnvelope, LoginResponse, SensorReading, Sensors};
pub use transport::{BROWSER_USER_AGENT, DEFAULT_BASE_URL, TransportConfig};
