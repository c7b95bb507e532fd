//! Shared configuration for Genie tools.
//!
//! A single TOML file plus `GENIE_*` environment overrides, credential
//! resolution (env + keyring + plaintext), and translation to
//! `genie_core::BridgeConfig`. The CLI layers its flag overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use genie_core::{BridgeConfig, DEFAULT_ACCESSORY_NAME};

/// Keyring service name; the account is the configured email.
pub const KEYRING_SERVICE: &str = "rituals-genie";

/// Environment variable consulted when no `password_env` is configured
/// or the named one is unset.
pub const PASSWORD_ENV: &str = "GENIE_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no email configured")]
    NoEmail,

    #[error("no password found for '{email}'")]
    NoPassword { email: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Accessory display name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Rituals account email.
    pub email: Option<String>,

    /// Account password (plaintext; prefer the keyring or an env var).
    pub password: Option<String>,

    /// Name of an environment variable holding the password.
    pub password_env: Option<String>,

    /// Directory for the persisted account and hub hashes.
    pub storage_dir: Option<PathBuf>,

    /// API host override.
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            email: None,
            password: None,
            password_env: None,
            storage_dir: None,
            base_url: None,
            timeout: default_timeout(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_ACCESSORY_NAME.into()
}
fn default_timeout() -> u64 {
    30
}

impl Config {
    /// The configured storage directory, or the platform default.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(default_storage_dir)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "rituals-genie", "genie")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.extend(parts);
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".config", "genie", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default directory for persisted identifiers.
pub fn default_storage_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".local", "share", "genie", "storage"]),
        |dirs| dirs.data_dir().join("storage"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load config from `path` merged with `GENIE_*` environment variables.
/// A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("GENIE_").ignore(&["PASSWORD"]));

    Ok(figment.extract()?)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the password, reading the environment from the process.
pub fn resolve_password(cfg: &Config, email: &str) -> Result<SecretString, ConfigError> {
    resolve_password_with(cfg, email, |name| std::env::var(name).ok())
}

/// Resolve the password using `env` for variable lookups.
///
/// Order: `password_env` → `GENIE_PASSWORD` → keyring → plaintext.
pub fn resolve_password_with(
    cfg: &Config,
    email: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Named env var
    if let Some(pw) = cfg.password_env.as_deref().and_then(&env) {
        return Ok(SecretString::from(pw));
    }

    // 2. Well-known env var
    if let Some(pw) = env(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 3. Keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, email) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 4. Plaintext in config
    if let Some(ref pw) = cfg.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoPassword {
        email: email.into(),
    })
}

/// Store a password in the system keyring under the given email.
pub fn store_password(email: &str, password: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, email)
        .and_then(|entry| entry.set_password(password))
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

/// Parse the configured base URL, if any.
pub fn parse_base_url(raw: Option<&str>) -> Result<Option<url::Url>, ConfigError> {
    raw.map(|s| {
        s.parse().map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {s}"),
        })
    })
    .transpose()
}

/// Build a `BridgeConfig` from the loaded config (no flag overrides).
pub fn to_bridge_config(cfg: &Config) -> Result<BridgeConfig, ConfigError> {
    let email = cfg
        .email
        .clone()
        .filter(|e| !e.is_empty())
        .ok_or(ConfigError::NoEmail)?;
    let password = resolve_password(cfg, &email)?;

    let mut bridge = BridgeConfig::new(email, password);
    bridge.name.clone_from(&cfg.name);
    bridge.base_url = parse_base_url(cfg.base_url.as_deref())?;
    bridge.timeout = Duration::from_secs(cfg.timeout);
    Ok(bridge)
}
