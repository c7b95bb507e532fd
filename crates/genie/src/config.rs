//! CLI configuration: thin wrapper around `genie_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--config, --email, --base-url, --timeout, --storage-dir, --ephemeral).

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use genie_config::ConfigError;
use genie_core::{BridgeConfig, CredentialStore, FileStore, MemoryStore};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use genie_config::{Config, config_path, save_config_to};

/// The config file this invocation reads and writes.
pub fn active_config_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load the config file named by `--config`, or the platform default.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(genie_config::load_config_from(&active_config_path(global))?)
}

/// Build a `BridgeConfig`, applying flag overrides on top of the file.
///
/// Prompts for the password on a terminal when no other source has one.
pub fn resolve_bridge_config(cfg: &Config, global: &GlobalOpts) -> Result<BridgeConfig, CliError> {
    let mut effective = with_overrides(cfg, global);

    match genie_config::to_bridge_config(&effective) {
        Err(ConfigError::NoPassword { email }) if std::io::stdin().is_terminal() => {
            effective.password = Some(prompt_password(&email)?);
            Ok(genie_config::to_bridge_config(&effective)?)
        }
        result => Ok(result?),
    }
}

/// Apply --email, --base-url and --timeout to a copy of the file config.
fn with_overrides(cfg: &Config, global: &GlobalOpts) -> Config {
    let mut effective = cfg.clone();
    if let Some(ref email) = global.email {
        effective.email = Some(email.clone());
    }
    if let Some(ref url) = global.base_url {
        effective.base_url = Some(url.clone());
    }
    if let Some(timeout) = global.timeout {
        effective.timeout = timeout;
    }
    effective
}

/// Pick the credential store: in-memory with `--ephemeral`, otherwise a
/// directory from `--storage-dir` or the config.
pub fn open_store(cfg: &Config, global: &GlobalOpts) -> Arc<dyn CredentialStore> {
    if global.ephemeral {
        return Arc::new(MemoryStore::new());
    }
    let dir = global
        .storage_dir
        .clone()
        .unwrap_or_else(|| cfg.storage_dir());
    tracing::debug!(dir = %dir.display(), "using file store");
    Arc::new(FileStore::new(dir))
}

fn prompt_password(email: &str) -> Result<String, CliError> {
    let pw = rpassword::prompt_password(format!("Password for {email}: ")).map_err(|e| {
        CliError::Validation {
            field: "password".into(),
            reason: format!("prompt failed: {e}"),
        }
    })?;
    if pw.is_empty() {
        return Err(CliError::NoCredentials {
            what: format!("password for '{email}'"),
        });
    }
    Ok(pw)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["genie"];
        argv.extend_from_slice(args);
        argv.push("status");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn file_config() -> Config {
        Config {
            email: Some("file@example.com".into()),
            password: Some("plain".into()),
            base_url: Some("http://127.0.0.1:9000".into()),
            timeout: 7,
            ..Config::default()
        }
    }

    #[test]
    fn flags_override_file_values() {
        let opts = global(&[
            "--email",
            "flag@example.com",
            "--base-url",
            "http://127.0.0.1:9100",
            "--timeout",
            "3",
        ]);

        let effective = with_overrides(&file_config(), &opts);

        assert_eq!(effective.email.as_deref(), Some("flag@example.com"));
        assert_eq!(effective.base_url.as_deref(), Some("http://127.0.0.1:9100"));
        assert_eq!(effective.timeout, 3);
        assert_eq!(effective.password.as_deref(), Some("plain"));
    }

    #[test]
    fn file_values_apply_without_flags() {
        let effective = with_overrides(&file_config(), &global(&[]));
        assert_eq!(effective, file_config());
    }

    #[test]
    fn bridge_config_uses_resolved_values() {
        let opts = global(&["--timeout", "4"]);
        let bridge = resolve_bridge_config(&file_config(), &opts).unwrap();

        assert_eq!(bridge.email, "file@example.com");
        assert_eq!(bridge.timeout, std::time::Duration::from_secs(4));
        assert_eq!(bridge.base_url.unwrap().port(), Some(9000));
        assert!(!bridge.password.expose_secret().is_empty());
    }
}
