//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the password.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "name = \"{}\"", cfg.name);
    if let Some(ref email) = cfg.email {
        let _ = writeln!(out, "email = \"{email}\"");
    }
    if cfg.password.is_some() {
        let _ = writeln!(out, "password = \"****\"");
    }
    if let Some(ref env) = cfg.password_env {
        let _ = writeln!(out, "password_env = \"{env}\"");
    }
    let _ = writeln!(out, "storage_dir = \"{}\"", cfg.storage_dir().display());
    if let Some(ref url) = cfg.base_url {
        let _ = writeln!(out, "base_url = \"{url}\"");
    }
    let _ = write!(out, "timeout = {}", cfg.timeout);
    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(
                &config::active_config_path(global).display().to_string(),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            output::print_output(&format_config_redacted(&cfg), global.quiet);
            Ok(())
        }

        ConfigCommand::Init => init(global),
    }
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::active_config_path(global);
    eprintln!("Genie configuration");
    eprintln!("   Config path: {}\n", path.display());

    let existing = config::load(global)?;

    let name: String = Input::new()
        .with_prompt("Accessory name")
        .default(existing.name.clone())
        .interact_text()
        .map_err(prompt_err)?;

    let mut email_prompt = Input::<String>::new().with_prompt("Rituals account email");
    if let Some(ref email) = existing.email {
        email_prompt = email_prompt.default(email.clone());
    }
    let email = email_prompt.interact_text().map_err(prompt_err)?;
    if email.is_empty() {
        return Err(CliError::Validation {
            field: "email".into(),
            reason: "email cannot be empty".into(),
        });
    }

    let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }

    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where should the password be kept?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let plaintext = if selection == 0 {
        genie_config::store_password(&email, &password)?;
        eprintln!("   ✓ password stored in system keyring");
        None
    } else {
        Some(password)
    };

    let cfg = Config {
        name,
        email: Some(email),
        password: plaintext,
        ..existing
    };
    config::save_config_to(&cfg, &path)?;

    if !global.quiet {
        eprintln!("\n   ✓ Config saved to {}", path.display());
    }
    Ok(())
}
