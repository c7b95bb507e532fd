//! Clap derive structures for the `genie` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// genie -- control a Rituals Perfume Genie from the command line
#[derive(Debug, Parser)]
#[command(
    name = "genie",
    version,
    about = "Control a Rituals Perfume Genie diffuser",
    long_about = "Logs in to the Rituals cloud, remembers the account and hub between runs,\n\
        and reads or changes the diffuser's fan power and speed.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long, env = "GENIE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Rituals account email (overrides config)
    #[arg(long, short = 'e', env = "GENIE_EMAIL", global = true)]
    pub email: Option<String>,

    /// Directory for the persisted account and hub hashes
    #[arg(long, env = "GENIE_STORAGE_DIR", global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Keep the account and hub hashes in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// API host override
    #[arg(long, env = "GENIE_BASE_URL", global = true, hide = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "GENIE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GENIE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show fan power and speed
    #[command(alias = "st")]
    Status,

    /// Turn the fan on
    On,

    /// Turn the fan off
    Off,

    /// Set fan speed as a percentage (only while the fan is on)
    Speed(SpeedArgs),

    /// Show device information
    Info,

    /// List hubs registered to the account
    Hubs,

    /// Forget the persisted account and hub hashes
    Forget,

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct SpeedArgs {
    /// Speed percentage; mapped to low (0-33), medium (34-67) or high (68-100)
    #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
    pub percent: u8,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the current configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
