//! Clap derive structures for the `tsw` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tsw -- monitor and control Crestron touch panels
#[derive(Debug, Parser)]
#[command(
    name = "tsw",
    version,
    about = "Monitor and control Crestron touch panels from the command line",
    long_about = "Polls a Crestron touch panel's device API for identity, capability,\n\
        firmware, network and display state, and applies display controls\n\
        (brightness, volume, toolbar settings) as partial updates.",
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
    /// Panel profile to use
    #[arg(long, short = 'p', env = "TSW_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Panel host name or address (overrides profile)
    #[arg(long, short = 'H', env = "TSW_HOST", global = true)]
    pub host: Option<String>,

    /// Panel port (overrides profile)
    #[arg(long, env = "TSW_PORT", global = true)]
    pub port: Option<u16>,

    /// Web interface login (overrides profile)
    #[arg(long, short = 'u', env = "TSW_LOGIN", global = true)]
    pub login: Option<String>,

    /// Property groups to collect, comma-separated, or "All"
    #[arg(long, short = 'g', env = "TSW_GROUPS", global = true)]
    pub groups: Option<String>,

    /// Output format [default: `defaults.output` from the config file, else table]
    #[arg(long, short = 'o', env = "TSW_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit log lines as JSON
    #[arg(long, env = "TSW_LOG_JSON", global = true)]
    pub log_json: bool,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "TSW_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TSW_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// Output format after config defaults have been applied.
    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain `key=value` lines (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one poll cycle and print the statistics
    Poll(PollArgs),

    /// Poll repeatedly at the shortest enabled retrieval interval
    Watch(WatchArgs),

    /// Apply one or more display controls
    #[command(alias = "set")]
    Control(ControlArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Poll / Watch ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PollArgs {
    /// Also list the controllable properties
    #[arg(long, short = 'c')]
    pub controls: bool,

    /// Only show statistics whose key contains this text
    #[arg(long, short = 'f')]
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Override the tick interval, in seconds
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,

    /// Stop after this many cycles
    #[arg(long, short = 'n')]
    pub count: Option<u64>,

    /// Only show statistics whose key contains this text
    #[arg(long, short = 'f')]
    pub filter: Option<String>,
}

// ── Control ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ControlArgs {
    /// `Group#Property=value` assignments, applied in order
    #[arg(required = true, value_name = "PROPERTY=VALUE")]
    pub assignments: Vec<String>,

    /// Poll once after applying and print the result
    #[arg(long)]
    pub poll: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current configuration (secrets masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Store a profile's password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
