//! Clap derive structures for the `vyctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vyctl -- command-line client for the VyOS HTTP API
#[derive(Debug, Parser)]
#[command(
    name = "vyctl",
    version,
    about = "Query and configure VyOS routers over the HTTP API",
    long_about = "Query and configure VyOS routers over the HTTP API.\n\n\
        Every command maps to one API endpoint. Paths are given as\n\
        space-separated configuration segments, e.g.\n\
        `vyctl set interfaces dummy dum1 address 10.0.0.1/24`.",
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
    /// Device profile to use
    #[arg(long, short = 'p', env = "VYCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device hostname or IP (overrides profile)
    #[arg(long, short = 'H', env = "VYCTL_HOST", global = true)]
    pub host: Option<String>,

    /// API key (overrides profile)
    #[arg(long, env = "VYCTL_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// API port (overrides profile)
    #[arg(long, env = "VYCTL_PORT", global = true)]
    pub port: Option<u16>,

    /// Protocol scheme (overrides profile)
    #[arg(long, env = "VYCTL_PROTOCOL", global = true)]
    pub protocol: Option<Protocol>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "VYCTL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "VYCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "VYCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON of the full response
    Json,
    /// Compact single-line JSON of the full response
    JsonCompact,
    /// YAML of the full response
    Yaml,
    /// Plain result text (scripting)
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Protocol {
    Https,
    Http,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the configuration under a path (retrieve/showConfig)
    #[command(alias = "sc")]
    ShowConfig(PathArgs),

    /// List the values of a multi-value node (retrieve/returnValues)
    #[command(alias = "values")]
    ReturnValues(PathArgs),

    /// Check whether a configuration node exists (retrieve/exists)
    Exists(PathArgs),

    /// Run an operational-mode show command
    Show(PathArgs),

    /// Run an operational-mode generate command
    #[command(alias = "gen")]
    Generate(PathArgs),

    /// Run an operational-mode reset command
    Reset(PathArgs),

    /// Set configuration and commit
    Set(ConfigureArgs),

    /// Delete configuration and commit
    #[command(alias = "del")]
    Delete(ConfigureArgs),

    /// Save the running configuration
    Save(SaveArgs),

    /// Load and commit a configuration file
    Load(LoadArgs),

    /// Manage system images
    Image(ImageArgs),

    /// Reboot the device
    Reboot(PowerArgs),

    /// Power off the device
    Poweroff(PowerArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Path Arguments ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PathArgs {
    /// Path segments (omit for the whole tree)
    #[arg(value_name = "SEGMENT")]
    pub path: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ConfigureArgs {
    /// Path segments of a single location
    #[arg(
        value_name = "SEGMENT",
        required_unless_present_any = ["batch", "from_file"]
    )]
    pub path: Vec<String>,

    /// JSON list of locations, e.g. '[["system","host-name","r1"],["service","ssh"]]'
    #[arg(long, conflicts_with_all = ["path", "from_file"])]
    pub batch: Option<String>,

    /// Read the JSON list of locations from a file
    #[arg(long, short = 'F', conflicts_with = "path")]
    pub from_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Target file on the device (defaults to the boot configuration)
    #[arg(long, short = 'f')]
    pub file: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Configuration file on the device
    #[arg(long, short = 'f')]
    pub file: String,
}

#[derive(Debug, Args)]
pub struct PowerArgs {
    /// Schedule path, e.g. `at 23:00` [default: now]
    #[arg(value_name = "SEGMENT")]
    pub path: Vec<String>,
}

// ── Image ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ImageArgs {
    #[command(subcommand)]
    pub command: ImageCommand,
}

#[derive(Debug, Subcommand)]
pub enum ImageCommand {
    /// Download and install an image
    Add {
        /// Image URL
        url: String,
    },

    /// Delete an installed image
    #[command(alias = "rm")]
    Delete {
        /// Image name as listed by `show system image`
        name: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Display the current configuration (secrets masked)
    Show,

    /// Print the configuration file path
    Path,

    /// List profile names
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
