//! Clap derive structures for the `ethinfo` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ethinfo -- ethernet port status for OpenWrt-style devices
#[derive(Debug, Parser)]
#[command(
    name = "ethinfo",
    version,
    about = "Show ethernet port link status, speed, duplex, and counters",
    long_about = "Discovers the device's ethernet ports from the structured port list or,\n\
        failing that, from the board description, and reports link status,\n\
        negotiated speed, duplex mode, and traffic counters for each one.",
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
    /// Board description file
    #[arg(long, env = "ETHINFO_BOARD", global = true)]
    pub board: Option<PathBuf>,

    /// Where the structured port list comes from
    #[arg(long, env = "ETHINFO_PORTS_SOURCE", global = true)]
    pub ports_source: Option<PortsSource>,

    /// Captured port list (implies --ports-source file)
    #[arg(long, env = "ETHINFO_PORTS_FILE", global = true)]
    pub ports_file: Option<PathBuf>,

    /// Network device directory
    #[arg(long, env = "ETHINFO_SYSFS_ROOT", global = true)]
    pub sysfs_root: Option<PathBuf>,

    /// Read link state from a JSON snapshot instead of sysfs
    #[arg(long, env = "ETHINFO_STATE_FILE", global = true)]
    pub state_file: Option<PathBuf>,

    /// Whether the swconfig switch subsystem owns the ports
    #[arg(long, env = "ETHINFO_SWCONFIG", global = true)]
    pub swconfig: Option<SwconfigMode>,

    /// Message catalog for translated labels
    #[arg(long, env = "ETHINFO_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', env = "ETHINFO_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PortsSource {
    /// Board roles plus same-bus eth<N> netdevs
    Probe,
    /// A captured JSON port list (see --ports-file)
    File,
    /// No structured list; reconstruct from the board description
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SwconfigMode {
    /// Active when the swconfig binary is installed
    Auto,
    /// Treat swconfig as active (suppresses port output)
    On,
    /// Ignore swconfig
    Off,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List ethernet ports with link status, speed, and duplex
    #[command(alias = "ls")]
    Ports(PortsArgs),

    /// Show the traffic counters of one port
    Stats(StatsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Write roff man pages for every command into a directory
    Manpages(ManpagesArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PortsArgs {
    /// Print each port's counter breakdown below the table
    #[arg(long, short = 's')]
    pub stats: bool,

    /// Refresh every N seconds until interrupted
    #[arg(long, short = 'w', value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub watch: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STATS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Device name, e.g. lan1 or eth0
    pub device: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a configuration value
    Set {
        /// Config key (dot-separated path, e.g., "sources.ports")
        key: String,

        /// Value to set (empty clears optional keys)
        value: String,
    },

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MANPAGES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ManpagesArgs {
    /// Output directory, created if missing
    pub dir: PathBuf,
}
