//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ethinfo_config::ConfigError;
use ethinfo_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Ports ────────────────────────────────────────────────────────

    #[error("Port '{identifier}' not found")]
    #[diagnostic(
        code(ethinfo::not_found),
        help("Run: ethinfo ports to see the detected ports")
    )]
    NotFound { identifier: String },

    #[error("Port information is unavailable while swconfig manages the switch")]
    #[diagnostic(
        code(ethinfo::swconfig_active),
        help("Pass --swconfig off to inspect the ports anyway.")
    )]
    Suppressed,

    // ── Input ────────────────────────────────────────────────────────

    #[error("Could not read {path}")]
    #[diagnostic(code(ethinfo::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {path}: {message}")]
    #[diagnostic(
        code(ethinfo::parse),
        help("Check the file contents and try again.")
    )]
    Parse { path: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ethinfo::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(ethinfo::config),
        help("Inspect the file with: ethinfo config show")
    )]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(ethinfo::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(ethinfo::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(ethinfo::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError / ConfigError → CliError mapping ───────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PortNotFound { identifier } => CliError::NotFound { identifier },
            CoreError::Read { path, source } => CliError::Read {
                path: path.display().to_string(),
                source,
            },
            CoreError::Parse { path, message } => CliError::Parse {
                path: path.display().to_string(),
                message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
