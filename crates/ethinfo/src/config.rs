//! Resolution of the effective settings for one invocation.
//!
//! Precedence: CLI flag > `ETHINFO_*` env (via clap or figment) > config
//! file > built-in default. Core only ever sees the resulting
//! `SourceConfig` and a loaded `Catalog`.

use std::path::PathBuf;

use clap::ValueEnum;

use ethinfo_config::{Config, GateMode, PortsMode};
use ethinfo_core::{Catalog, SourceConfig};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat, PortsSource, SwconfigMode};
use crate::error::CliError;

pub use ethinfo_config::config_path;

/// Fully resolved settings.
#[derive(Debug)]
pub struct Settings {
    pub sources: SourceConfig,
    pub catalog: Option<PathBuf>,
    pub output: OutputFormat,
    pub color: ColorMode,
}

impl Settings {
    /// Load the translation catalog, or an empty one that passes labels
    /// through unchanged.
    pub fn load_catalog(&self) -> Result<Catalog, CliError> {
        match self.catalog {
            Some(ref path) => {
                let catalog = Catalog::load(path)?;
                tracing::debug!(path = %path.display(), messages = catalog.len(), "catalog loaded");
                Ok(catalog)
            }
            None => Ok(Catalog::default()),
        }
    }
}

/// Load the config file and apply flag overrides.
pub fn resolve(global: &GlobalOpts) -> Result<Settings, CliError> {
    let cfg = ethinfo_config::load_config()?;
    apply(cfg, global)
}

/// Apply flag overrides to an already-loaded config.
pub fn apply(mut cfg: Config, global: &GlobalOpts) -> Result<Settings, CliError> {
    let sources = &mut cfg.sources;
    if let Some(ref board) = global.board {
        sources.board.clone_from(board);
    }
    if let Some(ref path) = global.ports_file {
        sources.ports_file = Some(path.clone());
        sources.ports = PortsMode::File;
    }
    if let Some(mode) = global.ports_source {
        sources.ports = match mode {
            PortsSource::Probe => PortsMode::Probe,
            PortsSource::File => PortsMode::File,
            PortsSource::None => PortsMode::None,
        };
    }
    if let Some(ref root) = global.sysfs_root {
        sources.sysfs_root.clone_from(root);
    }
    if let Some(ref path) = global.state_file {
        sources.state_file = Some(path.clone());
    }
    if let Some(mode) = global.swconfig {
        sources.swconfig = match mode {
            SwconfigMode::Auto => GateMode::Auto,
            SwconfigMode::On => GateMode::On,
            SwconfigMode::Off => GateMode::Off,
        };
    }

    let output = output_format(global, &cfg)?;
    let color = match global.color {
        Some(mode) => mode,
        None => parse_value("defaults.color", &cfg.defaults.color)?,
    };

    Ok(Settings {
        sources: cfg.sources.to_source_config()?,
        catalog: global.catalog.clone().or(cfg.locale.catalog),
        output,
        color,
    })
}

/// `--output`, else `defaults.output` from the config file.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    match global.output {
        Some(format) => Ok(format),
        None => parse_value("defaults.output", &cfg.defaults.output),
    }
}

fn parse_value<T: ValueEnum>(field: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}
