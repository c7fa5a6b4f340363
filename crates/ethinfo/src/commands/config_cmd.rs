//! Config subcommand handlers.

use std::path::PathBuf;

use dialoguer::{Input, Select};

use ethinfo_config::{Config, GateMode, PortsMode};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, config_path};
use crate::error::CliError;
use crate::output;

use super::util::{confirm, prompt_err};

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: guided setup ──────────────────────────────────────
        ConfigCommand::Init => {
            let path = config_path();
            if path.exists()
                && !confirm(
                    "config init",
                    &format!("Overwrite {}?", path.display()),
                    global.yes,
                )?
            {
                eprintln!("Aborted.");
                return Ok(());
            }

            let cfg = if global.yes {
                Config::default()
            } else {
                eprintln!("ethinfo configuration");
                eprintln!("   Config path: {}\n", path.display());
                wizard()?
            };

            ethinfo_config::save_config_to(&cfg, &path)?;
            eprintln!("✓ Configuration written to {}", path.display());
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = ethinfo_config::load_config()?;
            let out = match config::output_format(global, &cfg)? {
                OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&cfg)
                    .map_err(|e| CliError::Validation {
                        field: "config".into(),
                        reason: format!("failed to serialize config: {e}"),
                    })?
                    .trim_end()
                    .to_owned(),
                OutputFormat::Json => serde_json::to_string_pretty(&cfg)?,
                OutputFormat::JsonCompact => serde_json::to_string(&cfg)?,
                OutputFormat::Yaml => serde_yaml::to_string(&cfg)?.trim_end().to_owned(),
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let path = config_path();
            let mut cfg = ethinfo_config::load_config_from(&path)?;
            ethinfo_config::set_value(&mut cfg, &key, &value)?;
            ethinfo_config::save_config_to(&cfg, &path)?;
            eprintln!("✓ Set {key} = '{value}'");
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

fn wizard() -> Result<Config, CliError> {
    let mut cfg = Config::default();

    // 1. Board description
    let board: String = Input::new()
        .with_prompt("Board description")
        .default(cfg.sources.board.display().to_string())
        .interact_text()
        .map_err(prompt_err)?;
    cfg.sources.board = board.into();

    // 2. Port list source
    let port_choices = &[
        "Probe the device (recommended)",
        "Read a captured port list",
        "None (use the board description only)",
    ];
    cfg.sources.ports = match Select::new()
        .with_prompt("Port list source")
        .items(port_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?
    {
        0 => PortsMode::Probe,
        1 => PortsMode::File,
        _ => PortsMode::None,
    };

    if cfg.sources.ports == PortsMode::File {
        let file: String = Input::new()
            .with_prompt("Port list file")
            .interact_text()
            .map_err(prompt_err)?;
        cfg.sources.ports_file = Some(file.into());
    }

    // 3. swconfig detection
    let gate_choices = &["Detect (recommended)", "Always suppress", "Ignore"];
    cfg.sources.swconfig = match Select::new()
        .with_prompt("swconfig switch handling")
        .items(gate_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?
    {
        0 => GateMode::Auto,
        1 => GateMode::On,
        _ => GateMode::Off,
    };

    // 4. Translation catalog
    let catalog: String = Input::new()
        .with_prompt("Message catalog (empty for English)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    cfg.locale.catalog = (!catalog.is_empty()).then(|| PathBuf::from(catalog));

    Ok(cfg)
}
