//! Shared configuration for ethinfo.
//!
//! TOML file at the platform config directory, layered as built-in
//! defaults → file → `ETHINFO_*` environment, and translated into
//! `ethinfo_core::SourceConfig`. The CLI adds flag overrides on top.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ethinfo_core::device::SYSFS_NET;
use ethinfo_core::source::{BOARD_JSON, SWCONFIG_BINARY};
use ethinfo_core::{FeatureGate, LinkSource, PortListSource, SourceConfig};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "ETHINFO_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

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

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Output defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Where port, board, and link data are read from.
    #[serde(default)]
    pub sources: Sources,

    /// Label translation.
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// How the structured port list is obtained.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PortsMode {
    #[default]
    Probe,
    File,
    None,
}

/// swconfig suppression: detect, force on, or force off.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GateMode {
    #[default]
    Auto,
    On,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sources {
    /// Board description (`/etc/board.json`).
    #[serde(default = "default_board")]
    pub board: PathBuf,

    #[serde(default)]
    pub ports: PortsMode,

    /// Captured port list, required when `ports = "file"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports_file: Option<PathBuf>,

    #[serde(default = "default_sysfs_root")]
    pub sysfs_root: PathBuf,

    /// Read link state from a JSON snapshot instead of sysfs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,

    #[serde(default)]
    pub swconfig: GateMode,

    #[serde(default = "default_swconfig_binary")]
    pub swconfig_binary: PathBuf,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            board: default_board(),
            ports: PortsMode::default(),
            ports_file: None,
            sysfs_root: default_sysfs_root(),
            state_file: None,
            swconfig: GateMode::default(),
            swconfig_binary: default_swconfig_binary(),
        }
    }
}

fn default_board() -> PathBuf {
    BOARD_JSON.into()
}
fn default_sysfs_root() -> PathBuf {
    SYSFS_NET.into()
}
fn default_swconfig_binary() -> PathBuf {
    SWCONFIG_BINARY.into()
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Locale {
    /// TOML message catalog (`"msgid" = "translation"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Sources {
    /// Translate into the core's source description.
    pub fn to_source_config(&self) -> Result<SourceConfig, ConfigError> {
        let port_list = match self.ports {
            PortsMode::Probe => PortListSource::Probe {
                sysfs_root: self.sysfs_root.clone(),
            },
            PortsMode::File => {
                let path = self.ports_file.clone().ok_or_else(|| ConfigError::Validation {
                    field: "sources.ports_file".into(),
                    reason: "required when sources.ports is 'file'".into(),
                })?;
                PortListSource::File(path)
            }
            PortsMode::None => PortListSource::Disabled,
        };

        let link_state = match self.state_file {
            Some(ref path) => LinkSource::File(path.clone()),
            None => LinkSource::Sysfs(self.sysfs_root.clone()),
        };

        let swconfig = match self.swconfig {
            GateMode::Auto => FeatureGate::Auto {
                binary: self.swconfig_binary.clone(),
            },
            GateMode::On => FeatureGate::Enabled,
            GateMode::Off => FeatureGate::Disabled,
        };

        Ok(SourceConfig {
            board_path: self.board.clone(),
            port_list,
            link_state,
            swconfig,
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$ETHINFO_CONFIG`, else XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("org", "ethinfo", "ethinfo").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ethinfo");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ETHINFO_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load the full Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Editing ─────────────────────────────────────────────────────────

/// Keys accepted by [`set_value`].
pub const KEYS: [&str; 10] = [
    "defaults.output",
    "defaults.color",
    "sources.board",
    "sources.ports",
    "sources.ports_file",
    "sources.sysfs_root",
    "sources.state_file",
    "sources.swconfig",
    "sources.swconfig_binary",
    "locale.catalog",
];

fn parse_enum<T: std::str::FromStr>(field: &str, value: &str, allowed: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("expected one of {allowed}, got '{value}'"),
    })
}

/// Set one dotted key. An empty value clears optional keys.
pub fn set_value(cfg: &mut Config, key: &str, value: &str) -> Result<(), ConfigError> {
    let optional = |v: &str| (!v.is_empty()).then(|| PathBuf::from(v));
    match key {
        "defaults.output" => {
            const FORMATS: [&str; 5] = ["table", "json", "json-compact", "yaml", "plain"];
            if !FORMATS.contains(&value) {
                return Err(ConfigError::Validation {
                    field: key.into(),
                    reason: format!("expected one of {}, got '{value}'", FORMATS.join(", ")),
                });
            }
            cfg.defaults.output = value.into();
        }
        "defaults.color" => {
            if !["auto", "always", "never"].contains(&value) {
                return Err(ConfigError::Validation {
                    field: key.into(),
                    reason: format!("expected auto, always, or never, got '{value}'"),
                });
            }
            cfg.defaults.color = value.into();
        }
        "sources.board" => cfg.sources.board = value.into(),
        "sources.ports" => cfg.sources.ports = parse_enum(key, value, "probe, file, none")?,
        "sources.ports_file" => cfg.sources.ports_file = optional(value),
        "sources.sysfs_root" => cfg.sources.sysfs_root = value.into(),
        "sources.state_file" => cfg.sources.state_file = optional(value),
        "sources.swconfig" => cfg.sources.swconfig = parse_enum(key, value, "auto, on, off")?,
        "sources.swconfig_binary" => cfg.sources.swconfig_binary = value.into(),
        "locale.catalog" => cfg.locale.catalog = optional(value),
        other => {
            return Err(ConfigError::Validation {
                field: other.into(),
                reason: format!("unknown config key. Valid keys: {}", KEYS.join(", ")),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_device_paths() {
        let src = Sources::default().to_source_config().unwrap();
        assert_eq!(src, SourceConfig::default());
    }

    #[test]
    fn loads_file_over_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [defaults]
            output = "json"

            [sources]
            ports = "file"
            ports_file = "/tmp/ports.json"
            swconfig = "off"
            "#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");
        assert_eq!(cfg.sources.board, PathBuf::from("/etc/board.json"));

        let src = cfg.sources.to_source_config().unwrap();
        assert_eq!(src.port_list, PortListSource::File("/tmp/ports.json".into()));
        assert_eq!(src.swconfig, FeatureGate::Disabled);
        assert_eq!(src.link_state, LinkSource::Sysfs("/sys/class/net".into()));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn malformed_file_is_reported_not_defaulted() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[sources\nports = ").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn file_mode_requires_path() {
        let sources = Sources {
            ports: PortsMode::File,
            ..Sources::default()
        };
        let err = sources.to_source_config().unwrap_err();
        assert!(err.to_string().contains("sources.ports_file"));
    }

    #[test]
    fn state_file_switches_link_source() {
        let sources = Sources {
            state_file: Some("/tmp/netdevs.json".into()),
            swconfig: GateMode::On,
            ..Sources::default()
        };
        let src = sources.to_source_config().unwrap();
        assert_eq!(src.link_state, LinkSource::File("/tmp/netdevs.json".into()));
        assert_eq!(src.swconfig, FeatureGate::Enabled);
    }

    #[test]
    fn set_and_save_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/config.toml");

        let mut cfg = Config::default();
        set_value(&mut cfg, "sources.ports", "none").unwrap();
        set_value(&mut cfg, "locale.catalog", "/usr/share/ethinfo/de.toml").unwrap();
        set_value(&mut cfg, "defaults.output", "yaml").unwrap();
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, cfg);

        set_value(&mut cfg, "locale.catalog", "").unwrap();
        assert_eq!(cfg.locale.catalog, None);
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut cfg = Config::default();
        assert!(set_value(&mut cfg, "sources.ports", "ubus").is_err());
        assert!(set_value(&mut cfg, "defaults.output", "xml").is_err());
        assert!(set_value(&mut cfg, "sources.unknown", "x").is_err());
    }
}
