// ── Upstream data sources ──
//
// Fetches the three independent inputs of a render pass (structured port
// list, board topology, live device state) concurrently. Every failure is
// logged and normalized to an empty default here, so resolution only ever
// sees well-formed, possibly empty, data.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::device::{Registry, SYSFS_NET, SnapshotRegistry, SysfsRegistry};
use crate::model::{BoardTopology, BuiltinPort, PortInfo};
use crate::natural::natural_cmp;
use crate::resolver::{PortSource, resolve};

/// Default board description path.
pub const BOARD_JSON: &str = "/etc/board.json";

/// Default swconfig binary checked by [`FeatureGate::Auto`].
pub const SWCONFIG_BINARY: &str = "/sbin/swconfig";

/// Role tag attached to probed ports the board file does not mention.
const PROBED_ROLE: &str = "unknown";

/// Where the structured port list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortListSource {
    /// Derive the list on the device: board roles plus any `eth<N>` netdevs
    /// on the same bus as the first board port.
    Probe { sysfs_root: PathBuf },
    /// Read a captured list (`[{"device": ..}]` or `{"result": [..]}`).
    File(PathBuf),
    /// Always empty; forces reconstruction from the board.
    Disabled,
}

/// Where live link state is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSource {
    Sysfs(PathBuf),
    File(PathBuf),
}

/// Whether the legacy swconfig switch subsystem owns the ports. When it
/// does, port information is suppressed entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureGate {
    /// Active when the swconfig binary exists.
    Auto { binary: PathBuf },
    Enabled,
    Disabled,
}

impl FeatureGate {
    pub async fn is_active(&self) -> bool {
        match self {
            Self::Auto { binary } => tokio::fs::try_exists(binary).await.unwrap_or(false),
            Self::Enabled => true,
            Self::Disabled => false,
        }
    }
}

/// Everything needed to fetch one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub board_path: PathBuf,
    pub port_list: PortListSource,
    pub link_state: LinkSource,
    pub swconfig: FeatureGate,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            board_path: BOARD_JSON.into(),
            port_list: PortListSource::Probe {
                sysfs_root: SYSFS_NET.into(),
            },
            link_state: LinkSource::Sysfs(SYSFS_NET.into()),
            swconfig: FeatureGate::Auto {
                binary: SWCONFIG_BINARY.into(),
            },
        }
    }
}

/// Fetched inputs of one render pass.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub builtin_ports: Vec<BuiltinPort>,
    pub board: BoardTopology,
    pub devices: Registry,
    pub switch_config_active: bool,
}

impl Snapshot {
    pub fn source(&self) -> PortSource<'_> {
        PortSource::select(&self.builtin_ports, &self.board)
    }

    pub fn resolve(&self) -> Vec<PortInfo> {
        resolve(self.source(), &self.devices)
    }
}

/// Fetch all inputs concurrently. The board file is parsed once per pass
/// and that same topology feeds both the port list and the fallback.
pub async fn load_snapshot(cfg: &SourceConfig) -> Snapshot {
    let topology = async {
        let board = load_board(&cfg.board_path).await;
        let builtin_ports = load_port_list(&cfg.port_list, &board).await;
        (builtin_ports, board)
    };
    let ((builtin_ports, board), devices, switch_config_active) = tokio::join!(
        topology,
        load_registry(&cfg.link_state),
        cfg.swconfig.is_active(),
    );
    debug!(
        builtin = builtin_ports.len(),
        switch_config_active, "sources loaded"
    );
    Snapshot {
        builtin_ports,
        board,
        devices,
        switch_config_active,
    }
}

/// Read a text file, mapping "not there" to `None` quietly and any other
/// failure to `None` with a warning.
async fn read_optional(path: &Path, what: &str) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Some(raw),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no {what}");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read {what}");
            None
        }
    }
}

pub async fn load_board(path: &Path) -> BoardTopology {
    read_optional(path, "board description")
        .await
        .map(|raw| BoardTopology::parse(&raw))
        .unwrap_or_default()
}

/// Structured port list for one pass. `board` is only consulted when the
/// list is derived on the device.
pub async fn load_port_list(source: &PortListSource, board: &BoardTopology) -> Vec<BuiltinPort> {
    match source {
        PortListSource::Disabled => Vec::new(),
        PortListSource::File(path) => {
            let Some(raw) = read_optional(path, "port list").await else {
                return Vec::new();
            };
            match serde_json::from_str::<Value>(&raw) {
                Ok(value) => BuiltinPort::list_from_value(&value),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "port list is not valid JSON");
                    Vec::new()
                }
            }
        }
        PortListSource::Probe { sysfs_root } => probe_ports(board, sysfs_root).await,
    }
}

async fn load_registry(source: &LinkSource) -> Registry {
    match source {
        LinkSource::Sysfs(root) => Registry::Sysfs(SysfsRegistry::new(root.clone())),
        LinkSource::File(path) => {
            let registry = match read_optional(path, "link state snapshot").await {
                Some(raw) => SnapshotRegistry::from_json(&raw).unwrap_or_else(|e| {
                    warn!(path = %path.display(), error = %e, "link state snapshot is invalid");
                    SnapshotRegistry::default()
                }),
                None => SnapshotRegistry::default(),
            };
            Registry::Snapshot(registry)
        }
    }
}

// ── Probing ─────────────────────────────────────────────────────────

fn is_eth_name(name: &str) -> bool {
    name.strip_prefix("eth")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

async fn bus_of(sysfs_root: &Path, netdev: &str) -> Option<PathBuf> {
    tokio::fs::read_link(sysfs_root.join(netdev).join("device/subsystem"))
        .await
        .ok()
}

/// Device-side port list: board roles, then every other `eth<N>` on the
/// same bus as the first board port. Some boards only describe a subset
/// of their NICs; probing recovers the rest.
pub async fn probe_ports(board: &BoardTopology, sysfs_root: &Path) -> Vec<BuiltinPort> {
    let mut ports: Vec<BuiltinPort> = board
        .role_ports()
        .into_iter()
        .map(|(role, device)| BuiltinPort::new(device, Some(role.as_ref())))
        .collect();

    let Some(first) = ports.first().map(|p| p.device.clone()) else {
        return ports;
    };
    if !is_eth_name(&first) {
        return ports;
    }
    let Some(bus) = bus_of(sysfs_root, &first).await else {
        return ports;
    };

    let mut names = Vec::new();
    match tokio::fs::read_dir(sysfs_root).await {
        Ok(mut dir) => {
            while let Ok(Some(entry)) = dir.next_entry().await {
                if let Some(name) = entry.file_name().to_str() {
                    if is_eth_name(name) {
                        names.push(name.to_owned());
                    }
                }
            }
        }
        Err(e) => {
            warn!(path = %sysfs_root.display(), error = %e, "cannot list netdevs");
            return ports;
        }
    }
    names.sort_by(|a, b| natural_cmp(a, b));

    for name in names {
        if ports.iter().any(|p| p.device == name) {
            continue;
        }
        if bus_of(sysfs_root, &name).await.as_ref() != Some(&bus) {
            continue;
        }
        debug!(netdev = %name, "probed port missing from board description");
        ports.push(BuiltinPort::new(name, Some(PROBED_ROLE)));
    }
    ports
}
