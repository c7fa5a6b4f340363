// ── Device handles and registries ──
//
// A `DeviceHandle` is a lookup key into a registry owned elsewhere (the
// kernel, or a captured snapshot). Link state is always re-read through
// the registry by name, never stored on the handle.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::model::{CounterSet, LinkState};

/// Default location of netdev attributes.
pub const SYSFS_NET: &str = "/sys/class/net";

/// Non-owning reference to a network device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceHandle {
    name: String,
    /// Whether the registry knew the device when the handle was resolved.
    present: bool,
}

impl DeviceHandle {
    pub fn new(name: impl Into<String>, present: bool) -> Self {
        Self {
            name: name.into(),
            present,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_present(&self) -> bool {
        self.present
    }
}

/// Lookup capability for live network devices.
///
/// Both operations are infallible: an unknown device yields a handle that
/// reads as no link with unknown counters.
pub trait DeviceRegistry {
    fn lookup(&self, name: &str) -> DeviceHandle;

    fn link_state(&self, handle: &DeviceHandle) -> LinkState;
}

// ── sysfs ───────────────────────────────────────────────────────────

/// Registry backed by `/sys/class/net` (or any directory with the same layout).
#[derive(Debug, Clone)]
pub struct SysfsRegistry {
    root: PathBuf,
}

impl Default for SysfsRegistry {
    fn default() -> Self {
        Self::new(SYSFS_NET)
    }
}

impl SysfsRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn device_dir(&self, name: &str) -> Option<PathBuf> {
        // Names come from board files and RPC output; never let them walk
        // out of the sysfs root.
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            return None;
        }
        Some(self.root.join(name))
    }

    /// Read one attribute. Reads of `speed` and `carrier` fail with EINVAL
    /// while an interface is administratively down; that is just "unknown".
    fn read_attr(dir: &Path, attr: &str) -> Option<String> {
        match fs::read_to_string(dir.join(attr)) {
            Ok(raw) => Some(raw.trim().to_owned()),
            Err(e) => {
                trace!(path = %dir.join(attr).display(), error = %e, "attribute unreadable");
                None
            }
        }
    }
}

impl DeviceRegistry for SysfsRegistry {
    fn lookup(&self, name: &str) -> DeviceHandle {
        let present = self.device_dir(name).is_some_and(|dir| dir.exists());
        DeviceHandle::new(name, present)
    }

    fn link_state(&self, handle: &DeviceHandle) -> LinkState {
        let Some(dir) = self.device_dir(handle.name()) else {
            return LinkState::default();
        };

        let mut state = LinkState {
            carrier: Self::read_attr(&dir, "carrier").as_deref() == Some("1"),
            speed: Self::read_attr(&dir, "speed")
                .and_then(|s| s.parse::<i64>().ok())
                .and_then(|v| u64::try_from(v).ok()),
            duplex: Self::read_attr(&dir, "duplex").filter(|d| !d.is_empty()),
            ..LinkState::default()
        };

        let stats_dir = dir.join("statistics");
        for name in CounterSet::SYSFS_NAMES {
            if let Some(value) = Self::read_attr(&stats_dir, name).and_then(|s| s.parse().ok()) {
                state.stats.set(name, value);
            }
        }
        state
    }
}

// ── Snapshot ────────────────────────────────────────────────────────

/// Registry over a captured map of device name → link state.
///
/// Accepts the flat form `{"eth0": {"speed": 1000, "carrier": true, ...}}`
/// as well as the RPC form where speed/duplex/carrier sit under `link`.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRegistry {
    devices: HashMap<String, LinkState>,
}

#[derive(Deserialize)]
struct RawDevice {
    #[serde(flatten)]
    top: LinkState,
    #[serde(default)]
    link: Option<LinkState>,
}

impl RawDevice {
    fn into_state(self) -> LinkState {
        let Some(link) = self.link else {
            return self.top;
        };
        LinkState {
            speed: link.speed.or(self.top.speed),
            duplex: link.duplex.or(self.top.duplex),
            carrier: link.carrier || self.top.carrier,
            stats: self.top.stats,
        }
    }
}

impl SnapshotRegistry {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: HashMap<String, RawDevice> = serde_json::from_str(raw)?;
        Ok(Self {
            devices: parsed
                .into_iter()
                .map(|(name, dev)| (name, dev.into_state()))
                .collect(),
        })
    }

    pub fn insert(&mut self, name: impl Into<String>, state: LinkState) {
        self.devices.insert(name.into(), state);
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl DeviceRegistry for SnapshotRegistry {
    fn lookup(&self, name: &str) -> DeviceHandle {
        DeviceHandle::new(name, self.devices.contains_key(name))
    }

    fn link_state(&self, handle: &DeviceHandle) -> LinkState {
        self.devices
            .get(handle.name())
            .cloned()
            .unwrap_or_default()
    }
}

// ── Dispatch ────────────────────────────────────────────────────────

/// The registry selected by configuration.
#[derive(Debug, Clone)]
pub enum Registry {
    Sysfs(SysfsRegistry),
    Snapshot(SnapshotRegistry),
}

impl DeviceRegistry for Registry {
    fn lookup(&self, name: &str) -> DeviceHandle {
        match self {
            Self::Sysfs(r) => r.lookup(name),
            Self::Snapshot(r) => r.lookup(name),
        }
    }

    fn link_state(&self, handle: &DeviceHandle) -> LinkState {
        match self {
            Self::Sysfs(r) => r.link_state(handle),
            Self::Snapshot(r) => r.link_state(handle),
        }
    }
}
