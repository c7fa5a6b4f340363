// ── Port resolution ──
//
// Builds the canonical port list from either the structured port list or,
// when that is empty, from the roles described in the board topology.
// The two sources are never merged.

use std::collections::HashSet;

use tracing::debug;

use crate::device::DeviceRegistry;
use crate::model::{BoardTopology, BuiltinPort, PortInfo, PortRole};
use crate::natural::natural_cmp;

/// Where the port list comes from for one render pass.
#[derive(Debug, Clone, Copy)]
pub enum PortSource<'a> {
    /// Authoritative list reported by the device.
    Structured(&'a [BuiltinPort]),
    /// Heuristic reconstruction from the board description.
    Reconstructed(&'a BoardTopology),
}

impl<'a> PortSource<'a> {
    /// Pick the structured list when it has entries, the board otherwise.
    pub fn select(builtin: &'a [BuiltinPort], board: &'a BoardTopology) -> Self {
        if builtin.is_empty() {
            Self::Reconstructed(board)
        } else {
            Self::Structured(builtin)
        }
    }

    fn entries(self) -> Vec<(Option<PortRole>, &'a str)> {
        match self {
            Self::Structured(ports) => ports
                .iter()
                .filter(|p| !p.device.is_empty())
                .map(|p| (p.role(), p.device.as_str()))
                .collect(),
            Self::Reconstructed(board) => board
                .role_ports()
                .into_iter()
                .map(|(role, device)| (Some(role), device))
                .collect(),
        }
    }
}

/// Resolve the ordered, de-duplicated port list.
///
/// Each device name is looked up in `registry` exactly once. When a name
/// appears more than once, the first occurrence wins, so a `lan` entry
/// shadows a `wan` entry for the same port. The result is sorted by device
/// name in natural order.
pub fn resolve<R>(source: PortSource<'_>, registry: &R) -> Vec<PortInfo>
where
    R: DeviceRegistry + ?Sized,
{
    let kind = match source {
        PortSource::Structured(_) => "structured",
        PortSource::Reconstructed(_) => "board",
    };
    let entries = source.entries();
    debug!(source = kind, count = entries.len(), "resolving ports");

    let mut seen = HashSet::new();
    let mut ports: Vec<PortInfo> = entries
        .into_iter()
        .filter(|(_, device)| {
            let fresh = seen.insert(*device);
            if !fresh {
                debug!(device, "dropping duplicate port");
            }
            fresh
        })
        .map(|(role, device)| PortInfo {
            role,
            device: device.to_owned(),
            netdev: registry.lookup(device),
        })
        .collect();

    ports.sort_by(|a, b| natural_cmp(&a.device, &b.device));
    ports
}
