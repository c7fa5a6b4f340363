// ── Render pass ──
//
// Turns a resolved port list into display-ready records: one `PortReport`
// per port with the four table cells and the counter breakdown attached.
// Link state is read from the registry here, at format time.

use serde::Serialize;
use tracing::info;

use crate::device::DeviceRegistry;
use crate::error::CoreError;
use crate::format::{
    StatsBreakdown, format_duplex, format_link_status, format_link_summary, format_speed,
    format_stats, speed_title,
};
use crate::i18n::Translator;
use crate::model::{CounterSet, PortInfo, PortRole};
use crate::source::Snapshot;

/// Column message ids, in display order.
pub const COLUMNS: [&str; 4] = ["Ethernet Name", "Link Status", "Speed", "Duplex"];

/// Display record for one port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortReport {
    /// Netdev name, as reported by the handle.
    pub name: String,
    pub role: Option<PortRole>,
    /// Whether the device existed when the port was resolved.
    pub present: bool,
    pub carrier: bool,
    pub link_status: String,
    pub speed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_title: Option<String>,
    pub duplex: String,
    pub counters: CounterSet,
    pub stats: StatsBreakdown,
}

impl PortReport {
    pub fn build<R, T>(port: &PortInfo, registry: &R, tr: &T) -> Self
    where
        R: DeviceRegistry + ?Sized,
        T: Translator + ?Sized,
    {
        let state = registry.link_state(&port.netdev);
        let speed = state.known_speed();
        let duplex = state.duplex();

        let speed_title = format_speed(speed, duplex)
            .and(speed.zip(duplex))
            .map(|(s, d)| speed_title(tr, s, d));

        Self {
            name: port.netdev.name().to_owned(),
            role: port.role,
            present: port.netdev.is_present(),
            carrier: state.carrier,
            link_status: format_link_status(tr, state.carrier),
            speed: format_link_summary(tr, state.carrier, speed, duplex),
            speed_title,
            duplex: format_duplex(tr, duplex),
            counters: state.stats,
            stats: format_stats(tr, &state.stats),
        }
    }

    /// The four table cells, in column order.
    pub fn cells(&self) -> [&str; 4] {
        [
            self.name.as_str(),
            self.link_status.as_str(),
            self.speed.as_str(),
            self.duplex.as_str(),
        ]
    }
}

/// Everything shown for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EthernetInfo {
    pub title: String,
    pub headers: [String; 4],
    pub ports: Vec<PortReport>,
}

impl EthernetInfo {
    pub fn build<R, T>(ports: &[PortInfo], registry: &R, tr: &T) -> Self
    where
        R: DeviceRegistry + ?Sized,
        T: Translator + ?Sized,
    {
        Self {
            title: tr.translate("Ethernet Information").into_owned(),
            headers: COLUMNS.map(|c| tr.translate(c).into_owned()),
            ports: ports
                .iter()
                .map(|p| PortReport::build(p, registry, tr))
                .collect(),
        }
    }

    /// Find a port by device name.
    pub fn find(&self, identifier: &str) -> Result<&PortReport, CoreError> {
        self.ports
            .iter()
            .find(|p| p.name == identifier)
            .ok_or_else(|| CoreError::PortNotFound {
                identifier: identifier.to_owned(),
            })
    }
}

/// Resolve and format one snapshot. Returns `None` when the swconfig
/// subsystem is active and port information must not be shown.
pub fn render_pass<T>(snapshot: &Snapshot, tr: &T) -> Option<EthernetInfo>
where
    T: Translator + ?Sized,
{
    if snapshot.switch_config_active {
        info!("swconfig is active, suppressing ethernet port information");
        return None;
    }
    let ports = snapshot.resolve();
    Some(EthernetInfo::build(&ports, &snapshot.devices, tr))
}
