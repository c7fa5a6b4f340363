// ── Live link state ──

use serde::{Deserialize, Deserializer, Serialize};

/// Link state of a netdev, read on demand and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkState {
    /// Negotiated speed in Mbit/s. Kernels report `-1` while the link is
    /// down; negative values deserialize as unknown.
    #[serde(deserialize_with = "non_negative")]
    pub speed: Option<u64>,
    pub duplex: Option<String>,
    pub carrier: bool,
    pub stats: CounterSet,
}

impl LinkState {
    /// Speed, if it is known and positive.
    pub fn known_speed(&self) -> Option<u64> {
        self.speed.filter(|s| *s > 0)
    }

    /// Duplex mode, if reported and non-empty.
    pub fn duplex(&self) -> Option<&str> {
        self.duplex.as_deref().filter(|d| !d.is_empty())
    }
}

/// Interface traffic counters, as exposed under `statistics/` in sysfs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterSet {
    pub rx_bytes: Option<u64>,
    pub rx_packets: Option<u64>,
    pub multicast: Option<u64>,
    pub rx_errors: Option<u64>,
    pub rx_dropped: Option<u64>,
    pub tx_bytes: Option<u64>,
    pub tx_packets: Option<u64>,
    pub tx_errors: Option<u64>,
    pub tx_dropped: Option<u64>,
    pub collisions: Option<u64>,
}

impl CounterSet {
    /// Counter file names under `statistics/` in sysfs.
    pub const SYSFS_NAMES: [&'static str; 10] = [
        "rx_bytes",
        "rx_packets",
        "multicast",
        "rx_errors",
        "rx_dropped",
        "tx_bytes",
        "tx_packets",
        "tx_errors",
        "tx_dropped",
        "collisions",
    ];

    /// Store a counter by its sysfs name. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: u64) {
        let slot = match name {
            "rx_bytes" => &mut self.rx_bytes,
            "rx_packets" => &mut self.rx_packets,
            "multicast" => &mut self.multicast,
            "rx_errors" => &mut self.rx_errors,
            "rx_dropped" => &mut self.rx_dropped,
            "tx_bytes" => &mut self.tx_bytes,
            "tx_packets" => &mut self.tx_packets,
            "tx_errors" => &mut self.tx_errors,
            "tx_dropped" => &mut self.tx_dropped,
            "collisions" => &mut self.collisions,
            _ => return,
        };
        *slot = Some(value);
    }
}

fn non_negative<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| u64::try_from(v).ok()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn negative_speed_is_unknown() {
        let state: LinkState =
            serde_json::from_str(r#"{"speed": -1, "duplex": "unknown", "carrier": false}"#)
                .unwrap();
        assert_eq!(state.speed, None);
        assert_eq!(state.known_speed(), None);
    }

    #[test]
    fn zero_speed_is_not_known() {
        let state = LinkState {
            speed: Some(0),
            ..LinkState::default()
        };
        assert_eq!(state.known_speed(), None);
    }

    #[test]
    fn empty_duplex_is_absent() {
        let state = LinkState {
            duplex: Some(String::new()),
            ..LinkState::default()
        };
        assert_eq!(state.duplex(), None);
    }

    #[test]
    fn set_by_sysfs_name() {
        let mut stats = CounterSet::default();
        for (i, name) in CounterSet::SYSFS_NAMES.iter().enumerate() {
            stats.set(name, u64::try_from(i).unwrap());
        }
        stats.set("rx_compressed", 99);
        assert_eq!(stats.rx_bytes, Some(0));
        assert_eq!(stats.multicast, Some(2));
        assert_eq!(stats.collisions, Some(9));
    }

    #[test]
    fn partial_stats_deserialize() {
        let state: LinkState =
            serde_json::from_str(r#"{"carrier": true, "stats": {"rx_bytes": 2048}}"#).unwrap();
        assert!(state.carrier);
        assert_eq!(state.stats.rx_bytes, Some(2048));
        assert_eq!(state.stats.tx_bytes, None);
    }
}
