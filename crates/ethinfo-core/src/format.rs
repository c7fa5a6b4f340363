//! Display formatting for link state and traffic counters.

use serde::Serialize;

use crate::i18n::{Translator, format_template};
use crate::model::CounterSet;

/// Appended to 10/100/1000 Mbit/s labels on half-duplex links.
pub const HALF_DUPLEX_MARK: &str = "\u{202f}(H)";

// ── Link ────────────────────────────────────────────────────────────

/// Speed label for a negotiated link, or `None` when speed is unknown
/// (zero/absent) or no duplex mode was reported.
pub fn format_speed(speed: Option<u64>, duplex: Option<&str>) -> Option<String> {
    let speed = speed.filter(|s| *s > 0)?;
    duplex.filter(|d| !d.is_empty())?;

    let mark = if duplex == Some("half") {
        HALF_DUPLEX_MARK
    } else {
        ""
    };

    let label = match speed {
        10 | 100 | 1000 => format!("{speed}Mb/s{mark}"),
        2500 => "2500Mb/s".to_owned(),
        5000 => "5000Mb/s".to_owned(),
        10_000 => "10Gb/s".to_owned(),
        25_000 => "25Gb/s".to_owned(),
        40_000 => "40Gb/s".to_owned(),
        other => format!("{other}\u{202f}Mb/s{mark}"),
    };
    Some(label)
}

/// Speed label when known, otherwise the translated carrier state.
pub fn format_link_summary<T>(
    tr: &T,
    carrier: bool,
    speed: Option<u64>,
    duplex: Option<&str>,
) -> String
where
    T: Translator + ?Sized,
{
    format_speed(speed, duplex).unwrap_or_else(|| format_link_status(tr, carrier))
}

/// "Connected" / "no link", translated.
pub fn format_link_status<T>(tr: &T, carrier: bool) -> String
where
    T: Translator + ?Sized,
{
    let msgid = if carrier { "Connected" } else { "no link" };
    tr.translate(msgid).into_owned()
}

/// Hover text for a speed label: raw speed and duplex values.
pub fn speed_title<T>(tr: &T, speed: u64, duplex: &str) -> String
where
    T: Translator + ?Sized,
{
    format_template(
        &tr.translate("Speed: %d Mibit/s, Duplex: %s"),
        &[&speed, &duplex],
    )
}

/// Human-readable duplex mode. Values other than full/half pass through
/// as-is; an absent value renders empty.
pub fn format_duplex<T>(tr: &T, duplex: Option<&str>) -> String
where
    T: Translator + ?Sized,
{
    match duplex {
        Some("full") => tr.translate("Full Duplex").into_owned(),
        Some("half") => tr.translate("Half Duplex").into_owned(),
        Some(other) => other.to_owned(),
        None => String::new(),
    }
}

// ── Counters ────────────────────────────────────────────────────────

const MAGNITUDES: [&str; 7] = ["", "K", "M", "G", "T", "P", "E"];

/// Scale `value` by powers of `base` and append `unit`.
///
/// The value is divided while it is strictly greater than `base`. Scaled
/// values print with two decimals and a magnitude prefix (`i`-suffixed for
/// base 1024), e.g. `2.00 KiB`; unscaled values print as integers, e.g.
/// `5 Pkts.`.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn format_magnitude(value: u64, base: u64, unit: &str) -> String {
    let base_f = base as f64;
    let mut scaled = value as f64;
    let mut exp = 0;
    while exp < MAGNITUDES.len() - 1 && scaled > base_f {
        scaled /= base_f;
        exp += 1;
    }

    if exp == 0 {
        return format!("{value} {unit}");
    }
    let binary = if base == 1024 { "i" } else { "" };
    format!("{scaled:.2} {}{binary}{unit}", MAGNITUDES[exp])
}

pub fn format_bytes(value: u64) -> String {
    format_magnitude(value, 1024, "B")
}

pub fn format_packets(value: u64) -> String {
    format_magnitude(value, 1000, "Pkts.")
}

/// One labeled counter line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatLine {
    pub label: String,
    pub value: String,
}

/// Ordered traffic counter breakdown for one port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatsBreakdown {
    pub lines: Vec<StatLine>,
}

impl StatsBreakdown {
    /// Width of the longest label, for aligned plain-text rendering.
    pub fn label_width(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.label.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// One `Label: value` line per counter, values aligned.
    pub fn to_text(&self) -> String {
        let width = self.label_width() + 1;
        self.lines
            .iter()
            .map(|l| format!("{:<width$} {}", format!("{}:", l.label), l.value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build the ten-line counter breakdown in fixed order. Absent counters
/// count as zero.
pub fn format_stats<T>(tr: &T, stats: &CounterSet) -> StatsBreakdown
where
    T: Translator + ?Sized,
{
    let v = |c: Option<u64>| c.unwrap_or(0);
    let rows = [
        ("Received bytes", format_bytes(v(stats.rx_bytes))),
        ("Received packets", format_packets(v(stats.rx_packets))),
        ("Received multicast", format_packets(v(stats.multicast))),
        ("Receive errors", format_packets(v(stats.rx_errors))),
        ("Receive dropped", format_packets(v(stats.rx_dropped))),
        ("Transmitted bytes", format_bytes(v(stats.tx_bytes))),
        ("Transmitted packets", format_packets(v(stats.tx_packets))),
        ("Transmit errors", format_packets(v(stats.tx_errors))),
        ("Transmit dropped", format_packets(v(stats.tx_dropped))),
        ("Collisions seen", v(stats.collisions).to_string()),
    ];

    StatsBreakdown {
        lines: rows
            .into_iter()
            .map(|(label, value)| StatLine {
                label: tr.translate(label).into_owned(),
                value,
            })
            .collect(),
    }
}
