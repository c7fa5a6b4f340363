//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`
//! with translated headers, structured formats use serde, plain emits one
//! device name per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use ethinfo_core::{EthernetInfo, PortReport, StatsBreakdown};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

fn paint_status(report: &PortReport, color: bool) -> String {
    match (color, report.carrier) {
        (false, _) => report.link_status.clone(),
        (true, true) => report.link_status.green().to_string(),
        (true, false) => report.link_status.red().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render the port overview.
///
/// - `table`: title plus a table with the translated column headers,
///   optionally followed by each port's counter breakdown
/// - `json` / `json-compact` / `yaml`: the full [`EthernetInfo`]
/// - `plain`: one device name per line
pub fn render_ports(
    format: OutputFormat,
    info: &EthernetInfo,
    with_stats: bool,
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(render_ports_table(info, with_stats, color)),
        OutputFormat::Plain => Ok(info
            .ports
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join("\n")),
        structured => render_structured(structured, info),
    }
}

/// Render a single port's counter breakdown.
pub fn render_stats(
    format: OutputFormat,
    report: &PortReport,
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table | OutputFormat::Plain => Ok(stats_block(report, color, "")),
        structured => render_structured(structured, report),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_ports_table(info: &EthernetInfo, with_stats: bool, color: bool) -> String {
    let mut builder = Builder::default();
    builder.push_record(info.headers.clone());
    for report in &info.ports {
        let [name, _, speed, duplex] = report.cells();
        builder.push_record([
            name.to_owned(),
            paint_status(report, color),
            speed.to_owned(),
            duplex.to_owned(),
        ]);
    }
    let table = builder.build().with(Style::rounded()).to_string();

    let title = if color {
        info.title.bold().to_string()
    } else {
        info.title.clone()
    };

    let mut out = format!("{title}\n{table}");
    if with_stats {
        for report in &info.ports {
            out.push_str("\n\n");
            out.push_str(&stats_block(report, color, "  "));
        }
    }
    out
}

fn stats_block(report: &PortReport, color: bool, indent: &str) -> String {
    let heading = if color {
        report.name.bold().to_string()
    } else {
        report.name.clone()
    };
    let mut out = format!("{heading} ({})", paint_status(report, color));
    if let Some(ref title) = report.speed_title {
        out.push_str(&format!("\n{indent}{title}"));
    }
    out.push('\n');
    out.push_str(&indent_lines(&report.stats, indent));
    out
}

fn indent_lines(stats: &StatsBreakdown, indent: &str) -> String {
    stats
        .to_text()
        .lines()
        .map(|line| format!("{indent}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_structured<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?.trim_end().to_owned(),
        _ => serde_json::to_string_pretty(data)?,
    })
}
