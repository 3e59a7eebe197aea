//! Output formatting: table, JSON, YAML, plain.
//!
//! Table uses `tabled`, structured formats use serde, plain emits one
//! `key=value` line per statistic.

use std::io::{self, IsTerminal, Write};

use tabled::{Table, Tabled, settings::Style};

use tsw_core::{ControlKind, ControllableProperty, Report, Statistics};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

// ── Rows ─────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct StatisticRow<'a> {
    #[tabled(rename = "Property")]
    key: &'a str,
    #[tabled(rename = "Value")]
    value: &'a str,
}

#[derive(Tabled)]
struct ControlRow {
    #[tabled(rename = "Control")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Accepts")]
    accepts: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&ControllableProperty> for ControlRow {
    fn from(p: &ControllableProperty) -> Self {
        let (kind, accepts) = match &p.kind {
            ControlKind::Switch => ("switch", "0 | 1".to_owned()),
            ControlKind::Slider {
                range_start,
                range_end,
            } => ("slider", format!("{range_start}..={range_end}")),
            ControlKind::Dropdown { options } => ("dropdown", options.join(" | ")),
            ControlKind::Text => ("text", String::new()),
        };
        Self {
            name: p.name.clone(),
            kind: kind.into(),
            accepts,
            value: p.value.as_ref().map(ToString::to_string).unwrap_or_default(),
        }
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Keep only statistics whose key contains `filter` (case-insensitive).
pub fn filter_statistics(statistics: &Statistics, filter: Option<&str>) -> Statistics {
    let Some(needle) = filter.map(str::to_lowercase) else {
        return statistics.clone();
    };
    statistics
        .iter()
        .filter(|(key, _)| key.to_lowercase().contains(&needle))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Render the statistics map in the chosen format.
pub fn render_statistics(format: OutputFormat, statistics: &Statistics) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(statistics_table(statistics)),
        OutputFormat::Json => render_json(statistics, false),
        OutputFormat::JsonCompact => render_json(statistics, true),
        OutputFormat::Yaml => render_yaml(statistics),
        OutputFormat::Plain => Ok(plain_lines(statistics)),
    }
}

/// Render statistics plus the controllable property list.
pub fn render_report(format: OutputFormat, report: &Report) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let controls: Vec<ControlRow> = report
                .controls
                .iter()
                .filter(|p| !p.is_placeholder())
                .map(ControlRow::from)
                .collect();
            let mut out = statistics_table(&report.statistics);
            if !controls.is_empty() {
                out.push('\n');
                out.push_str(&Table::new(controls).with(Style::rounded()).to_string());
            }
            Ok(out)
        }
        OutputFormat::Json => render_json(report, false),
        OutputFormat::JsonCompact => render_json(report, true),
        OutputFormat::Yaml => render_yaml(report),
        OutputFormat::Plain => {
            let mut out = plain_lines(&report.statistics);
            for control in report.controls.iter().filter(|p| !p.is_placeholder()) {
                let value = control.value.as_ref().map(ToString::to_string).unwrap_or_default();
                out.push('\n');
                out.push_str(&format!("{}={value}", control.name));
            }
            Ok(out)
        }
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

fn statistics_table(statistics: &Statistics) -> String {
    let rows = statistics.iter().map(|(key, value)| StatisticRow { key, value });
    Table::new(rows).with(Style::rounded()).to_string()
}

fn plain_lines(statistics: &Statistics) -> String {
    statistics
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(|e| CliError::Render(e.to_string()))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tsw_core::{ControlValue, Statistics};

    use super::*;

    fn sample() -> Statistics {
        Statistics::from([
            ("General#DeviceModel".to_owned(), "TSW-770".to_owned()),
            ("Network#Hostname".to_owned(), "lobby-panel".to_owned()),
        ])
    }

    #[test]
    fn plain_renders_key_value_lines() {
        let out = render_statistics(OutputFormat::Plain, &sample()).unwrap();
        assert_eq!(out, "General#DeviceModel=TSW-770\nNetwork#Hostname=lobby-panel");
    }

    #[test]
    fn filter_matches_case_insensitively() {
        let filtered = filter_statistics(&sample(), Some("network"));
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("Network#Hostname"));
        assert_eq!(filter_statistics(&sample(), None).len(), 2);
    }

    #[test]
    fn report_json_carries_control_hints() {
        let report = Report {
            statistics: sample(),
            controls: vec![ControllableProperty {
                name: "Display#AudioMute".into(),
                kind: ControlKind::Switch,
                value: Some(ControlValue::Number(1.0)),
            }],
        };
        let json: serde_json::Value =
            serde_json::from_str(&render_report(OutputFormat::JsonCompact, &report).unwrap())
                .unwrap();
        assert_eq!(json["controls"][0]["type"], "switch");
        assert_eq!(json["controls"][0]["value"], 1.0);
        assert_eq!(json["statistics"]["Network#Hostname"], "lobby-panel");
    }

    #[test]
    fn table_skips_placeholder_control() {
        let report = Report {
            statistics: sample(),
            controls: vec![ControllableProperty::placeholder()],
        };
        let out = render_report(OutputFormat::Table, &report).unwrap();
        assert!(out.contains("TSW-770"));
        assert!(!out.contains("Control"));
    }
}
