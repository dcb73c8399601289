//! Output formatting: table, JSON, YAML, plain.
//!
//! Structured formats serialize the whole `ApiResponse` (status, redacted
//! request, result, error). Table and plain render only the result: nested
//! configuration objects are flattened into `PATH | VALUE` rows, operational
//! text is printed as-is.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};
use vyos_api::ApiResponse;

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Success marker line for commands whose result is empty.
pub fn done(message: &str, color: bool) -> String {
    if color {
        format!("{} {message}", "✓".green())
    } else {
        format!("✓ {message}")
    }
}

// ── Render dispatcher ────────────────────────────────────────────────

/// Render a response in the chosen format.
///
/// `None` means there is nothing worth printing (an empty result in table
/// or plain mode).
pub fn render_response(format: &OutputFormat, resp: &ApiResponse) -> Option<String> {
    let out = match format {
        OutputFormat::Json => render_json_pretty(resp),
        OutputFormat::JsonCompact => render_json_compact(resp),
        OutputFormat::Yaml => render_yaml(resp),
        OutputFormat::Table => render_table(&resp.result),
        OutputFormat::Plain => render_plain(&resp.result),
    };
    (!out.is_empty()).then_some(out)
}

/// Whether failed responses are still printed on stdout in this format.
pub fn is_structured(format: &OutputFormat) -> bool {
    matches!(
        format,
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml
    )
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

#[derive(Debug, PartialEq, Eq, Tabled)]
struct NodeRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn render_table(result: &Value) -> String {
    match result {
        Value::Object(map) if !map.is_empty() => {
            let mut rows = Vec::new();
            flatten(result, &mut Vec::new(), &mut rows);
            Table::new(rows).with(Style::rounded()).to_string()
        }
        other => render_plain(other),
    }
}

fn render_plain(result: &Value) -> String {
    match result {
        Value::Null => String::new(),
        Value::String(text) => text.trim_end().to_owned(),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join("\n"),
        Value::Object(_) => {
            let mut rows = Vec::new();
            flatten(result, &mut Vec::new(), &mut rows);
            rows.into_iter()
                .map(|row| {
                    if row.value.is_empty() {
                        row.path
                    } else {
                        format!("{} {}", row.path, row.value)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        other => scalar(other),
    }
}

/// Walk a configuration object depth-first, emitting one row per leaf.
///
/// Valueless nodes (`{}`) become rows with an empty value; multi-value
/// leaves are joined with `, `.
fn flatten<'a>(value: &'a Value, prefix: &mut Vec<&'a str>, rows: &mut Vec<NodeRow>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                prefix.push(key);
                flatten(child, prefix, rows);
                prefix.pop();
            }
        }
        Value::Object(_) => rows.push(NodeRow {
            path: prefix.join(" "),
            value: String::new(),
        }),
        Value::Array(items) => rows.push(NodeRow {
            path: prefix.join(" "),
            value: items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        }),
        leaf => rows.push(NodeRow {
            path: prefix.join(" "),
            value: scalar(leaf),
        }),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}
