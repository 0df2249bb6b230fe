//! Terminal output helpers.
//!
//! Every helper has a JSON-lines form so commands can be scripted with
//! `--json`. Each JSON line is `{"type": ..., "payload": ...}`.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::json;

/// Output settings taken from global CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON lines instead of human-readable text.
    pub json: bool,
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Apply output settings. Call before any other helper.
pub fn configure(config: OutputConfig) {
    *config_cell().write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    config_cell().read().json
}

/// Print the application name and version.
pub fn header(version: &str) {
    if is_json() {
        emit_json_line("header", json!({ "app": "propedge", "version": version }));
        return;
    }
    println!("{} {}", "propedge".bold(), version.dimmed());
    println!();
}

/// Print a section title.
pub fn section(title: &str) {
    if is_json() {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    if is_json() {
        emit_json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    println!("  {:<14} {}", label.dimmed(), value);
}

pub fn success(message: &str) {
    if is_json() {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

pub fn warning(message: &str) {
    if is_json() {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

pub fn note(message: &str) {
    if is_json() {
        emit_json_line("note", json!({ "message": message }));
        return;
    }
    println!("  {}", message.dimmed());
}

/// Print pre-rendered content (a table), indented.
pub fn lines(content: &str) {
    if is_json() {
        emit_json_line("lines", json!({ "content": content }));
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a JSON value as-is.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

/// Green in text mode.
pub fn positive(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.green())
}

/// Red in text mode.
pub fn negative(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.red())
}

/// Cyan in text mode.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.cyan())
}

/// Dimmed in text mode.
pub fn muted(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.dimmed())
}

/// Color a signed amount by its sign.
pub fn signed(value: f64, text: impl Display) -> String {
    if value > 0.0 {
        positive(text)
    } else if value < 0.0 {
        negative(text)
    } else {
        text.to_string()
    }
}
