//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use storefront_core::OrderStatus;

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Order status label, colored by how far along the order is.
pub fn status_label(status: OrderStatus, color: bool) -> String {
    let label = status.to_string();
    if !color {
        return label;
    }
    match status {
        OrderStatus::Pending => label.yellow().to_string(),
        OrderStatus::Processing => label.cyan().to_string(),
        OrderStatus::Shipped => label.blue().to_string(),
        OrderStatus::Delivered => label.green().to_string(),
        OrderStatus::Cancelled => label.red().to_string(),
    }
}

/// `Active` / `Inactive` badge for brands.
pub fn active_label(active: bool, color: bool) -> String {
    match (active, color) {
        (true, true) => "active".green().to_string(),
        (false, true) => "inactive".dimmed().to_string(),
        (true, false) => "active".into(),
        (false, false) => "inactive".into(),
    }
}

pub fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
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

/// Status line on stderr, respecting quiet mode.
pub fn notice(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {e}\"}}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize, Tabled)]
    struct Row {
        id: String,
        name: String,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: "b1".into(),
                name: "Acme".into(),
            },
            Row {
                id: "b2".into(),
                name: "Globex".into(),
            },
        ]
    }

    fn row_copy(r: &Row) -> Row {
        Row {
            id: r.id.clone(),
            name: r.name.clone(),
        }
    }

    #[test]
    fn plain_emits_one_id_per_line() {
        let out = render_list(&OutputFormat::Plain, &rows(), row_copy, |r| r.id.clone());
        assert_eq!(out, "b1\nb2");
    }

    #[test]
    fn compact_json_is_single_line() {
        let out = render_list(&OutputFormat::JsonCompact, &rows(), row_copy, |r| r.id.clone());
        assert_eq!(out, r#"[{"id":"b1","name":"Acme"},{"id":"b2","name":"Globex"}]"#);
    }

    #[test]
    fn table_contains_cells() {
        let out = render_list(&OutputFormat::Table, &rows(), row_copy, |r| r.id.clone());
        assert!(out.contains("Globex"));
    }

    #[test]
    fn status_label_without_color_is_plain() {
        assert_eq!(status_label(OrderStatus::Shipped, false), "shipped");
        assert!(status_label(OrderStatus::Shipped, true).contains("shipped"));
    }
}
