//! Output formatting for comparison views

use crate::view::{CompareView, HEADERS, StockRow};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use std::fmt;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Terminal table
    #[default]
    Table,
    /// HTML fragment for the compare panel
    Html,
    /// View model as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}' (expected table, html or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => f.write_str("table"),
            Self::Html => f.write_str("html"),
            Self::Json => f.write_str("json"),
        }
    }
}

pub trait Formatter: Send + Sync {
    fn format(&self) -> OutputFormat;
    fn format_view(&self, view: &CompareView) -> String;
    fn format_message(&self, message: &str) -> String;
}

pub struct TableFormatter;

impl TableFormatter {
    fn render_table(rows: &[StockRow]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(HEADERS);

        for row in rows {
            let mut cells = vec![Cell::new(format!("{}\n{}", row.symbol, row.name))];
            cells.extend(
                row.values()
                    .into_iter()
                    .map(|v| Cell::new(v).set_alignment(CellAlignment::Right)),
            );
            table.add_row(cells);
        }

        table.to_string()
    }
}

impl Formatter for TableFormatter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Table
    }

    fn format_view(&self, view: &CompareView) -> String {
        match view {
            CompareView::Message(message) => self.format_message(message),
            CompareView::Table {
                rows,
                narrative,
                mappings,
            } => {
                let mut output = String::new();
                if !mappings.is_empty() {
                    output.push_str(&format!("Resolved: {}\n", mappings.join(", ")));
                }
                output.push_str(&Self::render_table(rows));
                if let Some(narrative) = narrative {
                    output.push('\n');
                    output.push_str(narrative);
                }
                output
            }
        }
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}

/// Escape text for interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn format_view(&self, view: &CompareView) -> String {
        let (rows, narrative, mappings) = match view {
            CompareView::Message(message) => return self.format_message(message),
            CompareView::Table {
                rows,
                narrative,
                mappings,
            } => (rows, narrative, mappings),
        };

        let mut html = String::new();
        if !mappings.is_empty() {
            html.push_str("<div class=\"compare-map\">Resolved: ");
            for mapping in mappings {
                html.push_str(&format!("<span>{}</span>", escape_html(mapping)));
            }
            html.push_str("</div>\n");
        }

        html.push_str("<table class=\"compare-table\">\n  <thead>\n    <tr>");
        for header in HEADERS {
            html.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        html.push_str("</tr>\n  </thead>\n  <tbody>\n");

        for row in rows {
            html.push_str(&format!(
                "    <tr><td><b>{}</b><div class=\"compare-name\">{}</div></td>",
                escape_html(&row.symbol),
                escape_html(&row.name)
            ));
            for value in row.values() {
                html.push_str(&format!("<td>{}</td>", escape_html(value)));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("  </tbody>\n</table>\n");

        if let Some(narrative) = narrative {
            html.push_str(&self.format_message(narrative));
        }
        html
    }

    fn format_message(&self, message: &str) -> String {
        format!("<div class=\"compare-note\">{}</div>", escape_html(message))
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn format_view(&self, view: &CompareView) -> String {
        serde_json::to_string_pretty(view).unwrap_or_else(|e| {
            tracing::warn!("Failed to serialize compare view: {}", e);
            self.format_message(&e.to_string())
        })
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({ "kind": "message", "data": message }).to_string()
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(format: OutputFormat) -> Box<dyn Formatter> {
        match format {
            OutputFormat::Table => Box::new(TableFormatter),
            OutputFormat::Html => Box::new(HtmlFormatter),
            OutputFormat::Json => Box::new(JsonFormatter),
        }
    }
}
