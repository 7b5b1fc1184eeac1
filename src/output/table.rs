//
//  pantry-cli
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Formatting
//!
//! Table rendering on top of `comfy-table`, plus small cell formatters.
//!
//! ```rust,no_run
//! use pantry_cli::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["ID", "NAME"])
//!     .row(["1", "Milk"])
//!     .print();
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// A table with the default preset and dynamic column widths.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Fluent table construction.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    /// Enables or disables colored headers. Call before [`headers`](Self::headers).
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a list status (`active`, `completed`, ...).
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_lowercase().as_str() {
        "active" | "open" => style(status).green().to_string(),
        "completed" | "purchased" | "done" => style(status).blue().to_string(),
        "archived" | "cancelled" => style(status).dim().to_string(),
        _ => status.to_string(),
    }
}

pub fn format_bool(value: bool, color: bool) -> String {
    let text = if value { "Yes" } else { "No" };
    if !color {
        return text.to_string();
    }

    use console::style;
    if value {
        style(text).green().to_string()
    } else {
        style(text).dim().to_string()
    }
}

/// Renders a quantity without a trailing `.0`, followed by its unit.
pub fn format_quantity(quantity: Option<f64>, unit: Option<&str>) -> String {
    let amount = match quantity {
        Some(q) if q.fract() == 0.0 => format!("{}", q as i64),
        Some(q) => format!("{}", q),
        None => "-".to_string(),
    };
    match unit {
        Some(unit) if quantity.is_some() && !unit.is_empty() => format!("{} {}", amount, unit),
        _ => amount,
    }
}

/// Shortens `s` to at most `max_chars` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars > 3 {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_builder_renders_rows() {
        let table = TableBuilder::new()
            .color(false)
            .headers(["ID", "NAME"])
            .row(["1", "Milk"])
            .build()
            .to_string();
        assert!(table.contains("NAME"));
        assert!(table.contains("Milk"));
    }

    #[test]
    fn test_format_bool_plain() {
        assert_eq!(format_bool(true, false), "Yes");
        assert_eq!(format_bool(false, false), "No");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(Some(2.0), Some("kg")), "2 kg");
        assert_eq!(format_quantity(Some(1.5), None), "1.5");
        assert_eq!(format_quantity(None, Some("kg")), "-");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long name", 8), "a ver...");
        assert_eq!(truncate("crème brûlée", 6), "crè...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
