//! Table output for tile rounds using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::cli::output::{format_secs, TileReport};
use crate::domain::errors::Severity;
use crate::domain::models::TileStatus;

/// Table formatter for tile reports
pub struct TileTableFormatter {
    use_colors: bool,
}

impl TileTableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn format(&self, reports: &[TileReport]) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(
            ["Tile", "Branch", "Status", "Previous", "Elapsed", "Estimate", "Author"]
                .into_iter()
                .map(|title| Cell::new(title).add_attribute(Attribute::Bold)),
        );

        for report in reports {
            let tile = &report.tile;
            let status_cell = match (tile.status, report.severity) {
                (Some(status), _) => self.status_cell(status),
                (None, Some(Severity::Warning)) => self.status_cell(TileStatus::Warning),
                (None, _) => {
                    let cell = Cell::new(report.error.as_deref().unwrap_or("error"));
                    if self.use_colors {
                        cell.fg(Color::Red)
                    } else {
                        cell
                    }
                }
            };

            table.add_row(vec![
                Cell::new(&tile.label),
                Cell::new(&tile.message),
                status_cell,
                Cell::new(
                    tile.previous_status
                        .map_or_else(|| "-".to_string(), |s| s.to_string()),
                ),
                Cell::new(tile.duration.map_or_else(|| "-".to_string(), format_secs)),
                Cell::new(
                    tile.estimated_duration
                        .map_or_else(|| "-".to_string(), format_secs),
                ),
                Cell::new(tile.author.as_ref().map_or("-", |a| a.name.as_str())),
            ]);
        }

        table.to_string()
    }

    fn status_cell(&self, status: TileStatus) -> Cell {
        if self.use_colors {
            Cell::new(status).fg(status_color(status))
        } else {
            Cell::new(status)
        }
    }
}

impl Default for TileTableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

fn status_color(status: TileStatus) -> Color {
    match status {
        TileStatus::Success => Color::Green,
        TileStatus::Failed => Color::Red,
        TileStatus::Running => Color::Cyan,
        TileStatus::Queued => Color::Yellow,
        TileStatus::Warning => Color::Yellow,
        TileStatus::Aborted => Color::DarkGrey,
        TileStatus::Unknown => Color::White,
    }
}
