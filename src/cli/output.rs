//! Output formatting utilities for the CLI.

use serde::Serialize;

use crate::domain::errors::{Severity, TileError};
use crate::domain::models::Tile;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// A tile as handed to the dashboard, with the failure signal when there is one.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileReport {
    #[serde(flatten)]
    pub tile: Tile,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl From<Result<Tile, TileError>> for TileReport {
    fn from(result: Result<Tile, TileError>) -> Self {
        match result {
            Ok(tile) => Self {
                tile,
                severity: None,
                error: None,
                cause: None,
            },
            Err(err) => Self {
                cause: err.source.as_ref().map(ToString::to_string),
                severity: Some(err.severity),
                error: Some(err.message),
                tile: err.tile,
            },
        }
    }
}

impl CommandOutput for TileReport {
    fn to_human(&self) -> String {
        let mut line = format!("{} {}", self.tile.label, self.tile.message);

        if let Some(status) = self.tile.status {
            line.push_str(&format!("  {status}"));
        }
        if let Some(previous) = self.tile.previous_status {
            line.push_str(&format!(" (previous {previous})"));
        }
        if let (Some(elapsed), Some(estimate)) = (self.tile.duration, self.tile.estimated_duration) {
            line.push_str(&format!(
                "  {} / ~{}",
                format_secs(elapsed),
                format_secs(estimate)
            ));
        }
        if let Some(author) = &self.tile.author {
            line.push_str(&format!("  by {}", author.name));
        }
        if let (Some(severity), Some(error)) = (self.severity, &self.error) {
            line.push_str(&format!("  [{severity:?}] {error}"));
            if let Some(cause) = &self.cause {
                line.push_str(&format!(": {cause}"));
            }
        }

        line
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Render whole seconds as `1h 2m 3s`, dropping leading zero units.
pub fn format_secs(total: i64) -> String {
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{sign}{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m {seconds}s")
    } else {
        format!("{sign}{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::models::{TileStatus, TileType};

    fn tile() -> Tile {
        let mut tile = Tile::new(TileType::TravisCiBuild);
        tile.label = "monitoror".to_string();
        tile.message = "#master".to_string();
        tile
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(0), "0s");
        assert_eq!(format_secs(59), "59s");
        assert_eq!(format_secs(90), "1m 30s");
        assert_eq!(format_secs(3723), "1h 2m 3s");
        assert_eq!(format_secs(-5), "-5s");
    }

    #[test]
    fn test_report_for_running_tile() {
        let mut running = tile();
        running.status = Some(TileStatus::Running);
        running.previous_status = Some(TileStatus::Failed);
        running.duration = Some(30);
        running.estimated_duration = Some(150);

        let report = TileReport::from(Ok(running));
        assert_eq!(
            report.to_human(),
            "monitoror #master  RUNNING (previous FAILURE)  30s / ~2m 30s"
        );

        let json = report.to_json();
        assert_eq!(json["status"], "RUNNING");
        assert_eq!(json["estimatedDuration"], 150);
        assert!(json.get("severity").is_none());
    }

    #[test]
    fn test_report_for_failed_fetch() {
        let err = TileError::fetch_failed(
            tile(),
            DomainError::ProviderRequest("timed out".to_string()),
        );
        let report = TileReport::from(Err(err));

        let json = report.to_json();
        assert_eq!(json["severity"], "ERROR");
        assert_eq!(json["label"], "monitoror");
        assert_eq!(json["error"], "unable to find build");
        assert!(json["cause"].as_str().unwrap().contains("timed out"));
        assert!(json.get("status").is_none());
        assert!(report.to_human().contains("[Error]"));
    }
}
