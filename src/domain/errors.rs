//! Domain errors for the tilewatch system.

use thiserror::Error;

use crate::domain::models::Tile;

/// Domain-level errors raised at the provider boundary.
///
/// The build history cache never produces one of these; every failure
/// originates from fetching builds or from invalid tile parameters.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Provider request failed: {0}")]
    ProviderRequest(String),

    #[error("Provider rejected credentials ({status}): {body}")]
    ProviderAuth { status: u16, body: String },

    #[error("Provider returned {status}: {body}")]
    ProviderResponse { status: u16, body: String },

    #[error("Provider response could not be parsed: {0}")]
    ProviderParse(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// How loudly the dashboard should surface a failed tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// The provider could not be reached or answered garbage.
    Error,
    /// The provider answered correctly but had nothing to report.
    Warning,
}

/// Failure signal handed to the tile rendering layer.
///
/// Carries the partially built tile (label and message only) so the
/// dashboard can still show which target failed.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TileError {
    #[source]
    pub source: Option<DomainError>,
    pub message: String,
    pub severity: Severity,
    pub tile: Tile,
}

impl TileError {
    /// Error-severity signal wrapping a provider failure.
    pub fn fetch_failed(tile: Tile, source: DomainError) -> Self {
        Self {
            source: Some(source),
            message: "unable to find build".to_string(),
            severity: Severity::Error,
            tile,
        }
    }

    /// Warning-severity signal for a reachable provider with no builds.
    pub fn no_build(tile: Tile) -> Self {
        Self {
            source: None,
            message: "unable to find build".to_string(),
            severity: Severity::Warning,
            tile,
        }
    }

    /// Error-severity signal for parameters rejected before any request.
    pub fn invalid_params(tile: Tile, source: DomainError) -> Self {
        Self {
            source: Some(source),
            message: "invalid build parameters".to_string(),
            severity: Severity::Error,
            tile,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}
