//! Error types for result decoding and report rendering.

use thiserror::Error;

/// Errors raised while decoding results or rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A colour swap was requested for a result whose colour is unknown.
    #[error("could not reverse colour for {0}")]
    ReverseUnknownColour(String),

    /// A result cell held no characters to decode.
    #[error("empty result token")]
    EmptyResultToken,

    /// No player carries a single round result, so no round span exists.
    #[error("no round results found for any player")]
    NoResults,

    /// Extracted data violates a model invariant.
    #[error("invalid player data: {0}")]
    Invariant(String),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results with [`ReportError`].
pub type Result<T> = std::result::Result<T, ReportError>;
