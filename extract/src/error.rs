//! Error types for source fetching and result extraction.
//!
//! Every variant aborts the run; nothing here is retried or downgraded to a
//! partial result.

use thiserror::Error;

/// Errors that can occur while fetching or extracting a source.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// HTTP request or response failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parse failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Spreadsheet could not be opened or read.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Rating-list XML could not be read.
    #[error("XML error: {0}")]
    Xml(String),

    /// Result decoding or model failure.
    #[error(transparent)]
    Core(#[from] crosstable_core::ReportError),

    /// A required column header was not found.
    #[error("no column labelled {0:?} in header row")]
    MissingHeader(String),

    /// The element introducing the results section was not found.
    #[error("could not locate {0}")]
    MissingAnchor(String),

    /// The own team appears at neither the home nor the away position.
    #[error("could not identify if we are looking at the home or away team: {0}")]
    SideUndetermined(String),

    /// The source yielded no players.
    #[error("could not parse any players from {0}")]
    NoPlayers(String),

    /// League sources need a rounds specifier.
    #[error("need to specify round numbers for league results")]
    MissingRounds,

    /// Rounds specifier could not be parsed.
    #[error("invalid rounds specifier: {0}")]
    InvalidRounds(String),

    /// Rows were not in the expected order or shape.
    #[error("unexpected table layout: {0}")]
    Layout(String),
}

/// Convenience alias for results with [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;
