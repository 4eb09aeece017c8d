//! Error types for the greeting harness.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the harness error type.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Errors raised by the harness itself.
///
/// A failing assertion is not an error: it is recorded as an
/// [`Outcome`](crate::Outcome) in the report.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Failed to read a suite file.
    #[error("failed to read suite '{}': {source}", path.display())]
    ReadSuite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A suite file is not valid TOML or does not match the suite layout.
    #[error("failed to parse suite '{}': {source}", path.display())]
    ParseSuite {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The suite declares no cases.
    #[error("suite contains no cases")]
    EmptySuite,

    /// Failed to write a rendered report.
    #[error("failed to write report '{}': {source}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a report.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
