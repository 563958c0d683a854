//! Error types for the review-dashboard library.
//!
//! This module provides custom error types using `thiserror` for the
//! loading, enrichment and export paths. Per-record problems never surface
//! here: they degrade to defaults inside the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the review-dashboard application.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The review source file does not exist
    #[error("Review source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// CSV reader/writer errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A sentiment model could not score a text
    #[error("Sentiment model error: {0}")]
    Sentiment(String),

    /// Enrichment did not finish within the configured bound
    #[error("Review enrichment timed out after {0}s")]
    Timeout(u64),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with `DashboardError`
pub type Result<T> = std::result::Result<T, DashboardError>;

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_not_found_message() {
        let err = DashboardError::SourceNotFound(PathBuf::from("assets/missing.csv"));
        assert_eq!(err.to_string(), "Review source not found: assets/missing.csv");
    }

    #[test]
    fn test_from_anyhow() {
        let err: DashboardError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, DashboardError::Other(ref m) if m == "boom"));
    }
}
