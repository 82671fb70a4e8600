//! Error types for the trip feature pipeline.
//!
//! Failures are kept per record: a [`SourceError`] means a trip file could not
//! be read or decoded, an [`ExtractionError`] means a decoded trip could not be
//! summarised. Both are wrapped in [`TripError`] so the batch driver can report
//! them side by side. [`ReportError`] covers the output sink.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Acceleration aggregates are undefined over zero samples.
    #[error("trip {session_id} has no points")]
    EmptyTrip { session_id: String },
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid trip JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot list trip directory {path}: {source}")]
    Discover {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum TripError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to create report {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
