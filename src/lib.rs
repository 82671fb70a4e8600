//! Per-trip speed and acceleration features from recorded GPS trip logs.
//!
//! Trip files are decoded by a [`source::TripSource`], summarised by
//! [`features::extract`], and written out through a [`report::ReportSink`].
//! [`batch::process`] ties the three together with per-trip error isolation.

pub mod batch;
pub mod config;
pub mod distance;
pub mod error;
pub mod features;
pub mod report;
pub mod source;
pub mod types;

pub use distance::{DistanceModel, FlatEarth};
pub use error::{ExtractionError, ReportError, SourceError, TripError};
pub use features::{extract, extract_with};
pub use types::{FeatureRow, Sample, TripRecord};
