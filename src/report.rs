use crate::error::ReportError;
use crate::types::FeatureRow;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column order of the feature report.
pub const HEADER: [&str; 10] = [
    "sessionId",
    "driverId",
    "vehicleId",
    "durationSec",
    "distanceKm",
    "avgSpeed",
    "maxSpeed",
    "avgAccel",
    "maxAccel",
    "minAccel",
];

/// Anything that accepts the finished feature rows.
pub trait ReportSink {
    fn write_rows(&mut self, rows: &[FeatureRow]) -> Result<(), ReportError>;
}

/// One CSV line. Derived metrics carry exactly two decimals.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    pub session_id: String,
    pub driver_id: String,
    pub vehicle_id: String,
    pub duration_sec: String,
    pub distance_km: String,
    pub avg_speed: String,
    pub max_speed: String,
    pub avg_accel: String,
    pub max_accel: String,
    pub min_accel: String,
}

/// Fixed-point rendering with two decimals. Uses the std formatter, which
/// rounds the exact binary value to nearest (exact ties to even).
pub fn fixed2(v: f64) -> String {
    format!("{:.2}", v)
}

impl From<&FeatureRow> for FeatureRecord {
    fn from(row: &FeatureRow) -> Self {
        Self {
            session_id: row.session_id.clone(),
            driver_id: row.driver_id.clone(),
            vehicle_id: row.vehicle_id.clone(),
            duration_sec: row.duration_sec.to_string(),
            distance_km: row.distance_km.to_string(),
            avg_speed: fixed2(row.avg_speed),
            max_speed: fixed2(row.max_speed),
            avg_accel: fixed2(row.avg_accel),
            max_accel: fixed2(row.max_accel),
            min_accel: fixed2(row.min_accel),
        }
    }
}

/// CSV report writer. The header goes out once, on the first call, even
/// for zero rows.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        Self {
            writer,
            header_written: false,
        }
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, ReportError> {
        self.writer
            .into_inner()
            .map_err(|e| ReportError::Io(e.into_error()))
    }
}

impl CsvSink<File> {
    pub fn create(path: &Path) -> Result<Self, ReportError> {
        let file = File::create(path).map_err(|source| ReportError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> ReportSink for CsvSink<W> {
    fn write_rows(&mut self, rows: &[FeatureRow]) -> Result<(), ReportError> {
        if !self.header_written {
            self.writer.write_record(HEADER)?;
            self.header_written = true;
        }
        for row in rows {
            self.writer.serialize(FeatureRecord::from(row))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
