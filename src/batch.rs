use crate::distance::DistanceModel;
use crate::error::{SourceError, TripError};
use crate::features::extract_with;
use crate::types::{FeatureRow, TripRecord};

/// A trip that did not make it into the report.
#[derive(Debug)]
pub struct TripFailure {
    pub name: String,
    pub error: TripError,
}

/// Outcome of one batch: successes in input order, failures alongside.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub rows: Vec<FeatureRow>,
    pub failures: Vec<TripFailure>,
}

impl BatchReport {
    /// True when the batch saw no inputs at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.rows.len() + self.failures.len()
    }
}

/// Extract features from every input. A bad input is recorded as a failure
/// and never stops the rest of the batch.
pub fn process<I, M>(inputs: I, model: &M) -> BatchReport
where
    I: IntoIterator<Item = (String, Result<TripRecord, SourceError>)>,
    M: DistanceModel + ?Sized,
{
    let mut report = BatchReport::default();

    for (name, record) in inputs {
        let result = record
            .map_err(TripError::from)
            .and_then(|trip| extract_with(&trip, model).map_err(TripError::from));

        match result {
            Ok(row) => {
                tracing::info!("processed {}", name);
                report.rows.push(row);
            }
            Err(error) => {
                tracing::warn!("skipping {}: {}", name, error);
                report.failures.push(TripFailure { name, error });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::FlatEarth;
    use crate::error::ExtractionError;
    use crate::types::Sample;
    use chrono::DateTime;
    use std::path::PathBuf;

    fn trip(id: &str, n_points: usize) -> TripRecord {
        let points = (0..n_points)
            .map(|i| Sample {
                timestamp: DateTime::from_timestamp(i as i64 * 60, 0).unwrap(),
                latitude: i as f64 * 0.01,
                longitude: 0.0,
                acceleration: 0.5,
            })
            .collect();
        TripRecord {
            session_id: id.to_string(),
            driver_id: "d".to_string(),
            vehicle_id: "v".to_string(),
            duration_sec: 0.0,
            distance_km: 0.0,
            points,
        }
    }

    fn parse_failure(name: &str) -> Result<TripRecord, SourceError> {
        let source = serde_json::from_str::<TripRecord>("{").unwrap_err();
        Err(SourceError::Parse {
            path: PathBuf::from(name),
            source,
        })
    }

    #[test]
    fn test_malformed_record_is_isolated() {
        let inputs = vec![
            ("trip1.json".to_string(), Ok(trip("one", 3))),
            ("trip2.json".to_string(), parse_failure("trip2.json")),
            ("trip3.json".to_string(), Ok(trip("three", 2))),
        ];

        let report = process(inputs, &FlatEarth);
        let ids: Vec<&str> = report.rows.iter().map(|r| r.session_id.as_str()).collect();
        assert_eq!(ids, vec!["one", "three"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "trip2.json");
        assert!(matches!(report.failures[0].error, TripError::Source(_)));
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_empty_trip_is_a_failure() {
        let inputs = vec![
            ("trip1.json".to_string(), Ok(trip("empty", 0))),
            ("trip2.json".to_string(), Ok(trip("ok", 1))),
        ];

        let report = process(inputs, &FlatEarth);
        assert_eq!(report.rows.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            TripError::Extraction(ExtractionError::EmptyTrip { .. })
        ));
    }

    #[test]
    fn test_no_inputs() {
        let report = process(Vec::new(), &FlatEarth);
        assert!(report.is_empty());
        assert_eq!(report.total(), 0);
    }
}
