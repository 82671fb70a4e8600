use crate::distance::{DistanceModel, FlatEarth};
use crate::error::ExtractionError;
use crate::types::{FeatureRow, Sample, TripRecord};
use chrono::{DateTime, Utc};

const SECS_PER_HOUR: f64 = 3600.0;

/// Summarise one trip using the [`FlatEarth`] distance model.
pub fn extract(trip: &TripRecord) -> Result<FeatureRow, ExtractionError> {
    extract_with(trip, &FlatEarth)
}

/// Summarise one trip into speed and acceleration statistics.
///
/// Speed metrics are 0 when no consecutive pair has a positive time step
/// (fewer than two points, or all timestamps equal/decreasing).
/// Acceleration metrics cover every sample and need at least one, so a trip
/// without points is rejected with [`ExtractionError::EmptyTrip`].
pub fn extract_with<M>(trip: &TripRecord, model: &M) -> Result<FeatureRow, ExtractionError>
where
    M: DistanceModel + ?Sized,
{
    let (avg_accel, max_accel, min_accel) =
        accel_stats(&trip.points).ok_or_else(|| ExtractionError::EmptyTrip {
            session_id: trip.session_id.clone(),
        })?;

    let speeds = speed_series(&trip.points, model);
    let max_speed = speeds.iter().copied().reduce(f64::max).unwrap_or(0.0);
    // summation rounding can push the mean past the max
    let avg_speed = mean(&speeds).unwrap_or(0.0).min(max_speed);

    Ok(FeatureRow {
        session_id: trip.session_id.clone(),
        driver_id: trip.driver_id.clone(),
        vehicle_id: trip.vehicle_id.clone(),
        duration_sec: trip.duration_sec,
        distance_km: trip.distance_km,
        avg_speed,
        max_speed,
        avg_accel,
        max_accel,
        min_accel,
    })
}

/// Speed estimates in km/h, one per consecutive pair with a positive time step.
/// Pairs with duplicate or out-of-order timestamps contribute nothing.
pub fn speed_series<M>(points: &[Sample], model: &M) -> Vec<f64>
where
    M: DistanceModel + ?Sized,
{
    points
        .windows(2)
        .filter_map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            let dt = elapsed_secs(prev.timestamp, curr.timestamp);
            if dt <= 0.0 {
                return None;
            }
            Some(model.distance_km(prev, curr) / dt * SECS_PER_HOUR)
        })
        .collect()
}

fn elapsed_secs(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

fn accel_stats(points: &[Sample]) -> Option<(f64, f64, f64)> {
    let accels: Vec<f64> = points.iter().map(|p| p.acceleration).collect();
    let avg = mean(&accels)?;
    let max = accels.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = accels.iter().copied().fold(f64::INFINITY, f64::min);
    Some((avg.clamp(min, max), max, min))
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
