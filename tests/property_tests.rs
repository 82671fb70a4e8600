//! Property tests for feature extraction.
//!
//! Run with: cargo test --test property_tests

use chrono::DateTime;
use proptest::prelude::*;
use trip_features::{extract, Sample, TripRecord};

fn trip(points: Vec<Sample>) -> TripRecord {
    TripRecord {
        session_id: "prop".to_string(),
        driver_id: "driver".to_string(),
        vehicle_id: "vehicle".to_string(),
        duration_sec: 60.0,
        distance_km: 1.5,
        points,
    }
}

/// Build samples from (millisecond offset, lat, lon, accel) tuples,
/// accumulating offsets onto a fixed start time.
fn samples(steps: Vec<(i64, f64, f64, f64)>, sign: i64) -> Vec<Sample> {
    let mut t_ms = 1_700_000_000_000i64;
    steps
        .into_iter()
        .map(|(dt_ms, lat, lon, accel)| {
            t_ms += sign * dt_ms;
            Sample {
                timestamp: DateTime::from_timestamp_millis(t_ms).unwrap(),
                latitude: lat,
                longitude: lon,
                acceleration: accel,
            }
        })
        .collect()
}

fn step(dt: std::ops::RangeInclusive<i64>) -> impl Strategy<Value = (i64, f64, f64, f64)> {
    (dt, -60.0..60.0f64, -180.0..180.0f64, -20.0..20.0f64)
}

proptest! {
    /// Acceleration mean sits between its min and max.
    #[test]
    fn accel_mean_within_range(steps in prop::collection::vec(step(0..=60_000), 1..40)) {
        let row = extract(&trip(samples(steps, 1))).unwrap();
        prop_assert!(row.min_accel <= row.avg_accel, "min={} avg={}", row.min_accel, row.avg_accel);
        prop_assert!(row.avg_accel <= row.max_accel, "avg={} max={}", row.avg_accel, row.max_accel);
    }

    /// Equal accelerations give a mean equal to that value.
    #[test]
    fn accel_mean_of_constant(accel in -20.0..20.0f64, n in 1usize..30) {
        let steps = (0..n).map(|_| (1_000, 0.0, 0.0, accel)).collect();
        let row = extract(&trip(samples(steps, 1))).unwrap();
        prop_assert_eq!(row.avg_accel, accel);
        prop_assert_eq!(row.min_accel, accel);
        prop_assert_eq!(row.max_accel, accel);
    }

    /// Strictly increasing timestamps give 0 <= avgSpeed <= maxSpeed.
    #[test]
    fn speed_mean_within_range(steps in prop::collection::vec(step(1..=60_000), 2..40)) {
        let row = extract(&trip(samples(steps, 1))).unwrap();
        prop_assert!(row.avg_speed >= 0.0);
        prop_assert!(row.max_speed >= 0.0);
        prop_assert!(row.avg_speed <= row.max_speed, "avg={} max={}", row.avg_speed, row.max_speed);
    }

    /// A single point has no speed and its own acceleration for every aggregate.
    #[test]
    fn single_point_trip((dt, lat, lon, accel) in step(0..=60_000)) {
        let row = extract(&trip(samples(vec![(dt, lat, lon, accel)], 1))).unwrap();
        prop_assert_eq!(row.avg_speed, 0.0);
        prop_assert_eq!(row.max_speed, 0.0);
        prop_assert_eq!(row.avg_accel, accel);
        prop_assert_eq!(row.max_accel, accel);
        prop_assert_eq!(row.min_accel, accel);
    }

    /// Non-increasing timestamps never contribute to the speed series.
    #[test]
    fn non_positive_steps_give_zero_speed(steps in prop::collection::vec(step(0..=60_000), 1..40)) {
        let row = extract(&trip(samples(steps, -1))).unwrap();
        prop_assert_eq!(row.avg_speed, 0.0);
        prop_assert_eq!(row.max_speed, 0.0);
    }

    /// Identifiers and precomputed scalars pass through unchanged.
    #[test]
    fn passthrough_fields(duration in 0.0..1e6f64, distance in 0.0..1e4f64, id in "[a-z0-9-]{1,16}") {
        let mut t = trip(samples(vec![(0, 0.0, 0.0, 0.0)], 1));
        t.session_id = id.clone();
        t.duration_sec = duration;
        t.distance_km = distance;
        let row = extract(&t).unwrap();
        prop_assert_eq!(row.session_id, id);
        prop_assert_eq!(row.duration_sec, duration);
        prop_assert_eq!(row.distance_km, distance);
    }
}
