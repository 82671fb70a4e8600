use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One recorded driving session, as stored in a `trip*.json` file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub session_id: String,
    pub driver_id: String,
    pub vehicle_id: String,
    pub duration_sec: f64,
    pub distance_km: f64,
    // chronological order
    pub points: Vec<Sample>,
}

/// One timestamped observation of position and acceleration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sample {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,   // degrees
    pub longitude: f64,  // degrees
    pub acceleration: f64,
}

/// Summary statistics for one trip. Values stay numeric here;
/// fixed-point rendering happens in [`crate::report`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub session_id: String,
    pub driver_id: String,
    pub vehicle_id: String,
    pub duration_sec: f64,
    pub distance_km: f64,
    pub avg_speed: f64, // km/h
    pub max_speed: f64, // km/h
    pub avg_accel: f64,
    pub max_accel: f64,
    pub min_accel: f64,
}

pub mod timestamp {
    //! Timestamp decoding for trip samples.
    //!
    //! Accepts RFC 3339 strings, ISO date-times down to minute precision
    //! (with `Z`, an offset, or none, which reads as UTC), bare dates as UTC
    //! midnight, and JSON numbers holding epoch milliseconds.

    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    const MINUTE_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";

    /// Parse a textual timestamp, returning `None` if no supported format matches.
    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_str(s, MINUTE_OFFSET_FORMAT) {
            return Some(dt.with_timezone(&Utc));
        }
        // a trailing `Z` is UTC, same as no offset at all
        let local = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')).unwrap_or(s);
        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(local, fmt) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    fn from_epoch_millis(ms: f64) -> Option<DateTime<Utc>> {
        if !ms.is_finite() {
            return None;
        }
        DateTime::from_timestamp_micros((ms * 1000.0).round() as i64)
    }

    struct TimestampVisitor;

    impl<'de> Visitor<'de> for TimestampVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an ISO-8601 timestamp string or epoch milliseconds")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            parse(v).ok_or_else(|| E::custom(format!("unrecognised timestamp {:?}", v)))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            DateTime::from_timestamp_millis(v)
                .ok_or_else(|| E::custom(format!("epoch millis out of range: {}", v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            let ms = i64::try_from(v)
                .map_err(|_| E::custom(format!("epoch millis out of range: {}", v)))?;
            self.visit_i64(ms)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            from_epoch_millis(v).ok_or_else(|| E::custom(format!("epoch millis out of range: {}", v)))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TimestampVisitor)
    }
}
