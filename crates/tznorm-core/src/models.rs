//! Core data types for tznorm.
//!
//! This module defines the primary types used throughout the library:
//! - [`FormatSpec`] - The fixed serialization formats for timestamps
//! - [`NormalizedTimestamp`] - An instant rendered in every output format

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use crate::normalize::{
    to_date_string, to_iso_string, to_legacy_iso_string, to_local_time_string, to_planon_string,
};

/// The fixed serialization formats a timestamp can be bound to.
///
/// Every parse function binds to exactly one spec; the spec is the wire
/// contract with downstream systems, so the patterns must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSpec {
    /// Microsecond precision with a literal `Z` suffix
    /// (e.g. "2024-01-01T09:30:00.000000Z")
    DateTime,
    /// Second precision with a literal `Z` suffix
    /// (e.g. "2024-01-01T09:30:00Z")
    LegacyDateTime,
    /// Calendar date only (e.g. "2024-01-01")
    Date,
    /// Wall-clock time to the minute (e.g. "09:30")
    Time,
}

impl FormatSpec {
    /// The chrono format pattern for this spec.
    ///
    /// The `Z` in the date-time patterns is a literal: these formats are
    /// always written with a UTC suffix no matter which zone the instant
    /// carries. The microsecond variant spells the dot as a literal and
    /// uses `%6f`, which demands exactly six fractional digits on parse
    /// (`%.6f` would treat the whole fraction as optional), so the two
    /// date-time variants never match each other's input.
    pub fn pattern(self) -> &'static str {
        match self {
            FormatSpec::DateTime => "%Y-%m-%dT%H:%M:%S.%6fZ",
            FormatSpec::LegacyDateTime => "%Y-%m-%dT%H:%M:%SZ",
            FormatSpec::Date => "%Y-%m-%d",
            FormatSpec::Time => "%H:%M",
        }
    }
}

impl std::fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatSpec::DateTime => write!(f, "date_time"),
            FormatSpec::LegacyDateTime => write!(f, "legacy_date_time"),
            FormatSpec::Date => write!(f, "date"),
            FormatSpec::Time => write!(f, "time"),
        }
    }
}

/// One instant rendered in every output format the normalizer produces.
///
/// The date-time, legacy and date fields are formatted in the instant's
/// attached zone; the local-time and Planon fields are converted to the
/// fixed local zone first.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedTimestamp {
    /// Microsecond-precision date-time (e.g. "2024-01-01T09:30:00.000000Z").
    pub date_time: String,
    /// Second-precision date-time (e.g. "2024-01-01T09:30:00Z").
    pub legacy_date_time: String,
    /// Calendar date (e.g. "2024-01-01").
    pub date: String,
    /// Wall-clock time in the fixed local zone (e.g. "10:30").
    pub local_time: String,
    /// ISO 8601 with offset in the fixed local zone, for Planon exchange.
    pub planon: String,
    /// Unix timestamp in whole seconds.
    pub epoch_seconds: i64,
    /// IANA name of the instant's attached zone.
    pub timezone: String,
}

impl NormalizedTimestamp {
    /// Render `instant` in every output format.
    pub fn from_instant(instant: &DateTime<Tz>) -> Self {
        Self {
            date_time: to_iso_string(instant),
            legacy_date_time: to_legacy_iso_string(instant),
            date: to_date_string(instant),
            local_time: to_local_time_string(instant),
            planon: to_planon_string(instant),
            epoch_seconds: instant.timestamp(),
            timezone: instant.timezone().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn spec_display() {
        assert_eq!(format!("{}", FormatSpec::DateTime), "date_time");
        assert_eq!(format!("{}", FormatSpec::LegacyDateTime), "legacy_date_time");
        assert_eq!(format!("{}", FormatSpec::Date), "date");
        assert_eq!(format!("{}", FormatSpec::Time), "time");
    }

    #[test]
    fn normalized_timestamp_serializes_every_format() {
        let instant = chrono_tz::UTC
            .with_ymd_and_hms(2024, 1, 1, 9, 30, 0)
            .single()
            .unwrap();
        let rendered = NormalizedTimestamp::from_instant(&instant);
        let json = serde_json::to_value(&rendered).unwrap();

        assert_eq!(json["date_time"], "2024-01-01T09:30:00.000000Z");
        assert_eq!(json["legacy_date_time"], "2024-01-01T09:30:00Z");
        assert_eq!(json["date"], "2024-01-01");
        // Amsterdam is UTC+1 in January.
        assert_eq!(json["local_time"], "10:30");
        assert_eq!(json["planon"], "2024-01-01T10:30:00+01:00");
        assert_eq!(json["epoch_seconds"], 1704101400);
        assert_eq!(json["timezone"], "UTC");
    }
}
