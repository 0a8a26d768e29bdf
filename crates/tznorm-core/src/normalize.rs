//! Timestamp parsing, transformation and formatting.
//!
//! This module carries the single timezone-conversion policy of the
//! application: every parse function states which zone its input is read
//! in, and every returned instant (local-time helpers aside) is expressed
//! in the application zone supplied by the [`TimezoneProvider`].
//!
//! Two failure contracts coexist on the parse surface and are kept apart
//! on purpose, because call sites depend on the distinction:
//! - raising functions return [`Result`] and surface a [`NormalizeError`];
//! - sentinel functions return [`Option`], with `None` as the failure
//!   sentinel, and never raise.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::clock::{Clock, SystemClock};
use crate::config::{StaticTimezone, TimezoneProvider};
use crate::error::{NormalizeError, Result};
use crate::models::FormatSpec;

/// The fixed local timezone of the facility this application serves.
///
/// Deliberately a compile-time constant rather than configuration:
/// downstream Planon exchange depends on it being stable.
pub const LOCAL_ZONE: Tz = Tz::Europe__Amsterdam;

/// ISO 8601 with offset, the format Planon expects (offset, never `Z`).
pub const PLANON_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Unzoned shapes accepted by the free-form parsers.
const FREEFORM_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only shapes accepted by the free-form parsers (parsed as midnight).
const FREEFORM_DATE_PATTERNS: &[&str] = &["%Y-%m-%d"];

/// Day-first shapes for locale-formatted input (nl, matching [`LOCAL_ZONE`]).
const LOCALE_PATTERNS: &[&str] = &[
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Day-first date-only shapes for locale-formatted input.
const LOCALE_DATE_PATTERNS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y"];

/// Resolve an unzoned wall time in a timezone.
///
/// For ambiguous wall times (fall back) the earlier occurrence wins; for
/// nonexistent wall times (spring forward) the wall time is reinterpreted
/// as UTC and shifted into the zone. Both cases resolve deterministically
/// so that no parse path can fail on a DST edge.
pub fn resolve_local(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive).single() {
        Some(dt) => dt,
        None => tz
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

/// Format an instant with one of the fixed [`FormatSpec`] patterns, in
/// the instant's attached zone (no conversion is performed).
pub fn format_instant(instant: &DateTime<Tz>, spec: FormatSpec) -> String {
    instant.format(spec.pattern()).to_string()
}

/// Format an instant as `YYYY-MM-DDTHH:mm:ss.ffffffZ` (microseconds,
/// literal `Z`), in its attached zone.
pub fn to_iso_string(instant: &DateTime<Tz>) -> String {
    format_instant(instant, FormatSpec::DateTime)
}

/// Format an instant as `YYYY-MM-DDTHH:mm:ssZ` (seconds, literal `Z`),
/// in its attached zone.
pub fn to_legacy_iso_string(instant: &DateTime<Tz>) -> String {
    format_instant(instant, FormatSpec::LegacyDateTime)
}

/// Format an instant as `YYYY-MM-DD`, in its attached zone.
pub fn to_date_string(instant: &DateTime<Tz>) -> String {
    format_instant(instant, FormatSpec::Date)
}

/// Convert an instant to the fixed local zone and format its wall-clock
/// time as `HH:mm`.
pub fn to_local_time_string(instant: &DateTime<Tz>) -> String {
    format_instant(&instant.with_timezone(&LOCAL_ZONE), FormatSpec::Time)
}

/// Convert an instant to the fixed local zone and format it for Planon
/// (ISO 8601 with offset, e.g. "2024-01-01T10:30:00+01:00").
pub fn to_planon_string(instant: &DateTime<Tz>) -> String {
    instant
        .with_timezone(&LOCAL_ZONE)
        .format(PLANON_PATTERN)
        .to_string()
}

/// Return a copy of `instant` shifted by `days` calendar days (negative
/// allowed), keeping the wall-clock time and zone. The input is untouched.
pub fn add_days_to_copy(instant: &DateTime<Tz>, days: i64) -> DateTime<Tz> {
    let shifted = instant.date_naive() + Duration::days(days);
    resolve_local(shifted.and_time(instant.time()), instant.timezone())
}

/// Identity-preserving copy of an instant (same absolute time, same zone).
///
/// Instants are plain `Copy` values, so this cannot observe sharing; it
/// exists to make copy points explicit at call sites.
pub fn copy_of(instant: &DateTime<Tz>) -> DateTime<Tz> {
    *instant
}

fn parse_freeform_naive(input: &str) -> Option<NaiveDateTime> {
    for pattern in FREEFORM_PATTERNS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(naive);
        }
    }
    for pattern in FREEFORM_DATE_PATTERNS {
        if let Ok(date) = NaiveDate::parse_from_str(input, pattern) {
            return Some(date.and_hms_opt(0, 0, 0).unwrap());
        }
    }
    None
}

fn parse_locale_naive(input: &str) -> Option<NaiveDateTime> {
    for pattern in LOCALE_PATTERNS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(naive);
        }
    }
    for pattern in LOCALE_DATE_PATTERNS {
        if let Ok(date) = NaiveDate::parse_from_str(input, pattern) {
            return Some(date.and_hms_opt(0, 0, 0).unwrap());
        }
    }
    None
}

/// Split a trailing timezone designator (`Z`, `UTC`, or `±HH:MM`) off a
/// timestamp string, rejecting any designator that does not denote UTC.
fn strip_utc_designator(input: &str) -> Result<&str> {
    if let Some(rest) = input.strip_suffix('Z') {
        return Ok(rest);
    }
    if let Some(rest) = input.strip_suffix("UTC") {
        return Ok(rest.trim_end());
    }
    if let Some(offset) = trailing_offset(input) {
        if offset == "+00:00" {
            return Ok(&input[..input.len() - offset.len()]);
        }
        return Err(NormalizeError::InvalidTimezone(offset.to_string()));
    }
    Ok(input)
}

/// A `±HH:MM` suffix, if `input` ends in one.
fn trailing_offset(input: &str) -> Option<&str> {
    if input.len() < 6 || !input.is_char_boundary(input.len() - 6) {
        return None;
    }
    let tail = &input[input.len() - 6..];
    let bytes = tail.as_bytes();
    let shaped = (bytes[0] == b'+' || bytes[0] == b'-')
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_digit()
        && bytes[3] == b':'
        && bytes[4].is_ascii_digit()
        && bytes[5].is_ascii_digit();
    shaped.then_some(tail)
}

/// The normalizer: every timestamp parse, transform and format path of
/// the application goes through here, so exactly one timezone-conversion
/// policy applies everywhere.
///
/// Stateless apart from its two injected collaborators: a [`Clock`] for
/// "now" queries and a [`TimezoneProvider`] for the application zone,
/// which is consulted on every call that needs it.
///
/// # Examples
///
/// ```
/// use tznorm_core::prelude::*;
///
/// let normalizer = Normalizer::system(chrono_tz::UTC);
/// let instant = normalizer.from_utc_string("2024-01-01T00:00:00Z").unwrap();
/// assert_eq!(to_date_string(&instant), "2024-01-01");
/// ```
pub struct Normalizer<C: Clock, P: TimezoneProvider> {
    clock: C,
    config: P,
}

impl Normalizer<SystemClock, StaticTimezone> {
    /// Normalizer on the system clock with a fixed application zone.
    pub fn system(app_zone: Tz) -> Self {
        Self::new(SystemClock, StaticTimezone(app_zone))
    }
}

impl<C: Clock, P: TimezoneProvider> Normalizer<C, P> {
    pub fn new(clock: C, config: P) -> Self {
        Self { clock, config }
    }

    fn app_zone(&self) -> Tz {
        self.config.app_timezone()
    }

    /// The current instant, expressed in the application zone.
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.app_zone())
    }

    /// The current date at midnight, in the application zone.
    pub fn today(&self) -> DateTime<Tz> {
        let now = self.now();
        resolve_local(
            now.date_naive().and_hms_opt(0, 0, 0).unwrap(),
            now.timezone(),
        )
    }

    /// The current wall-clock time of day in the application zone, as
    /// milliseconds since a synthetic 1970-01-01 epoch.
    ///
    /// The current wall time is re-anchored to 1970-01-01 in the same
    /// zone before conversion, so the result counts the time of day and
    /// is NOT a Unix timestamp. Downstream consumers rely on exactly this
    /// reading.
    pub fn timestamp_now_in_milliseconds(&self) -> i64 {
        synthetic_day_millis(&self.now())
    }

    /// [`Self::timestamp_now_in_milliseconds`] for the fixed local zone.
    pub fn local_timestamp_now_in_milliseconds(&self) -> i64 {
        synthetic_day_millis(&self.clock.now().with_timezone(&LOCAL_ZONE))
    }

    /// Parse a `YYYY-MM-DD` string as a date in the application zone,
    /// returning midnight of that date.
    pub fn from_date_string(&self, input: &str) -> Result<DateTime<Tz>> {
        let date = NaiveDate::parse_from_str(input.trim(), FormatSpec::Date.pattern())
            .map_err(|e| {
                NormalizeError::ParseError(format!("Invalid date '{}': {}", input, e))
            })?;
        Ok(resolve_local(
            date.and_hms_opt(0, 0, 0).unwrap(),
            self.app_zone(),
        ))
    }

    /// Parse a microsecond-precision `...ss.ffffffZ` string, read as wall
    /// time in the application zone.
    ///
    /// Sentinel contract: returns `None` on mismatch, never raises.
    pub fn from_iso_string(&self, input: &str) -> Option<DateTime<Tz>> {
        self.parse_exact(input, FormatSpec::DateTime, self.app_zone())
            .ok()
    }

    /// Parse a second-precision `...ssZ` string, read as wall time in the
    /// application zone.
    ///
    /// Sentinel contract: returns `None` on mismatch, never raises.
    pub fn from_legacy_iso_string(&self, input: &str) -> Option<DateTime<Tz>> {
        self.parse_exact(input, FormatSpec::LegacyDateTime, self.app_zone())
            .ok()
    }

    /// Parse a microsecond-precision `...ss.ffffffZ` string, read as wall
    /// time in the fixed local zone, and convert it to the application zone.
    pub fn from_local_iso_string(&self, input: &str) -> Result<DateTime<Tz>> {
        Ok(self
            .parse_exact(input, FormatSpec::DateTime, LOCAL_ZONE)?
            .with_timezone(&self.app_zone()))
    }

    /// Parse a free-form timestamp and convert it to the application zone.
    ///
    /// A string with an embedded offset (RFC 3339) is honored as written;
    /// an unzoned string is read as wall time in the fixed local zone.
    pub fn from_local_string(&self, input: &str) -> Result<DateTime<Tz>> {
        let trimmed = input.trim();
        if let Ok(fixed) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(fixed.with_timezone(&self.app_zone()));
        }
        let naive = parse_freeform_naive(trimmed).ok_or_else(|| {
            NormalizeError::ParseError(format!("Unrecognized timestamp: '{}'", trimmed))
        })?;
        Ok(resolve_local(naive, LOCAL_ZONE).with_timezone(&self.app_zone()))
    }

    /// Parse a locale-formatted (day-first) timestamp, read as wall time
    /// in the fixed local zone, and convert it to the application zone.
    pub fn parse_local_string(&self, input: &str) -> Result<DateTime<Tz>> {
        let trimmed = input.trim();
        let naive = parse_locale_naive(trimmed).ok_or_else(|| {
            NormalizeError::ParseError(format!("Unrecognized locale timestamp: '{}'", trimmed))
        })?;
        Ok(resolve_local(naive, LOCAL_ZONE).with_timezone(&self.app_zone()))
    }

    /// Parse a free-form UTC timestamp and convert it to the application
    /// zone.
    ///
    /// If the string embeds a timezone designator it must denote UTC
    /// (`Z`, `UTC` or `+00:00`); any other designator raises
    /// [`NormalizeError::InvalidTimezone`] naming the offender. A string
    /// without a designator is read as UTC.
    pub fn from_utc_string(&self, input: &str) -> Result<DateTime<Tz>> {
        let bare = strip_utc_designator(input.trim())?;
        let naive = parse_freeform_naive(bare.trim_end()).ok_or_else(|| {
            NormalizeError::ParseError(format!("Unrecognized timestamp: '{}'", input.trim()))
        })?;
        Ok(Utc.from_utc_datetime(&naive).with_timezone(&self.app_zone()))
    }

    /// Parse with a caller-supplied chrono format, read as wall time in
    /// the application zone. Date-only formats resolve to midnight.
    ///
    /// Sentinel contract: returns `None` on mismatch, never raises.
    pub fn from_string(&self, input: &str, format: &str) -> Option<DateTime<Tz>> {
        let trimmed = input.trim();
        let naive = NaiveDateTime::parse_from_str(trimmed, format)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(trimmed, format)
                    .ok()
                    .map(|d| d.and_hms_opt(0, 0, 0).unwrap())
            })?;
        Some(resolve_local(naive, self.app_zone()))
    }

    /// Convert Unix epoch seconds to an instant in the application zone.
    ///
    /// Errs only for values outside chrono's representable range.
    pub fn from_timestamp(&self, seconds: i64) -> Result<DateTime<Tz>> {
        let utc = Utc.timestamp_opt(seconds, 0).single().ok_or_else(|| {
            NormalizeError::ParseError(format!("Epoch seconds out of range: {}", seconds))
        })?;
        Ok(utc.with_timezone(&self.app_zone()))
    }

    /// Midnight of `instant`'s date in the fixed local zone, expressed in
    /// the application zone.
    ///
    /// The anchor is local-zone midnight (not the application zone's):
    /// the facility's calendar day decides the boundary, and the result
    /// is then converted for application-wide storage.
    pub fn start_of_day_utc(&self, instant: &DateTime<Tz>) -> DateTime<Tz> {
        let local_date = instant.with_timezone(&LOCAL_ZONE).date_naive();
        resolve_local(local_date.and_hms_opt(0, 0, 0).unwrap(), LOCAL_ZONE)
            .with_timezone(&self.app_zone())
    }

    /// Whether `instant`'s calendar date, in its own attached zone,
    /// equals the current date in that same zone.
    pub fn is_today(&self, instant: &DateTime<Tz>) -> bool {
        let zone = instant.timezone();
        self.clock.now().with_timezone(&zone).date_naive() == instant.date_naive()
    }

    /// Whether `instant` lies more than `at_least_days` whole calendar
    /// days ahead of today.
    ///
    /// An instant strictly in the past is never future, regardless of
    /// `at_least_days`. Otherwise both `instant`'s date and today's date
    /// (application zone) are truncated to midnight and the whole-day
    /// difference must be strictly greater than `at_least_days`. An
    /// instant equal to "now" keeps its own date; it is not shifted.
    pub fn is_future(&self, instant: &DateTime<Tz>, at_least_days: i64) -> bool {
        let now = self.now();
        if *instant < now {
            return false;
        }
        let days_ahead = instant
            .date_naive()
            .signed_duration_since(now.date_naive())
            .num_days();
        days_ahead > at_least_days
    }

    fn parse_exact(&self, input: &str, spec: FormatSpec, zone: Tz) -> Result<DateTime<Tz>> {
        let naive =
            NaiveDateTime::parse_from_str(input.trim(), spec.pattern()).map_err(|e| {
                NormalizeError::ParseError(format!(
                    "Invalid {} timestamp '{}': {}",
                    spec, input, e
                ))
            })?;
        Ok(resolve_local(naive, zone))
    }
}

/// Re-anchor an instant's wall-clock time of day to 1970-01-01 in its own
/// zone and return the corresponding epoch milliseconds.
fn synthetic_day_millis(instant: &DateTime<Tz>) -> i64 {
    let day_zero = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    resolve_local(day_zero.and_time(instant.time()), instant.timezone()).timestamp_millis()
}
