use std::fs::File;
use std::io::{self, BufRead, BufReader};

use chrono::DateTime;
use chrono_tz::Tz;
use tznorm_core::{Normalizer, StaticTimezone, SystemClock, parse_tz};

use crate::error::{CliError, CliResult};

/// Which of the normalizer's parse functions to apply to each input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    Date,
    Iso,
    LegacyIso,
    LocalIso,
    Local,
    Locale,
    Utc,
    Timestamp,
    Custom,
}

/// Which output rendering the `format` subcommand applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTarget {
    Iso,
    Legacy,
    Date,
    LocalTime,
    Planon,
}

pub fn parse_parser_kind(s: &str) -> CliResult<ParserKind> {
    match s.to_lowercase().as_str() {
        "date" => Ok(ParserKind::Date),
        "iso" => Ok(ParserKind::Iso),
        "legacy-iso" => Ok(ParserKind::LegacyIso),
        "local-iso" => Ok(ParserKind::LocalIso),
        "local" => Ok(ParserKind::Local),
        "locale" => Ok(ParserKind::Locale),
        "utc" => Ok(ParserKind::Utc),
        "timestamp" => Ok(ParserKind::Timestamp),
        "custom" => Ok(ParserKind::Custom),
        _ => Err(CliError::input(format!(
            "Invalid parser '{}'. Expected: date, iso, legacy-iso, local-iso, local, locale, utc, timestamp, custom",
            s
        ))),
    }
}

pub fn parse_format_target(s: &str) -> CliResult<FormatTarget> {
    match s.to_lowercase().as_str() {
        "iso" => Ok(FormatTarget::Iso),
        "legacy" => Ok(FormatTarget::Legacy),
        "date" => Ok(FormatTarget::Date),
        "local-time" => Ok(FormatTarget::LocalTime),
        "planon" => Ok(FormatTarget::Planon),
        _ => Err(CliError::input(format!(
            "Invalid target '{}'. Expected: iso, legacy, date, local-time, planon",
            s
        ))),
    }
}

/// Resolve the application timezone: `--app-tz` flag first, then the
/// `APP_TIMEZONE` environment variable, then UTC.
pub fn resolve_app_zone(flag: Option<&str>) -> CliResult<Tz> {
    let name = match flag {
        Some(value) => value.to_string(),
        None => std::env::var("APP_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
    };
    parse_tz(&name).map_err(|e| CliError::input(format!("Invalid timezone '{}': {}", name, e)))
}

pub fn normalizer_for(flag: Option<&str>) -> CliResult<Normalizer<SystemClock, StaticTimezone>> {
    Ok(Normalizer::system(resolve_app_zone(flag)?))
}

pub fn open_input(path: &str) -> CliResult<Box<dyn BufRead>> {
    if path == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file = File::open(path)
            .map_err(|e| CliError::runtime(format!("Failed to open file '{}': {}", path, e)))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn parse_rfc3339_to_app(s: &str, tz: Tz) -> CliResult<DateTime<Tz>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&tz))
        .map_err(|e| CliError::input(format!("Failed to parse RFC3339 '{}': {}", s, e)))
}
