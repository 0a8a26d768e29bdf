use std::io::BufRead;
use std::process::ExitCode;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use tznorm_core::{NormalizeError, NormalizedTimestamp, Normalizer, StaticTimezone, SystemClock};

use crate::cli::ParseArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{ParserKind, normalizer_for, open_input, parse_parser_kind};

#[derive(Debug, Serialize)]
struct ParseRecord {
    input: String,
    #[serde(flatten)]
    normalized: NormalizedTimestamp,
}

pub fn run_parse(args: ParseArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let normalizer = normalizer_for(args.app_tz.as_deref())?;
    let parser = parse_parser_kind(&args.parser)?;

    if parser == ParserKind::Custom && args.format.is_none() {
        return Err(CliError::input("--parser custom requires --format"));
    }

    let reader = open_input(&args.input)?;

    for line in reader.lines() {
        let line = line.map_err(|e| CliError::runtime(format!("Failed to read line: {}", e)))?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let instant = parse_line(&normalizer, parser, args.format.as_deref(), trimmed)
            .map_err(|e| CliError::input(format!("Error processing '{}': {}", trimmed, e)))?;

        let record = ParseRecord {
            input: trimmed.to_string(),
            normalized: NormalizedTimestamp::from_instant(&instant),
        };

        match output_format {
            OutputFormat::Json => {
                let json = serde_json::to_string(&record)
                    .map_err(|e| CliError::runtime(format!("Failed to serialize: {}", e)))?;
                println!("{}", json);
            }
            OutputFormat::Text => {
                println!("{} => {}", record.input, record.normalized.date_time);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn parse_line(
    normalizer: &Normalizer<SystemClock, StaticTimezone>,
    parser: ParserKind,
    format: Option<&str>,
    input: &str,
) -> Result<DateTime<Tz>, NormalizeError> {
    match parser {
        ParserKind::Date => normalizer.from_date_string(input),
        ParserKind::Iso => normalizer
            .from_iso_string(input)
            .ok_or_else(|| mismatch("date_time", input)),
        ParserKind::LegacyIso => normalizer
            .from_legacy_iso_string(input)
            .ok_or_else(|| mismatch("legacy_date_time", input)),
        ParserKind::LocalIso => normalizer.from_local_iso_string(input),
        ParserKind::Local => normalizer.from_local_string(input),
        ParserKind::Locale => normalizer.parse_local_string(input),
        ParserKind::Utc => normalizer.from_utc_string(input),
        ParserKind::Timestamp => {
            let seconds: i64 = input.parse().map_err(|_| {
                NormalizeError::ParseError(format!(
                    "Invalid epoch seconds: '{}'. Expected integer value.",
                    input
                ))
            })?;
            normalizer.from_timestamp(seconds)
        }
        ParserKind::Custom => {
            // Presence is checked before the read loop.
            let format = format.unwrap_or_default();
            normalizer
                .from_string(input, format)
                .ok_or_else(|| mismatch(format, input))
        }
    }
}

fn mismatch(format: &str, input: &str) -> NormalizeError {
    NormalizeError::ParseError(format!("Input does not match {}: '{}'", format, input))
}
