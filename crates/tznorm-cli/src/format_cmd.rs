use std::io::BufRead;
use std::process::ExitCode;

use serde::Serialize;
use tznorm_core::{
    to_date_string, to_iso_string, to_legacy_iso_string, to_local_time_string, to_planon_string,
};

use crate::cli::FormatArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{
    FormatTarget, open_input, parse_format_target, parse_rfc3339_to_app, resolve_app_zone,
};

#[derive(Debug, Serialize)]
struct FormatRecord {
    input: String,
    output: String,
}

pub fn run_format(args: FormatArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let app_zone = resolve_app_zone(args.app_tz.as_deref())?;
    let target = parse_format_target(&args.target)?;
    let reader = open_input(&args.input)?;

    for line in reader.lines() {
        let line = line.map_err(|e| CliError::runtime(format!("Failed to read line: {}", e)))?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let instant = parse_rfc3339_to_app(trimmed, app_zone)?;
        let rendered = match target {
            FormatTarget::Iso => to_iso_string(&instant),
            FormatTarget::Legacy => to_legacy_iso_string(&instant),
            FormatTarget::Date => to_date_string(&instant),
            FormatTarget::LocalTime => to_local_time_string(&instant),
            FormatTarget::Planon => to_planon_string(&instant),
        };

        match output_format {
            OutputFormat::Json => {
                let record = FormatRecord {
                    input: trimmed.to_string(),
                    output: rendered,
                };
                let json = serde_json::to_string(&record)
                    .map_err(|e| CliError::runtime(format!("Failed to serialize: {}", e)))?;
                println!("{}", json);
            }
            OutputFormat::Text => {
                println!("{}", rendered);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
