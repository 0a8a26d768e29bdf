use std::process::ExitCode;

use serde::Serialize;
use tznorm_core::{NormalizedTimestamp, to_date_string};

use crate::cli::NowArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::normalizer_for;

#[derive(Debug, Serialize)]
struct NowOutput {
    now: NormalizedTimestamp,
    today: String,
    timestamp_ms: i64,
    local_timestamp_ms: i64,
}

pub fn run_now(args: NowArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let normalizer = normalizer_for(args.app_tz.as_deref())?;

    let output = NowOutput {
        now: NormalizedTimestamp::from_instant(&normalizer.now()),
        today: to_date_string(&normalizer.today()),
        timestamp_ms: normalizer.timestamp_now_in_milliseconds(),
        local_timestamp_ms: normalizer.local_timestamp_now_in_milliseconds(),
    };

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::runtime(format!("Failed to serialize: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("now:                {}", output.now.date_time);
            println!("today:              {}", output.today);
            println!("local time:         {}", output.now.local_time);
            println!("planon:             {}", output.now.planon);
            println!("timestamp ms:       {}", output.timestamp_ms);
            println!("local timestamp ms: {}", output.local_timestamp_ms);
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
