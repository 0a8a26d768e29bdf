use std::process::ExitCode;

use clap::Parser;

mod cli;
mod error;
mod format_cmd;
mod now_cmd;
mod parse_cmd;
mod shared;

use cli::{Cli, Commands};
use error::{output_format_hint, parse_output_format, render_error};
use format_cmd::run_format;
use now_cmd::run_now;
use parse_cmd::run_parse;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Now(args) => {
            let fallback = output_format_hint(&args.output_format);
            let output_format = match parse_output_format(&args.output_format) {
                Ok(format) => format,
                Err(err) => return render_error(&err, fallback),
            };

            match run_now(args, output_format) {
                Ok(code) => code,
                Err(err) => render_error(&err, output_format),
            }
        }
        Commands::Parse(args) => {
            let fallback = output_format_hint(&args.output_format);
            let output_format = match parse_output_format(&args.output_format) {
                Ok(format) => format,
                Err(err) => return render_error(&err, fallback),
            };

            match run_parse(args, output_format) {
                Ok(code) => code,
                Err(err) => render_error(&err, output_format),
            }
        }
        Commands::Format(args) => {
            let fallback = output_format_hint(&args.output_format);
            let output_format = match parse_output_format(&args.output_format) {
                Ok(format) => format,
                Err(err) => return render_error(&err, fallback),
            };

            match run_format(args, output_format) {
                Ok(code) => code,
                Err(err) => render_error(&err, output_format),
            }
        }
    }
}
