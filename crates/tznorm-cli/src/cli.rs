use clap::{Parser, Subcommand};

/// Timezone-consistent timestamp normalization tool
#[derive(Parser, Debug)]
#[command(name = "tznorm")]
#[command(about = "Timezone-consistent timestamp normalization tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current instant in every normalized format
    Now(NowArgs),
    /// Parse timestamps with a chosen parser and print normalized forms
    Parse(ParseArgs),
    /// Render RFC3339 instants in one output format
    Format(FormatArgs),
}

#[derive(clap::Args, Debug)]
pub struct NowArgs {
    /// Application timezone (default: APP_TIMEZONE env var, then UTC)
    #[arg(long)]
    pub app_tz: Option<String>,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct ParseArgs {
    /// Parser: date, iso, legacy-iso, local-iso, local, locale, utc, timestamp, custom
    #[arg(short, long, default_value = "utc")]
    pub parser: String,

    /// chrono format string (required with --parser custom)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Application timezone (default: APP_TIMEZONE env var, then UTC)
    #[arg(long)]
    pub app_tz: Option<String>,

    /// Output format: json, text
    #[arg(long, default_value = "json")]
    pub output_format: String,

    /// Input file path (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,
}

#[derive(clap::Args, Debug)]
pub struct FormatArgs {
    /// Target format: iso, legacy, date, local-time, planon
    #[arg(short, long, default_value = "iso")]
    pub target: String,

    /// Application timezone (default: APP_TIMEZONE env var, then UTC)
    #[arg(long)]
    pub app_tz: Option<String>,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,

    /// Input file path (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,
}
