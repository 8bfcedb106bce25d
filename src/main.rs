//! CLI entry point for the borough complaints counter.
//!
//! Counts each complaint type per borough for records created within an
//! inclusive date range, printing the result or writing it as CSV.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use borough_complaints::ColumnNames;
use borough_complaints::complaints::report::generate;
use borough_complaints::config::RunConfig;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "borough_complaints")]
#[command(
    about = "CLI tool to track the complaint types and count the complaint types by borough within a date range.",
    long_about = None
)]
struct Cli {
    /// Input CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// Start date in YYYY-MM-DD format
    #[arg(short, long)]
    start: String,

    /// End date in YYYY-MM-DD format
    #[arg(short, long)]
    end: String,

    /// Optional output file for results (CSV format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Column holding the record's creation date
    #[arg(long, default_value = "creation_date")]
    date_column: String,

    /// Column holding the borough
    #[arg(long, default_value = "borough")]
    borough_column: String,

    /// Column holding the complaint type
    #[arg(long, default_value = "complaint_type")]
    type_column: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging();

    let cli = Cli::parse();

    let config = RunConfig::new(cli.input, &cli.start, &cli.end, cli.output)?.with_columns(
        ColumnNames {
            creation_date: cli.date_column,
            borough: cli.borough_column,
            complaint_type: cli.type_column,
        },
    );

    generate(&config)?;

    Ok(())
}

/// Logging setup: human-readable stderr, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is set. Stdout is reserved for the report.
fn init_logging() -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::WARN));

    let mut file_guard = None;
    let json_layer = std::env::var("LOG_FILE_PATH").ok().map(|log_file_path| {
        let log_path = Path::new(&log_file_path);
        let log_dir = log_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let log_file_name = log_path
            .file_name()
            .unwrap_or(OsStr::new("borough_complaints.log"));

        let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        file_guard = Some(guard);

        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(non_blocking_file)
            .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG))
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}

/// Filter from the directives in env var `var`, or `default` when it is unset
/// or holds none.
fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
    filter_from(std::env::var(var).ok().as_deref(), default)
}

fn filter_from(directives: Option<&str>, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives.unwrap_or_default())
}
