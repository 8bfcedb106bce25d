use std::io::{self, Write};

use tracing::info;

use crate::complaints::pipeline::Pipeline;
use crate::complaints::types::AggregationResult;
use crate::config::RunConfig;
use crate::error::Result;
use crate::output::write_report_with_console;
use crate::source::CsvSource;

/// Reads the configured input, aggregates it, and writes the report.
///
/// The report is only rendered once aggregation has finished, so any read,
/// schema, or date error leaves the destination untouched.
///
/// # Errors
///
/// Returns the first [`crate::error::ComplaintError`] raised by any stage.
pub fn generate(config: &RunConfig) -> Result<AggregationResult> {
    generate_with_console(config, io::stdout().lock())
}

/// Like [`generate`], but a console report goes to `console` instead of
/// stdout.
///
/// # Errors
///
/// Returns the first [`crate::error::ComplaintError`] raised by any stage.
pub fn generate_with_console<W: Write>(config: &RunConfig, console: W) -> Result<AggregationResult> {
    let source = CsvSource::open(&config.input)?;
    let result = Pipeline::with_columns(config.range, config.columns.clone()).run(source)?;

    info!(
        input = %config.input.display(),
        records_seen = result.records_seen,
        records_admitted = result.records_admitted,
        "Writing report to {}",
        config.output.describe()
    );
    write_report_with_console(&result.rows, &config.output, console)?;

    Ok(result)
}
