//! Error kinds raised while reading, filtering, aggregating and writing.
//!
//! Every variant is fatal for the run. Nothing is retried or skipped.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure raised by any stage of a complaint-count run.
#[derive(Debug, Error)]
pub enum ComplaintError {
    /// A date string did not match `YYYY-MM-DD` or named an impossible day.
    #[error("invalid date {value:?} for {origin}: expected YYYY-MM-DD")]
    Format { origin: String, value: String },

    /// A record lacks one of the fields the aggregation needs.
    #[error("{} is missing required field '{field}'", describe_record(.line))]
    Schema { field: String, line: Option<u64> },

    /// The input could not be opened or read.
    #[error("cannot read records from {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The report destination could not be created or written.
    #[error("cannot write results to {target}: {source}")]
    Sink {
        target: String,
        #[source]
        source: io::Error,
    },
}

fn describe_record(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!("record on line {line}"),
        None => "record".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ComplaintError>;
