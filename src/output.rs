//! Report rendering: CSV file or plain console lines.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use tracing::{debug, info};

use crate::complaints::types::ComplaintCount;
use crate::error::{ComplaintError, Result};

/// Column titles, in output order.
pub const HEADER: [&str; 3] = ["complaint type", "borough", "count"];

/// Where a finished report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    pub fn describe(&self) -> String {
        match self {
            OutputTarget::File(path) => path.display().to_string(),
            OutputTarget::Stdout => "stdout".to_string(),
        }
    }
}

impl From<Option<PathBuf>> for OutputTarget {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(OutputTarget::Stdout, OutputTarget::File)
    }
}

/// Serializes the header and `rows` as CSV into `writer`.
pub fn write_csv<W: Write>(writer: W, rows: &[ComplaintCount]) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Prints the header and `rows` as `", "`-joined lines, without quoting.
pub fn print_plain<W: Write>(out: W, rows: &[ComplaintCount]) -> io::Result<()> {
    let mut out = BufWriter::new(out);

    writeln!(out, "{}", HEADER.join(", "))?;
    for row in rows {
        writeln!(out, "{}, {}, {}", row.complaint_type, row.borough, row.count)?;
    }
    out.flush()
}

/// Renders `rows` to `target`, printing to stdout for [`OutputTarget::Stdout`].
///
/// # Errors
///
/// Returns [`ComplaintError::Sink`] if the destination cannot be written.
pub fn write_report(rows: &[ComplaintCount], target: &OutputTarget) -> Result<()> {
    write_report_with_console(rows, target, io::stdout().lock())
}

/// Renders `rows` to `target`, using `console` in place of stdout.
///
/// File reports are serialized in memory first, so the file is only created
/// once the whole report is ready.
///
/// # Errors
///
/// Returns [`ComplaintError::Sink`] if the destination cannot be written.
pub fn write_report_with_console<W: Write>(
    rows: &[ComplaintCount],
    target: &OutputTarget,
    console: W,
) -> Result<()> {
    let sink_error = |source: io::Error| ComplaintError::Sink {
        target: target.describe(),
        source,
    };

    match target {
        OutputTarget::File(path) => {
            let mut buffer = Vec::new();
            write_csv(&mut buffer, rows).map_err(|e| sink_error(e.into()))?;
            write_file(path, &buffer).map_err(sink_error)?;
            info!(path = %path.display(), rows = rows.len(), "Report written");
        }
        OutputTarget::Stdout => {
            print_plain(console, rows).map_err(sink_error)?;
            debug!(rows = rows.len(), "Report printed");
        }
    }

    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    debug!(path = %path.display(), bytes = contents.len(), "Writing report file");
    fs::write(path, contents)
}
