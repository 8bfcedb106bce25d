//! Validated run settings built from the command-line strings.

use std::path::PathBuf;

use crate::complaints::range::DateRange;
use crate::complaints::types::ColumnNames;
use crate::error::Result;
use crate::output::OutputTarget;

/// Everything one invocation needs, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub range: DateRange,
    pub output: OutputTarget,
    pub columns: ColumnNames,
}

impl RunConfig {
    /// Validates the raw inputs. Only the date bounds can fail here; the
    /// input and output paths are checked when they are used.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ComplaintError::Format`] for a malformed start
    /// or end date.
    pub fn new(
        input: impl Into<PathBuf>,
        start: &str,
        end: &str,
        output: Option<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            input: input.into(),
            range: DateRange::parse(start, end)?,
            output: output.into(),
            columns: ColumnNames::default(),
        })
    }

    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }
}
