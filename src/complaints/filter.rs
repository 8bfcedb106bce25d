use chrono::NaiveDate;

use crate::complaints::range::{DateRange, parse_date_for};
use crate::complaints::types::ColumnNames;
use crate::error::Result;
use crate::source::Record;

/// The three fields the aggregation reads from a record, borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplaintFields<'r> {
    pub creation_date: &'r str,
    pub borough: &'r str,
    pub complaint_type: &'r str,
    pub line: Option<u64>,
}

impl<'r> ComplaintFields<'r> {
    /// Pulls the required fields out of `record`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ComplaintError::Schema`] for the first absent
    /// field, checked in date, borough, complaint type order.
    pub fn extract<R: Record>(record: &'r R, columns: &ColumnNames) -> Result<Self> {
        Ok(Self {
            creation_date: record.get_required_field(&columns.creation_date)?,
            borough: record.get_required_field(&columns.borough)?,
            complaint_type: record.get_required_field(&columns.complaint_type)?,
            line: record.line(),
        })
    }
}

/// Admits records whose creation date falls inside a [`DateRange`].
#[derive(Debug, Clone)]
pub struct RecordFilter {
    range: DateRange,
    date_column: String,
}

impl RecordFilter {
    pub fn new(range: DateRange, date_column: impl Into<String>) -> Self {
        Self {
            range,
            date_column: date_column.into(),
        }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// Parses the record's creation date and tests it against the range.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ComplaintError::Format`] if the date is not a
    /// valid `YYYY-MM-DD` value. Malformed rows are never skipped.
    pub fn admits(&self, fields: &ComplaintFields<'_>) -> Result<bool> {
        let date = self.creation_date(fields)?;
        Ok(self.range.contains(date))
    }

    fn creation_date(&self, fields: &ComplaintFields<'_>) -> Result<NaiveDate> {
        parse_date_for(fields.creation_date, || match fields.line {
            Some(line) => format!("column '{}' on line {line}", self.date_column),
            None => format!("column '{}'", self.date_column),
        })
    }
}
