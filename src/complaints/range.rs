use std::fmt;

use chrono::NaiveDate;

use crate::error::{ComplaintError, Result};

/// The only accepted date layout, for range bounds and record dates alike.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a zero-padded `YYYY-MM-DD` date. Returns `None` for any other shape
/// or for a day that does not exist on the calendar.
///
/// The shape check runs first because chrono alone would also accept
/// unpadded components such as `2023-1-5`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Like [`parse_date`], but reports failure as [`ComplaintError::Format`]
/// naming `origin`.
pub fn parse_date_for(value: &str, origin: impl FnOnce() -> String) -> Result<NaiveDate> {
    parse_date(value).ok_or_else(|| ComplaintError::Format {
        origin: origin(),
        value: value.to_string(),
    })
}

/// Closed interval of calendar dates, compared at day granularity.
///
/// `start > end` is accepted and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Builds a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`ComplaintError::Format`] naming whichever bound is malformed,
    /// the start bound being checked first.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_date_for(start, || "start date".to_string())?;
        let end = parse_date_for(end, || "end date".to_string())?;
        Ok(Self::new(start, end))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// True iff `start <= date <= end`.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..={}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}
