//! Data types shared by the filtering and aggregation stages.

use serde::Serialize;

/// Grouping key: complaint type and borough, compared exactly as read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    pub complaint_type: String,
    pub borough: String,
}

impl AggregationKey {
    pub fn new(complaint_type: &str, borough: &str) -> Self {
        Self {
            complaint_type: complaint_type.to_string(),
            borough: borough.to_string(),
        }
    }
}

/// One output row of the report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ComplaintCount {
    pub complaint_type: String,
    pub borough: String,
    pub count: u64,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationResult {
    /// Counts in first-observed key order.
    pub rows: Vec<ComplaintCount>,
    pub records_seen: u64,
    pub records_admitted: u64,
}

/// Input column names the pipeline reads from each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub creation_date: String,
    pub borough: String,
    pub complaint_type: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            creation_date: "creation_date".to_string(),
            borough: "borough".to_string(),
            complaint_type: "complaint_type".to_string(),
        }
    }
}
