pub mod complaints;
pub mod config;
pub mod error;
pub mod output;
pub mod source;

pub use complaints::pipeline::{Pipeline, run};
pub use complaints::range::DateRange;
pub use complaints::types::{AggregationResult, ColumnNames, ComplaintCount};
pub use error::{ComplaintError, Result};
