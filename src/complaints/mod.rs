//! Date-window filtering and per-borough complaint counting.
//!
//! [`pipeline::Pipeline`] pulls records from a source, keeps the ones whose
//! creation date lies in a closed [`range::DateRange`], and tallies them by
//! (complaint type, borough) in an [`aggregate::Aggregator`].

pub mod aggregate;
pub mod filter;
pub mod pipeline;
pub mod range;
pub mod report;
pub mod types;
