use indexmap::IndexMap;

use crate::complaints::types::{AggregationKey, ComplaintCount};

/// Running per-(complaint type, borough) tally.
///
/// Backed by an [`IndexMap`] so that [`Aggregator::snapshot`] yields keys in
/// the order they were first recorded, independent of hashing.
#[derive(Debug, Default)]
pub struct Aggregator {
    counts: IndexMap<AggregationKey, u64>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `(complaint_type, borough)`.
    pub fn record(&mut self, complaint_type: &str, borough: &str) {
        *self
            .counts
            .entry(AggregationKey::new(complaint_type, borough))
            .or_insert(0) += 1;
    }

    /// Returns every key with its count, in first-observed order.
    pub fn snapshot(&self) -> Vec<ComplaintCount> {
        self.counts
            .iter()
            .map(|(key, count)| ComplaintCount {
                complaint_type: key.complaint_type.clone(),
                borough: key.borough.clone(),
                count: *count,
            })
            .collect()
    }

    pub fn get(&self, complaint_type: &str, borough: &str) -> Option<u64> {
        self.counts
            .get(&AggregationKey::new(complaint_type, borough))
            .copied()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
