use tracing::{debug, info, trace, warn};

use crate::complaints::aggregate::Aggregator;
use crate::complaints::filter::{ComplaintFields, RecordFilter};
use crate::complaints::range::DateRange;
use crate::complaints::types::{AggregationResult, ColumnNames};
use crate::error::Result;
use crate::source::Record;

/// Counts complaints per (complaint type, borough) over one record source.
#[derive(Debug, Clone)]
pub struct Pipeline {
    filter: RecordFilter,
    columns: ColumnNames,
}

impl Pipeline {
    /// Creates a pipeline reading the default column names.
    pub fn new(range: DateRange) -> Self {
        Self::with_columns(range, ColumnNames::default())
    }

    pub fn with_columns(range: DateRange, columns: ColumnNames) -> Self {
        Self {
            filter: RecordFilter::new(range, columns.creation_date.clone()),
            columns,
        }
    }

    pub fn range(&self) -> &DateRange {
        self.filter.range()
    }

    /// Drains `source`, counting every admitted record.
    ///
    /// Records are pulled one at a time and dropped after they are counted.
    ///
    /// # Errors
    ///
    /// Stops at the first read failure, missing field, or malformed date
    /// and returns it. No partial result is produced.
    #[tracing::instrument(
        name = "aggregate_complaints",
        skip(self, source),
        fields(start = %self.range().start(), end = %self.range().end())
    )]
    pub fn run<S, R>(&self, source: S) -> Result<AggregationResult>
    where
        S: IntoIterator<Item = Result<R>>,
        R: Record,
    {
        if self.range().is_inverted() {
            warn!(range = %self.range(), "Start date is after end date; no record can match");
        }

        let mut aggregator = Aggregator::new();
        let mut records_seen = 0u64;
        let mut records_admitted = 0u64;

        for record in source {
            let record = record?;
            records_seen += 1;

            let fields = ComplaintFields::extract(&record, &self.columns)?;
            if self.filter.admits(&fields)? {
                trace!(line = ?fields.line, date = fields.creation_date, "Record admitted");
                aggregator.record(fields.complaint_type, fields.borough);
                records_admitted += 1;
            }
        }

        debug_assert_eq!(aggregator.total(), records_admitted);

        let rows = aggregator.snapshot();
        info!(
            records_seen,
            records_admitted,
            keys = rows.len(),
            "Aggregation complete"
        );
        if records_seen > 0 && records_admitted == 0 {
            debug!("No records fell inside the date range");
        }

        Ok(AggregationResult {
            rows,
            records_seen,
            records_admitted,
        })
    }
}

/// Runs a default-column [`Pipeline`] over `source`.
pub fn run<S, R>(source: S, range: DateRange) -> Result<AggregationResult>
where
    S: IntoIterator<Item = Result<R>>,
    R: Record,
{
    Pipeline::new(range).run(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complaints::types::ComplaintCount;
    use crate::error::ComplaintError;
    use std::collections::{HashMap, HashSet};

    type Row = HashMap<String, String>;

    fn row(date: &str, borough: &str, kind: &str) -> Row {
        HashMap::from([
            ("creation_date".to_string(), date.to_string()),
            ("borough".to_string(), borough.to_string()),
            ("complaint_type".to_string(), kind.to_string()),
        ])
    }

    fn ok_rows(rows: Vec<Row>) -> Vec<Result<Row>> {
        rows.into_iter().map(Ok).collect()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::parse(start, end).unwrap()
    }

    fn count(kind: &str, borough: &str, count: u64) -> ComplaintCount {
        ComplaintCount {
            complaint_type: kind.to_string(),
            borough: borough.to_string(),
            count,
        }
    }

    #[test]
    fn test_example_january_window() {
        let rows = ok_rows(vec![
            row("2023-01-05", "Queens", "derelict vehicles"),
            row("2023-01-10", "Bronx", "derelict vehicles"),
            row("2023-02-01", "Queens", "derelict vehicles"),
        ]);

        let result = run(rows, range("2023-01-01", "2023-01-31")).unwrap();

        assert_eq!(
            result.rows,
            vec![
                count("derelict vehicles", "Queens", 1),
                count("derelict vehicles", "Bronx", 1),
            ]
        );
        assert_eq!(result.records_seen, 3);
        assert_eq!(result.records_admitted, 2);
    }

    #[test]
    fn test_boundary_dates_are_counted() {
        let rows = ok_rows(vec![
            row("2022-12-31", "Queens", "Noise"),
            row("2023-01-01", "Queens", "Noise"),
            row("2023-01-31", "Queens", "Noise"),
            row("2023-02-01", "Queens", "Noise"),
        ]);

        let result = run(rows, range("2023-01-01", "2023-01-31")).unwrap();
        assert_eq!(result.rows, vec![count("Noise", "Queens", 2)]);
    }

    #[test]
    fn test_empty_source_gives_empty_result() {
        let result = run(Vec::<Result<Row>>::new(), range("2023-01-01", "2023-12-31")).unwrap();
        assert_eq!(result, AggregationResult::default());
    }

    #[test]
    fn test_invalid_month_aborts_run() {
        let rows = ok_rows(vec![
            row("2023-01-05", "Queens", "Noise"),
            row("2023-13-01", "Queens", "Noise"),
            row("2023-01-06", "Queens", "Noise"),
        ]);

        match run(rows, range("2023-01-01", "2023-01-31")) {
            Err(ComplaintError::Format { value, .. }) => assert_eq!(value, "2023-13-01"),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_date_outside_range_still_aborts() {
        let rows = ok_rows(vec![row("1/5/2023", "Queens", "Noise")]);
        assert!(matches!(
            run(rows, range("2024-01-01", "2024-01-31")),
            Err(ComplaintError::Format { .. })
        ));
    }

    #[test]
    fn test_missing_field_aborts_even_when_date_is_out_of_range() {
        let mut incomplete = row("2020-01-01", "Queens", "Noise");
        incomplete.remove("complaint_type");
        let rows = ok_rows(vec![row("2023-01-05", "Queens", "Noise"), incomplete]);

        match run(rows, range("2023-01-01", "2023-01-31")) {
            Err(ComplaintError::Schema { field, .. }) => assert_eq!(field, "complaint_type"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_source_error_is_propagated() {
        let rows: Vec<Result<Row>> = vec![
            Ok(row("2023-01-05", "Queens", "Noise")),
            Err(ComplaintError::Schema {
                field: "synthetic".into(),
                line: Some(9),
            }),
        ];

        assert!(matches!(
            run(rows, range("2023-01-01", "2023-01-31")),
            Err(ComplaintError::Schema { line: Some(9), .. })
        ));
    }

    #[test]
    fn test_inverted_range_counts_nothing() {
        let rows = ok_rows(vec![
            row("2023-01-01", "Queens", "Noise"),
            row("2023-01-15", "Bronx", "Heat"),
            row("2023-01-31", "Queens", "Noise"),
        ]);

        let result = run(rows, range("2023-01-31", "2023-01-01")).unwrap();
        assert!(result.rows.is_empty());
        assert_eq!(result.records_seen, 3);
        assert_eq!(result.records_admitted, 0);
    }

    #[test]
    fn test_counts_are_conserved() {
        let boroughs = ["Queens", "Bronx", "Brooklyn", "Manhattan", "Staten Island"];
        let kinds = ["Noise", "Heat", "Rodent"];
        let rows: Vec<Row> = (0..200)
            .map(|i| {
                let day = i % 60 + 1;
                let date = chrono::NaiveDate::from_yo_opt(2023, day).unwrap();
                row(
                    &date.format("%Y-%m-%d").to_string(),
                    boroughs[i as usize % boroughs.len()],
                    kinds[i as usize % kinds.len()],
                )
            })
            .collect();

        let result = run(ok_rows(rows), range("2023-01-10", "2023-02-10")).unwrap();
        let total: u64 = result.rows.iter().map(|r| r.count).sum();

        assert_eq!(total, result.records_admitted);
        assert_eq!(result.records_seen, 200);
        // Days 10..=41 of each 60-day cycle: 32 days, hit 3 full cycles and
        // a partial fourth covering days 1..=20.
        assert_eq!(result.records_admitted, 32 * 3 + 11);
    }

    #[test]
    fn test_permuted_input_gives_same_counts() {
        let rows = vec![
            row("2023-01-05", "Queens", "Noise"),
            row("2023-01-06", "Bronx", "Heat"),
            row("2023-01-07", "Queens", "Noise"),
            row("2023-01-08", "Brooklyn", "Rodent"),
            row("2023-01-09", "Bronx", "Heat"),
            row("2023-03-01", "Bronx", "Heat"),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();
        let mut rotated = rows.clone();
        rotated.rotate_left(2);

        let january = range("2023-01-01", "2023-01-31");
        let as_set = |result: AggregationResult| -> HashSet<ComplaintCount> {
            result.rows.into_iter().collect()
        };

        let expected = as_set(run(ok_rows(rows), january).unwrap());
        assert_eq!(as_set(run(ok_rows(reversed), january).unwrap()), expected);
        assert_eq!(as_set(run(ok_rows(rotated), january).unwrap()), expected);
    }

    #[test]
    fn test_rows_follow_first_observed_order() {
        let rows = ok_rows(vec![
            row("2023-03-01", "Staten Island", "Noise"),
            row("2023-01-05", "Bronx", "Heat"),
            row("2023-01-06", "Queens", "Noise"),
            row("2023-01-07", "Bronx", "Heat"),
            row("2023-01-08", "Bronx", "Noise"),
        ]);

        let result = run(rows, range("2023-01-01", "2023-01-31")).unwrap();
        assert_eq!(
            result.rows,
            vec![
                count("Heat", "Bronx", 2),
                count("Noise", "Queens", 1),
                count("Noise", "Bronx", 1),
            ]
        );
    }

    #[test]
    fn test_custom_columns() {
        let rows = ok_rows(vec![HashMap::from([
            ("Created Date".to_string(), "2023-01-05".to_string()),
            ("Borough".to_string(), "QUEENS".to_string()),
            ("Complaint Type".to_string(), "Noise".to_string()),
        ])]);
        let columns = ColumnNames {
            creation_date: "Created Date".into(),
            borough: "Borough".into(),
            complaint_type: "Complaint Type".into(),
        };

        let result = Pipeline::with_columns(range("2023-01-01", "2023-01-31"), columns)
            .run(rows)
            .unwrap();
        assert_eq!(result.rows, vec![count("Noise", "QUEENS", 1)]);
    }
}
