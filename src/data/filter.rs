use chrono::NaiveDate;

use super::model::TimeSeriesTable;

// ---------------------------------------------------------------------------
// Date range predicate: which rows are plotted
// ---------------------------------------------------------------------------

/// Inclusive date interval. `None` on either side means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// The range spanning all rows of `table` (unbounded if it is empty).
    pub fn covering(table: &TimeSeriesTable) -> Self {
        DateRange {
            start: table.dates().first().copied(),
            end: table.dates().last().copied(),
        }
    }

    /// Swap the bounds if they were entered backwards.
    pub fn normalized(self) -> Self {
        match (self.start, self.end) {
            (Some(s), Some(e)) if s > e => DateRange {
                start: Some(e),
                end: Some(s),
            },
            _ => self,
        }
    }
}

/// Return the half-open row interval whose dates fall inside `range`.
///
/// Dates are sorted, so the passing rows are always contiguous.
pub fn row_bounds(table: &TimeSeriesTable, range: &DateRange) -> (usize, usize) {
    let dates = table.dates();
    let start = match range.start {
        Some(s) => dates.partition_point(|d| *d < s),
        None => 0,
    };
    let end = match range.end {
        Some(e) => dates.partition_point(|d| *d <= e),
        None => dates.len(),
    };
    (start, end.max(start))
}

/// Copy of `table` restricted to the rows inside `range`.
pub fn rows_in_range(table: &TimeSeriesTable, range: &DateRange) -> TimeSeriesTable {
    let (start, end) = row_bounds(table, &range.normalized());
    table.slice_rows(start, end)
}
