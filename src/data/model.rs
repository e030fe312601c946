use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

// ---------------------------------------------------------------------------
// TableError – structural problems found while building a table
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("dates are not in ascending order: row {row} ({date}) comes after {previous}")]
    UnsortedDates {
        row: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },

    #[error("column '{column}' has {found} values but the table has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column '{0}' already exists")]
    DuplicateColumn(String),
}

// ---------------------------------------------------------------------------
// TimeSeriesTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Date-keyed table of numeric columns.
///
/// Missing cells are stored as `NaN`. Rows are ordered by date (ties allowed);
/// the ordering is checked once in [`TimeSeriesTable::new`] and never changes
/// afterwards because rows cannot be inserted or reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    dates: Vec<NaiveDate>,
    /// Column names in insertion order (source file order, then derived columns).
    column_names: Vec<String>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl TimeSeriesTable {
    /// Build a table from a date axis. Columns are added with [`Self::insert_column`].
    pub fn new(dates: Vec<NaiveDate>) -> Result<Self, TableError> {
        if let Some(row) = dates.windows(2).position(|w| w[1] < w[0]) {
            return Err(TableError::UnsortedDates {
                row: row + 1,
                date: dates[row + 1],
                previous: dates[row],
            });
        }
        Ok(TimeSeriesTable {
            dates,
            column_names: Vec::new(),
            columns: BTreeMap::new(),
        })
    }

    /// Build a table and its columns in one go.
    pub fn from_columns<I, S>(dates: Vec<NaiveDate>, columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = Self::new(dates)?;
        for (name, values) in columns {
            table.insert_column(name, values)?;
        }
        Ok(table)
    }

    /// Append a new column. The name must be unused and the length must match.
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), TableError> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        self.check_len(&name, &values)?;
        self.column_names.push(name.clone());
        self.columns.insert(name, values);
        Ok(())
    }

    /// Insert a column, replacing the values of an existing one with the same name.
    ///
    /// Derived columns (moving averages) are recomputed on every request, so
    /// overwriting keeps repeated requests idempotent.
    pub fn upsert_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), TableError> {
        let name = name.into();
        self.check_len(&name, &values)?;
        if !self.columns.contains_key(&name) {
            self.column_names.push(name.clone());
        }
        self.columns.insert(name, values);
        Ok(())
    }

    fn check_len(&self, name: &str, values: &[f64]) -> Result<(), TableError> {
        if values.len() != self.dates.len() {
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.dates.len(),
                found: values.len(),
            });
        }
        Ok(())
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Values of a column, or `None` if it does not exist.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Copy the rows `start..end` into a new table with the same columns.
    pub fn slice_rows(&self, start: usize, end: usize) -> TimeSeriesTable {
        let end = end.min(self.len());
        let start = start.min(end);
        TimeSeriesTable {
            dates: self.dates[start..end].to_vec(),
            column_names: self.column_names.clone(),
            columns: self
                .columns
                .iter()
                .map(|(name, values)| (name.clone(), values[start..end].to_vec()))
                .collect(),
        }
    }

    /// Pair each date with the value of `column` as `[day_number, value]` points.
    ///
    /// The x coordinate is the number of days since the Unix epoch so plots share
    /// one axis across tables. Missing values are skipped.
    pub fn points(&self, column: &str) -> Option<Vec<[f64; 2]>> {
        let values = self.column(column)?;
        Some(
            self.dates
                .iter()
                .zip(values)
                .filter(|(_, v)| !v.is_nan())
                .map(|(d, v)| [date_to_x(*d), *v])
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// ChartSeries – labelled values handed to the presentation layer
// ---------------------------------------------------------------------------

/// A categorical series: one value per label.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Sum of all non-missing values.
    pub fn total(&self) -> f64 {
        self.values.iter().filter(|v| !v.is_nan()).sum()
    }

    /// Each value as a percentage of [`Self::total`]; `NaN` when the total is zero.
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        self.values
            .iter()
            .map(|v| if total == 0.0 { f64::NAN } else { v * 100.0 / total })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(String::as_str).zip(self.values.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Date <-> plot axis helpers
// ---------------------------------------------------------------------------

/// `num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

/// Days since 1970-01-01.
pub fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce() - UNIX_EPOCH_CE_DAYS)
}

/// Inverse of [`date_to_x`], rounding to the nearest day.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    let days = i32::try_from(x.round() as i64).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_CE_DAYS)?)
}
