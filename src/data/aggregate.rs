use std::collections::BTreeMap;

use chrono::Datelike;
use thiserror::Error;

use super::district::{DistrictColumns, DistrictKey};
use super::model::{ChartSeries, TableError, TimeSeriesTable};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    #[error("column '{0}' does not exist in the table")]
    InvalidColumn(String),

    #[error("lookback window of {window} rows does not fit in a table of {rows} rows")]
    IndexOutOfRange { window: usize, rows: usize },

    #[error("window size must be at least 1, got {0}")]
    InvalidWindow(usize),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Name of the column produced by [`percent_difference`].
pub const DIFF_COLUMN: &str = "DIFF";

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn column<'a>(table: &'a TimeSeriesTable, name: &str) -> Result<&'a [f64], AggregateError> {
    table
        .column(name)
        .ok_or_else(|| AggregateError::InvalidColumn(name.to_string()))
}

/// Round to one decimal, exact halves to the even neighbour.
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Mean of the non-missing values; `NaN` when there are none.
fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Sum of the non-missing values; zero when there are none.
fn nan_sum(values: &[f64]) -> f64 {
    values.iter().filter(|v| !v.is_nan()).sum()
}

// ---------------------------------------------------------------------------
// Column statistics
// ---------------------------------------------------------------------------

/// Mean of a whole column, ignoring missing cells.
pub fn column_mean(table: &TimeSeriesTable, name: &str) -> Result<f64, AggregateError> {
    Ok(nan_mean(column(table, name)?))
}

/// Name of the moving-average column derived from `column` over `window` rows.
pub fn sma_column_name(column: &str, window: usize) -> String {
    format!("SMA_{column}_{window}")
}

/// Add one simple-moving-average column per window size.
///
/// Row `k` of `SMA_{column}_{n}` is the mean of rows `k-n+1..=k`. The first
/// `n-1` rows, and every window that touches a missing value, are `NaN`.
/// Returns `column` followed by the names of the added columns, ready to be
/// plotted together.
pub fn rolling_mean(
    table: &mut TimeSeriesTable,
    name: &str,
    windows: &[usize],
) -> Result<Vec<String>, AggregateError> {
    if let Some(&bad) = windows.iter().find(|&&w| w == 0) {
        return Err(AggregateError::InvalidWindow(bad));
    }
    let values = column(table, name)?.to_vec();

    let mut produced = Vec::with_capacity(windows.len() + 1);
    produced.push(name.to_string());
    for &window in windows {
        let sma = trailing_mean(&values, window);
        let sma_name = sma_column_name(name, window);
        table.upsert_column(sma_name.clone(), sma)?;
        produced.push(sma_name);
    }
    Ok(produced)
}

fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|k| {
            if k + 1 < window {
                return f64::NAN;
            }
            let slice = &values[k + 1 - window..=k];
            if slice.iter().any(|v| v.is_nan()) {
                f64::NAN
            } else {
                slice.iter().sum::<f64>() / window as f64
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Monthly distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    /// Calendar month, 1-12.
    pub month: u32,
    pub label: &'static str,
    pub total: f64,
}

/// Totals of one column per calendar month, summed across all years.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyDistribution {
    pub column: String,
    /// Calendar order. Months without any rows are absent.
    pub buckets: Vec<MonthlyBucket>,
}

impl MonthlyDistribution {
    pub fn total(&self) -> f64 {
        self.buckets.iter().map(|b| b.total).sum()
    }

    /// Share of each month in percent, in bucket order.
    pub fn shares(&self) -> Vec<(&'static str, f64)> {
        let total = self.total();
        self.buckets
            .iter()
            .map(|b| {
                let share = if total == 0.0 {
                    f64::NAN
                } else {
                    b.total * 100.0 / total
                };
                (b.label, share)
            })
            .collect()
    }
}

/// Bucket `column` by (year, month), sum each bucket, then fold the years
/// together so each calendar month holds its all-time total.
///
/// Rows sharing a date are both counted. Missing cells add nothing.
pub fn monthly_distribution(
    table: &TimeSeriesTable,
    name: &str,
) -> Result<(ChartSeries, MonthlyDistribution), AggregateError> {
    let values = column(table, name)?;

    let mut by_year_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for (date, value) in table.dates().iter().zip(values) {
        let slot = by_year_month.entry((date.year(), date.month())).or_insert(0.0);
        if !value.is_nan() {
            *slot += value;
        }
    }

    let mut by_month: BTreeMap<u32, f64> = BTreeMap::new();
    for ((_, month), total) in by_year_month {
        *by_month.entry(month).or_insert(0.0) += total;
    }

    let buckets: Vec<MonthlyBucket> = by_month
        .into_iter()
        .map(|(month, total)| MonthlyBucket {
            month,
            label: MONTH_LABELS[(month - 1) as usize],
            total,
        })
        .collect();

    let series = ChartSeries {
        name: name.to_string(),
        labels: buckets.iter().map(|b| b.label.to_string()).collect(),
        values: buckets.iter().map(|b| b.total).collect(),
    };
    let distribution = MonthlyDistribution {
        column: name.to_string(),
        buckets,
    };
    Ok((series, distribution))
}

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

/// `numerator / denominator * 100` per row, rounded to one decimal, as a new
/// table with a single [`DIFF_COLUMN`].
///
/// A zero denominator gives `NaN` rather than an infinity.
pub fn percent_difference(
    table: &TimeSeriesTable,
    numerator: &str,
    denominator: &str,
) -> Result<TimeSeriesTable, AggregateError> {
    let num = column(table, numerator)?;
    let den = column(table, denominator)?;

    let diff: Vec<f64> = num
        .iter()
        .zip(den)
        .map(|(&n, &d)| if d == 0.0 { f64::NAN } else { round1(n / d * 100.0) })
        .collect();

    Ok(TimeSeriesTable::from_columns(
        table.dates().to_vec(),
        [(DIFF_COLUMN, diff)],
    )?)
}

// ---------------------------------------------------------------------------
// Lookback summary
// ---------------------------------------------------------------------------

/// Headline numbers of one district over the last `window` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub window: usize,
    pub window_label: String,
    pub mean_price_per_sqm: f64,
    pub total_sales: f64,
    /// Change from the value `window` rows back to the latest value, as a
    /// percentage of the latest value.
    pub percent_price_change: f64,
}

/// One [`SummaryRow`] per lookback window for `district`.
///
/// Window `i` reads the PPSM value at index `len - 1 - i`, so every window
/// needs at least `i + 1` rows; shorter tables fail with
/// [`AggregateError::IndexOutOfRange`]. The first failing window fails the
/// whole call; [`summary_row`] evaluates one window at a time.
pub fn summary(
    table: &TimeSeriesTable,
    district: DistrictKey,
    windows: &[usize],
) -> Result<Vec<SummaryRow>, AggregateError> {
    let columns = DistrictColumns::resolve(table, district)?;
    let ppsm = column(table, &columns.ppsm)?;
    let nos = column(table, &columns.nos)?;

    windows
        .iter()
        .map(|&window| lookback(ppsm, nos, window))
        .collect()
}

/// The [`SummaryRow`] of a single lookback window.
pub fn summary_row(
    table: &TimeSeriesTable,
    district: DistrictKey,
    window: usize,
) -> Result<SummaryRow, AggregateError> {
    let columns = DistrictColumns::resolve(table, district)?;
    lookback(
        column(table, &columns.ppsm)?,
        column(table, &columns.nos)?,
        window,
    )
}

fn lookback(ppsm: &[f64], nos: &[f64], window: usize) -> Result<SummaryRow, AggregateError> {
    let rows = ppsm.len();
    if window == 0 {
        return Err(AggregateError::InvalidWindow(window));
    }
    if window + 1 > rows {
        return Err(AggregateError::IndexOutOfRange { window, rows });
    }

    let last = ppsm[rows - 1];
    let earlier = ppsm[rows - 1 - window];
    let change = if last == 0.0 {
        f64::NAN
    } else {
        round1((last - earlier) / last * 100.0)
    };

    Ok(SummaryRow {
        window,
        window_label: format!("{window} months"),
        mean_price_per_sqm: nan_mean(&ppsm[rows - window..]),
        total_sales: nan_sum(&nos[rows - window..]),
        percent_price_change: change,
    })
}

// ---------------------------------------------------------------------------
// Cross-district and distribution helpers
// ---------------------------------------------------------------------------

/// Total number of sales per district over the whole table. Districts
/// without a NOS column are left out.
pub fn district_sales_share(table: &TimeSeriesTable) -> ChartSeries {
    let (labels, values) = DistrictKey::ALL
        .into_iter()
        .filter_map(|d| {
            let values = table.column(&d.nos_column())?;
            Some((d.display_name().to_string(), nan_sum(values)))
        })
        .unzip();

    ChartSeries {
        name: "NOS".to_string(),
        labels,
        values,
    }
}

/// Five-number summary used for box plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub mean: f64,
}

/// Quartiles with linear interpolation and whiskers at 1.5 IQR, clamped to
/// the most extreme observed values inside the fences. `None` when the
/// column has no values.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|&v| v >= low_fence)
        .unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= high_fence)
        .unwrap_or(q3);

    Some(BoxStats {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        mean: nan_mean(&sorted),
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn monthly_dates(n: usize) -> Vec<NaiveDate> {
        (0..n)
            .map(|i| {
                let year = 2019 + (i / 12) as i32;
                let month = (i % 12) as u32 + 1;
                NaiveDate::from_ymd_opt(year, month, 1).unwrap()
            })
            .collect()
    }

    fn district_table(ppsm: Vec<f64>, nos: Vec<f64>) -> TimeSeriesTable {
        TimeSeriesTable::from_columns(
            monthly_dates(ppsm.len()),
            [("HY_PPSM", ppsm), ("HY_NOS", nos)],
        )
        .unwrap()
    }

    #[test]
    fn rolling_mean_matches_window_average() {
        let values: Vec<f64> = (1..=10).map(|v| (v * v) as f64).collect();
        let mut table =
            TimeSeriesTable::from_columns(monthly_dates(10), [("PPSM", values.clone())]).unwrap();

        let produced = rolling_mean(&mut table, "PPSM", &[3, 6]).unwrap();
        assert_eq!(produced, vec!["PPSM", "SMA_PPSM_3", "SMA_PPSM_6"]);

        for (name, n) in [("SMA_PPSM_3", 3usize), ("SMA_PPSM_6", 6)] {
            let sma = table.column(name).unwrap();
            for k in 0..values.len() {
                if k + 1 < n {
                    assert!(sma[k].is_nan(), "{name}[{k}] should be undefined");
                } else {
                    let expected = values[k + 1 - n..=k].iter().sum::<f64>() / n as f64;
                    assert_eq!(sma[k], expected);
                }
            }
        }
    }

    #[test]
    fn rolling_mean_propagates_gaps() {
        let mut table = TimeSeriesTable::from_columns(
            monthly_dates(5),
            [("X", vec![1.0, f64::NAN, 3.0, 4.0, 5.0])],
        )
        .unwrap();
        rolling_mean(&mut table, "X", &[2]).unwrap();
        let sma = table.column("SMA_X_2").unwrap();
        assert!(sma[1].is_nan());
        assert!(sma[2].is_nan());
        assert_eq!(sma[3], 3.5);
        assert_eq!(sma[4], 4.5);
    }

    #[test]
    fn rolling_mean_is_idempotent() {
        let mut table =
            TimeSeriesTable::from_columns(monthly_dates(4), [("X", vec![0.1, 0.2, 0.3, 0.4])])
                .unwrap();
        rolling_mean(&mut table, "X", &[2]).unwrap();
        let first = table.column("SMA_X_2").unwrap().to_vec();
        rolling_mean(&mut table, "X", &[2]).unwrap();
        let second = table.column("SMA_X_2").unwrap();

        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(second));
        assert_eq!(table.column_names().len(), 2);
    }

    #[test]
    fn rolling_mean_rejects_bad_input() {
        let mut table =
            TimeSeriesTable::from_columns(monthly_dates(2), [("X", vec![1.0, 2.0])]).unwrap();
        assert_eq!(
            rolling_mean(&mut table, "Y", &[2]),
            Err(AggregateError::InvalidColumn("Y".into()))
        );
        assert_eq!(
            rolling_mean(&mut table, "X", &[3, 0]),
            Err(AggregateError::InvalidWindow(0))
        );
    }

    #[test]
    fn monthly_distribution_folds_years_together() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 1).unwrap(),
        ];
        let table =
            TimeSeriesTable::from_columns(dates, [("NOS", vec![10.0, 5.0, 7.0, 3.0, f64::NAN])])
                .unwrap();

        let (series, dist) = monthly_distribution(&table, "NOS").unwrap();
        assert_eq!(series.labels, vec!["Jan", "Mar", "Dec"]);
        assert_eq!(series.values, vec![20.0, 5.0, 0.0]);
        assert_eq!(
            dist.buckets.iter().map(|b| b.month).collect::<Vec<_>>(),
            vec![1, 3, 12]
        );
        assert_eq!(dist.total(), 25.0);
        assert_eq!(dist.shares()[0], ("Jan", 80.0));
    }

    #[test]
    fn monthly_totals_equal_column_sum() {
        let values: Vec<f64> = (0..30).map(|i| (i * 7 % 11) as f64).collect();
        let expected: f64 = values.iter().sum();
        let table = TimeSeriesTable::from_columns(monthly_dates(30), [("NOS", values)]).unwrap();

        let (series, dist) = monthly_distribution(&table, "NOS").unwrap();
        assert_eq!(dist.buckets.len(), 12);
        assert_eq!(dist.total(), expected);
        assert_eq!(series.total(), expected);
    }

    #[test]
    fn percent_difference_rounds_and_handles_zero() {
        let table = TimeSeriesTable::from_columns(
            monthly_dates(3),
            [("PART", vec![1.0, 5.0, 2.0]), ("WHOLE", vec![3.0, 0.0, 8.0])],
        )
        .unwrap();

        let diff = percent_difference(&table, "PART", "WHOLE").unwrap();
        let col = diff.column(DIFF_COLUMN).unwrap();
        assert_eq!(col[0], 33.3);
        assert!(col[1].is_nan());
        assert_eq!(col[2], 25.0);
        assert_eq!(diff.dates(), table.dates());

        assert_eq!(
            percent_difference(&table, "PART", "NOPE").unwrap_err(),
            AggregateError::InvalidColumn("NOPE".into())
        );
    }

    #[test]
    fn percent_difference_rounds_halves_to_even() {
        let table = TimeSeriesTable::from_columns(
            monthly_dates(3),
            [("PART", vec![1.0, 1.0, 3.0]), ("WHOLE", vec![400.0, 16.0, 80.0])],
        )
        .unwrap();
        let diff = percent_difference(&table, "PART", "WHOLE").unwrap();
        assert_eq!(diff.column(DIFF_COLUMN).unwrap(), &[0.2, 6.2, 3.8]);
    }

    #[test]
    fn percent_difference_propagates_missing_values() {
        let table = TimeSeriesTable::from_columns(
            monthly_dates(4),
            [
                ("PART", vec![0.0, f64::NAN, 2.0, 0.0]),
                ("WHOLE", vec![0.0, 4.0, f64::NAN, 5.0]),
            ],
        )
        .unwrap();
        let diff = percent_difference(&table, "PART", "WHOLE").unwrap();
        let col = diff.column(DIFF_COLUMN).unwrap();
        assert!(col[0].is_nan(), "0/0");
        assert!(col[1].is_nan(), "missing numerator");
        assert!(col[2].is_nan(), "missing denominator");
        assert_eq!(col[3], 0.0);
        assert!(col.iter().all(|v| !v.is_infinite()));
    }

    fn bits(values: &[f64]) -> Vec<u64> {
        values.iter().map(|v| v.to_bits()).collect()
    }

    #[test]
    fn aggregates_are_bit_identical_on_recomputation() {
        let ppsm: Vec<f64> = (0..15).map(|i| 40_000.0 / 3.0 + 0.1 * i as f64).collect();
        let mut nos: Vec<f64> = (0..15).map(|i| (i % 4) as f64 + 0.1).collect();
        nos[4] = f64::NAN;
        let table = district_table(ppsm, nos);

        let (series_a, dist_a) = monthly_distribution(&table, "HY_NOS").unwrap();
        let (series_b, dist_b) = monthly_distribution(&table, "HY_NOS").unwrap();
        assert_eq!(bits(&series_a.values), bits(&series_b.values));
        assert_eq!(dist_a, dist_b);

        let diff_a = percent_difference(&table, "HY_NOS", "HY_PPSM").unwrap();
        let diff_b = percent_difference(&table, "HY_NOS", "HY_PPSM").unwrap();
        assert_eq!(
            bits(diff_a.column(DIFF_COLUMN).unwrap()),
            bits(diff_b.column(DIFF_COLUMN).unwrap())
        );

        let row_bits = |rows: &[SummaryRow]| -> Vec<[u64; 3]> {
            rows.iter()
                .map(|r| {
                    [
                        r.mean_price_per_sqm.to_bits(),
                        r.total_sales.to_bits(),
                        r.percent_price_change.to_bits(),
                    ]
                })
                .collect()
        };
        let first = summary(&table, DistrictKey::Hyllie, &[3, 6, 12]).unwrap();
        let second = summary(&table, DistrictKey::Hyllie, &[3, 6, 12]).unwrap();
        assert_eq!(row_bits(&first), row_bits(&second));
    }

    #[test]
    fn summary_with_missing_prices() {
        let table = district_table(
            vec![100.0, f64::NAN, 120.0, 130.0],
            vec![1.0, 2.0, 3.0, 4.0],
        );
        let rows = summary(&table, DistrictKey::Hyllie, &[2, 3]).unwrap();
        // The value two rows back is missing.
        assert!(rows[0].percent_price_change.is_nan());
        assert_eq!(rows[0].mean_price_per_sqm, 125.0);
        assert_eq!(rows[1].percent_price_change, 23.1);
        assert_eq!(rows[1].mean_price_per_sqm, 125.0);

        let table = district_table(vec![100.0, 110.0, f64::NAN], vec![1.0, 2.0, 3.0]);
        let rows = summary(&table, DistrictKey::Hyllie, &[1, 2]).unwrap();
        assert!(rows.iter().all(|r| r.percent_price_change.is_nan()));
        assert_eq!(rows[1].mean_price_per_sqm, 110.0);
        assert_eq!(rows[1].total_sales, 5.0);
    }

    #[test]
    fn summary_reports_price_change_against_latest_value() {
        let table = district_table(vec![100.0, 110.0, 120.0, 130.0], vec![1.0, 2.0, 3.0, 4.0]);
        let rows = summary(&table, DistrictKey::Hyllie, &[3]).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.window_label, "3 months");
        assert_eq!(row.mean_price_per_sqm, 120.0);
        assert_eq!(row.total_sales, 9.0);
        assert_eq!(row.percent_price_change, 23.1);
    }

    #[test]
    fn summary_returns_one_row_per_window() {
        let ppsm: Vec<f64> = (0..13).map(|i| 40_000.0 + 100.0 * i as f64).collect();
        let table = district_table(ppsm, vec![10.0; 13]);
        let rows = summary(&table, DistrictKey::Hyllie, &[3, 6, 12]).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].total_sales, 120.0);
        assert_eq!(
            rows.iter().map(|r| r.window).collect::<Vec<_>>(),
            vec![3, 6, 12]
        );
    }

    #[test]
    fn summary_guards_lookback_index() {
        let table = district_table(vec![1.0, 2.0, 3.0], vec![1.0, 1.0, 1.0]);
        assert_eq!(
            summary(&table, DistrictKey::Hyllie, &[2, 3]),
            Err(AggregateError::IndexOutOfRange { window: 3, rows: 3 })
        );
        assert!(summary(&table, DistrictKey::Hyllie, &[2]).is_ok());
    }

    #[test]
    fn summary_row_keeps_windows_that_fit() {
        let table = district_table(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![1.0; 5]);
        let three = summary_row(&table, DistrictKey::Hyllie, 3).unwrap();
        assert_eq!(three.total_sales, 3.0);
        assert_eq!(
            summary_row(&table, DistrictKey::Hyllie, 6),
            Err(AggregateError::IndexOutOfRange { window: 6, rows: 5 })
        );
        assert_eq!(
            summary(&table, DistrictKey::Hyllie, &[3]).unwrap(),
            vec![three]
        );
    }

    #[test]
    fn summary_requires_district_columns() {
        let table = district_table(vec![1.0, 2.0], vec![1.0, 1.0]);
        assert_eq!(
            summary(&table, DistrictKey::Centrum, &[1]),
            Err(AggregateError::InvalidColumn("C_PPSM".into()))
        );
    }

    #[test]
    fn sales_share_sums_each_district() {
        let table = TimeSeriesTable::from_columns(
            monthly_dates(2),
            [("C_NOS", vec![1.0, 2.0]), ("VI_NOS", vec![4.0, f64::NAN])],
        )
        .unwrap();
        let share = district_sales_share(&table);
        assert_eq!(share.labels, vec!["Centrum", "Västra Innerstaden"]);
        assert_eq!(share.values, vec![3.0, 4.0]);
    }

    #[test]
    fn box_stats_interpolates_quartiles() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0, 100.0, f64::NAN]).unwrap();
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 4.0);
        assert_eq!(stats.mean, 22.0);
        assert!(box_stats(&[f64::NAN]).is_none());
    }
}
