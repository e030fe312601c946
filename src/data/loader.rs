use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};

use super::model::TimeSeriesTable;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How a delimited file is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Header of the date column. Every other column must be numeric.
    pub date_column: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            date_column: "DATE".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a time-series table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – delimited text, one date column plus numeric columns
pub fn load_file(path: &Path, options: &CsvOptions) -> Result<TimeSeriesTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_table(file, options).with_context(|| format!("loading {}", path.display()))
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, `delimiter`-separated.
///
/// ```text
/// DATE;HY_PPSM;HY_NOS
/// 2019-01-01;41250,5;38
/// 2019-02-01;;41
/// ```
///
/// Numeric cells may use a comma as decimal separator. Empty cells become `NaN`.
pub fn read_table<R: Read>(reader: R, options: &CsvOptions) -> Result<TimeSeriesTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let date_idx = headers
        .iter()
        .position(|h| *h == options.date_column)
        .with_context(|| format!("CSV missing '{}' column", options.date_column))?;

    let mut dates = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        // 1-based file line; the header is line 1.
        let fallback_line = row_no as u64 + 2;
        let record = result.with_context(|| format!("CSV line {fallback_line}"))?;
        let line = record.position().map_or(fallback_line, |p| p.line());

        for (col_idx, cell) in record.iter().enumerate() {
            if col_idx == date_idx {
                let date = parse_date(cell)
                    .with_context(|| format!("CSV line {line}, column '{}'", headers[col_idx]))?;
                dates.push(date);
            } else {
                let value = parse_number(cell)
                    .with_context(|| format!("CSV line {line}, column '{}'", headers[col_idx]))?;
                columns[col_idx].push(value);
            }
        }
    }

    let numeric = headers
        .into_iter()
        .zip(columns)
        .enumerate()
        .filter(|(i, _)| *i != date_idx)
        .map(|(_, pair)| pair);

    let table = TimeSeriesTable::from_columns(dates, numeric)?;
    log::debug!(
        "read {} rows, columns {:?}",
        table.len(),
        table.column_names()
    );
    Ok(table)
}

/// Parse a numeric cell, accepting `,` as decimal separator.
/// Empty cells and the usual missing markers are `NaN`.
pub fn parse_number(s: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() || s == ".." || s.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    let normalized = s.replace(',', ".");
    normalized
        .parse::<f64>()
        .with_context(|| format!("'{s}' is not a number"))
}

/// Parse a date cell.
///
/// Accepts full dates (`2021-12-01`, `2021/12/01`, `2021-12-01 00:00:00`),
/// monthly periods (`2021-12`, `2021M12`) and bare years (`1986`). Periods
/// map to their first day.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }

    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(d) = s.parse().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)) {
            return Ok(d);
        }
    }

    if let Some((year, month)) = s.split_once(|c: char| matches!(c, 'M' | '-' | '/')) {
        if let (Ok(y), Ok(m)) = (year.parse::<i32>(), month.parse::<u32>()) {
            if let Some(d) = NaiveDate::from_ymd_opt(y, m, 1) {
                return Ok(d);
            }
        }
    }

    bail!("'{s}' is not a recognised date")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn reads_semicolon_table_with_comma_decimals() {
        let csv = "DATE;KPI;KPIF\n2021-01-01;1,6;1,7\n2021-02-01;1,4;\n2021-03-01;1,9;2,1\n";
        let table = read_table(csv.as_bytes(), &CsvOptions::default()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.column_names(), &["KPI".to_string(), "KPIF".to_string()]);
        assert_eq!(table.column("KPI"), Some(&[1.6, 1.4, 1.9][..]));
        let kpif = table.column("KPIF").unwrap();
        assert!(kpif[1].is_nan());
        assert_eq!(table.dates()[2], d(2021, 3, 1));
    }

    #[test]
    fn date_column_may_be_anywhere() {
        let csv = "HY_NOS;DATE\n12;2019M12\n";
        let table = read_table(csv.as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(table.dates(), &[d(2019, 12, 1)]);
        assert_eq!(table.column("HY_NOS"), Some(&[12.0][..]));
    }

    #[test]
    fn malformed_input_is_fatal() {
        let opts = CsvOptions::default();

        let missing_date = read_table("WHEN;X\n2020-01-01;1\n".as_bytes(), &opts).unwrap_err();
        assert!(format!("{missing_date:#}").contains("missing 'DATE'"));

        let bad_number = read_table("DATE;X\n2020-01-01;abc\n".as_bytes(), &opts).unwrap_err();
        assert!(format!("{bad_number:#}").contains("'abc' is not a number"));

        let unsorted =
            read_table("DATE;X\n2020-02-01;1\n2020-01-01;2\n".as_bytes(), &opts).unwrap_err();
        assert!(format!("{unsorted:#}").contains("not in ascending order"));

        let ragged = read_table("DATE;X\n2020-01-01;1;2\n".as_bytes(), &opts);
        assert!(ragged.is_err());
    }

    #[test]
    fn errors_name_the_file_line() {
        let opts = CsvOptions::default();
        let input = "DATE;X\n2020-01-01;1\n2020-02-01;2\n2020-03-01;oops\n";
        let err = read_table(input.as_bytes(), &opts).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("CSV line 4, column 'X'"), "{message}");

        let bad_date = read_table("DATE;X\n2020-13-45;1\n".as_bytes(), &opts).unwrap_err();
        assert!(format!("{bad_date:#}").contains("CSV line 2, column 'DATE'"));
    }

    #[test]
    fn parses_supported_date_shapes() {
        assert_eq!(parse_date("2021-12-21").unwrap(), d(2021, 12, 21));
        assert_eq!(parse_date("2021/12/21").unwrap(), d(2021, 12, 21));
        assert_eq!(parse_date("2021-12-21 00:00:00").unwrap(), d(2021, 12, 21));
        assert_eq!(parse_date("2021-12").unwrap(), d(2021, 12, 1));
        assert_eq!(parse_date("2021M03").unwrap(), d(2021, 3, 1));
        assert_eq!(parse_date("1986").unwrap(), d(1986, 1, 1));
        assert!(parse_date("2021-13").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn parses_numbers() {
        assert_eq!(parse_number("41 250").ok(), None);
        assert_eq!(parse_number("-0,5").unwrap(), -0.5);
        assert_eq!(parse_number("12").unwrap(), 12.0);
        assert!(parse_number("").unwrap().is_nan());
        assert!(parse_number("..").unwrap().is_nan());
    }

    #[test]
    fn load_file_dispatches_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("housing_data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "DATE;C_PPSM;C_NOS").unwrap();
        writeln!(file, "2018-12-01;45000;120").unwrap();
        drop(file);

        let table = load_file(&path, &CsvOptions::default()).unwrap();
        assert_eq!(table.column("C_NOS"), Some(&[120.0][..]));

        let other = dir.path().join("data.parquet");
        std::fs::write(&other, b"").unwrap();
        let err = load_file(&other, &CsvOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
