/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  housing_data.csv / real_estate_index.csv / inflation_rate.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse `;`-separated file → TimeSeriesTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ TimeSeriesTable  │  dates + named f64 columns (NaN = missing)
///   └─────────────────┘
///        │                         │
///        ▼                         ▼
///   ┌──────────┐            ┌─────────────┐
///   │  filter   │ date range │  aggregate   │ SMA, monthly sums, ratios,
///   └──────────┘            └─────────────┘ lookback summaries
///                                  ▲
///                                  │
///                           ┌─────────────┐
///                           │  district    │ DistrictKey → checked columns
///                           └─────────────┘
/// ```

pub mod aggregate;
pub mod district;
pub mod filter;
pub mod loader;
pub mod model;
