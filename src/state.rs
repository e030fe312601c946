use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use eframe::egui::Color32;

use in_malmo::color::{ColorMap, theme_palette};
use in_malmo::config::DashboardConfig;
use in_malmo::data::aggregate::{
    self, AggregateError, BoxStats, MonthlyDistribution, SummaryRow,
};
use in_malmo::data::district::{DistrictColumns, DistrictKey, RoomBucket};
use in_malmo::data::filter::{DateRange, rows_in_range};
use in_malmo::data::loader;
use in_malmo::data::model::{ChartSeries, TimeSeriesTable};

// ---------------------------------------------------------------------------
// Datasets and pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Housing,
    Index,
    Inflation,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Housing, Dataset::Index, Dataset::Inflation];

    pub fn label(self) -> &'static str {
        match self {
            Dataset::Housing => "Apartment sales",
            Dataset::Index => "Real estate index",
            Dataset::Inflation => "Inflation (KPI/KPIF)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    District,
}

// ---------------------------------------------------------------------------
// DistrictView – everything derived for the selected district
// ---------------------------------------------------------------------------

/// Price distribution of one room bucket.
pub struct RoomBox {
    pub bucket: RoomBucket,
    pub column: String,
    pub stats: BoxStats,
}

/// Aggregates for one district, rebuilt whenever the district changes.
pub struct DistrictView {
    pub columns: DistrictColumns,
    /// Housing table plus the moving-average columns of this district.
    pub table: TimeSeriesTable,
    /// Rows of `table` inside the selected date range.
    pub visible: TimeSeriesTable,
    /// PPSM followed by its moving averages.
    pub sma_columns: Vec<String>,
    /// One entry per configured lookback window, in order.
    pub summary: Vec<Result<SummaryRow, AggregateError>>,
    pub ppsm_mean: f64,
    pub monthly: (ChartSeries, MonthlyDistribution),
    /// District sales as a percentage of city-wide sales, when available.
    pub sales_share: Option<TimeSeriesTable>,
    pub room_boxes: Vec<RoomBox>,
    pub colors: ColorMap,
}

impl DistrictView {
    pub fn build(
        housing: &TimeSeriesTable,
        district: DistrictKey,
        config: &DashboardConfig,
        palette: &[Color32],
        range: &DateRange,
    ) -> Result<Self, AggregateError> {
        let columns = DistrictColumns::resolve(housing, district)?;

        let mut table = housing.clone();
        let sma_columns =
            aggregate::rolling_mean(&mut table, &columns.ppsm, &config.analysis.sma_windows)?;

        let summary: Vec<_> = config
            .analysis
            .lookback_windows
            .iter()
            .map(|&window| aggregate::summary_row(&table, district, window))
            .collect();
        for e in summary.iter().filter_map(|row| row.as_ref().err()) {
            log::warn!("{district}: {e}");
        }

        let ppsm_mean = aggregate::column_mean(&table, &columns.ppsm)?;
        let monthly = aggregate::monthly_distribution(&table, &columns.nos)?;

        let total = &config.data.total_sales_column;
        let sales_share = if table.has_column(total) {
            Some(aggregate::percent_difference(&table, &columns.nos, total)?)
        } else {
            log::debug!("no '{total}' column, skipping sales share");
            None
        };

        let room_boxes = columns
            .rooms
            .iter()
            .filter_map(|(bucket, col)| {
                let stats = aggregate::box_stats(table.column(col)?)?;
                Some(RoomBox {
                    bucket: *bucket,
                    column: col.clone(),
                    stats,
                })
            })
            .collect();

        let mut series: Vec<String> = sma_columns.clone();
        series.extend(columns.room_columns());
        series.push(columns.nos.clone());
        let colors = ColorMap::new(&series, palette);

        let visible = rows_in_range(&table, range);

        Ok(DistrictView {
            columns,
            table,
            visible,
            sma_columns,
            summary,
            ppsm_mean,
            monthly,
            sales_share,
            room_boxes,
            colors,
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,
    pub palette: Vec<Color32>,

    pub page: Page,

    /// Loaded tables (None until loaded). Held read-only once loaded.
    pub housing: Option<TimeSeriesTable>,
    pub index: Option<TimeSeriesTable>,
    pub inflation: Option<TimeSeriesTable>,

    pub district: DistrictKey,

    /// Derived aggregates for `district` (cached).
    pub view: Option<DistrictView>,

    /// Date range applied to the district charts.
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,

    pub show_glossary: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let palette = theme_palette(&config.theme);
        let today = chrono::Local::now().date_naive();
        Self {
            config,
            palette,
            page: Page::Home,
            housing: None,
            index: None,
            inflation: None,
            district: DistrictKey::Centrum,
            view: None,
            range_start: today,
            range_end: today,
            show_glossary: false,
            status_message: None,
        }
    }

    /// Load every dataset whose configured path exists. Every failure ends
    /// up in the status message.
    pub fn load_configured(&mut self) {
        self.status_message = None;
        for which in Dataset::ALL {
            let path = self.path_of(which).to_path_buf();
            if !path.exists() {
                log::warn!("{} file {} not found", which.label(), path.display());
                continue;
            }
            self.load_reporting(which, &path);
        }
    }

    pub fn path_of(&self, which: Dataset) -> &Path {
        match which {
            Dataset::Housing => &self.config.data.housing_path,
            Dataset::Index => &self.config.data.index_path,
            Dataset::Inflation => &self.config.data.inflation_path,
        }
    }

    /// Load a dataset and report failures in the status bar. Earlier
    /// messages are kept.
    pub fn load_reporting(&mut self, which: Dataset, path: &Path) {
        if let Err(e) = self.load_dataset(which, path) {
            log::error!("Failed to load {}: {e:#}", which.label());
            self.report(format!("Error loading {}: {e:#}", which.label()));
        }
    }

    fn report(&mut self, message: String) {
        self.status_message = Some(match self.status_message.take() {
            Some(existing) => format!("{existing} | {message}"),
            None => message,
        });
    }

    pub fn load_dataset(&mut self, which: Dataset, path: &Path) -> Result<()> {
        let options = self.config.data.csv_options()?;
        let table = loader::load_file(path, &options)?;
        log::info!(
            "Loaded {} rows with columns {:?} from {}",
            table.len(),
            table.column_names(),
            path.display()
        );

        match which {
            Dataset::Housing => self.set_housing(table),
            Dataset::Index => self.index = Some(table),
            Dataset::Inflation => self.inflation = Some(table),
        }
        Ok(())
    }

    /// Ingest a newly loaded housing table, reset the date range and rebuild.
    pub fn set_housing(&mut self, table: TimeSeriesTable) {
        self.housing = Some(table);
        self.reset_date_range();
        self.rebuild_view();
    }

    /// Widen the date range to every row of the housing table.
    pub fn reset_date_range(&mut self) {
        let Some(housing) = &self.housing else {
            return;
        };
        if let DateRange {
            start: Some(first),
            end: Some(last),
        } = DateRange::covering(housing)
        {
            self.range_start = first;
            self.range_end = last;
        }
    }

    pub fn date_range(&self) -> DateRange {
        DateRange {
            start: Some(self.range_start),
            end: Some(self.range_end),
        }
    }

    pub fn set_district(&mut self, district: DistrictKey) {
        if self.district != district || self.view.is_none() {
            self.district = district;
            self.status_message = None;
            self.rebuild_view();
        }
    }

    /// Recompute every aggregate of the selected district.
    pub fn rebuild_view(&mut self) {
        let Some(housing) = &self.housing else {
            self.view = None;
            return;
        };
        let range = self.date_range();
        match DistrictView::build(housing, self.district, &self.config, &self.palette, &range) {
            Ok(view) => self.view = Some(view),
            Err(e) => {
                log::error!("{}: {e}", self.district);
                self.report(format!("{}: {e}", self.district));
                self.view = None;
            }
        }
    }

    /// Recompute the visible rows after a date range change.
    pub fn refilter(&mut self) {
        let range = self.date_range();
        if let Some(view) = &mut self.view {
            view.visible = rows_in_range(&view.table, &range);
        }
    }
}
