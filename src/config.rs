//! Configuration file handling.
//!
//! Everything the dashboard used to keep as module-level constants (input
//! paths, window sizes, palette, glossary, page texts) lives here and is
//! passed explicitly to the data and presentation layers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::data::district::DistrictKey;
use crate::data::loader::CsvOptions;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "in-malmo.toml";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Input files and their layout.
    #[serde(default)]
    pub data: DataConfig,

    /// Window sizes for derived series.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Chart colours.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Abbreviation → description, shown in the sidebar.
    #[serde(default = "default_glossary")]
    pub glossary: BTreeMap<String, String>,

    /// Descriptive paragraphs shown on the pages.
    #[serde(default)]
    pub texts: TextsConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            analysis: AnalysisConfig::default(),
            theme: ThemeConfig::default(),
            glossary: default_glossary(),
            texts: TextsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Per-district apartment prices and sales.
    #[serde(default = "default_housing_path")]
    pub housing_path: PathBuf,

    /// Real estate price index.
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// KPI / KPIF inflation series.
    #[serde(default = "default_inflation_path")]
    pub inflation_path: PathBuf,

    #[serde(default = "default_date_column")]
    pub date_column: String,

    /// Single-character field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// City-wide number of sales, used as denominator for district shares.
    #[serde(default = "default_total_sales_column")]
    pub total_sales_column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            housing_path: default_housing_path(),
            index_path: default_index_path(),
            inflation_path: default_inflation_path(),
            date_column: default_date_column(),
            delimiter: default_delimiter(),
            total_sales_column: default_total_sales_column(),
        }
    }
}

fn default_housing_path() -> PathBuf {
    PathBuf::from("resources/housing_data.csv")
}

fn default_index_path() -> PathBuf {
    PathBuf::from("resources/real_estate_index.csv")
}

fn default_inflation_path() -> PathBuf {
    PathBuf::from("resources/inflation_rate.csv")
}

fn default_date_column() -> String {
    "DATE".to_string()
}

fn default_delimiter() -> String {
    ";".to_string()
}

fn default_total_sales_column() -> String {
    "MMA_NOS".to_string()
}

impl DataConfig {
    /// Reader options derived from this section.
    pub fn csv_options(&self) -> Result<CsvOptions> {
        let delimiter = match self.delimiter.as_bytes() {
            [b] => *b,
            _ => bail!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ),
        };
        Ok(CsvOptions {
            delimiter,
            date_column: self.date_column.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Moving-average window sizes, in rows (months).
    #[serde(default = "default_windows")]
    pub sma_windows: Vec<usize>,

    /// Lookback windows for the summary cards, in rows (months).
    #[serde(default = "default_windows")]
    pub lookback_windows: Vec<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sma_windows: default_windows(),
            lookback_windows: default_windows(),
        }
    }
}

fn default_windows() -> Vec<usize> {
    vec![3, 6, 12]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Hex colours (`#rrggbb`) assigned to series in order.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
        }
    }
}

fn default_palette() -> Vec<String> {
    [
        "#001219", "#005f73", "#0a9396", "#94d2bd", "#e9d8a6", "#ee9b00", "#ca6702", "#bb3e03",
        "#ae2012", "#9b2226",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_glossary() -> BTreeMap<String, String> {
    let mut glossary: BTreeMap<String, String> = DistrictKey::ALL
        .into_iter()
        .map(|d| (d.abbreviation().to_string(), d.display_name().to_string()))
        .collect();
    glossary.insert("PPSM".into(), "Average price per SqM in SEK".into());
    glossary.insert(
        "PPSMxR".into(),
        "Average price per SqM in SEK for x Room(s)".into(),
    );
    glossary.insert("NOS".into(), "Number of Sales".into());
    glossary
}

/// Page texts. Missing keys fall back to the built-in wording; an empty
/// string hides the paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextsConfig {
    pub app: String,
    pub introduction: String,
    pub real_estate_index: String,
    pub inflation: String,
    pub recession: String,
    /// Note on when the bundled data was last refreshed.
    pub data_updated: String,
    /// District abbreviation → description.
    pub districts: BTreeMap<String, String>,
}

impl Default for TextsConfig {
    fn default() -> Self {
        let districts = [
            (
                DistrictKey::Centrum,
                "Centrum is the heart of Malmö, with shops, restaurants and easy access to the \
                 rest of the city. Demand outpaces supply, so prices are among the highest in Malmö.",
            ),
            (
                DistrictKey::Hyllie,
                "Hyllie in the south of Malmö is a modern district with shopping, venues and fast \
                 connections. The housing market is competitive and prices are above the city average.",
            ),
            (
                DistrictKey::Kirseberg,
                "Kirseberg in the east of Malmö mixes rentals, condominiums and detached houses. \
                 Prices tend to be lower than in the rest of the city.",
            ),
        ]
        .into_iter()
        .map(|(d, text)| (d.abbreviation().to_string(), text.to_string()))
        .collect();

        Self {
            app: "Prices, sales and trends of the Malmö housing market, drawn from Statistics \
                  Sweden, to help you buy, sell or simply stay informed."
                .into(),
            introduction: "Demand for housing in Sweden has outpaced supply for years, pushing \
                           prices up in most of the country. Sales have grown since 2018 with a \
                           dip in 2020."
                .into(),
            real_estate_index: "A real estate index tracks the value of a group of properties \
                                over time. Compare it with local prices to see whether Malmö \
                                follows the national trend."
                .into(),
            inflation: "KPI measures the average change in consumer prices. KPIF holds the \
                        mortgage rate fixed and is the measure the Riksbank targets."
                .into(),
            recession: "A recession lowers disposable income and demand for housing, but it \
                        also slows new construction, which can support prices."
                .into(),
            data_updated: "All data has been updated on December 21, 2021.".into(),
            districts,
        }
    }
}

impl TextsConfig {
    pub fn district(&self, district: DistrictKey) -> Option<&str> {
        self.districts
            .get(district.abbreviation())
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }
}

impl DashboardConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: DashboardConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Override input paths given on the command line.
    pub fn merge_paths(
        &mut self,
        housing: Option<&Path>,
        index: Option<&Path>,
        inflation: Option<&Path>,
    ) {
        if let Some(p) = housing {
            self.data.housing_path = p.to_path_buf();
        }
        if let Some(p) = index {
            self.data.index_path = p.to_path_buf();
        }
        if let Some(p) = inflation {
            self.data.inflation_path = p.to_path_buf();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = DashboardConfig::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
