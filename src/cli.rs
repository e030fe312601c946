//! Command-line interface argument parsing.

use clap::Parser;
use std::path::PathBuf;

use in_malmo::data::district::DistrictKey;

/// in-Malmö - apartment prices, sales and inflation for Malmö
///
/// Examples:
///   in-malmo
///   in-malmo --housing resources/housing_data.csv
///   in-malmo --district hyllie
///   in-malmo --config ./in-malmo.toml --verbose
///   in-malmo --init-config > in-malmo.toml
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Per-district apartment prices and sales (overrides the config file)
    #[arg(long, value_name = "FILE")]
    pub housing: Option<PathBuf>,

    /// Real estate price index (overrides the config file)
    #[arg(long, value_name = "FILE")]
    pub index: Option<PathBuf>,

    /// KPI / KPIF inflation series (overrides the config file)
    #[arg(long, value_name = "FILE")]
    pub inflation: Option<PathBuf>,

    /// Open the analysis page of this district (name or abbreviation, e.g. HY)
    #[arg(short, long, value_name = "DISTRICT")]
    pub district: Option<DistrictKey>,

    /// Path to configuration file
    ///
    /// If not specified, looks for in-malmo.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a default configuration file and exit
    #[arg(long)]
    pub init_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_overrides() {
        let args = Args::parse_from([
            "in-malmo",
            "--housing",
            "h.csv",
            "--config",
            "cfg.toml",
            "-v",
        ]);
        assert_eq!(args.housing, Some(PathBuf::from("h.csv")));
        assert_eq!(args.config, Some(PathBuf::from("cfg.toml")));
        assert!(args.index.is_none());
        assert!(args.verbose);
        assert!(!args.init_config);
        assert!(args.district.is_none());
    }

    #[test]
    fn parses_district_by_name_or_abbreviation() {
        let args = Args::parse_from(["in-malmo", "--district", "Kirseberg"]);
        assert_eq!(args.district, Some(DistrictKey::Kirseberg));

        let args = Args::parse_from(["in-malmo", "-d", "rgh"]);
        assert_eq!(args.district, Some(DistrictKey::RosengardHusie));

        assert!(Args::try_parse_from(["in-malmo", "--district", "Lund"]).is_err());
    }
}
