mod app;
mod cli;
mod state;
mod ui;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

use app::InMalmoApp;
use in_malmo::config::DashboardConfig;
use state::{AppState, Page};

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.init_config {
        print!("{}", DashboardConfig::default_toml());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::load_default()?.unwrap_or_default(),
    };
    config.merge_paths(
        args.housing.as_deref(),
        args.index.as_deref(),
        args.inflation.as_deref(),
    );

    let mut state = AppState::new(config);
    if let Some(district) = args.district {
        state.district = district;
        state.page = Page::District;
    }
    state.load_configured();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "in-Malmö – the guru in housing market",
        options,
        Box::new(|_cc| Ok(Box::new(InMalmoApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
