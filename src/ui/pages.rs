use eframe::egui::{self, RichText, Ui};

use in_malmo::color::ColorMap;
use in_malmo::data::aggregate::{MonthlyDistribution, district_sales_share};
use in_malmo::data::model::{ChartSeries, TimeSeriesTable};

use crate::state::AppState;
use crate::ui::{metrics, plot};

// ---------------------------------------------------------------------------
// Home – market overview
// ---------------------------------------------------------------------------

fn missing(ui: &mut Ui, what: &str) {
    ui.label(RichText::new(format!("{what} not loaded (File → Open…)")).weak());
}

fn all_columns_plot(ui: &mut Ui, id: &str, table: &TimeSeriesTable, state: &AppState) {
    let columns = table.column_names().to_vec();
    let colors = ColorMap::new(&columns, &state.palette);
    plot::time_series_plot(ui, id, table, &columns, &colors, None);
}

/// A configurable paragraph; empty texts are skipped.
fn paragraph(ui: &mut Ui, text: &str) {
    if !text.is_empty() {
        ui.label(text);
        ui.add_space(4.0);
    }
}

fn data_updated(ui: &mut Ui, state: &AppState) {
    let note = &state.config.texts.data_updated;
    if !note.is_empty() {
        ui.separator();
        ui.label(RichText::new(note).strong());
    }
}

pub fn home_page(ui: &mut Ui, state: &AppState) {
    let texts = &state.config.texts;

    ui.heading("in-Malmö – the guru in housing market");
    paragraph(ui, &texts.app);
    ui.separator();

    ui.strong("Introduction");
    paragraph(ui, &texts.introduction);

    ui.strong("Real Estate Index (REI) in Sweden");
    match &state.index {
        Some(index) => all_columns_plot(ui, "real_estate_index", index, state),
        None => missing(ui, "Real estate index"),
    }
    paragraph(ui, &texts.real_estate_index);
    ui.separator();

    ui.strong("Consumer Price Index w/o fixed rate, KPIF & KPI (in %)");
    match &state.inflation {
        Some(inflation) => all_columns_plot(ui, "inflation", inflation, state),
        None => missing(ui, "Inflation series"),
    }
    paragraph(ui, &texts.inflation);
    ui.strong("Are we heading towards a recession?");
    paragraph(ui, &texts.recession);
    ui.separator();

    ui.strong("Apartment sales by district (share of total)");
    match &state.housing {
        Some(housing) => {
            let share = district_sales_share(housing);
            if share.labels.is_empty() {
                ui.label("No district sales columns found.");
            } else {
                let percent = ChartSeries {
                    values: share.percentages(),
                    ..share
                };
                plot::category_bars(ui, "district_share", &percent, " %", &state.palette);
            }
        }
        None => missing(ui, "Apartment sales"),
    }

    data_updated(ui, state);
}

/// Monthly shares as a chart-ready series.
fn share_series(dist: &MonthlyDistribution) -> ChartSeries {
    let (labels, values) = dist
        .shares()
        .into_iter()
        .map(|(label, share)| (label.to_string(), share))
        .unzip();
    ChartSeries {
        name: dist.column.clone(),
        labels,
        values,
    }
}

/// Month, number of sales and share, below the monthly chart.
fn monthly_table(ui: &mut Ui, totals: &ChartSeries, shares: &ChartSeries) {
    egui::Grid::new("monthly_totals")
        .striped(true)
        .num_columns(3)
        .show(ui, |ui| {
            for ((month, total), (_, share)) in totals.iter().zip(shares.iter()) {
                ui.label(month);
                ui.label(format!("{total:.0}"));
                ui.label(format!("{share:.1} %"));
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// District analysis
// ---------------------------------------------------------------------------

pub fn district_page(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        if state.housing.is_none() {
            missing(ui, "Apartment sales");
        } else {
            ui.label("Select a district in the side panel.");
        }
        return;
    };
    let district = view.columns.district;
    let mean_label = format!("{} mean value", view.columns.ppsm);
    let reference = Some((mean_label.as_str(), view.ppsm_mean));
    let rooms = view.columns.room_columns();

    ui.heading(district.display_name());
    if let Some(description) = state.config.texts.district(district) {
        paragraph(ui, description);
    }

    ui.columns(2, |cols| {
        cols[0].strong("Average Price per Square Meter with Simple Moving Average (SMA)");
        plot::time_series_plot(
            &mut cols[0],
            "sma",
            &view.visible,
            &view.sma_columns,
            &view.colors,
            None,
        );
        metrics::summary_cards(&mut cols[1], &view.summary);
    });
    ui.separator();

    if !rooms.is_empty() {
        ui.columns(2, |cols| {
            cols[0].strong("Average Price per Square Meter by Number of Room(s)");
            plot::time_series_plot(
                &mut cols[0],
                "rooms_lines",
                &view.visible,
                &rooms,
                &view.colors,
                reference,
            );
            cols[1].strong("Cluster Points grouped by Number of Room(s)");
            plot::price_scatter(&mut cols[1], "rooms_scatter", &view.visible, &rooms, &view.colors);
        });

        ui.strong("Price distribution by Number of Room(s)");
        plot::room_box_plot(ui, "rooms_box", &view.room_boxes, &view.colors, reference);
        ui.separator();
    }

    let (monthly_totals, monthly) = &view.monthly;
    let monthly_shares = share_series(monthly);
    ui.columns(2, |cols| {
        cols[0].strong("Number of Apartment Sales by Month");
        plot::sales_bars(
            &mut cols[0],
            "sales_bars",
            &view.visible,
            &view.columns.nos,
            view.colors.color_for(&view.columns.nos),
        );
        cols[1].strong(format!(
            "Monthly Sales of Apartments as a Percentage of Total Sales in {district}"
        ));
        plot::category_bars(&mut cols[1], "monthly", &monthly_shares, " %", &state.palette);
        monthly_table(&mut cols[1], monthly_totals, &monthly_shares);
    });

    if let Some(share) = &view.sales_share {
        ui.separator();
        ui.strong(format!(
            "{} as a percentage of {}",
            view.columns.nos, state.config.data.total_sales_column
        ));
        metrics::diff_table(ui, share);
    }

    data_updated(ui, state);
}
