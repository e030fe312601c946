use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use in_malmo::data::aggregate::{AggregateError, DIFF_COLUMN, SummaryRow};
use in_malmo::data::model::TimeSeriesTable;

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

fn format_value(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        "–".to_string()
    }
}

fn card(ui: &mut Ui, label: &str, value: String, caption: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_min_width(110.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(label).small());
                ui.label(RichText::new(value).size(22.0).strong());
                ui.label(RichText::new(caption).small().weak());
            });
        });
}

/// Three cards per lookback window: mean price, sales, price development.
/// Windows that do not fit the data show their error instead.
pub fn summary_cards(ui: &mut Ui, summary: &[Result<SummaryRow, AggregateError>]) {
    for entry in summary {
        let row = match entry {
            Ok(row) => row,
            Err(e) => {
                ui.label(RichText::new(format!("Summary unavailable: {e}")).color(Color32::RED));
                continue;
            }
        };
        ui.horizontal(|ui| {
            card(
                ui,
                &row.window_label,
                format_value(row.mean_price_per_sqm, 0),
                "kr/sqm",
            );
            card(ui, "", format_value(row.total_sales, 0), "units");
            card(
                ui,
                "",
                format!("{}%", format_value(row.percent_price_change, 1)),
                "price development",
            );
        });
    }
}

// ---------------------------------------------------------------------------
// Ratio table
// ---------------------------------------------------------------------------

/// `DATE | DIFF` table of a [`percent_difference`] result, latest row first.
///
/// [`percent_difference`]: in_malmo::data::aggregate::percent_difference
pub fn diff_table(ui: &mut Ui, table: &TimeSeriesTable) {
    let Some(diff) = table.column(DIFF_COLUMN) else {
        return;
    };
    let dates = table.dates();
    let n = dates.len();

    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(240.0)
        .column(Column::auto().at_least(100.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("DATE");
            });
            header.col(|ui| {
                ui.strong(DIFF_COLUMN);
            });
        })
        .body(|body| {
            body.rows(18.0, n, |mut row| {
                let i = n - 1 - row.index();
                row.col(|ui| {
                    ui.label(dates[i].format("%Y-%m-%d").to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{}%", format_value(diff[i], 1)));
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_undefined_values_as_dash() {
        assert_eq!(format_value(f64::NAN, 1), "–");
        assert_eq!(format_value(f64::INFINITY, 0), "–");
        assert_eq!(format_value(23.14, 1), "23.1");
        assert_eq!(format_value(41_250.6, 0), "41251");
    }
}
