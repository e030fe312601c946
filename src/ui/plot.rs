use std::ops::RangeInclusive;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, HLine, Legend, Line, LineStyle, Plot,
    PlotPoints, Points,
};

use in_malmo::color::ColorMap;
use in_malmo::data::model::{ChartSeries, TimeSeriesTable, date_to_x, x_to_date};

use crate::state::RoomBox;

const PLOT_HEIGHT: f32 = 280.0;

fn format_date_mark(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    x_to_date(mark.value)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

/// A plot whose x axis is a date axis built with [`date_to_x`].
fn date_plot(id: &str) -> Plot<'_> {
    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_formatter(format_date_mark)
        .label_formatter(|name, value| {
            let date = x_to_date(value.x)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            if name.is_empty() {
                format!("{date}\n{:.1}", value.y)
            } else {
                format!("{name}\n{date}\n{:.1}", value.y)
            }
        })
        .allow_scroll(false)
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

/// One line per column against the date axis, with an optional dotted
/// horizontal reference line.
pub fn time_series_plot(
    ui: &mut Ui,
    id: &str,
    table: &TimeSeriesTable,
    columns: &[String],
    colors: &ColorMap,
    reference: Option<(&str, f64)>,
) {
    date_plot(id).show(ui, |plot_ui| {
        for col in columns {
            let Some(points) = table.points(col) else {
                continue;
            };
            let line = Line::new(PlotPoints::from(points))
                .name(col)
                .color(colors.color_for(col))
                .width(1.5);
            plot_ui.line(line);
        }

        if let Some((name, y)) = reference {
            if y.is_finite() {
                plot_ui.hline(
                    HLine::new(y)
                        .name(name)
                        .color(Color32::DARK_GRAY)
                        .style(LineStyle::dotted_loose()),
                );
            }
        }
    });
}

/// Price against date with the axes swapped: value on x, date on y.
pub fn price_scatter(
    ui: &mut Ui,
    id: &str,
    table: &TimeSeriesTable,
    columns: &[String],
    colors: &ColorMap,
) {
    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .y_axis_formatter(format_date_mark)
        .x_axis_label("kr/sqm")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for col in columns {
                let Some(points) = table.points(col) else {
                    continue;
                };
                let swapped: Vec<[f64; 2]> = points.into_iter().map(|[x, y]| [y, x]).collect();
                plot_ui.points(
                    Points::new(PlotPoints::from(swapped))
                        .name(col)
                        .color(colors.color_for(col))
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

/// One box per room bucket plus a dotted line at the district mean.
pub fn room_box_plot(
    ui: &mut Ui,
    id: &str,
    boxes: &[RoomBox],
    colors: &ColorMap,
    reference: Option<(&str, f64)>,
) {
    let labels: Vec<String> = boxes.iter().map(|b| b.bucket.label().to_string()).collect();

    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, room) in boxes.iter().enumerate() {
                let color = colors.color_for(&room.column);
                let stats = &room.stats;
                let elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(
                        stats.lower_whisker,
                        stats.q1,
                        stats.median,
                        stats.q3,
                        stats.upper_whisker,
                    ),
                )
                .name(room.bucket.label())
                .box_width(0.5)
                .fill(color.gamma_multiply(0.4))
                .stroke(Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&room.column));
            }

            if let Some((name, y)) = reference {
                if y.is_finite() {
                    plot_ui.hline(
                        HLine::new(y)
                            .name(name)
                            .color(Color32::DARK_GRAY)
                            .style(LineStyle::dotted_loose()),
                    );
                }
            }
        });
}

/// Number of sales per row as horizontal bars, dates on the y axis.
pub fn sales_bars(ui: &mut Ui, id: &str, table: &TimeSeriesTable, column: &str, color: Color32) {
    let Some(values) = table.column(column) else {
        return;
    };
    let bars: Vec<Bar> = table
        .dates()
        .iter()
        .zip(values)
        .filter(|(_, v)| !v.is_nan())
        .map(|(d, v)| Bar::new(date_to_x(*d), *v).width(24.0))
        .collect();

    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .y_axis_formatter(format_date_mark)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(column).color(color).horizontal());
        });
}

/// Categorical bars, one per label, with `unit` appended to the axis label.
pub fn category_bars(
    ui: &mut Ui,
    id: &str,
    series: &ChartSeries,
    unit: &str,
    palette: &[Color32],
) {
    let colors = ColorMap::new(&series.labels, palette);
    let bars: Vec<Bar> = series
        .iter()
        .enumerate()
        .map(|(i, (label, v))| {
            Bar::new(i as f64, v)
                .name(label)
                .fill(colors.color_for(label))
                .width(0.7)
        })
        .collect();

    let labels = series.labels.clone();
    Plot::new(id.to_string())
        .height(PLOT_HEIGHT)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .y_axis_label(format!("{}{unit}", series.name))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(&series.name));
        });
}

fn category_label(labels: &[String], x: f64) -> String {
    if x.fract() != 0.0 || x < 0.0 {
        return String::new();
    }
    labels.get(x as usize).cloned().unwrap_or_default()
}
