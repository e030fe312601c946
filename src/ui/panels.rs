use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use in_malmo::data::district::DistrictKey;

use crate::state::{AppState, Dataset, Page};

// ---------------------------------------------------------------------------
// Left side panel – district, date range, glossary
// ---------------------------------------------------------------------------

/// Render the left side panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("in-Malmö");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- District selector ----
            ui.strong("Select City District");
            let current = state.district;
            egui::ComboBox::from_id_salt("district")
                .selected_text(current.display_name())
                .show_ui(ui, |ui: &mut Ui| {
                    for district in DistrictKey::ALL {
                        if ui
                            .selectable_label(current == district, district.display_name())
                            .clicked()
                        {
                            state.set_district(district);
                            state.page = Page::District;
                        }
                    }
                });
            ui.separator();

            // ---- Date range for the district charts ----
            ui.strong("Date range");
            let before = (state.range_start, state.range_end);
            ui.horizontal(|ui: &mut Ui| {
                ui.label("From");
                ui.add(DatePickerButton::new(&mut state.range_start).id_salt("range_start"));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("To");
                ui.add(DatePickerButton::new(&mut state.range_end).id_salt("range_end"));
            });
            if ui.small_button("Reset").clicked() {
                state.reset_date_range();
            }
            if before != (state.range_start, state.range_end) {
                state.refilter();
            }
            ui.separator();

            // ---- Abbreviation glossary ----
            ui.checkbox(&mut state.show_glossary, "Show Abbreviation Table");
            if state.show_glossary {
                egui::Grid::new("glossary")
                    .striped(true)
                    .num_columns(2)
                    .show(ui, |ui: &mut Ui| {
                        for (abbrev, description) in &state.config.glossary {
                            ui.monospace(abbrev);
                            ui.label(description);
                            ui.end_row();
                        }
                    });
            }
            ui.separator();

            // ---- Loaded files ----
            ui.strong("Data");
            for which in Dataset::ALL {
                let rows = match which {
                    Dataset::Housing => state.housing.as_ref(),
                    Dataset::Index => state.index.as_ref(),
                    Dataset::Inflation => state.inflation.as_ref(),
                }
                .map(|t| t.len());
                let text = match rows {
                    Some(n) => format!("{}: {n} rows", which.label()),
                    None => format!("{}: not loaded", which.label()),
                };
                ui.label(RichText::new(text).small());
            }
            ui.label(RichText::new("Source: Statistics Sweden (scb.se)").small().weak());
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            for which in Dataset::ALL {
                if ui.button(format!("Open {}…", which.label())).clicked() {
                    open_file_dialog(state, which);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("Reload").clicked() {
                state.load_configured();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.page, Page::Home, "Home");
        ui.selectable_value(&mut state.page, Page::District, "Data Analysis");

        ui.separator();

        if let Some(view) = &state.view {
            ui.label(format!(
                "{}: {} of {} months shown",
                view.columns.district,
                view.visible.len(),
                view.table.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, which: Dataset) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Open {}", which.label()))
        .add_filter("Delimited text", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        match which {
            Dataset::Housing => state.config.data.housing_path = path.clone(),
            Dataset::Index => state.config.data.index_path = path.clone(),
            Dataset::Inflation => state.config.data.inflation_path = path.clone(),
        }
        state.status_message = None;
        state.load_reporting(which, &path);
    }
}
