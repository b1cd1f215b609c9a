use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader;
use crate::state::{AppState, Theme};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("Dataset has no usable rows.");
        return;
    }

    // Clone what we need so we can mutate state inside the widgets.
    let genres = state.dataset.genres.clone();

    ui.strong("Genre");
    let current = state.selected_genre.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("genre")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for genre in &genres {
                if ui.selectable_label(current == *genre, genre).clicked() {
                    state.set_genre(genre.clone());
                }
            }
        });

    ui.separator();

    if let Some((lo, hi)) = state.dataset.year_range {
        ui.strong("Release years");

        let mut start = state.year_start;
        if ui
            .add(egui::Slider::new(&mut start, lo..=hi).text("from"))
            .changed()
        {
            state.set_year_start(start);
        }

        let mut end = state.year_end;
        if ui
            .add(egui::Slider::new(&mut end, lo..=hi).text("to"))
            .changed()
        {
            state.set_year_end(end);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let matching = state.result.as_ref().map_or(0, |r| r.filtered.len());
        ui.label(format!(
            "{} titles loaded, {} matching",
            state.dataset.len(),
            matching
        ));

        ui.separator();

        if state.theme_enabled {
            let label = match state.theme {
                Theme::Light => "🌙 Dark mode",
                Theme::Dark => "☀ Light mode",
            };
            if ui.button(label).clicked() {
                state.toggle_theme();
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open movie dataset")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("Delimited", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path, state.min_year) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} titles across {} genres",
                    dataset.len(),
                    dataset.genres.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
