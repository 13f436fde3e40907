use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::slot_color;
use crate::data::model::MAX_SOURCES;
use crate::report::{save_export, save_report, source_stats};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – loaded files & statistics
// ---------------------------------------------------------------------------

/// Render the left panel: one block per loaded file with its slot colour,
/// remove button and statistics.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Files");
    ui.separator();

    if state.slots.is_empty() {
        ui.label("No sweep files loaded.");
        ui.label(format!(
            "Use File → Open… to load up to {MAX_SOURCES} CSV files."
        ));
        return;
    }

    let slots = state.slots.clone();
    let mut removed: Option<String> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (slot, source) in slots.iter().enumerate() {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("●").color(slot_color(slot)));
                    ui.strong(source);
                    if ui.small_button("✕").on_hover_text("Remove file").clicked() {
                        removed = Some(source.clone());
                    }
                });

                match state.store.get(source).and_then(source_stats) {
                    Some(stats) => {
                        ui.label(format!("Data points: {}", stats.points));
                        ui.label(format!(
                            "Frequency: {:.2} - {:.2} Hz",
                            stats.min_frequency, stats.max_frequency
                        ));
                        ui.label(format!(
                            "Magnitude: {:.2} - {:.2} dB",
                            stats.min_magnitude, stats.max_magnitude
                        ));
                        ui.label(format!("Avg magnitude: {:.2} dB", stats.avg_magnitude));
                    }
                    None => {
                        ui.horizontal(|ui: &mut Ui| {
                            ui.spinner();
                            ui.label("Loading…");
                        });
                    }
                }
                ui.separator();
            }
        });

    if let Some(source) = removed {
        state.remove_source(&source);
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
                open_files_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load column rules…").clicked() {
                open_rules_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let has_data = !state.store.is_empty();
            if ui
                .add_enabled(has_data, egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_csv_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_data, egui::Button::new("Save report…"))
                .clicked()
            {
                save_report_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Clear all").clicked() {
                state.clear_all();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} of {MAX_SOURCES} files loaded, {} points",
            state.store.len(),
            state.store.total_points()
        ));

        if state.loading() {
            ui.separator();
            ui.spinner();
            ui.label("Loading…");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn open_files_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Open FRA sweep data")
        .add_filter("Delimited text", &["csv", "txt"])
        .pick_files();

    if let Some(paths) = files {
        state.request_loads(paths);
    }
}

fn open_rules_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Load column rules")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_column_rules(&path);
    }
}

fn export_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export merged data")
        .set_file_name("fra_analysis.csv")
        .save_file();

    if let Some(path) = file {
        match save_export(&path, &state.frame()) {
            Ok(()) => log::info!("exported merged data to {}", path.display()),
            Err(e) => {
                log::error!("export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn save_report_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save analysis report")
        .set_file_name("fra_analysis_report.txt")
        .save_file();

    if let Some(path) = file {
        match save_report(&path, &state.store, &state.slots) {
            Ok(()) => log::info!("saved report to {}", path.display()),
            Err(e) => {
                log::error!("report failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
