use eframe::egui::{self, Color32, RichText, Ui};

use crate::cycle::CycleOutput;
use crate::data::filter::RangeSelection;
use crate::data::loader::{SUPPORTED_EXTENSIONS, Upload};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – upload and range filter
// ---------------------------------------------------------------------------

/// Render the left panel: file upload and the population range control.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Upload and Filter Dataset");
    ui.separator();

    ui.label("Choose a CSV file");
    if ui.button("Browse files…").clicked() {
        open_file_dialog(state);
    }
    match &state.upload {
        Some(upload) => {
            ui.label(RichText::new(&upload.name).monospace());
        }
        None => {
            ui.label(RichText::new("…or drop a file onto the window").weak());
        }
    }

    let Some(report) = state.output.report() else {
        return;
    };
    let bounds = report.bounds;
    let current = report.selection;

    ui.add_space(8.0);
    ui.strong("Filter by Population");
    ui.label("Select Population Range:");

    if bounds.is_fixed_point() {
        // A single distinct value: nothing to choose.
        ui.label(RichText::new(format!("{}", bounds.min)).monospace());
        return;
    }

    let mut lo = current.lo;
    let mut hi = current.hi;
    // Each handle is bounded by the other, so lo <= hi always holds.
    ui.add(
        egui::Slider::new(&mut lo, bounds.min..=hi)
            .logarithmic(true)
            .text("min"),
    );
    ui.add(
        egui::Slider::new(&mut hi, lo..=bounds.max)
            .logarithmic(true)
            .text("max"),
    );

    if ui.small_button("Reset range").clicked() {
        state.reset_selection();
        return;
    }

    let chosen = RangeSelection { lo, hi }.clamped(bounds);
    if chosen != current {
        state.set_selection(chosen);
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

        match &state.output {
            CycleOutput::Ready(report) => {
                ui.label(format!(
                    "{} rows loaded, {} in range",
                    report.dataset.len(),
                    report.filtered.len()
                ));
            }
            CycleOutput::Failed(_) => {
                ui.label(RichText::new("Load failed").color(Color32::RED));
            }
            CycleOutput::AwaitingInput => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File acquisition
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open population data")
        .add_filter("Supported files", &SUPPORTED_EXTENSIONS)
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match Upload::from_path(&path) {
            Ok(upload) => state.set_upload(upload),
            Err(e) => state.upload_failed(e),
        }
    }
}

/// Take the first file dropped onto the window this frame, if any.
pub fn handle_dropped_files(ctx: &egui::Context, state: &mut AppState) {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    let Some(file) = dropped.into_iter().next() else {
        return;
    };

    if let Some(bytes) = file.bytes {
        state.set_upload(Upload::new(file.name, bytes.to_vec()));
    } else if let Some(path) = file.path {
        match Upload::from_path(&path) {
            Ok(upload) => state.set_upload(upload),
            Err(e) => state.upload_failed(e),
        }
    }
}
