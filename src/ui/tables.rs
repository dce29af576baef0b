use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Dataset preview tables
// ---------------------------------------------------------------------------

/// Render the rows of `dataset` listed in `rows` as a scrollable table;
/// `None` shows every row.
///
/// `id` keeps the scroll state of side-by-side tables apart.
pub fn dataset_table(
    ui: &mut Ui,
    id: &str,
    heading: &str,
    dataset: &Dataset,
    rows: Option<&[usize]>,
    row_height: f32,
    max_height: f32,
) {
    ui.heading(heading);
    let count = row_count(dataset, rows);
    ui.label(format!("{} rows × {} columns", count, dataset.columns.len()));

    ui.push_id(id, |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(32.0))
                .columns(Column::auto().at_least(60.0).clip(true), dataset.columns.len())
                .min_scrolled_height(0.0)
                .max_scroll_height(max_height)
                .header(20.0, |mut header| {
                    header.col(|ui: &mut Ui| {
                        ui.strong("#");
                    });
                    for name in &dataset.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(row_height, count, |mut row| {
                        let idx = dataset_row(rows, row.index());
                        row.col(|ui: &mut Ui| {
                            ui.weak(idx.to_string());
                        });
                        for cell in &dataset.rows[idx] {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell.label());
                            });
                        }
                    });
                });
        });
    });
}

fn row_count(dataset: &Dataset, rows: Option<&[usize]>) -> usize {
    rows.map_or(dataset.len(), <[usize]>::len)
}

/// Dataset row shown at table position `position`.
fn dataset_row(rows: Option<&[usize]>, position: usize) -> usize {
    rows.map_or(position, |r| r[position])
}
