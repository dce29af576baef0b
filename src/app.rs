use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::cycle::{CycleOutput, Report};
use crate::state::AppState;
use crate::ui::{panels, plot, tables};

pub const TITLE: &str = "Data Viewer with Population Filter and Visualization";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PopulationViewerApp {
    pub state: AppState,
}

impl PopulationViewerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PopulationViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::handle_dropped_files(ctx, &mut self.state);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: upload and filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(RichText::new(TITLE).size(24.0));
            ui.separator();

            match &self.state.output {
                CycleOutput::AwaitingInput => {
                    ui.label("Please upload a CSV file using the sidebar.");
                }
                CycleOutput::Failed(e) => {
                    ui.label(RichText::new(e.to_string()).color(Color32::RED));
                }
                CycleOutput::Ready(report) => {
                    ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui: &mut Ui| {
                            report_view(ui, &self.state, report);
                        });
                }
            }
        });
    }
}

/// Two tables side by side, then two charts side by side.
fn report_view(ui: &mut Ui, state: &AppState, report: &Report) {
    let config = &state.config;

    ui.columns(2, |cols: &mut [Ui]| {
        tables::dataset_table(
            &mut cols[0],
            "original_table",
            "Original Dataset Preview",
            &report.dataset,
            None,
            config.table_row_height,
            config.table_max_height,
        );
        tables::dataset_table(
            &mut cols[1],
            "filtered_table",
            "Filtered Dataset Preview",
            &report.dataset,
            Some(report.filtered.as_slice()),
            config.table_row_height,
            config.table_max_height,
        );
    });

    ui.add_space(12.0);

    ui.columns(2, |cols: &mut [Ui]| {
        plot::choropleth_plot(&mut cols[0], &report.choropleth, config.chart_height);
        plot::bubble_plot(&mut cols[1], &report.bubbles, config.chart_height);
    });
}
