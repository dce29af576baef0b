mod app;
mod chart;
mod color;
mod config;
mod cycle;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::PopulationViewerApp;
use chart::outlines::CountryOutlines;
use config::{CONFIG_FILE, ViewerConfig};
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::load_or_default(Path::new(CONFIG_FILE));
    let outlines = CountryOutlines::load_or_empty(&config.map_boundaries);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        app::TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(PopulationViewerApp::new(AppState::new(config, outlines))))),
    )
}
