use eframe::egui::{self, Color32, Pos2, Sense, Stroke, Ui, Vec2};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon};

use crate::chart::bubble::{self, BubbleChart};
use crate::chart::choropleth::{self, ChoroplethChart};
use crate::color::viridis;
use crate::data::model::{CONTINENT_COLUMN, POPULATION_COLUMN};

// ---------------------------------------------------------------------------
// Choropleth map
// ---------------------------------------------------------------------------

/// Render the population map: each country filled with its Viridis colour.
pub fn choropleth_plot(ui: &mut Ui, chart: &ChoroplethChart, height: f32) {
    ui.heading(choropleth::TITLE);

    let response = Plot::new("choropleth_map")
        .height(height)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-60.0)
        .include_y(85.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show_x(false)
        .show_y(false)
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(true)
        .show(ui, |plot_ui| {
            let outline = Stroke::new(0.5, Color32::from_gray(40));
            for region in chart.placed() {
                for ring in chart.rings(region) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(ring))
                            .fill_color(region.color)
                            .stroke(outline),
                    );
                }
            }
            plot_ui.pointer_coordinate()
        });

    if let Some(region) = response
        .inner
        .and_then(|p| chart.region_at(p.x, p.y))
    {
        response.response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            ui.strong(&region.name);
            ui.label(format!("{}: {}", region.cca3, format_population(region.population)));
        });
    }

    if let Some(scale) = chart.scale {
        color_bar(ui, scale.min, scale.max);
    }

    let unplaced = chart.unplaced();
    if !unplaced.is_empty() {
        ui.label(
            egui::RichText::new(format!("Not on map: {}", unplaced.join(", "))).weak(),
        );
    }
}

/// Horizontal Viridis legend labelled with the scale ends.
fn color_bar(ui: &mut Ui, min: f64, max: f64) {
    const STEPS: usize = 64;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format_population(min));
        let width = (ui.available_width() - 90.0).clamp(40.0, 400.0);
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, 12.0), Sense::hover());
        let step = rect.width() / STEPS as f32;
        for i in 0..STEPS {
            let x = rect.left() + i as f32 * step;
            let cell = egui::Rect::from_min_max(
                Pos2::new(x, rect.top()),
                Pos2::new(x + step + 0.5, rect.bottom()),
            );
            ui.painter()
                .rect_filled(cell, 0.0, viridis(i as f64 / (STEPS - 1) as f64));
        }
        ui.label(format_population(max));
    });
}

// ---------------------------------------------------------------------------
// Bubble plot
// ---------------------------------------------------------------------------

/// Render the sized scatter: continents on x, population on y.
pub fn bubble_plot(ui: &mut Ui, chart: &BubbleChart, height: f32) {
    ui.heading(bubble::TITLE);

    let categories = chart.categories.clone();
    let response = Plot::new("bubble_plot")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(CONTINENT_COLUMN)
        .y_axis_label(POPULATION_COLUMN)
        .x_axis_formatter(move |mark, _| BubbleChart::category_label(&categories, mark.value))
        .y_axis_formatter(|mark, _| format_population(mark.value))
        .include_x(-0.5)
        .include_x(chart.categories.len() as f64 - 0.5)
        .include_y(0.0)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for b in chart.draw_order() {
                let continent = &chart.categories[b.category];
                plot_ui.points(
                    Points::new(vec![[b.category as f64, b.population]])
                        .radius(b.diameter / 2.0)
                        .color(b.color.gamma_multiply(0.75))
                        .filled(true)
                        .name(continent),
                );
            }
        });

    let hovered = response.response.hover_pos().and_then(|pointer| {
        let markers = chart.bubbles.iter().map(|b| {
            let center = response
                .transform
                .position_from_point(&PlotPoint::new(b.category as f64, b.population));
            (center, b.diameter / 2.0)
        });
        hit_test(markers, pointer)
    });

    if let Some(idx) = hovered {
        let b = &chart.bubbles[idx];
        response.response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            ui.strong(&b.name);
            ui.label(format!(
                "{}: {}",
                chart.categories[b.category],
                format_population(b.population)
            ));
        });
    }
}

/// Index of the marker under `pointer`; when markers overlap, the one whose
/// centre is nearest wins.
pub fn hit_test(markers: impl Iterator<Item = (Pos2, f32)>, pointer: Pos2) -> Option<usize> {
    markers
        .enumerate()
        .filter_map(|(i, (center, radius))| {
            let dist = center.distance(pointer);
            (dist <= radius.max(3.0)).then_some((i, dist))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Population with thousands separators, e.g. `41,128,771`.
pub fn format_population(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
