use eframe::egui::Color32;

use super::CountryRow;
use crate::color::CategoryColors;

pub const TITLE: &str = "Population by Continent (Filtered Bubble Plot)";

/// Smallest diameter drawn for a positive population, so tiny countries stay
/// hoverable.
const MIN_DIAMETER: f32 = 1.0;

/// One marker of the sized scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    /// Index into [`BubbleChart::categories`]; also the x position.
    pub category: usize,
    pub population: f64,
    /// Marker diameter in screen points.
    pub diameter: f32,
    /// Hover label.
    pub name: String,
    pub color: Color32,
}

/// Sized scatter model: continent on x, population on y, area by population.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleChart {
    /// Continents in first-appearance order.
    pub categories: Vec<String>,
    pub colors: CategoryColors,
    pub bubbles: Vec<Bubble>,
}

/// Area-scaled marker diameter: the largest value gets exactly `size_max`,
/// others `size_max * sqrt(value / max_value)`. Zero and negative values get
/// no marker.
pub fn diameter(value: f64, max_value: f64, size_max: f32) -> f32 {
    if max_value <= 0.0 || value <= 0.0 {
        return 0.0;
    }
    let scaled = size_max as f64 * (value / max_value).sqrt();
    (scaled as f32).max(MIN_DIAMETER)
}

impl BubbleChart {
    /// Every row with a positive population becomes a bubble; the others
    /// still define their continent's category.
    pub fn build(rows: &[CountryRow], size_max: f32) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for row in rows {
            if !categories.contains(&row.continent) {
                categories.push(row.continent.clone());
            }
        }
        let colors = CategoryColors::new(&categories);

        let max = rows.iter().map(|r| r.population).fold(0.0, f64::max);

        let bubbles = rows
            .iter()
            .filter(|r| r.population > 0.0)
            .map(|r| {
                let category = categories
                    .iter()
                    .position(|c| *c == r.continent)
                    .unwrap_or_default();
                Bubble {
                    category,
                    population: r.population,
                    diameter: diameter(r.population, max, size_max),
                    name: r.country.clone(),
                    color: colors.color_for(&r.continent),
                }
            })
            .collect();

        BubbleChart {
            categories,
            colors,
            bubbles,
        }
    }

    /// Bubbles largest first, so smaller markers are drawn on top.
    pub fn draw_order(&self) -> Vec<&Bubble> {
        let mut order: Vec<&Bubble> = self.bubbles.iter().collect();
        order.sort_by(|a, b| b.diameter.total_cmp(&a.diameter));
        order
    }

    /// Axis label for an x grid mark: the category at an integer position.
    pub fn category_label(categories: &[String], x: f64) -> String {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        categories
            .get(rounded as usize)
            .cloned()
            .unwrap_or_default()
    }
}
