use eframe::egui::Color32;

use super::CountryRow;
use super::geo;
use super::outlines::{CountryOutlines, Outline};
use crate::color::ContinuousScale;

pub const TITLE: &str = "World Population by Country (Filtered)";

/// Where a region is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Footprint {
    /// The country's own boundary polygons.
    Outline(Outline),
    /// A square of `cell_degrees` around `[longitude, latitude]`, used when no
    /// boundary is known for the code.
    Cell([f64; 2]),
}

/// One coloured country on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub cca3: String,
    /// Hover label.
    pub name: String,
    pub population: f64,
    pub color: Color32,
    /// `None` when the code is not on the map.
    pub footprint: Option<Footprint>,
}

/// Choropleth model: one region per distinct CCA3 code.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethChart {
    pub regions: Vec<Region>,
    /// Colour scale over the region populations; `None` when there are none.
    pub scale: Option<ContinuousScale>,
    /// Side of a fallback cell, in degrees.
    pub cell_degrees: f64,
}

impl ChoroplethChart {
    /// Build the map from filtered rows. A later row with an already seen
    /// code replaces the earlier one; rows without a code are skipped.
    ///
    /// Codes with a boundary in `outlines` are drawn as that boundary, the
    /// rest as a cell at their centroid when one is known.
    pub fn build(rows: &[CountryRow], outlines: &CountryOutlines, cell_degrees: f64) -> Self {
        let mut latest: Vec<&CountryRow> = Vec::new();
        for row in rows.iter().filter(|r| !r.cca3.trim().is_empty()) {
            match latest.iter_mut().find(|r| r.cca3 == row.cca3) {
                Some(slot) => *slot = row,
                None => latest.push(row),
            }
        }

        let scale = if latest.is_empty() {
            None
        } else {
            let min = latest.iter().map(|r| r.population).fold(f64::INFINITY, f64::min);
            let max = latest
                .iter()
                .map(|r| r.population)
                .fold(f64::NEG_INFINITY, f64::max);
            Some(ContinuousScale::new(min, max))
        };

        let regions = latest
            .into_iter()
            .map(|r| Region {
                cca3: r.cca3.clone(),
                name: r.country.clone(),
                population: r.population,
                color: scale.map_or(Color32::GRAY, |s| s.color_for(r.population)),
                footprint: outlines
                    .get(&r.cca3)
                    .map(|o| Footprint::Outline(o.clone()))
                    .or_else(|| geo::centroid(&r.cca3).map(Footprint::Cell)),
            })
            .collect();

        ChoroplethChart {
            regions,
            scale,
            cell_degrees,
        }
    }

    /// Exterior rings to fill for `region`, in drawing order.
    pub fn rings(&self, region: &Region) -> Vec<Vec<[f64; 2]>> {
        match &region.footprint {
            Some(Footprint::Outline(polygons)) => {
                polygons.iter().map(|p| p.exterior.clone()).collect()
            }
            Some(Footprint::Cell(centroid)) => vec![self.cell(*centroid).to_vec()],
            None => Vec::new(),
        }
    }

    /// Regions that have a footprint on the map.
    pub fn placed(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| r.footprint.is_some())
    }

    /// Codes that could not be placed on the map.
    pub fn unplaced(&self) -> Vec<&str> {
        self.regions
            .iter()
            .filter(|r| r.footprint.is_none())
            .map(|r| r.cca3.as_str())
            .collect()
    }

    /// Corners of the square cell drawn around a centroid.
    pub fn cell(&self, [lon, lat]: [f64; 2]) -> [[f64; 2]; 4] {
        let h = self.cell_degrees / 2.0;
        [
            [lon - h, lat - h],
            [lon + h, lat - h],
            [lon + h, lat + h],
            [lon - h, lat + h],
        ]
    }

    /// Region whose footprint contains the map coordinate; later regions are
    /// drawn on top, so they win.
    pub fn region_at(&self, lon: f64, lat: f64) -> Option<&Region> {
        let h = self.cell_degrees / 2.0;
        self.placed()
            .filter(|r| match &r.footprint {
                Some(Footprint::Outline(polygons)) => {
                    polygons.iter().any(|p| p.contains(lon, lat))
                }
                Some(Footprint::Cell([x, y])) => (lon - x).abs() <= h && (lat - y).abs() <= h,
                None => false,
            })
            .last()
    }
}
