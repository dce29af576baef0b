use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::chart::outlines::BOUNDARIES_FILE;

/// File looked up in the working directory at start-up.
pub const CONFIG_FILE: &str = "population-viewer.json";

// ---------------------------------------------------------------------------
// Viewer settings
// ---------------------------------------------------------------------------

/// Tunable presentation settings. Every field has a default, so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Initial window size in points.
    pub window_size: [f32; 2],
    /// Diameter of the largest bubble, in points.
    pub bubble_size_max: f32,
    /// GeoJSON file of country boundaries keyed by ISO alpha-3 code.
    pub map_boundaries: PathBuf,
    /// Side of the cell drawn for a country without a boundary, in degrees.
    pub map_cell_degrees: f64,
    pub table_row_height: f32,
    pub table_max_height: f32,
    pub chart_height: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_size: [1400.0, 900.0],
            bubble_size_max: 60.0,
            map_boundaries: PathBuf::from(BOUNDARIES_FILE),
            map_cell_degrees: 4.0,
            table_row_height: 18.0,
            table_max_height: 320.0,
            chart_height: 380.0,
        }
    }
}

impl ViewerConfig {
    /// Read settings from `path`; a missing file yields the defaults, an
    /// unreadable or invalid one is logged and also yields the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| Self::from_json(&text))
        {
            Ok(config) => {
                log::info!("Loaded viewer settings from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    /// Parse settings from JSON text.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        if !(config.bubble_size_max > 0.0 && config.map_cell_degrees > 0.0) {
            anyhow::bail!("bubble_size_max and map_cell_degrees must be positive");
        }
        Ok(config)
    }
}
