use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use geojson::{Feature, GeoJson, PolygonType, Value, feature::Id};

/// Default location of the country boundaries, next to the settings file.
pub const BOUNDARIES_FILE: &str = "world-countries.geojson";

/// Properties that carry the ISO 3166-1 alpha-3 code, most specific first.
/// Natural Earth writes `-99` into `ISO_A3` for a few countries (France,
/// Norway) and keeps the real code in `ADM0_A3`.
const CODE_PROPERTIES: [&str; 6] = ["ISO_A3", "ADM0_A3", "iso_a3", "adm0_a3", "ISO3", "id"];

/// One ring: closed list of `[longitude, latitude]` points.
pub type Ring = Vec<[f64; 2]>;

/// A polygon with its exterior ring and optional holes.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlinePolygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

impl OutlinePolygon {
    fn from_rings(rings: &PolygonType) -> Option<Self> {
        let mut rings = rings.iter().map(|ring| {
            ring.iter()
                .filter(|p| p.len() >= 2)
                .map(|p| [p[0], p[1]])
                .collect::<Ring>()
        });
        let exterior = rings.next().filter(|r| r.len() >= 3)?;
        Some(OutlinePolygon {
            exterior,
            holes: rings.filter(|r| r.len() >= 3).collect(),
        })
    }

    /// Inside the exterior ring and outside every hole.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        ring_contains(&self.exterior, lon, lat)
            && !self.holes.iter().any(|h| ring_contains(h, lon, lat))
    }
}

/// Every polygon of one country.
pub type Outline = Arc<[OutlinePolygon]>;

/// Even-odd ray casting.
pub fn ring_contains(ring: &[[f64; 2]], lon: f64, lat: f64) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for (i, &[xi, yi]) in ring.iter().enumerate() {
        let [xj, yj] = ring[j];
        if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

// ---------------------------------------------------------------------------
// Country boundaries
// ---------------------------------------------------------------------------

/// Country outlines keyed by upper-case alpha-3 code. Empty when no
/// boundaries file is available, in which case the map falls back to cells.
#[derive(Debug, Clone, Default)]
pub struct CountryOutlines {
    shapes: HashMap<String, Outline>,
}

impl CountryOutlines {
    /// Read boundaries from `path`; a missing or broken file is logged and
    /// yields no outlines.
    pub fn load_or_empty(path: &Path) -> Self {
        if !path.exists() {
            log::info!(
                "No boundaries at {}; countries are drawn as cells",
                path.display()
            );
            return Self::default();
        }
        match std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| Self::from_geojson(&text))
        {
            Ok(outlines) if outlines.is_empty() => {
                log::warn!("No coded country polygons in {}", path.display());
                outlines
            }
            Ok(outlines) => {
                log::info!(
                    "Loaded {} country outlines from {}",
                    outlines.len(),
                    path.display()
                );
                outlines
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    /// Parse a GeoJSON feature collection of country polygons.
    ///
    /// Features without a usable code or without (multi)polygon geometry are
    /// skipped. A code seen twice keeps the polygons of both features.
    pub fn from_geojson(text: &str) -> anyhow::Result<Self> {
        let geojson: GeoJson = text.parse().context("invalid GeoJSON")?;
        let features = match geojson {
            GeoJson::FeatureCollection(fc) => fc.features,
            GeoJson::Feature(f) => vec![f],
            GeoJson::Geometry(_) => anyhow::bail!("expected features carrying country codes"),
        };

        let mut collected: HashMap<String, Vec<OutlinePolygon>> = HashMap::new();
        for feature in &features {
            let Some(code) = feature_code(feature) else {
                continue;
            };
            let polygons = feature_polygons(feature);
            if polygons.is_empty() {
                continue;
            }
            collected.entry(code).or_default().extend(polygons);
        }

        let shapes = collected
            .into_iter()
            .map(|(code, polygons)| (code, Outline::from(polygons)))
            .collect();
        Ok(CountryOutlines { shapes })
    }

    pub fn get(&self, cca3: &str) -> Option<&Outline> {
        self.shapes.get(&cca3.trim().to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

fn feature_code(feature: &Feature) -> Option<String> {
    let from_properties = CODE_PROPERTIES
        .iter()
        .filter_map(|key| feature.property(key).and_then(|v| v.as_str()))
        .map(|s| s.trim().to_ascii_uppercase())
        .find(|s| is_alpha3(s));
    from_properties.or_else(|| match &feature.id {
        Some(Id::String(s)) => Some(s.trim().to_ascii_uppercase()).filter(|s| is_alpha3(s)),
        _ => None,
    })
}

fn is_alpha3(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

fn feature_polygons(feature: &Feature) -> Vec<OutlinePolygon> {
    let Some(geometry) = &feature.geometry else {
        return Vec::new();
    };
    match &geometry.value {
        Value::Polygon(rings) => OutlinePolygon::from_rings(rings).into_iter().collect(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(OutlinePolygon::from_rings)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A square island with a lake, a two-part country, and features that
    /// must be skipped.
    const BOUNDARIES: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        { "type": "Feature",
          "properties": { "ISO_A3": "ISL", "NAME": "Squareland" },
          "geometry": { "type": "Polygon", "coordinates": [
            [[0,0],[10,0],[10,10],[0,10],[0,0]],
            [[4,4],[6,4],[6,6],[4,6],[4,4]]
          ] } },
        { "type": "Feature",
          "properties": { "ISO_A3": "-99", "ADM0_A3": "fra" },
          "geometry": { "type": "MultiPolygon", "coordinates": [
            [[[20,20],[30,20],[25,30],[20,20]]],
            [[[40,40],[42,40],[42,42],[40,40]]]
          ] } },
        { "type": "Feature", "id": "CHN", "properties": {},
          "geometry": { "type": "Polygon", "coordinates": [
            [[70,20],[130,20],[130,50],[70,50],[70,20]]
          ] } },
        { "type": "Feature", "properties": { "ISO_A3": "-99" },
          "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]] } },
        { "type": "Feature", "properties": { "ISO_A3": "PNT" },
          "geometry": { "type": "Point", "coordinates": [1, 1] } }
      ]
    }"#;

    #[test]
    fn features_are_keyed_by_alpha3_code() {
        let outlines = CountryOutlines::from_geojson(BOUNDARIES).unwrap();
        assert_eq!(outlines.len(), 3);
        assert_eq!(outlines.get("FRA").map(|o| o.len()), Some(2));
        assert!(outlines.get(" chn").is_some());
        assert!(outlines.get("PNT").is_none());
    }

    #[test]
    fn holes_are_not_inside_the_country() {
        let outlines = CountryOutlines::from_geojson(BOUNDARIES).unwrap();
        let island = &outlines.get("ISL").unwrap()[0];
        assert_eq!(island.holes.len(), 1);
        assert!(island.contains(2.0, 2.0));
        assert!(!island.contains(5.0, 5.0));
        assert!(!island.contains(11.0, 5.0));
    }

    #[test]
    fn concave_rings_use_even_odd_rule() {
        // A "U" shape: the notch between the arms is outside.
        let ring = vec![
            [0.0, 0.0],
            [3.0, 0.0],
            [3.0, 3.0],
            [2.0, 3.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 3.0],
            [0.0, 3.0],
        ];
        assert!(ring_contains(&ring, 0.5, 2.0));
        assert!(ring_contains(&ring, 2.5, 2.0));
        assert!(!ring_contains(&ring, 1.5, 2.0));
    }

    #[test]
    fn geometry_without_codes_is_rejected() {
        let bare = r#"{ "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]] }"#;
        assert!(CountryOutlines::from_geojson(bare).is_err());
        assert!(CountryOutlines::from_geojson("not json").is_err());
    }

    #[test]
    fn missing_file_gives_no_outlines() {
        let outlines = CountryOutlines::load_or_empty(Path::new("/nonexistent/world.geojson"));
        assert!(outlines.is_empty());
    }
}
