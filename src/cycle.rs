use std::panic::{self, AssertUnwindSafe};

use crate::chart::bubble::BubbleChart;
use crate::chart::choropleth::ChoroplethChart;
use crate::chart::country_rows;
use crate::chart::outlines::CountryOutlines;
use crate::config::ViewerConfig;
use crate::data::filter::{
    PopulationBounds, RangeSelection, filtered_indices, population_values,
};
use crate::data::loader::{LoadError, Upload, load_upload};
use crate::data::model::Dataset;
use crate::data::schema::{SchemaError, check_schema};

// ---------------------------------------------------------------------------
// Cycle output
// ---------------------------------------------------------------------------

/// Why a cycle stopped before rendering anything.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("Error loading file: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Everything the page shows for one successful cycle.
#[derive(Debug, Clone)]
pub struct Report {
    pub upload_name: String,
    pub dataset: Dataset,
    pub bounds: PopulationBounds,
    pub selection: RangeSelection,
    /// Indices into `dataset.rows` that pass the range filter.
    pub filtered: Vec<usize>,
    pub choropleth: ChoroplethChart,
    pub bubbles: BubbleChart,
}

/// Result of one top-to-bottom recomputation.
#[derive(Debug)]
pub enum CycleOutput {
    /// No file uploaded yet.
    AwaitingInput,
    Failed(CycleError),
    Ready(Box<Report>),
}

impl CycleOutput {
    pub fn report(&self) -> Option<&Report> {
        match self {
            CycleOutput::Ready(report) => Some(report),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// The cycle
// ---------------------------------------------------------------------------

/// Recompute the whole page from its two inputs: the upload (if any) and the
/// range selected in the previous cycle (if any).
///
/// The upload is parsed from scratch every time. A selection is clamped into
/// the current bounds; `None` selects the full range. Panics raised while
/// building the report are reported as a [`LoadError`]. `outlines` is the
/// map geometry, loaded once at start-up.
pub fn run_cycle(
    upload: Option<&Upload>,
    selection: Option<RangeSelection>,
    config: &ViewerConfig,
    outlines: &CountryOutlines,
) -> CycleOutput {
    let Some(upload) = upload else {
        return CycleOutput::AwaitingInput;
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| build_report(upload, selection, config, outlines)))
        .unwrap_or_else(|payload| Err(LoadError::Unexpected(panic_message(payload.as_ref())).into()));

    match outcome {
        Ok(report) => {
            log::debug!(
                "Cycle for {}: {} of {} rows in [{}, {}]",
                report.upload_name,
                report.filtered.len(),
                report.dataset.len(),
                report.selection.lo,
                report.selection.hi
            );
            CycleOutput::Ready(Box::new(report))
        }
        Err(e) => {
            match &e {
                CycleError::Load(_) => log::error!("{e}"),
                CycleError::Schema(_) => log::warn!("{e}"),
            }
            CycleOutput::Failed(e)
        }
    }
}

fn build_report(
    upload: &Upload,
    selection: Option<RangeSelection>,
    config: &ViewerConfig,
    outlines: &CountryOutlines,
) -> Result<Report, CycleError> {
    let dataset = load_upload(upload)?;
    let schema = check_schema(&dataset)?;

    let populations = population_values(&dataset, schema.population)?;
    let bounds = PopulationBounds::from_values(&populations)?;
    let selection = selection
        .map(|s| s.clamped(bounds))
        .unwrap_or_else(|| RangeSelection::full(bounds));
    let filtered = filtered_indices(&populations, selection);

    let rows = country_rows(&dataset, &schema, &populations, &filtered);
    let choropleth = ChoroplethChart::build(&rows, outlines, config.map_cell_degrees);
    let bubbles = BubbleChart::build(&rows, config.bubble_size_max);

    Ok(Report {
        upload_name: upload.name.clone(),
        dataset,
        bounds,
        selection,
        filtered,
        choropleth,
        bubbles,
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic while rendering".to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chart::choropleth::Footprint;

    const WORLD_CSV: &str = "\
CCA3,Country/Territory,Continent,2022 Population
AFG,Afghanistan,Asia,41128771
CHN,China,Asia,1425887337
";

    fn world() -> Upload {
        Upload::new("world_population.csv", WORLD_CSV)
    }

    fn cycle(upload: Option<&Upload>, selection: Option<RangeSelection>) -> CycleOutput {
        run_cycle(upload, selection, &ViewerConfig::default(), &CountryOutlines::default())
    }

    fn ready(output: CycleOutput) -> Report {
        match output {
            CycleOutput::Ready(report) => *report,
            other => panic!("expected a report, got {other:?}"),
        }
    }

    #[test]
    fn no_upload_awaits_input() {
        let output = cycle(None, None);
        assert!(matches!(output, CycleOutput::AwaitingInput));
        assert!(output.report().is_none());
    }

    #[test]
    fn default_range_keeps_both_rows() {
        let report = ready(cycle(Some(&world()), None));
        assert_eq!(report.bounds, PopulationBounds { min: 41_128_771, max: 1_425_887_337 });
        assert_eq!(report.selection, RangeSelection::full(report.bounds));
        assert_eq!(report.filtered, vec![0, 1]);
        assert_eq!(report.choropleth.regions.len(), 2);
        assert_eq!(report.bubbles.bubbles.len(), 2);
    }

    #[test]
    fn narrowed_range_keeps_afghanistan_only() {
        let narrow = RangeSelection { lo: 41_128_771, hi: 41_128_771 };
        let report = ready(cycle(Some(&world()), Some(narrow)));
        assert_eq!(report.filtered, vec![0]);
        assert_eq!(report.choropleth.regions[0].name, "Afghanistan");
        assert_eq!(report.bubbles.bubbles.len(), 1);
        // The unfiltered table still has every row.
        assert_eq!(report.dataset.len(), 2);
    }

    #[test]
    fn loaded_outlines_shape_the_map() {
        let outlines = CountryOutlines::from_geojson(
            r#"{ "type": "FeatureCollection", "features": [
              { "type": "Feature", "properties": { "ISO_A3": "AFG" },
                "geometry": { "type": "Polygon",
                  "coordinates": [[[60,29],[75,29],[75,38],[60,38],[60,29]]] } }
            ] }"#,
        )
        .unwrap();
        let output = run_cycle(Some(&world()), None, &ViewerConfig::default(), &outlines);
        let report = ready(output);
        let afghanistan = &report.choropleth.regions[0];
        assert!(matches!(afghanistan.footprint, Some(Footprint::Outline(_))));
        assert_eq!(report.choropleth.region_at(74.0, 30.0).map(|r| r.cca3.as_str()), Some("AFG"));
    }

    #[test]
    fn stale_selection_is_clamped_into_new_bounds() {
        let stale = RangeSelection { lo: 0, hi: 5_000_000_000 };
        let report = ready(cycle(Some(&world()), Some(stale)));
        assert_eq!(report.selection, RangeSelection::full(report.bounds));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let upload = Upload::new("x.csv", "CCA3,Country/Territory,2022 Population\nAFG,Afghanistan,1\n");
        match cycle(Some(&upload), None) {
            CycleOutput::Failed(CycleError::Schema(e)) => assert_eq!(e.missing, vec!["Continent"]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn binary_upload_is_a_load_error() {
        let upload = Upload::new("x.csv", vec![0xff_u8, 0xfe, 0xfd, 0x00, 0x80, 0x81]);
        let output = cycle(Some(&upload), None);
        match output {
            CycleOutput::Failed(e @ CycleError::Load(_)) => {
                assert!(e.to_string().starts_with("Error loading file: "), "{e}");
            }
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_population_is_a_load_error() {
        let upload = Upload::new(
            "x.csv",
            "CCA3,Country/Territory,Continent,2022 Population\nAFG,Afghanistan,Asia,many\n",
        );
        let output = cycle(Some(&upload), None);
        assert!(matches!(
            output,
            CycleOutput::Failed(CycleError::Load(LoadError::NotNumeric { row: 1, .. }))
        ));
    }

    #[test]
    fn header_only_upload_has_no_rows() {
        let upload = Upload::new("x.csv", "CCA3,Country/Territory,Continent,2022 Population\n");
        let output = cycle(Some(&upload), None);
        assert!(matches!(output, CycleOutput::Failed(CycleError::Load(LoadError::NoRows))));
    }

    #[test]
    fn single_row_collapses_but_still_renders() {
        let upload = Upload::new(
            "x.csv",
            "CCA3,Country/Territory,Continent,2022 Population\nVAT,Vatican City,Europe,510\n",
        );
        let report = ready(cycle(Some(&upload), None));
        assert!(report.bounds.is_fixed_point());
        assert_eq!(report.filtered, vec![0]);
    }

    #[test]
    fn panic_payloads_become_messages() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "panic while rendering");
    }
}
