use crate::chart::outlines::CountryOutlines;
use crate::config::ViewerConfig;
use crate::cycle::{CycleError, CycleOutput, run_cycle};
use crate::data::filter::RangeSelection;
use crate::data::loader::{LoadError, Upload};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Only the two cycle inputs survive between interactions: the upload and
/// the selected range. `output` is derived from them and rebuilt whenever
/// either changes.
pub struct AppState {
    pub config: ViewerConfig,

    /// Country boundaries for the map; fixed for the session.
    pub outlines: CountryOutlines,

    /// The file the user supplied (None until one is chosen).
    pub upload: Option<Upload>,

    /// Range chosen with the sliders; `None` means "full range".
    pub selection: Option<RangeSelection>,

    /// Output of the latest cycle.
    pub output: CycleOutput,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default(), CountryOutlines::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig, outlines: CountryOutlines) -> Self {
        Self {
            config,
            outlines,
            upload: None,
            selection: None,
            output: CycleOutput::AwaitingInput,
        }
    }

    /// Take a new upload. The previous range belongs to the old data, so it
    /// is dropped in favour of the full range.
    pub fn set_upload(&mut self, upload: Upload) {
        log::info!("Received {} ({} bytes)", upload.name, upload.bytes.len());
        self.upload = Some(upload);
        self.selection = None;
        self.rerun();
        if let Some(report) = self.output.report() {
            log::info!(
                "Loaded {} rows with columns {:?}",
                report.dataset.len(),
                report.dataset.columns
            );
        }
    }

    /// The chosen file could not even be read.
    pub fn upload_failed(&mut self, error: LoadError) {
        self.upload = None;
        self.selection = None;
        log::error!("Failed to read upload: {error}");
        self.output = CycleOutput::Failed(CycleError::Load(error));
    }

    /// Apply a range chosen by the user. Re-runs only on an actual change.
    pub fn set_selection(&mut self, selection: RangeSelection) {
        let current = self.output.report().map(|r| r.selection);
        if current == Some(selection) {
            return;
        }
        self.selection = Some(selection);
        self.rerun();
    }

    /// Back to the full range.
    pub fn reset_selection(&mut self) {
        if self.selection.take().is_some() {
            self.rerun();
        }
    }

    /// Recompute the page from the current inputs.
    pub fn rerun(&mut self) {
        self.output = run_cycle(
            self.upload.as_ref(),
            self.selection,
            &self.config,
            &self.outlines,
        );
        if let CycleOutput::Ready(report) = &self.output {
            self.selection = Some(report.selection);
        }
    }
}
