use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::data::columns::AxisSynonyms;
use crate::data::downsample::PointBudget;
use crate::data::error::IngestError;
use crate::data::loader::{source_name, spawn_loads, LoadOutcome};
use crate::data::merge::merged_frame;
use crate::data::model::{MergedFrame, SeriesStore, MAX_SOURCES};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Background reads never touch the store: they report over channels and
/// the UI thread commits each result per source name, so the final store
/// holds the union of the successful loads no matter which read finished
/// first.
pub struct AppState {
    /// Committed sweeps, at most two.
    pub store: SeriesStore,

    /// Source names in upload order, loading or loaded. Slot 0 is the
    /// measurement trace, slot 1 the baseline.
    pub slots: Vec<String>,

    /// Header vocabulary used to resolve columns in subsequent loads.
    pub synonyms: AxisSynonyms,

    /// Downsampling bounds applied to every load.
    pub budget: PointBudget,

    /// Channels of in-flight load batches, drained each frame.
    receivers: Vec<Receiver<LoadOutcome>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            store: SeriesStore::default(),
            slots: Vec::new(),
            synonyms: AxisSynonyms::default(),
            budget: PointBudget::default(),
            receivers: Vec::new(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Start background reads for a batch of picked files. The whole batch
    /// is rejected up front when it would overflow the two-file limit or
    /// collide with a name already loading or loaded.
    pub fn request_loads(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        self.status_message = None;

        let names: Vec<String> = paths.iter().map(|p| source_name(p)).collect();
        if self.slots.len() + names.len() > MAX_SOURCES {
            self.reject_batch(IngestError::FileCountExceeded {
                limit: MAX_SOURCES,
            });
            return;
        }
        for (i, name) in names.iter().enumerate() {
            if self.slots.contains(name) || names[..i].contains(name) {
                self.reject_batch(IngestError::DuplicateSource { name: name.clone() });
                return;
            }
        }

        self.slots.extend(names);
        self.receivers
            .push(spawn_loads(paths, self.synonyms.clone(), self.budget));
    }

    fn reject_batch(&mut self, err: IngestError) {
        log::error!("rejecting upload batch: {err}");
        self.status_message = Some(format!("Error: {err}"));
    }

    /// Drain finished background reads and commit them. Exhausted batch
    /// channels are retired.
    pub fn poll_loads(&mut self) {
        let receivers = std::mem::take(&mut self.receivers);
        let mut live = Vec::with_capacity(receivers.len());
        for rx in receivers {
            loop {
                match rx.try_recv() {
                    Ok(outcome) => self.apply_outcome(outcome),
                    Err(TryRecvError::Empty) => {
                        live.push(rx);
                        break;
                    }
                    Err(TryRecvError::Disconnected) => break,
                }
            }
        }
        self.receivers = live;
    }

    fn apply_outcome(&mut self, outcome: LoadOutcome) {
        match outcome.result {
            Ok(series) => {
                if !self.slots.contains(&series.source) {
                    log::debug!("discarding {}: removed while loading", series.source);
                    return;
                }
                let points = series.len();
                match self.store.insert(series) {
                    Ok(()) => log::info!("loaded {} ({points} points)", outcome.source),
                    Err(e) => {
                        log::error!("failed to commit {}: {e}", outcome.source);
                        self.slots.retain(|s| s != &outcome.source);
                        self.status_message = Some(format!("Error: {e}"));
                    }
                }
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", outcome.source);
                self.slots.retain(|s| s != &outcome.source);
                self.status_message = Some(format!("Error in {}: {e}", outcome.source));
            }
        }
    }

    /// Whether any load is still in flight.
    pub fn loading(&self) -> bool {
        self.slots.len() > self.store.len()
    }

    /// Remove one file and its data.
    pub fn remove_source(&mut self, source: &str) {
        self.store.remove(source);
        self.slots.retain(|s| s != source);
        self.status_message = None;
    }

    /// Remove every file, abandoning any still-loading batch.
    pub fn clear_all(&mut self) {
        self.store.clear();
        self.slots.clear();
        self.receivers.clear();
        self.status_message = None;
    }

    /// Replace the column vocabulary from a JSON rules file. Applies to
    /// loads started afterwards.
    pub fn load_column_rules(&mut self, path: &Path) {
        match AxisSynonyms::from_path(path) {
            Ok(synonyms) => {
                log::info!("loaded column rules from {}", path.display());
                self.synonyms = synonyms;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("failed to load column rules: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Project the store into the chart-ready comparison frame.
    pub fn frame(&self) -> MergedFrame {
        merged_frame(&self.store, &self.slots)
    }
}
