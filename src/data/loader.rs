use std::path::{Path, PathBuf};
use std::sync::mpsc;

use super::columns::AxisSynonyms;
use super::downsample::{downsample, PointBudget};
use super::error::IngestError;
use super::model::Series;
use super::parse::parse_series;

// ---------------------------------------------------------------------------
// Single-file pipeline
// ---------------------------------------------------------------------------

/// Read one sweep file from disk and run it through the pipeline:
/// parse and validate, then downsample to the budget.
pub fn load_path(
    path: &Path,
    synonyms: &AxisSynonyms,
    budget: PointBudget,
) -> Result<Series, IngestError> {
    let text = std::fs::read_to_string(path)?;
    let Series { source, points } = parse_series(&text, &source_name(path), synonyms)?;
    Ok(Series {
        source,
        points: downsample(points, budget),
    })
}

/// The source tag for a path: its file name, or the whole path when the
/// name is not representable.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// Batch loads
// ---------------------------------------------------------------------------

/// What one background read produced: the source name and either its
/// processed series or the error that blocked it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub source: String,
    pub result: Result<Series, IngestError>,
}

/// Read a batch of files on background threads, one per file.
///
/// Each read completes independently and reports over the returned channel
/// in whatever order it finishes. Workers never touch shared state: the
/// receiving side commits each outcome to the store per source name, which
/// keeps the final store independent of completion order. Dropping the
/// receiver abandons the batch; late sends are discarded.
pub fn spawn_loads(
    paths: Vec<PathBuf>,
    synonyms: AxisSynonyms,
    budget: PointBudget,
) -> mpsc::Receiver<LoadOutcome> {
    let (tx, rx) = mpsc::channel();
    for path in paths {
        let tx = tx.clone();
        let synonyms = synonyms.clone();
        std::thread::spawn(move || {
            let outcome = LoadOutcome {
                source: source_name(&path),
                result: load_path(&path, &synonyms, budget),
            };
            let _ = tx.send(outcome);
        });
    }
    rx
}
