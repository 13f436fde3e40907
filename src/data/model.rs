use super::error::IngestError;

/// Most sweeps the store will track at once.
pub const MAX_SOURCES: usize = 2;

// ---------------------------------------------------------------------------
// DataPoint – one validated measurement
// ---------------------------------------------------------------------------

/// A single frequency/magnitude pair, tagged with the file it came from.
/// The parser only emits points whose two values are finite.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Magnitude in dB.
    pub magnitude: f64,
    /// Name of the file the point was parsed from.
    pub source: String,
}

// ---------------------------------------------------------------------------
// ColumnMapping – resolved header indices
// ---------------------------------------------------------------------------

/// Zero-based column indices resolved once per file from its header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub frequency: usize,
    pub magnitude: usize,
}

// ---------------------------------------------------------------------------
// Series – one file's processed sweep
// ---------------------------------------------------------------------------

/// All points parsed from one file, sorted ascending by frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub source: String,
    pub points: Vec<DataPoint>,
}

impl Series {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SeriesStore – the committed sweeps, at most two
// ---------------------------------------------------------------------------

/// Committed series keyed by source name, in commit order.
///
/// Commits are append-only and per-source, so applying a batch of load
/// results yields the same store regardless of the order the loads finish
/// in. A commit that would exceed [`MAX_SOURCES`] or collide with a loaded
/// name fails without touching the existing entries.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    series: Vec<Series>,
}

impl SeriesStore {
    /// Commit one file's series. Fails on a duplicate source name or when
    /// the store is full; the store is left unchanged on failure.
    pub fn insert(&mut self, series: Series) -> Result<(), IngestError> {
        if self.series.iter().any(|s| s.source == series.source) {
            return Err(IngestError::DuplicateSource {
                name: series.source,
            });
        }
        if self.series.len() >= MAX_SOURCES {
            return Err(IngestError::FileCountExceeded {
                limit: MAX_SOURCES,
            });
        }
        self.series.push(series);
        Ok(())
    }

    /// Drop the series for `source`, if present.
    pub fn remove(&mut self, source: &str) {
        self.series.retain(|s| s.source != source);
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.series.clear();
    }

    /// The series for `source`, if loaded.
    pub fn get(&self, source: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.source == source)
    }

    /// All committed series, in commit order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Loaded source names, in commit order.
    pub fn sources(&self) -> Vec<String> {
        self.series.iter().map(|s| s.source.clone()).collect()
    }

    /// Number of loaded files.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no files are loaded.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total points across all loaded files.
    pub fn total_points(&self) -> usize {
        self.series.iter().map(|s| s.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// MergedFrame – the chart-ready projection
// ---------------------------------------------------------------------------

/// One row of the merged comparison frame: a rounded frequency key with a
/// magnitude column per slot. A column is `None` when that slot's series
/// has no point at this key.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEntry {
    /// Merge key: frequency rounded to 2 decimals.
    pub frequency: f64,
    /// Slot 1 magnitude, rounded to 2 decimals.
    pub magnitude: Option<f64>,
    /// Slot 2 magnitude, rounded to 2 decimals.
    pub magnitude2: Option<f64>,
    /// 0-based rank after sorting by key; drives the display x axis.
    pub index: usize,
}

/// Frame entries with unique, ascending frequency keys.
pub type MergedFrame = Vec<FrameEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    fn series(source: &str, freqs: &[f64]) -> Series {
        let points = freqs
            .iter()
            .map(|&frequency| DataPoint {
                frequency,
                magnitude: -40.0,
                source: source.to_string(),
            })
            .collect();
        Series {
            source: source.to_string(),
            points,
        }
    }

    #[test]
    fn insert_tracks_commit_order() {
        let mut store = SeriesStore::default();
        store.insert(series("b.csv", &[1.0])).unwrap();
        store.insert(series("a.csv", &[2.0, 3.0])).unwrap();
        assert_eq!(store.sources(), vec!["b.csv", "a.csv"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_points(), 3);
    }

    #[test]
    fn third_file_is_rejected_without_mutation() {
        let mut store = SeriesStore::default();
        store.insert(series("a.csv", &[1.0])).unwrap();
        store.insert(series("b.csv", &[2.0])).unwrap();

        let err = store.insert(series("c.csv", &[3.0])).unwrap_err();
        assert!(matches!(err, IngestError::FileCountExceeded { limit: 2 }));
        assert_eq!(store.sources(), vec!["a.csv", "b.csv"]);
        assert_eq!(store.total_points(), 2);
    }

    #[test]
    fn duplicate_name_is_rejected_and_first_file_kept() {
        let mut store = SeriesStore::default();
        store.insert(series("a.csv", &[1.0])).unwrap();

        let err = store.insert(series("a.csv", &[9.0, 10.0])).unwrap_err();
        assert!(matches!(err, IngestError::DuplicateSource { ref name } if name == "a.csv"));
        assert_eq!(store.get("a.csv").unwrap().points[0].frequency, 1.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_and_clear_reset_state() {
        let mut store = SeriesStore::default();
        store.insert(series("a.csv", &[1.0])).unwrap();
        store.insert(series("b.csv", &[2.0])).unwrap();

        store.remove("a.csv");
        assert!(store.get("a.csv").is_none());
        assert_eq!(store.sources(), vec!["b.csv"]);

        // freed slot is usable again
        store.insert(series("c.csv", &[3.0])).unwrap();
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.total_points(), 0);
    }
}
