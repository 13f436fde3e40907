use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use crate::data::model::{MergedFrame, Series, SeriesStore};

// ---------------------------------------------------------------------------
// Per-source statistics
// ---------------------------------------------------------------------------

/// Summary numbers for one loaded sweep, shown in the side panel and
/// embedded in the text report.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceStats {
    pub source: String,
    pub points: usize,
    pub min_frequency: f64,
    pub max_frequency: f64,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    pub avg_magnitude: f64,
}

/// Compute the statistics block for one series; `None` when it has no
/// points.
pub fn source_stats(series: &Series) -> Option<SourceStats> {
    if series.is_empty() {
        return None;
    }

    let mut min_frequency = f64::INFINITY;
    let mut max_frequency = f64::NEG_INFINITY;
    let mut min_magnitude = f64::INFINITY;
    let mut max_magnitude = f64::NEG_INFINITY;
    let mut magnitude_sum = 0.0;
    for point in &series.points {
        min_frequency = min_frequency.min(point.frequency);
        max_frequency = max_frequency.max(point.frequency);
        min_magnitude = min_magnitude.min(point.magnitude);
        max_magnitude = max_magnitude.max(point.magnitude);
        magnitude_sum += point.magnitude;
    }

    Some(SourceStats {
        source: series.source.clone(),
        points: series.len(),
        min_frequency,
        max_frequency,
        min_magnitude,
        max_magnitude,
        avg_magnitude: magnitude_sum / series.len() as f64,
    })
}

// ---------------------------------------------------------------------------
// Plain-text report
// ---------------------------------------------------------------------------

/// Render the analysis report: a header with the generation time and the
/// analysed file names, then one statistics block per slot.
pub fn text_report(store: &SeriesStore, slots: &[String]) -> String {
    let stats: Vec<SourceStats> = slots
        .iter()
        .filter_map(|name| store.get(name))
        .filter_map(source_stats)
        .collect();

    let mut out = String::new();
    out.push_str("FRA Analysis Report\n");
    out.push_str("===================\n");
    let _ = writeln!(
        out,
        "Generated: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    out.push('\n');
    let _ = writeln!(
        out,
        "Files Analyzed: {}",
        stats
            .iter()
            .map(|s| s.source.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    out.push('\n');
    out.push_str("Statistics:\n");
    for s in &stats {
        out.push('\n');
        let _ = writeln!(out, "{}:", s.source);
        let _ = writeln!(out, "  - Data Points: {}", s.points);
        let _ = writeln!(
            out,
            "  - Frequency Range: {:.2} - {:.2} Hz",
            s.min_frequency, s.max_frequency
        );
        let _ = writeln!(
            out,
            "  - Magnitude Range: {:.2} - {:.2} dB",
            s.min_magnitude, s.max_magnitude
        );
        let _ = writeln!(out, "  - Avg Magnitude: {:.2} dB", s.avg_magnitude);
    }
    out
}

/// Write the text report to `path`.
pub fn save_report(path: &Path, store: &SeriesStore, slots: &[String]) -> Result<()> {
    std::fs::write(path, text_report(store, slots))
        .with_context(|| format!("writing report to {}", path.display()))
}

// ---------------------------------------------------------------------------
// Flat CSV export
// ---------------------------------------------------------------------------

/// Render the merged frame as `freq,magnitude,baseline` rows; the baseline
/// column is slot 2, and a missing magnitude leaves its cell empty.
pub fn export_csv(frame: &MergedFrame) -> String {
    let mut out = String::from("freq,magnitude,baseline\n");
    for entry in frame {
        let _ = writeln!(
            out,
            "{},{},{}",
            entry.frequency,
            entry.magnitude.map(|m| m.to_string()).unwrap_or_default(),
            entry.magnitude2.map(|m| m.to_string()).unwrap_or_default()
        );
    }
    out
}

/// Write the merged-frame export to `path`.
pub fn save_export(path: &Path, frame: &MergedFrame) -> Result<()> {
    std::fs::write(path, export_csv(frame))
        .with_context(|| format!("writing CSV export to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::merge::merged_frame;
    use crate::data::model::{DataPoint, Series};

    fn series(source: &str, pairs: &[(f64, f64)]) -> Series {
        let points = pairs
            .iter()
            .map(|&(frequency, magnitude)| DataPoint {
                frequency,
                magnitude,
                source: source.to_string(),
            })
            .collect();
        Series {
            source: source.to_string(),
            points,
        }
    }

    #[test]
    fn stats_cover_count_ranges_and_average() {
        let s = series("a.csv", &[(20.0, -45.0), (100.0, -38.0), (1000.0, -48.0)]);
        let stats = source_stats(&s).unwrap();
        assert_eq!(stats.points, 3);
        assert_eq!(stats.min_frequency, 20.0);
        assert_eq!(stats.max_frequency, 1000.0);
        assert_eq!(stats.min_magnitude, -48.0);
        assert_eq!(stats.max_magnitude, -38.0);
        assert!((stats.avg_magnitude - (-131.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn empty_series_has_no_stats() {
        let s = Series {
            source: "a.csv".to_string(),
            points: Vec::new(),
        };
        assert!(source_stats(&s).is_none());
    }

    #[test]
    fn report_lists_files_and_stats_blocks() {
        let mut store = SeriesStore::default();
        store
            .insert(series("a.csv", &[(20.0, -45.0), (100.0, -38.0)]))
            .unwrap();
        store.insert(series("b.csv", &[(50.0, -42.0)])).unwrap();

        let report = text_report(&store, &["a.csv".to_string(), "b.csv".to_string()]);
        assert!(report.starts_with("FRA Analysis Report\n===================\nGenerated: "));
        assert!(report.contains("Files Analyzed: a.csv, b.csv"));
        assert!(report.contains("a.csv:\n  - Data Points: 2"));
        assert!(report.contains("  - Frequency Range: 20.00 - 100.00 Hz"));
        assert!(report.contains("  - Magnitude Range: -45.00 - -38.00 dB"));
        assert!(report.contains("  - Avg Magnitude: -41.50 dB"));
        assert!(report.contains("b.csv:\n  - Data Points: 1"));
    }

    #[test]
    fn export_leaves_missing_cells_empty() {
        let mut store = SeriesStore::default();
        store
            .insert(series("a.csv", &[(20.0, -45.0), (100.0, -38.0)]))
            .unwrap();
        store.insert(series("b.csv", &[(20.0, -46.0)])).unwrap();

        let frame = merged_frame(&store, &["a.csv".to_string(), "b.csv".to_string()]);
        let csv = export_csv(&frame);
        let lines: Vec<&str> = csv.trim_end().split('\n').collect();
        assert_eq!(lines[0], "freq,magnitude,baseline");
        assert_eq!(lines[1], "20,-45,-46");
        assert_eq!(lines[2], "100,-38,");
    }

    #[test]
    fn export_of_an_empty_frame_is_just_the_header() {
        assert_eq!(export_csv(&MergedFrame::new()), "freq,magnitude,baseline\n");
    }
}
