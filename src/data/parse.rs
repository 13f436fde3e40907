use super::columns::{resolve_columns, AxisSynonyms};
use super::error::IngestError;
use super::model::{DataPoint, Series};

// ---------------------------------------------------------------------------
// Row parsing & validation
// ---------------------------------------------------------------------------

/// Parse one file's raw text into a validated, frequency-sorted [`Series`].
///
/// The first line must be a header row; its columns are resolved against
/// `synonyms`. Every following row contributes a point only when both
/// mapped fields parse as finite numbers — anything else (short rows,
/// non-numeric fields, blank lines, row-level CSV errors) is dropped
/// silently, since file-level validity is enforced separately by the
/// too-small and empty-dataset checks.
pub fn parse_series(
    text: &str,
    source: &str,
    synonyms: &AxisSynonyms,
) -> Result<Series, IngestError> {
    // header plus at least one data row, ignoring blank lines
    if text.lines().filter(|l| !l.trim().is_empty()).count() < 2 {
        return Err(IngestError::FileTooSmall);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mapping = resolve_columns(&headers, synonyms)?;

    let mut points = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::debug!("{source}: dropping row {row}: {e}");
                continue;
            }
        };

        let frequency = record.get(mapping.frequency).and_then(parse_finite);
        let magnitude = record.get(mapping.magnitude).and_then(parse_finite);
        match (frequency, magnitude) {
            (Some(frequency), Some(magnitude)) => points.push(DataPoint {
                frequency,
                magnitude,
                source: source.to_string(),
            }),
            _ => log::debug!("{source}: dropping row {row}: non-numeric values"),
        }
    }

    if points.is_empty() {
        return Err(IngestError::EmptyDataset);
    }

    points.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    warn_on_suspicious_scale(source, &points);

    Ok(Series {
        source: source.to_string(),
        points,
    })
}

fn parse_finite(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// An all-positive magnitude column reaching past 10 000 usually means the
/// file carries raw ratios or mislabeled units rather than dB. Not an
/// error; the file may still be genuine.
fn warn_on_suspicious_scale(source: &str, points: &[DataPoint]) {
    let min = points
        .iter()
        .map(|p| p.magnitude)
        .fold(f64::INFINITY, f64::min);
    let max = points
        .iter()
        .map(|p| p.magnitude)
        .fold(f64::NEG_INFINITY, f64::max);
    if max > 10_000.0 && min > 0.0 {
        log::warn!(
            "magnitudes in {source} have unusual range ({min}-{max}); data may need verification"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Series, IngestError> {
        parse_series(text, "sweep.csv", &AxisSynonyms::default())
    }

    #[test]
    fn malformed_rows_are_dropped_not_fatal() {
        let series = parse("freq,mag\n10,-20\nabc,-30\n30,-40").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].frequency, 10.0);
        assert_eq!(series.points[0].magnitude, -20.0);
        assert_eq!(series.points[1].frequency, 30.0);
        assert_eq!(series.points[1].magnitude, -40.0);
    }

    #[test]
    fn points_are_sorted_and_tagged_with_source() {
        let series = parse("frequency (hz),magnitude (db)\n500,-40\n20,-45\n100,-38").unwrap();
        let freqs: Vec<f64> = series.points.iter().map(|p| p.frequency).collect();
        assert_eq!(freqs, vec![20.0, 100.0, 500.0]);
        assert!(series.points.iter().all(|p| p.source == "sweep.csv"));
    }

    #[test]
    fn header_only_file_is_too_small() {
        assert!(matches!(parse("freq,mag"), Err(IngestError::FileTooSmall)));
        assert!(matches!(parse(""), Err(IngestError::FileTooSmall)));
        // blank lines do not count towards the minimum
        assert!(matches!(
            parse("freq,mag\n\n  \n"),
            Err(IngestError::FileTooSmall)
        ));
    }

    #[test]
    fn all_rows_invalid_is_an_empty_dataset() {
        assert!(matches!(
            parse("freq,mag\nabc,def\n,,\nnan,1"),
            Err(IngestError::EmptyDataset)
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        // "inf" parses as f64 infinity; such rows must not survive
        assert!(matches!(
            parse("freq,mag\ninf,-20\n10,inf"),
            Err(IngestError::EmptyDataset)
        ));
    }

    #[test]
    fn unresolvable_header_aborts_the_file() {
        assert!(matches!(
            parse("time,value\n1,2"),
            Err(IngestError::ColumnResolution { .. })
        ));
    }

    #[test]
    fn short_rows_and_trailing_blanks_are_ignored() {
        let series = parse("freq,mag\n10,-20\n30\n50,-60\n\n\n").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[1].frequency, 50.0);
    }

    #[test]
    fn mapped_columns_can_sit_anywhere_in_the_row() {
        let series = parse("index,Magnitude(dB),Frequency (Hz)\n0,-45,20\n1,-42,50").unwrap();
        assert_eq!(series.points[0].frequency, 20.0);
        assert_eq!(series.points[0].magnitude, -45.0);
    }
}
