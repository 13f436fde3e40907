use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::{Axis, IngestError};
use super::model::ColumnMapping;

// ---------------------------------------------------------------------------
// AxisSynonyms – configurable header vocabulary
// ---------------------------------------------------------------------------

/// Ordered substring lists used to recognise the two sweep axes in a header
/// row. Kept as data rather than code so a deployment whose instruments
/// emit unusual headers can adjust the lists without a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSynonyms {
    pub frequency: Vec<String>,
    pub magnitude: Vec<String>,
}

impl Default for AxisSynonyms {
    fn default() -> Self {
        Self {
            frequency: vec!["freq", "frequency", "hz", "f (hz)", "f(hz)", "frequency (hz)"]
                .into_iter()
                .map(String::from)
                .collect(),
            magnitude: vec!["mag", "magnitude", "db", "mag(db)", "magnitude(db)", "magnitude (db)"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl AxisSynonyms {
    /// Load synonym lists from a JSON file:
    ///
    /// ```json
    /// { "frequency": ["freq", "hz"], "magnitude": ["mag", "db"] }
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context("reading column rules file")?;
        let synonyms = serde_json::from_str(&text).context("parsing column rules JSON")?;
        Ok(synonyms)
    }
}

// ---------------------------------------------------------------------------
// Column resolution
// ---------------------------------------------------------------------------

/// Map raw header tokens to the two logical axes.
///
/// Columns are scanned left to right; the first header containing any of an
/// axis's synonyms as a case-insensitive substring claims that axis.
/// Substring containment can false-positive on composite header names
/// (a token that merely embeds "freq"); the synonym lists being runtime
/// configuration is the escape hatch for such headers.
pub fn resolve_columns(
    headers: &[String],
    synonyms: &AxisSynonyms,
) -> Result<ColumnMapping, IngestError> {
    let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let frequency = match_axis(&lowered, &synonyms.frequency)
        .ok_or(IngestError::ColumnResolution {
            axis: Axis::Frequency,
        })?;
    let magnitude = match_axis(&lowered, &synonyms.magnitude)
        .ok_or(IngestError::ColumnResolution {
            axis: Axis::Magnitude,
        })?;

    Ok(ColumnMapping {
        frequency,
        magnitude,
    })
}

/// Index of the first header containing any synonym, or `None`.
fn match_axis(headers: &[String], synonyms: &[String]) -> Option<usize> {
    let synonyms: Vec<String> = synonyms.iter().map(|s| s.to_lowercase()).collect();
    headers
        .iter()
        .position(|header| synonyms.iter().any(|syn| header.contains(syn.as_str())))
}
