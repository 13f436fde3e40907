use std::fmt;

use thiserror::Error;

/// Logical axis of a sweep column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Frequency,
    Magnitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Frequency => write!(f, "frequency"),
            Axis::Magnitude => write!(f, "magnitude"),
        }
    }
}

/// Failures local to one uploaded file. None of these end the session: the
/// offending file simply contributes nothing to the store.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file has fewer than 2 lines; expected a header row plus data")]
    FileTooSmall,
    #[error("no column matches any {axis} header synonym (e.g. 'frequency', 'hz' or 'magnitude', 'db')")]
    ColumnResolution { axis: Axis },
    #[error("no rows with numeric frequency and magnitude values")]
    EmptyDataset,
    #[error("at most {limit} files can be compared at once; remove one first")]
    FileCountExceeded { limit: usize },
    #[error("a file named '{name}' is already loaded")]
    DuplicateSource { name: String },
    #[error("reading file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed delimited text: {0}")]
    Malformed(#[from] csv::Error),
}
