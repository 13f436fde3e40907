/// Data layer: the ingestion pipeline and the types it feeds.
///
/// Architecture:
/// ```text
///  raw delimited text
///        │
///        ▼
///   ┌──────────┐
///   │ columns   │  header tokens → ColumnMapping
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parse    │  data rows → validated, frequency-sorted Series
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ downsample  │  bounded, endpoint-preserving subset
///   └────────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ SeriesStore  │  at most two sources, per-source commits
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  merge    │  rounded-frequency keys → MergedFrame
///   └──────────┘
/// ```

pub mod columns;
pub mod downsample;
pub mod error;
pub mod loader;
pub mod merge;
pub mod model;
pub mod parse;
