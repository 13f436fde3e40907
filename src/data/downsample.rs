use std::collections::BTreeSet;

use super::model::DataPoint;

// ---------------------------------------------------------------------------
// PointBudget – how hard to thin a series
// ---------------------------------------------------------------------------

/// Bounds for [`downsample`]. `max_points` of `None` is the degenerate
/// fixed-count configuration: the stride is computed from `min_points`
/// instead, which is the single-file fallback behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointBudget {
    pub min_points: usize,
    pub max_points: Option<usize>,
}

impl Default for PointBudget {
    fn default() -> Self {
        Self::new(10, 30)
    }
}

impl PointBudget {
    pub fn new(min_points: usize, max_points: usize) -> Self {
        Self {
            min_points,
            max_points: Some(max_points),
        }
    }

    /// Thin to roughly `min_points` with no upper bound.
    pub fn fixed(min_points: usize) -> Self {
        Self {
            min_points,
            max_points: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Downsampling
// ---------------------------------------------------------------------------

/// Reduce a frequency-sorted series to a bounded, evenly-spaced subset.
///
/// Series at or under the cap pass through unchanged. Otherwise a strided
/// subset is selected that always keeps the original first and last points,
/// then backfilled with extra evenly-spaced indices if it came in under
/// `min_points`. The strided pass plus the unconditional endpoints can
/// yield one point over the cap, and backfill can push further past it;
/// both overshoots are accepted rather than re-trimmed.
pub fn downsample(points: Vec<DataPoint>, budget: PointBudget) -> Vec<DataPoint> {
    let n = points.len();
    let cap = budget.max_points.unwrap_or(budget.min_points).max(1);
    if n <= cap {
        return points;
    }

    let stride = n.div_ceil(cap);
    let mut kept = BTreeSet::new();
    kept.insert(0);
    let mut i = stride;
    while i < n - 1 {
        kept.insert(i);
        i += stride;
    }
    kept.insert(n - 1);

    if kept.len() < budget.min_points {
        // best effort: a position colliding with an already-kept index is
        // not replaced, so the minimum is approached, not guaranteed
        let needed = budget.min_points - kept.len();
        for k in 1..=needed {
            kept.insert(k * n / (needed + 2));
        }
    }

    points
        .into_iter()
        .enumerate()
        .filter(|(i, _)| kept.contains(i))
        .map(|(_, p)| p)
        .collect()
}
