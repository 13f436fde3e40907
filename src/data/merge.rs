use std::collections::BTreeMap;

use super::model::{FrameEntry, MergedFrame, SeriesStore};

// ---------------------------------------------------------------------------
// Merge-by-key
// ---------------------------------------------------------------------------

/// Align the stored series into one frequency-keyed frame for side-by-side
/// charting.
///
/// `slots` lists up to two source names in upload order: the first maps to
/// each entry's `magnitude` column, the second to `magnitude2`. Points from
/// sources named in neither slot are ignored. Frequencies are rounded to
/// 2 decimals to form the merge key, so near-identical sweep steps from
/// the two files land in the same entry; keys are kept as integer
/// centihertz internally to stay exact and ordered. The result is sorted
/// ascending by key with `index` holding the 0-based rank.
pub fn merged_frame(store: &SeriesStore, slots: &[String]) -> MergedFrame {
    let slot = |source: &str| slots.iter().position(|name| name == source);

    let mut entries: BTreeMap<i64, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for series in store.series() {
        for point in &series.points {
            let Some(slot) = slot(&point.source) else {
                continue;
            };
            let key = to_centihertz(point.frequency);
            let magnitude = round2(point.magnitude);
            let entry = entries.entry(key).or_default();
            match slot {
                0 => entry.0 = Some(magnitude),
                _ => entry.1 = Some(magnitude),
            }
        }
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, (key, (magnitude, magnitude2)))| FrameEntry {
            frequency: key as f64 / 100.0,
            magnitude,
            magnitude2,
            index,
        })
        .collect()
}

fn to_centihertz(frequency: f64) -> i64 {
    (frequency * 100.0).round() as i64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn slots(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn near_identical_frequencies_share_an_entry() {
        let mut store = SeriesStore::default();
        store.insert(series("a.csv", &[(1000.00, -40.0)])).unwrap();
        store.insert(series("b.csv", &[(1000.004, -38.0)])).unwrap();

        let frame = merged_frame(&store, &slots(&["a.csv", "b.csv"]));
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].frequency, 1000.0);
        assert_eq!(frame[0].magnitude, Some(-40.0));
        assert_eq!(frame[0].magnitude2, Some(-38.0));
        assert_eq!(frame[0].index, 0);
    }

    #[test]
    fn disjoint_keys_yield_one_sided_entries() {
        let mut store = SeriesStore::default();
        store.insert(series("a.csv", &[(20.0, -45.0), (100.0, -38.0)])).unwrap();
        store.insert(series("b.csv", &[(50.0, -42.0)])).unwrap();

        let frame = merged_frame(&store, &slots(&["a.csv", "b.csv"]));
        let keys: Vec<f64> = frame.iter().map(|e| e.frequency).collect();
        assert_eq!(keys, vec![20.0, 50.0, 100.0]);
        assert_eq!(frame[0].magnitude, Some(-45.0));
        assert_eq!(frame[0].magnitude2, None);
        assert_eq!(frame[1].magnitude, None);
        assert_eq!(frame[1].magnitude2, Some(-42.0));

        let ranks: Vec<usize> = frame.iter().map(|e| e.index).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
    }

    #[test]
    fn commit_order_does_not_change_the_frame() {
        let a = series("a.csv", &[(20.0, -45.0), (100.0, -38.0)]);
        let b = series("b.csv", &[(20.0, -46.0), (500.0, -40.0)]);
        let slot_names = slots(&["a.csv", "b.csv"]);

        let mut first = SeriesStore::default();
        first.insert(a.clone()).unwrap();
        first.insert(b.clone()).unwrap();

        let mut second = SeriesStore::default();
        second.insert(b).unwrap();
        second.insert(a).unwrap();

        assert_eq!(
            merged_frame(&first, &slot_names),
            merged_frame(&second, &slot_names)
        );
    }

    #[test]
    fn sources_outside_the_slots_are_ignored() {
        let mut store = SeriesStore::default();
        store.insert(series("a.csv", &[(20.0, -45.0)])).unwrap();
        store.insert(series("b.csv", &[(50.0, -42.0)])).unwrap();

        let frame = merged_frame(&store, &slots(&["a.csv"]));
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].frequency, 20.0);
        assert_eq!(frame[0].magnitude2, None);
    }

    #[test]
    fn magnitudes_are_rounded_to_two_decimals() {
        let mut store = SeriesStore::default();
        store.insert(series("a.csv", &[(20.0, -45.017), (50.0, -38.342)])).unwrap();

        let frame = merged_frame(&store, &slots(&["a.csv"]));
        assert_eq!(frame[0].magnitude, Some(-45.02));
        assert_eq!(frame[1].magnitude, Some(-38.34));
    }

    #[test]
    fn empty_store_projects_an_empty_frame() {
        let store = SeriesStore::default();
        assert!(merged_frame(&store, &slots(&["a.csv", "b.csv"])).is_empty());
        assert!(merged_frame(&store, &[]).is_empty());
    }
}
