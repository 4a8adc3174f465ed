use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use time_window::{NaiveTimeWindow, Pieces, TimeWindow, TimeWindowsCollection};

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2015, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn minute(m: i64) -> NaiveDateTime {
    epoch() + Duration::minutes(m)
}

/// Windows on a coarse minute grid so that touching boundaries are common.
fn window() -> impl Strategy<Value = NaiveTimeWindow> {
    (0i64..200, 0i64..60).prop_map(|(start, len)| TimeWindow::new(minute(start), minute(start + len)).unwrap())
}

fn non_empty_window() -> impl Strategy<Value = NaiveTimeWindow> {
    (0i64..200, 1i64..60).prop_map(|(start, len)| TimeWindow::new(minute(start), minute(start + len)).unwrap())
}

/// The set of grid minutes `[m, m+1)` covered by `windows`.
fn covered<'a>(windows: impl IntoIterator<Item = &'a NaiveTimeWindow>) -> Vec<bool> {
    let mut grid = vec![false; 400];
    for w in windows {
        for (m, slot) in grid.iter_mut().enumerate() {
            if w.contains(minute(m as i64)) {
                *slot = true;
            }
        }
    }
    grid
}

proptest! {
    #[test]
    fn union_covers_the_same_time_in_any_order(a in window(), b in window()) {
        let ab = a.union(&b);
        let ba = b.union(&a);
        prop_assert_eq!(ab, ba);
        prop_assert_eq!(covered(ab.iter()), covered([&a, &b]));
    }

    #[test]
    fn overlap_and_intersection_are_symmetric(a in window(), b in window()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn self_complement_is_empty(a in window()) {
        prop_assert_eq!(a.complement(&a), Pieces::Empty);
    }

    #[test]
    fn complement_then_union_rebuilds_the_container(a in non_empty_window(), cut in (0i64..60, 0i64..60)) {
        let lo = cut.0.min(cut.1).min(a.delta().num_minutes());
        let hi = cut.0.max(cut.1).min(a.delta().num_minutes());
        let b = TimeWindow::new(a.since() + Duration::minutes(lo), a.since() + Duration::minutes(hi)).unwrap();
        prop_assume!(a.contains(b));

        let mut rebuilt: Vec<_> = a.complement(&b).to_vec();
        rebuilt.push(b);
        let merged = TimeWindowsCollection::new(rebuilt).compressed();
        if b.is_zero_width() {
            prop_assert_eq!(covered(merged.iter()), covered([&a]));
        } else {
            prop_assert_eq!(merged.windows(), &[a]);
        }
    }

    #[test]
    fn compressed_is_idempotent_sorted_and_disjoint(windows in prop::collection::vec(window(), 0..12)) {
        let collection = TimeWindowsCollection::new(windows.clone());
        let once = collection.compressed();
        prop_assert_eq!(once.compressed(), once.clone());
        for pair in once.windows().windows(2) {
            prop_assert!(pair[0].since() < pair[1].since());
            prop_assert!(!pair[0].overlaps(&pair[1]));
            prop_assert!(pair[0].contiguous(&pair[1]).is_none());
            prop_assert!(pair[0].until() < pair[1].since());
        }
        prop_assert_eq!(covered(once.iter()), covered(windows.iter()));
    }

    #[test]
    fn compressed_and_complement_tile_the_bound(windows in prop::collection::vec(window(), 0..12)) {
        let collection = TimeWindowsCollection::new(windows);
        let bound = TimeWindow::new(minute(0), minute(300)).unwrap();
        let busy = collection.compressed();
        let free = collection.complement(&bound);

        for gap in &free {
            prop_assert!(bound.contains(gap));
            for w in &busy {
                prop_assert!(!gap.overlaps(w));
            }
        }
        let mut all: Vec<_> = busy.iter().chain(free.iter()).copied().collect();
        all.retain(|w| !w.is_zero_width());
        let tiled = TimeWindowsCollection::new(all).compressed();
        prop_assert_eq!(tiled.windows(), &[bound]);
    }

    #[test]
    fn split_chunks_tile_the_window(a in non_empty_window(), step in 1i64..1_000) {
        let step = Duration::seconds(step);
        let chunks = a.split(step).unwrap();
        prop_assert_eq!(chunks[0].since(), a.since());
        prop_assert_eq!(chunks[chunks.len() - 1].until(), a.until());
        for pair in chunks.windows(2) {
            prop_assert_eq!(pair[0].until(), pair[1].since());
            prop_assert_eq!(pair[0].delta(), step);
        }
        prop_assert!(chunks[chunks.len() - 1].delta() <= step);
    }

    #[test]
    fn calendar_splits_tile_the_window(start in 0i64..100_000, len in 0i64..200_000) {
        let a = TimeWindow::new(minute(start), minute(start + len)).unwrap();
        for chunks in [a.split_per_day(), a.split_per_week(), a.split_per_month()] {
            prop_assert_eq!(chunks[0].since(), a.since());
            prop_assert_eq!(chunks[chunks.len() - 1].until(), a.until());
            for pair in chunks.windows(2) {
                prop_assert_eq!(pair[0].until(), pair[1].since());
            }
            prop_assert!(chunks.iter().all(|c| c.is_zero_width() == a.is_zero_width()));
        }
    }
}
