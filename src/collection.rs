// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Collections of possibly overlapping windows.
//!
//! A [`TimeWindowsCollection`] describes a non-contiguous stretch of time,
//! or simply a batch of windows. It can be:
//! - compressed into the minimal sorted, disjoint, non-touching equivalent
//!   ([`TimeWindowsCollection::compressed`]);
//! - inverted within a bounding window to obtain the uncovered gaps
//!   ([`TimeWindowsCollection::complement`]).

use crate::{TimeInstant, TimeWindow};
use log::trace;
use std::fmt;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered sequence of windows, plus a lazily sorted view of it.
///
/// The sorted-by-`since` view is computed at most once, on first use, and
/// is safe to initialise from several threads. Collections returned by
/// [`compressed`](Self::compressed) and [`complement`](Self::complement)
/// are already sorted and never sort again.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use time_window::{TimeWindow, TimeWindowsCollection};
///
/// let at = |h, m| NaiveDate::from_ymd_opt(2015, 2, 19).unwrap().and_hms_opt(h, m, 0).unwrap();
/// let windows = TimeWindowsCollection::new(vec![
///     TimeWindow::from_span(at(1, 5), Duration::minutes(10)).unwrap(),
///     TimeWindow::from_span(at(1, 0), Duration::minutes(10)).unwrap(),
/// ]);
///
/// let merged = windows.compressed();
/// assert_eq!(merged.windows(), &[TimeWindow::new(at(1, 0), at(1, 15)).unwrap()]);
///
/// let bound = TimeWindow::new(at(1, 0), at(2, 0)).unwrap();
/// let gaps = windows.complement(&bound);
/// assert_eq!(gaps.windows(), &[TimeWindow::new(at(1, 15), at(2, 0)).unwrap()]);
/// ```
pub struct TimeWindowsCollection<T: TimeInstant> {
    windows: Vec<TimeWindow<T>>,
    presorted: bool,
    sorted: OnceLock<Vec<TimeWindow<T>>>,
}

impl<T: TimeInstant> TimeWindowsCollection<T> {
    /// Wraps an arbitrary, possibly unsorted and overlapping, sequence.
    pub fn new(windows: Vec<TimeWindow<T>>) -> Self {
        Self {
            windows,
            presorted: false,
            sorted: OnceLock::new(),
        }
    }

    /// Wraps a sequence already sorted ascending by `since`.
    ///
    /// The ordering is trusted; it is only checked in debug builds.
    pub fn presorted(windows: Vec<TimeWindow<T>>) -> Self {
        debug_assert!(windows.windows(2).all(|w| w[0].since() <= w[1].since()));
        Self {
            windows,
            presorted: true,
            sorted: OnceLock::new(),
        }
    }

    /// The windows in their original order.
    #[inline]
    pub fn windows(&self) -> &[TimeWindow<T>] {
        &self.windows
    }

    /// The windows sorted ascending by `since`.
    ///
    /// The sort is stable: windows sharing a `since` keep their original
    /// relative order.
    pub fn sorted_by_since(&self) -> &[TimeWindow<T>] {
        if self.presorted {
            return &self.windows;
        }
        self.sorted.get_or_init(|| {
            let mut sorted = self.windows.clone();
            sorted.sort_by_key(|window| window.since());
            sorted
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeWindow<T>> {
        self.windows.iter()
    }

    pub fn into_vec(self) -> Vec<TimeWindow<T>> {
        self.windows
    }

    /// The smallest equivalent collection: sorted by `since`, with every
    /// overlapping or touching run of windows merged into one.
    ///
    /// An empty collection compresses to an empty collection.
    pub fn compressed(&self) -> Self {
        let mut sorted = self.sorted_by_since().iter();
        let Some(first) = sorted.next() else {
            return Self::presorted(Vec::new());
        };

        let mut merged = Vec::new();
        let (mut since, mut until) = (first.since(), first.until());
        for window in sorted {
            if window.since() <= until {
                until = until.max(window.until());
            } else {
                trace!("compressed run {since} .. {until}");
                merged.push(TimeWindow::new_unchecked(since, until));
                since = window.since();
                until = window.until();
            }
        }
        trace!("compressed run {since} .. {until}");
        merged.push(TimeWindow::new_unchecked(since, until));

        Self::presorted(merged)
    }

    /// The parts of `bound` not covered by any window of the collection,
    /// earliest first.
    ///
    /// The collection does not need to be compressed first. A collection
    /// covering all of `bound` yields an empty result.
    pub fn complement(&self, bound: &TimeWindow<T>) -> Self {
        let mut gaps = vec![*bound];
        for window in self.sorted_by_since() {
            // Windows arrive by ascending `since`, so only the latest gap can
            // still intersect them.
            let Some(last) = gaps.pop() else {
                break;
            };
            let pieces = last.complement(window);
            trace!("subtracting {window:?} from {last:?} left {} piece(s)", pieces.len());
            gaps.extend(pieces);
        }
        Self::presorted(gaps)
    }
}

impl<T: TimeInstant> Clone for TimeWindowsCollection<T> {
    fn clone(&self) -> Self {
        Self {
            windows: self.windows.clone(),
            presorted: self.presorted,
            sorted: self.sorted.clone(),
        }
    }
}

impl<T: TimeInstant> fmt::Debug for TimeWindowsCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.windows).finish()
    }
}

impl<T: TimeInstant> Default for TimeWindowsCollection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: TimeInstant> PartialEq for TimeWindowsCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.windows == other.windows
    }
}

impl<T: TimeInstant> Eq for TimeWindowsCollection<T> {}

impl<T: TimeInstant> From<Vec<TimeWindow<T>>> for TimeWindowsCollection<T> {
    fn from(windows: Vec<TimeWindow<T>>) -> Self {
        Self::new(windows)
    }
}

impl<T: TimeInstant> FromIterator<TimeWindow<T>> for TimeWindowsCollection<T> {
    fn from_iter<I: IntoIterator<Item = TimeWindow<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: TimeInstant> IntoIterator for TimeWindowsCollection<T> {
    type Item = TimeWindow<T>;
    type IntoIter = std::vec::IntoIter<TimeWindow<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.into_iter()
    }
}

impl<'a, T: TimeInstant> IntoIterator for &'a TimeWindowsCollection<T> {
    type Item = &'a TimeWindow<T>;
    type IntoIter = std::slice::Iter<'a, TimeWindow<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}

impl<T: TimeInstant> fmt::Display for TimeWindowsCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, window) in self.windows.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} to {}", window.since(), window.until())?;
        }
        f.write_str("]")
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<T> Serialize for TimeWindowsCollection<T>
where
    T: TimeInstant + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.windows.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> Deserialize<'de> for TimeWindowsCollection<T>
where
    T: TimeInstant + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<TimeWindow<T>>::deserialize(deserializer).map(Self::new)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
