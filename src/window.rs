// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open time window implementation.
//!
//! This module provides:
//! - [`TimeWindow<T>`]: the window `[since, until)` over any [`TimeInstant`]
//! - [`NaiveTimeWindow`] and [`UtcTimeWindow`]: aliases for the common chrono types

use crate::error::{Error, Result};
use crate::humanize::format_duration;
use crate::instant::CalendarUnit;
use crate::{Pieces, Probe, TimeInstant};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use log::debug;
use qtty::{Day, Days, Seconds};
use std::borrow::Borrow;
use std::fmt;
use std::ops::{BitAnd, BitOr, Sub};

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// Represents all instants in the half-open range `[since, until)`.
///
/// A `TimeWindow` is immutable: every operation returns new windows. The
/// lower boundary is inclusive, the upper one exclusive, and `since <=
/// until` always holds. Zero-width windows (`since == until`) are allowed.
///
/// Windows order by `since`, then by `until`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use time_window::TimeWindow;
///
/// let since = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// let window = TimeWindow::from_span(since, Duration::minutes(10)).unwrap();
///
/// assert_eq!(window.delta(), Duration::minutes(10));
/// assert!(window.contains(since));
/// assert!(!window.contains(window.until()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeWindow<T: TimeInstant> {
    since: T,
    until: T,
}

/// Window over naive wall-clock instants.
pub type NaiveTimeWindow = TimeWindow<NaiveDateTime>;

/// UTC window alias.
pub type UtcTimeWindow = TimeWindow<DateTime<Utc>>;

impl<T: TimeInstant> TimeWindow<T> {
    // ── constructors ──────────────────────────────────────────────────

    /// Creates a new window between two instants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvertedBoundaries`] if `until` is earlier than `since`.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use time_window::TimeWindow;
    ///
    /// let at = |m| NaiveDate::from_ymd_opt(2015, 1, 1).unwrap().and_hms_opt(10, m, 0).unwrap();
    /// assert!(TimeWindow::new(at(0), at(5)).is_ok());
    /// assert!(TimeWindow::new(at(5), at(0)).is_err());
    /// ```
    pub fn new(since: T, until: T) -> Result<Self> {
        if until < since {
            debug!("rejected window with until {until} earlier than since {since}");
            return Err(Error::InvertedBoundaries {
                since: since.to_string(),
                until: until.to_string(),
            });
        }
        Ok(Self { since, until })
    }

    /// Builds a window whose ordering is already known to hold.
    #[inline]
    pub(crate) fn new_unchecked(since: T, until: T) -> Self {
        debug_assert!(since <= until);
        Self { since, until }
    }

    /// Creates the window between `anchor` and `anchor + delta`.
    ///
    /// The sign of `delta` only selects the direction: a negative delta
    /// yields a window ending at `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `anchor + delta` is not representable.
    pub fn from_span(anchor: T, delta: Duration) -> Result<Self> {
        let other = anchor
            .checked_add_duration(delta)
            .ok_or_else(|| Error::OutOfRange(format!("{anchor} shifted by {delta}")))?;
        Ok(Self::new_unchecked(anchor.min(other), anchor.max(other)))
    }

    /// The smallest window enclosing every window in `windows`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] when `windows` yields nothing.
    pub fn smallest_enclosing<I>(windows: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Self>,
    {
        let mut windows = windows.into_iter();
        let first = *windows.next().ok_or(Error::EmptyInput)?.borrow();
        Ok(windows.fold(first, |acc, window| {
            let window = window.borrow();
            Self::new_unchecked(acc.since.min(window.since), acc.until.max(window.until))
        }))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The inclusive lower boundary.
    #[inline]
    pub fn since(&self) -> T {
        self.since
    }

    /// The exclusive upper boundary.
    #[inline]
    pub fn until(&self) -> T {
        self.until
    }

    /// Width of the window, `until - since`. Never negative.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.until.difference(&self.since)
    }

    /// Width of the window in seconds, keeping sub-second precision.
    pub fn delta_seconds(&self) -> Seconds {
        let delta = self.delta();
        match delta.num_nanoseconds() {
            Some(ns) => Seconds::new(ns as f64 / 1e9),
            // Durations too large for i64 nanoseconds.
            None => Seconds::new(delta.num_seconds() as f64),
        }
    }

    /// Width of the window in days.
    pub fn delta_days(&self) -> Days {
        self.delta_seconds().to::<Day>()
    }

    /// The instant halfway between `since` and `until`.
    pub fn middle(&self) -> T {
        // since + delta/2 lies inside the window, so it is representable.
        self.since
            .checked_add_duration(self.delta() / 2)
            .unwrap_or(self.since)
    }

    /// `true` for a window with `since == until`.
    #[inline]
    pub fn is_zero_width(&self) -> bool {
        self.since == self.until
    }

    // ── predicates ────────────────────────────────────────────────────

    /// Whether the two windows share at least one instant.
    ///
    /// Windows touching only at a boundary do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.since.max(other.since) < self.until.min(other.until)
    }

    /// The two windows ordered earliest first, if they do not overlap and
    /// one ends exactly where the other starts.
    ///
    /// Identical windows are never contiguous.
    pub fn contiguous(&self, other: &Self) -> Option<(Self, Self)> {
        if self == other || self.overlaps(other) {
            return None;
        }
        let (first, second) = earliest_first(*self, *other);
        (first.until == second.since).then_some((first, second))
    }

    /// Membership test for an instant, or enclosure test for a window.
    ///
    /// An instant is contained when `since <= t < until`. A window is
    /// contained when both of its boundaries lie within `[since, until]`.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use time_window::TimeWindow;
    ///
    /// let at = |m| NaiveDate::from_ymd_opt(2015, 1, 1).unwrap().and_hms_opt(10, m, 0).unwrap();
    /// let outer = TimeWindow::new(at(0), at(30)).unwrap();
    /// let inner = TimeWindow::new(at(10), at(30)).unwrap();
    ///
    /// assert!(outer.contains(inner));
    /// assert!(outer.contains(at(29)));
    /// assert!(!outer.contains(at(30)));
    /// ```
    pub fn contains<P: Into<Probe<T>>>(&self, probe: P) -> bool {
        match probe.into() {
            Probe::Instant(t) => self.since <= t && t < self.until,
            Probe::Window(other) => self.since <= other.since && self.until >= other.until,
        }
    }

    // ── set operations ────────────────────────────────────────────────

    /// Union of the two windows.
    ///
    /// Overlapping, contiguous or nested windows merge into
    /// `Pieces::Single`; any other pair is returned as `Pieces::Pair`,
    /// earliest first. The result does not depend on argument order.
    ///
    /// A zero-width window lying within the other one is absorbed by it.
    pub fn union(&self, other: &Self) -> Pieces<T> {
        if self.overlaps(other)
            || self.contiguous(other).is_some()
            || self.contains(other)
            || other.contains(self)
        {
            return Pieces::Single(Self::new_unchecked(
                self.since.min(other.since),
                self.until.max(other.until),
            ));
        }
        let (first, second) = earliest_first(*self, *other);
        Pieces::Pair(first, second)
    }

    /// Returns the overlapping sub-window between `self` and `other`.
    ///
    /// Windows are treated as half-open ranges `[since, until)`: if one
    /// window ends exactly when the other starts, the intersection is empty
    /// and `None` is returned.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let since = self.since.max(other.since);
        let until = self.until.min(other.until);
        (since < until).then(|| Self::new_unchecked(since, until))
    }

    /// The part of `self` not covered by `other` (`self - other`).
    ///
    /// - no overlap: `self` unchanged
    /// - `other` covers `self` (or equals it): `Pieces::Empty`
    /// - `other` clips one end: the remaining `Pieces::Single`
    /// - `other` lies strictly inside: `Pieces::Pair`, earliest first
    pub fn complement(&self, other: &Self) -> Pieces<T> {
        if self == other {
            return Pieces::Empty;
        }
        let Some(overlap) = self.intersection(other) else {
            return Pieces::Single(*self);
        };
        if overlap == *self {
            Pieces::Empty
        } else if overlap.since == self.since {
            Pieces::Single(Self::new_unchecked(overlap.until, self.until))
        } else if overlap.until == self.until {
            Pieces::Single(Self::new_unchecked(self.since, overlap.since))
        } else {
            Pieces::Pair(
                Self::new_unchecked(self.since, other.since),
                Self::new_unchecked(other.until, self.until),
            )
        }
    }

    // ── decomposition ─────────────────────────────────────────────────

    /// Splits into contiguous chunks of `max_delta`, starting at `since`.
    ///
    /// Every chunk but the last is exactly `max_delta` wide; the last one is
    /// truncated to end at `until`. A zero-width window yields itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveDuration`] if `max_delta` is zero or negative.
    pub fn split(&self, max_delta: Duration) -> Result<Vec<Self>> {
        if max_delta <= Duration::zero() {
            return Err(Error::NonPositiveDuration(format!(
                "split step must be positive, got {max_delta}"
            )));
        }
        if self.is_zero_width() {
            return Ok(vec![*self]);
        }

        let mut chunks = Vec::new();
        let mut chunk_since = self.since;
        while chunk_since < self.until {
            let step = max_delta.min(self.until.difference(&chunk_since));
            let chunk_until = chunk_since
                .checked_add_duration(step)
                .ok_or_else(|| Error::OutOfRange(format!("{chunk_since} shifted by {step}")))?;
            chunks.push(Self::new_unchecked(chunk_since, chunk_until));
            chunk_since = chunk_until;
        }
        Ok(chunks)
    }

    /// Splits at every local midnight.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use time_window::TimeWindow;
    ///
    /// let at = |d, h| NaiveDate::from_ymd_opt(2015, 1, d).unwrap().and_hms_opt(h, 0, 0).unwrap();
    /// let window = TimeWindow::new(at(1, 23), at(2, 10)).unwrap();
    ///
    /// assert_eq!(
    ///     window.split_per_day(),
    ///     vec![
    ///         TimeWindow::new(at(1, 23), at(2, 0)).unwrap(),
    ///         TimeWindow::new(at(2, 0), at(2, 10)).unwrap(),
    ///     ]
    /// );
    /// ```
    pub fn split_per_day(&self) -> Vec<Self> {
        self.split_per(CalendarUnit::Day)
    }

    /// Splits at every Monday 00:00.
    pub fn split_per_week(&self) -> Vec<Self> {
        self.split_per(CalendarUnit::Week)
    }

    /// Splits at 00:00 on the first day of every month.
    pub fn split_per_month(&self) -> Vec<Self> {
        self.split_per(CalendarUnit::Month)
    }

    /// Splits at every rollover of `unit`.
    ///
    /// Rollovers are computed from the calendar fields of each chunk start,
    /// in that instant's own offset. A window that crosses no rollover is
    /// returned as the single element, boundaries untouched. A window ending
    /// exactly on a rollover produces no trailing zero-width chunk.
    pub fn split_per(&self, unit: CalendarUnit) -> Vec<Self> {
        let mut chunks = Vec::new();
        let mut chunk_since = self.since;
        loop {
            match chunk_since.next_rollover(unit) {
                Some(boundary) if boundary < self.until => {
                    chunks.push(Self::new_unchecked(chunk_since, boundary));
                    chunk_since = boundary;
                }
                _ => {
                    chunks.push(Self::new_unchecked(chunk_since, self.until));
                    return chunks;
                }
            }
        }
    }
}

/// Orders two windows by `since`, breaking ties on `until`.
#[inline]
fn earliest_first<T: TimeInstant>(a: TimeWindow<T>, b: TimeWindow<T>) -> (TimeWindow<T>, TimeWindow<T>) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ── Operators ─────────────────────────────────────────────────────────────

impl<T: TimeInstant> BitOr for TimeWindow<T> {
    type Output = Pieces<T>;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(&rhs)
    }
}

impl<T: TimeInstant> BitAnd for TimeWindow<T> {
    type Output = Option<Self>;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(&rhs)
    }
}

impl<T: TimeInstant> Sub for TimeWindow<T> {
    type Output = Pieces<T>;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.complement(&rhs)
    }
}

// Display implementation
impl<T: TimeInstant> fmt::Display for TimeWindow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "period of {}, from {} to {}",
            format_duration(self.delta()),
            self.since,
            self.until
        )
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<T> Serialize for TimeWindow<T>
where
    T: TimeInstant + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("TimeWindow", 2)?;
        s.serialize_field("since", &self.since)?;
        s.serialize_field("until", &self.until)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T> Deserialize<'de> for TimeWindow<T>
where
    T: TimeInstant + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw<T> {
            since: T,
            until: T,
        }

        let raw = Raw::<T>::deserialize(deserializer)?;
        TimeWindow::new(raw.since, raw.until).map_err(serde::de::Error::custom)
    }
}
