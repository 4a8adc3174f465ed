// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Closed argument and result shapes for the window algebra.
//!
//! - [`Pieces<T>`]: the outcome of operations that may yield nothing, one
//!   window, or two disjoint windows (union, complement).
//! - [`Probe<T>`]: the argument of [`TimeWindow::contains`], either a single
//!   instant or a whole window.

use crate::{TimeInstant, TimeWindow};
use chrono::{DateTime, NaiveDateTime, TimeZone};

/// Zero, one or two windows, earliest first.
///
/// A `Pair` always holds two windows that share no instant, neither
/// touching nor nested, with the earlier one first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pieces<T: TimeInstant> {
    /// No window at all.
    Empty,
    /// One window.
    Single(TimeWindow<T>),
    /// Two windows, the earlier one first.
    Pair(TimeWindow<T>, TimeWindow<T>),
}

impl<T: TimeInstant> Pieces<T> {
    /// Number of windows held.
    pub fn len(&self) -> usize {
        match self {
            Pieces::Empty => 0,
            Pieces::Single(_) => 1,
            Pieces::Pair(..) => 2,
        }
    }

    /// `true` for [`Pieces::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Pieces::Empty)
    }

    /// Both slots, filled earliest first.
    fn slots(&self) -> [Option<&TimeWindow<T>>; 2] {
        match self {
            Pieces::Empty => [None, None],
            Pieces::Single(a) => [Some(a), None],
            Pieces::Pair(a, b) => [Some(a), Some(b)],
        }
    }

    /// The window, if exactly one is held.
    pub fn single(&self) -> Option<TimeWindow<T>> {
        match self {
            Pieces::Single(window) => Some(*window),
            _ => None,
        }
    }

    /// Iterates the held windows, earliest first.
    pub fn iter(&self) -> impl Iterator<Item = &TimeWindow<T>> + '_ {
        self.slots().into_iter().flatten()
    }

    /// The held windows collected into a vector, earliest first.
    pub fn to_vec(&self) -> Vec<TimeWindow<T>> {
        self.iter().copied().collect()
    }
}

impl<T: TimeInstant> IntoIterator for Pieces<T> {
    type Item = TimeWindow<T>;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<TimeWindow<T>>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots().map(|slot| slot.copied()).into_iter().flatten()
    }
}

impl<T: TimeInstant> From<Option<TimeWindow<T>>> for Pieces<T> {
    fn from(window: Option<TimeWindow<T>>) -> Self {
        window.map_or(Pieces::Empty, Pieces::Single)
    }
}

/// What [`TimeWindow::contains`] is asked about.
///
/// Instants and windows convert into a `Probe` implicitly, so callers
/// normally pass them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe<T: TimeInstant> {
    /// Half-open membership: `since <= t < until`.
    Instant(T),
    /// Full enclosure with inclusive boundaries.
    Window(TimeWindow<T>),
}

impl<T: TimeInstant> From<TimeWindow<T>> for Probe<T> {
    #[inline]
    fn from(window: TimeWindow<T>) -> Self {
        Probe::Window(window)
    }
}

impl<T: TimeInstant> From<&TimeWindow<T>> for Probe<T> {
    #[inline]
    fn from(window: &TimeWindow<T>) -> Self {
        Probe::Window(*window)
    }
}

impl From<NaiveDateTime> for Probe<NaiveDateTime> {
    #[inline]
    fn from(instant: NaiveDateTime) -> Self {
        Probe::Instant(instant)
    }
}

impl<Tz> From<DateTime<Tz>> for Probe<DateTime<Tz>>
where
    Tz: TimeZone,
    DateTime<Tz>: TimeInstant,
{
    #[inline]
    fn from(instant: DateTime<Tz>) -> Self {
        Probe::Instant(instant)
    }
}
