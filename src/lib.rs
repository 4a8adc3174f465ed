// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time Window Module
//!
//! This crate models half-open time windows `[since, until)` and a small
//! algebra over them.
//!
//! # Core types
//!
//! - [`TimeWindow<T>`]: an immutable window over any [`TimeInstant`].
//! - [`TimeInstant`]: trait for points in time usable as window boundaries
//!   (implemented for `chrono::NaiveDateTime` and `chrono::DateTime<Tz>`).
//! - [`Pieces<T>`]: zero, one or two windows, returned by union and complement.
//! - [`Probe<T>`]: an instant or a window, the argument of [`TimeWindow::contains`].
//! - [`TimeWindowsCollection<T>`]: a batch of windows that can be compressed
//!   or complemented within a bounding window.
//!
//! # Operations
//!
//! | Operation | Result |
//! |-----------|--------|
//! | [`overlaps`](TimeWindow::overlaps) | `bool` |
//! | [`contiguous`](TimeWindow::contiguous) | `Option<(TimeWindow, TimeWindow)>` |
//! | [`contains`](TimeWindow::contains) | `bool` |
//! | [`union`](TimeWindow::union) (`a \| b`) | [`Pieces`] |
//! | [`intersection`](TimeWindow::intersection) (`a & b`) | `Option<TimeWindow>` |
//! | [`complement`](TimeWindow::complement) (`a - b`) | [`Pieces`] |
//! | [`split`](TimeWindow::split) | `Result<Vec<TimeWindow>>` |
//! | [`split_per_day`](TimeWindow::split_per_day) / week / month | `Vec<TimeWindow>` |
//!
//! # Helpers
//!
//! - [`epoch`]: epoch-second conversion and timestamp parsing.
//! - [`humanize`]: readable window widths, used by `Display`.
//! - [`ExpirableObject`]: time-to-live bookkeeping.

mod collection;
pub mod epoch;
mod error;
mod expirable;
pub mod humanize;
pub(crate) mod instant;
mod pieces;
mod window;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use collection::TimeWindowsCollection;
pub use error::{Error, Result};
pub use expirable::ExpirableObject;
pub use instant::{CalendarUnit, TimeInstant};
pub use pieces::{Pieces, Probe};
pub use window::{NaiveTimeWindow, TimeWindow, UtcTimeWindow};
