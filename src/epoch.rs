// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Conversions between windows, epoch seconds, and textual timestamps.
//!
//! Epoch conversions work at whole-second precision: converting a window to
//! a `(start, end)` pair of Unix seconds and back reproduces its boundaries
//! with any sub-second part dropped.

use crate::error::{Error, Result};
use crate::{TimeInstant, TimeWindow, UtcTimeWindow};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};

/// Naive layouts accepted by [`utc_date_parse`], tried in order.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Offset-carrying layout produced by most `str()`-style renderings,
/// e.g. `2015-06-10 10:00:00.123456+02:00`.
const OFFSET_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

/// The UTC instant `secs` seconds after the Unix epoch.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if chrono cannot represent the instant.
pub fn utc_from_timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| Error::OutOfRange(format!("epoch second {secs}")))
}

/// The UTC instant with the given calendar fields.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if the fields do not name a valid
/// date and time.
pub fn utc_datetime(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    micro: u32,
) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_micro_opt(hour, minute, second, micro))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            Error::InvalidTimestamp(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{micro:06}"
            ))
        })
}

/// Builds a UTC window from a `(start, end)` pair of Unix seconds.
///
/// # Errors
///
/// Fails if either timestamp is out of range or if `end < start`.
///
/// ```
/// use time_window::epoch::{window_from_timestamps, window_to_timestamps};
///
/// let window = window_from_timestamps((1_424_307_600, 1_424_311_200)).unwrap();
/// assert_eq!(window.delta().num_hours(), 1);
/// assert_eq!(window_to_timestamps(&window), (1_424_307_600, 1_424_311_200));
/// ```
pub fn window_from_timestamps((start, end): (i64, i64)) -> Result<UtcTimeWindow> {
    TimeWindow::new(utc_from_timestamp(start)?, utc_from_timestamp(end)?)
}

/// The `(since, until)` boundaries of `window` as whole Unix seconds.
///
/// Naive boundaries are read as UTC.
pub fn window_to_timestamps<T: TimeInstant>(window: &TimeWindow<T>) -> (i64, i64) {
    (
        window.since().to_utc().timestamp(),
        window.until().to_utc().timestamp(),
    )
}

/// Drops the sub-second part of `t`.
pub fn floor_seconds<T: SubsecRound>(t: T) -> T {
    t.trunc_subsecs(0)
}

/// Parses a timestamp without offset and labels it as UTC.
///
/// Accepts `YYYY-MM-DD HH:MM[:SS[.f]]`, the same with a `T` separator, and
/// bare `YYYY-MM-DD` dates (read as midnight).
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if no layout matches.
pub fn utc_date_parse(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::InvalidTimestamp(format!("'{text}'")))
}

/// Parses a timestamp carrying its own UTC offset and converts it to UTC.
///
/// Accepts RFC 3339 as well as the space-separated
/// `YYYY-MM-DD HH:MM:SS[.f]+HH:MM` layout.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if the text has no recognisable offset.
pub fn utc_from_local_date_parse(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, OFFSET_FORMAT))
        .map(|datetime| datetime.with_timezone(&Utc))
        .map_err(|e| Error::InvalidTimestamp(format!("'{text}': {e}")))
}
