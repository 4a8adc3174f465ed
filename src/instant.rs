// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Points in time usable as window boundaries.
//!
//! [`TimeInstant`] abstracts over the chrono timestamp types so that a
//! [`TimeWindow`](crate::TimeWindow) can be built from naive local times as
//! well as from offset-carrying `DateTime<Tz>` values. All durations are
//! `chrono::Duration`.
//!
//! Calendar rollover (the next local midnight, the next Monday, the first
//! day of the next month) is computed on the instant's *own* local calendar
//! fields. For `DateTime<Tz>` the offset of the instant is carried over to
//! the boundary unchanged: no timezone conversion ever happens here.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::fmt;
use std::hash::Hash;

// ═══════════════════════════════════════════════════════════════════════════
// CalendarUnit
// ═══════════════════════════════════════════════════════════════════════════

/// Gregorian calendar unit used for aligned splitting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CalendarUnit {
    /// Rolls over at local midnight.
    Day,
    /// Rolls over on Monday at 00:00.
    Week,
    /// Rolls over on the first day of the month at 00:00.
    Month,
}

impl CalendarUnit {
    /// First date strictly after `date` on which this unit rolls over.
    pub fn next_boundary(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            CalendarUnit::Day => date.succ_opt(),
            CalendarUnit::Week => {
                let days_until_monday = 7 - u64::from(date.weekday().num_days_from_monday());
                date.checked_add_days(chrono::Days::new(days_until_monday))
            }
            CalendarUnit::Month => {
                let (y, m) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                NaiveDate::from_ymd_opt(y, m, 1)
            }
        }
    }
}

impl fmt::Display for CalendarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CalendarUnit::Day => "day",
            CalendarUnit::Week => "week",
            CalendarUnit::Month => "month",
        };
        f.write_str(label)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeInstant trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for types that represent a point in time.
///
/// Types implementing this trait can be used as boundaries of a
/// [`TimeWindow`](crate::TimeWindow). They are totally ordered, hashable,
/// and support signed duration arithmetic plus access to their local
/// calendar representation.
pub trait TimeInstant: Copy + Ord + Hash + fmt::Debug + fmt::Display {
    /// Signed distance `self - other`.
    fn difference(&self, other: &Self) -> Duration;

    /// `self + duration`, or `None` when the result is not representable.
    fn checked_add_duration(&self, duration: Duration) -> Option<Self>;

    /// The wall-clock reading of this instant in its own time reference.
    fn local_datetime(&self) -> NaiveDateTime;

    /// Builds the instant whose wall-clock reading is `local`, keeping the
    /// time reference (offset) of `self`.
    fn with_local_datetime(&self, local: NaiveDateTime) -> Option<Self>;

    /// This instant expressed in UTC.
    ///
    /// Naive instants are interpreted as UTC wall-clock readings.
    fn to_utc(&self) -> DateTime<Utc>;

    /// The next calendar rollover strictly after this instant.
    ///
    /// Returns `None` when the boundary falls outside chrono's range.
    fn next_rollover(&self, unit: CalendarUnit) -> Option<Self> {
        let date = unit.next_boundary(self.local_datetime().date())?;
        self.with_local_datetime(date.and_time(NaiveTime::MIN))
    }
}

impl TimeInstant for NaiveDateTime {
    #[inline]
    fn difference(&self, other: &Self) -> Duration {
        self.signed_duration_since(*other)
    }

    #[inline]
    fn checked_add_duration(&self, duration: Duration) -> Option<Self> {
        self.checked_add_signed(duration)
    }

    #[inline]
    fn local_datetime(&self) -> NaiveDateTime {
        *self
    }

    #[inline]
    fn with_local_datetime(&self, local: NaiveDateTime) -> Option<Self> {
        Some(local)
    }

    #[inline]
    fn to_utc(&self) -> DateTime<Utc> {
        self.and_utc()
    }
}

impl<Tz> TimeInstant for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Copy + fmt::Display,
{
    #[inline]
    fn difference(&self, other: &Self) -> Duration {
        self.signed_duration_since(*other)
    }

    #[inline]
    fn checked_add_duration(&self, duration: Duration) -> Option<Self> {
        self.checked_add_signed(duration)
    }

    #[inline]
    fn local_datetime(&self) -> NaiveDateTime {
        DateTime::naive_local(self)
    }

    fn with_local_datetime(&self, local: NaiveDateTime) -> Option<Self> {
        use chrono::Offset;

        let offset = *self.offset();
        let utc = local.checked_sub_offset(offset.fix())?;
        Some(DateTime::from_naive_utc_and_offset(utc, offset))
    }

    #[inline]
    fn to_utc(&self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Weekday};

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_next_day_boundary() {
        let date = NaiveDate::from_ymd_opt(2015, 1, 31).unwrap();
        assert_eq!(
            CalendarUnit::Day.next_boundary(date),
            NaiveDate::from_ymd_opt(2015, 2, 1)
        );
    }

    #[test]
    fn test_next_week_boundary_is_always_a_later_monday() {
        // 2015-01-01 is a Thursday.
        let thursday = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let next = CalendarUnit::Week.next_boundary(thursday).unwrap();
        assert_eq!(next, NaiveDate::from_ymd_opt(2015, 1, 5).unwrap());
        assert_eq!(next.weekday(), Weekday::Mon);

        let monday = NaiveDate::from_ymd_opt(2015, 1, 5).unwrap();
        assert_eq!(
            CalendarUnit::Week.next_boundary(monday),
            NaiveDate::from_ymd_opt(2015, 1, 12)
        );

        let sunday = NaiveDate::from_ymd_opt(2015, 1, 11).unwrap();
        assert_eq!(
            CalendarUnit::Week.next_boundary(sunday),
            NaiveDate::from_ymd_opt(2015, 1, 12)
        );
    }

    #[test]
    fn test_next_month_boundary_wraps_year() {
        let december = NaiveDate::from_ymd_opt(2015, 12, 15).unwrap();
        assert_eq!(
            CalendarUnit::Month.next_boundary(december),
            NaiveDate::from_ymd_opt(2016, 1, 1)
        );
        let february = NaiveDate::from_ymd_opt(2016, 2, 29).unwrap();
        assert_eq!(
            CalendarUnit::Month.next_boundary(february),
            NaiveDate::from_ymd_opt(2016, 3, 1)
        );
    }

    #[test]
    fn test_naive_rollover() {
        let t = naive(2015, 1, 1, 23, 0);
        assert_eq!(
            t.next_rollover(CalendarUnit::Day),
            Some(naive(2015, 1, 2, 0, 0))
        );
        // Exactly at midnight the rollover is the following midnight.
        let midnight = naive(2015, 1, 2, 0, 0);
        assert_eq!(
            midnight.next_rollover(CalendarUnit::Day),
            Some(naive(2015, 1, 3, 0, 0))
        );
    }

    #[test]
    fn test_offset_rollover_keeps_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let t = plus_two.with_ymd_and_hms(2015, 1, 1, 23, 0, 0).unwrap();
        let next = t.next_rollover(CalendarUnit::Day).unwrap();

        assert_eq!(next.offset(), &plus_two);
        assert_eq!(next.local_datetime(), naive(2015, 1, 2, 0, 0));
        // Local midnight at +02:00 is 22:00 UTC the previous day.
        assert_eq!(
            next.to_utc(),
            Utc.with_ymd_and_hms(2015, 1, 1, 22, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_rollover_uses_local_calendar_not_utc() {
        // 23:30 UTC on the 31st is already February 1st at +02:00.
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let t = Utc
            .with_ymd_and_hms(2015, 1, 31, 23, 30, 0)
            .unwrap()
            .with_timezone(&plus_two);
        let next = t.next_rollover(CalendarUnit::Month).unwrap();
        assert_eq!(next.local_datetime(), naive(2015, 3, 1, 0, 0));
    }

    #[test]
    fn test_difference_and_addition() {
        let a = naive(2015, 1, 1, 10, 0);
        let b = naive(2015, 1, 1, 10, 30);
        assert_eq!(b.difference(&a), Duration::minutes(30));
        assert_eq!(a.difference(&b), Duration::minutes(-30));
        assert_eq!(a.checked_add_duration(Duration::minutes(30)), Some(b));
        assert_eq!(NaiveDateTime::MAX.checked_add_duration(Duration::days(1)), None);
    }

    #[test]
    fn test_to_utc() {
        let t = naive(2015, 1, 1, 10, 0);
        assert_eq!(t.to_utc(), Utc.with_ymd_and_hms(2015, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_calendar_unit_display() {
        assert_eq!(CalendarUnit::Day.to_string(), "day");
        assert_eq!(CalendarUnit::Week.to_string(), "week");
        assert_eq!(CalendarUnit::Month.to_string(), "month");
    }
}
