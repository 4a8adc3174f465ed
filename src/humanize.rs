// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Human-readable rendering of window widths.
//!
//! A duration is rendered in the largest unit whose magnitude reaches
//! [`THRESHOLD`] of one unit, rounded to an integer and pluralized:
//! `"10 minutes"`, `"1 hour"`, `"3 weeks"`. Sub-second precision is dropped.

use chrono::Duration;
use qtty::Seconds;

/// Fraction of a unit at which that unit is used (e.g. 51 s -> "1 minute").
pub const THRESHOLD: f64 = 0.85;

const UNITS: [(&str, f64); 7] = [
    ("year", 365.0 * 86_400.0),
    ("month", 30.0 * 86_400.0),
    ("week", 7.0 * 86_400.0),
    ("day", 86_400.0),
    ("hour", 3_600.0),
    ("minute", 60.0),
    ("second", 1.0),
];

/// Renders a duration, ignoring its sign.
pub fn format_duration(duration: Duration) -> String {
    format_seconds(Seconds::new(duration.num_seconds() as f64))
}

/// Renders a quantity of seconds, ignoring its sign and fractional part.
pub fn format_seconds(seconds: Seconds) -> String {
    let magnitude = seconds.value().abs().trunc();
    for (unit, per_unit) in UNITS {
        let value = magnitude / per_unit;
        if value >= THRESHOLD {
            return plural(value.round() as i64, unit);
        }
    }
    // Only zero falls through once the fraction is dropped.
    plural(magnitude as i64, "second")
}

fn plural(count: i64, unit: &str) -> String {
    format!("{count} {unit}{}", if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_common_durations() {
        assert_eq!(format_duration(Duration::minutes(10)), "10 minutes");
        assert_eq!(format_duration(Duration::hours(1)), "1 hour");
        assert_eq!(format_duration(Duration::seconds(1)), "1 second");
        assert_eq!(format_duration(Duration::days(2)), "2 days");
        assert_eq!(format_duration(Duration::days(21)), "3 weeks");
        assert_eq!(format_duration(Duration::days(365)), "1 year");
    }

    #[test]
    fn test_threshold_promotes_to_larger_unit() {
        // 51 s is 0.85 of a minute.
        assert_eq!(format_duration(Duration::seconds(51)), "1 minute");
        assert_eq!(format_duration(Duration::seconds(50)), "50 seconds");
    }

    #[test]
    fn test_zero_and_negative() {
        assert_eq!(format_duration(Duration::zero()), "0 seconds");
        assert_eq!(format_duration(Duration::minutes(-10)), "10 minutes");
        assert_eq!(format_duration(Duration::milliseconds(400)), "0 seconds");
    }

    #[test]
    fn test_format_seconds_quantity() {
        assert_eq!(format_seconds(Seconds::new(7_200.0)), "2 hours");
    }
}
