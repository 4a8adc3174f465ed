// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-to-live bookkeeping.

use chrono::{DateTime, Duration, Utc};
use qtty::Seconds;

/// An object that expires a given number of seconds after its TTL was set.
///
/// Until a TTL is set the object has no expiry, reports a `NaN` TTL, and
/// counts as expired. The `*_at` variants take the current time explicitly;
/// the others read the system clock.
///
/// ```
/// use qtty::Seconds;
/// use time_window::ExpirableObject;
///
/// let mut session = ExpirableObject::new();
/// assert!(session.ttl().value().is_nan());
/// assert!(session.is_expired());
///
/// session.set_ttl(Seconds::new(35.0));
/// assert!(!session.is_expired());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpirableObject {
    expires_at: Option<DateTime<Utc>>,
    last_updated_at: Option<DateTime<Utc>>,
}

impl ExpirableObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instant at which the object expires, if a TTL was set.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Instant at which the TTL was last set.
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated_at
    }

    /// Sets the TTL relative to now.
    pub fn set_ttl(&mut self, ttl: Seconds) {
        self.set_ttl_at(Utc::now(), ttl);
    }

    /// Sets the TTL relative to `now`, at millisecond precision.
    ///
    /// A non-finite or unrepresentable TTL clears the expiry.
    pub fn set_ttl_at(&mut self, now: DateTime<Utc>, ttl: Seconds) {
        let expires_at = Some(ttl.value())
            .filter(|secs| secs.is_finite())
            .and_then(|secs| Duration::try_milliseconds((secs * 1_000.0).round() as i64))
            .and_then(|delta| now.checked_add_signed(delta));
        match expires_at {
            Some(at) => {
                self.expires_at = Some(at);
                self.last_updated_at = Some(now);
            }
            None => *self = Self::default(),
        }
    }

    /// Seconds left before expiry; negative once expired, `NaN` if unset.
    pub fn ttl(&self) -> Seconds {
        self.ttl_at(Utc::now())
    }

    pub fn ttl_at(&self, now: DateTime<Utc>) -> Seconds {
        match self.expires_at {
            Some(at) => {
                let left = at.signed_duration_since(now);
                Seconds::new(left.num_milliseconds() as f64 / 1_000.0)
            }
            None => Seconds::new(f64::NAN),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// `true` when no TTL is set or `now` has reached the expiry.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |at| now >= at)
    }
}
