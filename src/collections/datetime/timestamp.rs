use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::TemporalError;

/// A point in time stored as a signed 64-bit microsecond offset from the
/// Unix epoch.
///
/// `Timestamp` is the bound type plugged into [`crate::collections::base::Span`]
/// to build [`super::TsTzSpan`]. Keeping it as a plain `i64` rather than
/// `chrono::DateTime<Utc>` directly matches the textual wire format (a
/// 64-bit microsecond epoch) and makes every comparison in the hot paths
/// (`find_timestamp`, synchronisation) an integer comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    pub fn as_micros(self) -> i64 {
        self.0
    }

    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
        delta.num_microseconds().and_then(|us| self.0.checked_add(us)).map(Self)
    }

    pub fn checked_sub_delta(self, delta: TimeDelta) -> Option<Self> {
        delta.num_microseconds().and_then(|us| self.0.checked_sub(us)).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<TimeDelta> {
        self.0.checked_sub(other.0).map(TimeDelta::microseconds)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.timestamp_micros())
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        DateTime::from_timestamp_micros(ts.0).unwrap_or_else(|| {
            // Saturate rather than panic: a value outside chrono's
            // representable range still orders and subtracts correctly
            // as a raw microsecond count.
            if ts.0 < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            }
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dt: DateTime<Utc> = (*self).into();
        write!(f, "{}", dt.to_rfc3339())
    }
}

impl FromStr for Timestamp {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Timestamp::from(dt.with_timezone(&Utc)))
            .map_err(|e| TemporalError::ParseError {
                position: 0,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_chrono() {
        let dt = Utc::now();
        let ts = Timestamp::from(dt);
        let back: DateTime<Utc> = ts.into();
        assert_eq!(dt.timestamp_micros(), back.timestamp_micros());
    }

    #[test]
    fn orders_like_the_underlying_instant() {
        let a = Timestamp::from_micros(10);
        let b = Timestamp::from_micros(20);
        assert!(a < b);
    }
}
