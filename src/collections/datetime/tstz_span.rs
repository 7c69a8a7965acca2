use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

use crate::collections::base::{Collection, Span};
use crate::error::TemporalError;

use super::Timestamp;

/// A contiguous span of time with independently inclusive/exclusive
/// bounds. Every [`crate::temporal::sequence::TSequence`] owns exactly
/// one of these.
pub type TsTzSpan = Span<Timestamp>;

impl TsTzSpan {
    pub fn at(instant: Timestamp) -> Self {
        Span::new(instant, instant, true, true)
    }

    /// Wall-clock width of the period.
    pub fn duration(&self) -> TimeDelta {
        self.upper()
            .checked_sub(*self.lower())
            .expect("span bounds are always ordered and in range")
    }

    pub fn shift(&self, delta: TimeDelta) -> Self {
        self.shift_scale(Some(delta), None)
    }

    pub fn scale(&self, width: TimeDelta) -> Self {
        self.shift_scale(None, Some(width))
    }

    pub fn shift_scale(&self, delta: Option<TimeDelta>, width: Option<TimeDelta>) -> Self {
        let lower = *self.lower();
        let new_lower = match delta {
            Some(d) => lower.checked_add(d).expect("timestamp shift overflow"),
            None => lower,
        };
        let new_upper = match width {
            Some(w) => new_lower.checked_add(w).expect("timestamp scale overflow"),
            None => {
                let d = delta.unwrap_or_else(TimeDelta::zero);
                self.upper().checked_add(d).expect("timestamp shift overflow")
            }
        };
        Span::new(new_lower, new_upper, self.is_lower_inclusive(), self.is_upper_inclusive())
    }

    pub fn distance_to_value(&self, value: &Timestamp) -> TimeDelta {
        if self.contains_value(value) {
            TimeDelta::zero()
        } else if *value < *self.lower() {
            self.lower().checked_sub(*value).unwrap()
        } else {
            value.checked_sub(*self.upper()).unwrap()
        }
    }

    pub fn distance_to_span(&self, other: &Self) -> TimeDelta {
        if self.overlaps(other) {
            TimeDelta::zero()
        } else if self.is_left(other) {
            other.lower().checked_sub(*self.upper()).unwrap()
        } else {
            self.lower().checked_sub(*other.upper()).unwrap()
        }
    }
}

impl fmt::Display for TsTzSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lb = if self.is_lower_inclusive() { '[' } else { '(' };
        let ub = if self.is_upper_inclusive() { ']' } else { ')' };
        write!(f, "{lb}{}, {}{ub}", self.lower(), self.upper())
    }
}

impl FromStr for TsTzSpan {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let lower_inc = match s.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => {
                return Err(TemporalError::ParseError {
                    position: 0,
                    reason: "period must start with '[' or '('".into(),
                })
            }
        };
        let upper_inc = match s.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => {
                return Err(TemporalError::ParseError {
                    position: s.len(),
                    reason: "period must end with ']' or ')'".into(),
                })
            }
        };
        let inner = &s[1..s.len() - 1];
        let (lower_s, upper_s) = inner.split_once(',').ok_or_else(|| TemporalError::ParseError {
            position: 1,
            reason: "expected a comma between period bounds".into(),
        })?;
        let lower = lower_s.trim().parse::<Timestamp>()?;
        let upper = upper_s.trim().parse::<Timestamp>()?;
        if lower > upper {
            return Err(TemporalError::InvalidOrder(
                "period lower bound after upper bound".into(),
            ));
        }
        Ok(Span::new(lower, upper, lower_inc, upper_inc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_parse() {
        let p = TsTzSpan::new(
            Timestamp::from_micros(0),
            Timestamp::from_micros(1_000_000),
            true,
            false,
        );
        let text = p.to_string();
        let parsed: TsTzSpan = text.parse().unwrap();
        assert_eq!(p, parsed);
    }

    #[test]
    fn adjacent_periods_touch_when_one_side_excludes() {
        let a = TsTzSpan::new(Timestamp::from_micros(0), Timestamp::from_micros(10), true, false);
        let b = TsTzSpan::new(Timestamp::from_micros(10), Timestamp::from_micros(20), true, true);
        assert!(a.touches(&b));
        assert!(!a.overlaps(&b));
    }
}
