use std::fmt;
use std::str::FromStr;

use crate::collections::base::{Collection, Span};
use crate::error::TemporalError;

/// A span of integers — the numeric half of a `TBox` for `tint` values.
pub type IntSpan = Span<i64>;

impl IntSpan {
    pub fn width(&self) -> i64 {
        self.upper() - self.lower()
    }

    pub fn shift(&self, delta: i64) -> Self {
        self.shift_scale(Some(delta), None)
    }

    pub fn scale(&self, width: i64) -> Self {
        self.shift_scale(None, Some(width))
    }

    pub fn shift_scale(&self, delta: Option<i64>, width: Option<i64>) -> Self {
        let lower = self.lower() + delta.unwrap_or(0);
        let upper = match width {
            Some(w) => lower + w,
            None => self.upper() + delta.unwrap_or(0),
        };
        Span::new(lower, upper, self.is_lower_inclusive(), self.is_upper_inclusive())
    }

    pub fn distance_to_value(&self, value: &i64) -> i64 {
        if self.contains_value(value) {
            0
        } else if *value < *self.lower() {
            self.lower() - value
        } else {
            value - self.upper()
        }
    }

    pub fn distance_to_span(&self, other: &Self) -> i64 {
        if self.overlaps(other) {
            0
        } else if self.is_left(other) {
            other.lower() - self.upper()
        } else {
            self.lower() - other.upper()
        }
    }
}

impl fmt::Display for IntSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lb = if self.is_lower_inclusive() { '[' } else { '(' };
        let ub = if self.is_upper_inclusive() { ']' } else { ')' };
        write!(f, "{lb}{}, {}{ub}", self.lower(), self.upper())
    }
}

impl FromStr for IntSpan {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let lower_inc = matches!(s.chars().next(), Some('['));
        let upper_inc = matches!(s.chars().last(), Some(']'));
        let inner = &s[1..s.len().saturating_sub(1)];
        let (lo, hi) = inner.split_once(',').ok_or_else(|| TemporalError::ParseError {
            position: 1,
            reason: "expected a comma between span bounds".into(),
        })?;
        let lower: i64 = lo.trim().parse().map_err(|_| TemporalError::ParseError {
            position: 1,
            reason: "invalid integer lower bound".into(),
        })?;
        let upper: i64 = hi.trim().parse().map_err(|_| TemporalError::ParseError {
            position: s.len(),
            reason: "invalid integer upper bound".into(),
        })?;
        Ok(Span::new(lower, upper, lower_inc, upper_inc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let s = IntSpan::new(1, 10, true, false);
        let parsed: IntSpan = s.to_string().parse().unwrap();
        assert_eq!(s, parsed);
    }
}
