use std::fmt;
use std::str::FromStr;

use crate::collections::base::{Collection, Span};
use crate::error::TemporalError;

/// A span of floats — the numeric half of a `TBox` for `tfloat` values.
pub type FloatSpan = Span<f64>;

impl FloatSpan {
    pub fn width(&self) -> f64 {
        self.upper() - self.lower()
    }

    pub fn shift(&self, delta: f64) -> Self {
        self.shift_scale(Some(delta), None)
    }

    pub fn scale(&self, width: f64) -> Self {
        self.shift_scale(None, Some(width))
    }

    pub fn shift_scale(&self, delta: Option<f64>, width: Option<f64>) -> Self {
        let lower = self.lower() + delta.unwrap_or(0.0);
        let upper = match width {
            Some(w) => lower + w,
            None => self.upper() + delta.unwrap_or(0.0),
        };
        Span::new(lower, upper, self.is_lower_inclusive(), self.is_upper_inclusive())
    }

    pub fn distance_to_value(&self, value: &f64) -> f64 {
        if self.contains_value(value) {
            0.0
        } else if *value < *self.lower() {
            self.lower() - value
        } else {
            value - self.upper()
        }
    }

    pub fn distance_to_span(&self, other: &Self) -> f64 {
        if self.overlaps(other) {
            0.0
        } else if self.is_left(other) {
            other.lower() - self.upper()
        } else {
            self.lower() - other.upper()
        }
    }
}

impl fmt::Display for FloatSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lb = if self.is_lower_inclusive() { '[' } else { '(' };
        let ub = if self.is_upper_inclusive() { ']' } else { ')' };
        write!(f, "{lb}{}, {}{ub}", self.lower(), self.upper())
    }
}

impl FromStr for FloatSpan {
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
        let lower: f64 = lo.trim().parse().map_err(|_| TemporalError::ParseError {
            position: 1,
            reason: "invalid float lower bound".into(),
        })?;
        let upper: f64 = hi.trim().parse().map_err(|_| TemporalError::ParseError {
            position: s.len(),
            reason: "invalid float upper bound".into(),
        })?;
        Ok(Span::new(lower, upper, lower_inc, upper_inc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let s = FloatSpan::new(1.5, 10.25, true, false);
        let parsed: FloatSpan = s.to_string().parse().unwrap();
        assert_eq!(s, parsed);
    }
}
