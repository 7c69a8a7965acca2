use std::fmt;
use std::str::FromStr;

use crate::collections::base::SpanSet;
use crate::error::TemporalError;

use super::FloatSpan;

/// A numeric span set for `tfloat` selectors.
pub type FloatSpanSet = SpanSet<f64>;

impl FloatSpanSet {
    pub fn width(&self, ignore_gaps: bool) -> f64 {
        if ignore_gaps {
            self.spans().iter().map(FloatSpan::width).sum()
        } else {
            match (self.lower(), self.upper()) {
                (Some(&lo), Some(&hi)) => hi - lo,
                _ => 0.0,
            }
        }
    }

    pub fn shift(&self, delta: f64) -> Self {
        SpanSet::new(self.spans().iter().map(|s| s.shift(delta)).collect())
    }
}

impl fmt::Display for FloatSpanSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, span) in self.spans().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{span}")?;
        }
        write!(f, "}}")
    }
}

impl FromStr for FloatSpanSet {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| TemporalError::ParseError {
                position: 0,
                reason: "float span set must be wrapped in '{' '}'".into(),
            })?;
        let mut spans = Vec::new();
        let mut depth = 0usize;
        let mut start = 0usize;
        for (i, c) in inner.char_indices() {
            match c {
                '[' | '(' => depth += 1,
                ']' | ')' => {
                    depth -= 1;
                    if depth == 0 {
                        spans.push(inner[start..=i].parse::<FloatSpan>()?);
                        start = i + 1;
                    }
                }
                ',' if depth == 0 => start = i + 1,
                _ => {}
            }
        }
        Ok(SpanSet::new(spans))
    }
}
