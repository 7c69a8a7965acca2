use std::fmt;
use std::str::FromStr;

use crate::collections::base::SpanSet;
use crate::error::TemporalError;

use super::IntSpan;

/// A numeric span set, e.g. the restriction selector `value IN (span-set)`
/// for a `tint`.
pub type IntSpanSet = SpanSet<i64>;

impl IntSpanSet {
    pub fn width(&self, ignore_gaps: bool) -> i64 {
        if ignore_gaps {
            self.spans().iter().map(IntSpan::width).sum()
        } else {
            match (self.lower(), self.upper()) {
                (Some(&lo), Some(&hi)) => hi - lo,
                _ => 0,
            }
        }
    }

    pub fn shift(&self, delta: i64) -> Self {
        SpanSet::new(self.spans().iter().map(|s| s.shift(delta)).collect())
    }
}

impl fmt::Display for IntSpanSet {
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

impl FromStr for IntSpanSet {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| TemporalError::ParseError {
                position: 0,
                reason: "int span set must be wrapped in '{' '}'".into(),
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
                        spans.push(inner[start..=i].parse::<IntSpan>()?);
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
