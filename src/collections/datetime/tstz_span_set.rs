use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

use crate::collections::base::SpanSet;
use crate::error::TemporalError;

use super::{Timestamp, TsTzSpan};

/// An ordered set of disjoint periods. This is the shape `time(ss)`
/// returns and the selector type accepted by `at`/`minus` over a period
/// set.
pub type TsTzSpanSet = SpanSet<Timestamp>;

impl TsTzSpanSet {
    pub fn duration(&self, ignore_gaps: bool) -> TimeDelta {
        if ignore_gaps {
            self.spans().iter().map(TsTzSpan::duration).fold(TimeDelta::zero(), |a, b| a + b)
        } else {
            match (self.lower(), self.upper()) {
                (Some(&lo), Some(&hi)) => hi.checked_sub(lo).unwrap_or_else(TimeDelta::zero),
                _ => TimeDelta::zero(),
            }
        }
    }

    pub fn shift(&self, delta: TimeDelta) -> Self {
        SpanSet::new(self.spans().iter().map(|s| s.shift(delta)).collect())
    }

    pub fn to_period(&self) -> Option<TsTzSpan> {
        match (self.start_span(), self.end_span()) {
            (Some(first), Some(last)) => Some(TsTzSpan::new(
                *first.lower(),
                *last.upper(),
                first.is_lower_inclusive(),
                last.is_upper_inclusive(),
            )),
            _ => None,
        }
    }
}

impl fmt::Display for TsTzSpanSet {
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

impl FromStr for TsTzSpanSet {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let inner = s
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| TemporalError::ParseError {
                position: 0,
                reason: "period set must be wrapped in '{' '}'".into(),
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
                        spans.push(inner[start..=i].parse::<TsTzSpan>()?);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_several_disjoint_periods() {
        let a = TsTzSpan::new(Timestamp::from_micros(0), Timestamp::from_micros(10), true, false);
        let b = TsTzSpan::new(Timestamp::from_micros(20), Timestamp::from_micros(30), true, true);
        let set = TsTzSpanSet::new(vec![a, b]);
        let text = set.to_string();
        let parsed: TsTzSpanSet = text.parse().unwrap();
        assert_eq!(set, parsed);
    }

    #[test]
    fn merges_touching_periods_on_construction() {
        let a = TsTzSpan::new(Timestamp::from_micros(0), Timestamp::from_micros(10), true, false);
        let b = TsTzSpan::new(Timestamp::from_micros(10), Timestamp::from_micros(20), true, true);
        let set = TsTzSpanSet::new(vec![a, b]);
        assert_eq!(set.num_spans(), 1);
    }
}
