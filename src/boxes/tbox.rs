use chrono::TimeDelta;

use crate::collections::base::{Collection, Span};
use crate::collections::datetime::TsTzSpan;
use crate::collections::number::FloatSpan;

use super::bbox::BoundingBox;

/// Bounding box for numeric temporal values (`tint`, `tfloat`): a period
/// plus a numeric span. Either half may be absent — a `TBox` built from a
/// bare timestamp has no numeric span, one built from a bare number has
/// no period.
#[derive(Clone, Debug, PartialEq)]
pub struct TBox {
    period: Option<TsTzSpan>,
    span: Option<FloatSpan>,
}

impl TBox {
    pub fn new(period: Option<TsTzSpan>, span: Option<FloatSpan>) -> Self {
        Self { period, span }
    }

    pub fn from_period(period: TsTzSpan) -> Self {
        Self::new(Some(period), None)
    }

    pub fn from_span(span: FloatSpan) -> Self {
        Self::new(None, Some(span))
    }

    pub fn tstzspan(&self) -> Option<&TsTzSpan> {
        self.period.as_ref()
    }

    pub fn to_floatspan(&self) -> Option<&FloatSpan> {
        self.span.as_ref()
    }

    pub fn has_t(&self) -> bool {
        self.period.is_some()
    }

    pub fn has_x(&self) -> bool {
        self.span.is_some()
    }

    pub fn xmin(&self) -> Option<f64> {
        self.span.as_ref().map(|s| *s.lower())
    }

    pub fn xmax(&self) -> Option<f64> {
        self.span.as_ref().map(|s| *s.upper())
    }

    pub fn tmin(&self) -> Option<crate::collections::datetime::Timestamp> {
        self.period.as_ref().map(|p| *p.lower())
    }

    pub fn tmax(&self) -> Option<crate::collections::datetime::Timestamp> {
        self.period.as_ref().map(|p| *p.upper())
    }

    pub fn is_tmin_inclusive(&self) -> Option<bool> {
        self.period.as_ref().map(Span::is_lower_inclusive)
    }

    pub fn is_tmax_inclusive(&self) -> Option<bool> {
        self.period.as_ref().map(Span::is_upper_inclusive)
    }

    pub fn expand_time(&self, delta: TimeDelta) -> Self {
        Self {
            period: self
                .period
                .as_ref()
                .map(|p| p.shift_scale(None, Some(p.duration() + delta + delta))),
            span: self.span.clone(),
        }
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let period = match (&self.period, &other.period) {
            (Some(a), Some(b)) => Some(a.intersection(b)?),
            (None, None) => None,
            _ => return None,
        };
        let span = match (&self.span, &other.span) {
            (Some(a), Some(b)) => Some(a.intersection(b)?),
            (None, None) => None,
            _ => return None,
        };
        Some(Self { period, span })
    }
}

impl BoundingBox for TBox {
    fn union(&self, other: &Self) -> Self {
        let period = union_opt_span(&self.period, &other.period);
        let span = union_opt_span(&self.span, &other.span);
        Self { period, span }
    }
}

fn union_opt_span<T: PartialOrd + Clone + std::fmt::Debug>(
    a: &Option<Span<T>>,
    b: &Option<Span<T>>,
) -> Option<Span<T>> {
    match (a, b) {
        (Some(a), Some(b)) => {
            let lower_is_a = *a.lower() <= *b.lower();
            let (lower, lower_inc) = if lower_is_a {
                (a.lower().clone(), a.is_lower_inclusive())
            } else {
                (b.lower().clone(), b.is_lower_inclusive())
            };
            let upper_is_a = *a.upper() >= *b.upper();
            let (upper, upper_inc) = if upper_is_a {
                (a.upper().clone(), a.is_upper_inclusive())
            } else {
                (b.upper().clone(), b.is_upper_inclusive())
            };
            Some(Span::new(lower, upper, lower_inc, upper_inc))
        }
        (Some(a), None) => Some(a.clone()),
        (None, Some(b)) => Some(b.clone()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::datetime::Timestamp;

    #[test]
    fn union_widens_both_halves() {
        let a = TBox::new(
            Some(TsTzSpan::new(Timestamp::from_micros(0), Timestamp::from_micros(10), true, false)),
            Some(FloatSpan::new(0.0, 5.0, true, false)),
        );
        let b = TBox::new(
            Some(TsTzSpan::new(Timestamp::from_micros(5), Timestamp::from_micros(20), true, true)),
            Some(FloatSpan::new(-2.0, 3.0, true, true)),
        );
        let u = a.union(&b);
        assert_eq!(u.tmin(), Some(Timestamp::from_micros(0)));
        assert_eq!(u.tmax(), Some(Timestamp::from_micros(20)));
        assert_eq!(u.xmin(), Some(-2.0));
        assert_eq!(u.xmax(), Some(5.0));
    }
}
