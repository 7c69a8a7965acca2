//! Textual form: `{seq0, seq1, ...}` where each `seqᵢ` is
//! `[inst0, inst1, ...)` with bracket choice encoding inclusivity, an
//! optional leading `Interp=Stepwise;` for non-default interpolation on
//! continuous base types, and (added by the point wrapper modules, not
//! here) a leading `SRID=n;`.
//!
//! This is deliberately the minimal WKT-shaped form a round-trip
//! property needs, not the full MF-JSON/WKB a host-database interop
//! surface would expose — that stays a genuinely external, out-of-scope
//! collaborator.

use crate::error::{Result, TemporalError};
use crate::value::{BaseValueText, LinearInterpolable};

use super::dispatch::Temporal;
use super::instant::TInstant;
use super::interpolation::Interpolation;
use super::sequence::TSequence;
use super::sequence_set::TSequenceSet;

pub fn format_instant<V: BaseValueText>(inst: &TInstant<V>) -> String {
    format!("{}@{}", inst.value().to_text(), inst.timestamp())
}

pub fn format_sequence<V: BaseValueText + LinearInterpolable>(seq: &TSequence<V>) -> String {
    let body = seq.instants().iter().map(format_instant).collect::<Vec<_>>().join(", ");
    if seq.interpolation() == Interpolation::Discrete {
        format!("{{{body}}}")
    } else {
        let lb = if seq.is_lower_inclusive() { '[' } else { '(' };
        let ub = if seq.is_upper_inclusive() { ']' } else { ')' };
        format!("{lb}{body}{ub}")
    }
}

pub fn format_sequence_set<V: BaseValueText + LinearInterpolable>(ss: &TSequenceSet<V>) -> String {
    let prefix = interp_prefix(ss.interpolation());
    let body = ss.sequences().iter().map(format_sequence).collect::<Vec<_>>().join(", ");
    format!("{prefix}{{{body}}}")
}

pub fn format_temporal<V: BaseValueText + LinearInterpolable>(t: &Temporal<V>) -> String {
    match t {
        Temporal::Instant(i) => format_instant(i),
        Temporal::Sequence(s) => format!("{}{}", interp_prefix(s.interpolation()), format_sequence(s)),
        Temporal::SequenceSet(ss) => format_sequence_set(ss),
    }
}

impl<V: BaseValueText + LinearInterpolable + Clone> Temporal<V> {
    pub fn from_wkt(s: &str) -> Result<Self> {
        parse_temporal::<V>(s)
    }

    pub fn as_wkt(&self) -> String {
        format_temporal(self)
    }
}

fn interp_prefix(interp: Interpolation) -> &'static str {
    match interp {
        Interpolation::Stepwise => "Interp=Stepwise;",
        Interpolation::Discrete | Interpolation::Linear => "",
    }
}

pub fn parse_temporal<V: BaseValueText + LinearInterpolable>(input: &str) -> Result<Temporal<V>> {
    let mut s = input.trim();
    let mut forced_interp = None;
    if let Some(rest) = s.strip_prefix("Interp=") {
        let (name, rest2) = rest.split_once(';').ok_or_else(|| TemporalError::ParseError {
            position: 0,
            reason: "expected ';' after Interp=...".into(),
        })?;
        forced_interp = Some(name.parse::<Interpolation>()?);
        s = rest2.trim();
    }

    match s.chars().next() {
        Some('{') => {
            let inner = strip_wrap(s, '{', '}')?;
            let items = split_top_level(inner);
            if items.is_empty() {
                return Err(TemporalError::EmptyResult);
            }
            if items[0].trim_start().starts_with(['[', '(']) {
                let sequences = items
                    .iter()
                    .map(|it| parse_sequence::<V>(it.trim(), forced_interp))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Temporal::SequenceSet(TSequenceSet::new(sequences, true)?))
            } else {
                let instants = items
                    .iter()
                    .map(|it| parse_instant::<V>(it.trim()))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Temporal::Sequence(TSequence::new(instants, true, true, Interpolation::Discrete)?))
            }
        }
        Some('[') | Some('(') => Ok(Temporal::Sequence(parse_sequence::<V>(s, forced_interp)?)),
        Some(_) => Ok(Temporal::Instant(parse_instant::<V>(s)?)),
        None => Err(TemporalError::ParseError {
            position: 0,
            reason: "empty input".into(),
        }),
    }
}

fn parse_instant<V: BaseValueText>(s: &str) -> Result<TInstant<V>> {
    let (value_s, ts_s) = s.rsplit_once('@').ok_or_else(|| TemporalError::ParseError {
        position: 0,
        reason: format!("expected 'value@timestamp', found '{s}'"),
    })?;
    let value = V::from_text(value_s.trim())?;
    let ts = ts_s.trim().parse()?;
    Ok(TInstant::new(ts, value))
}

fn parse_sequence<V: BaseValueText + LinearInterpolable>(
    s: &str,
    forced_interp: Option<Interpolation>,
) -> Result<TSequence<V>> {
    let lower_inc = match s.chars().next() {
        Some('[') => true,
        Some('(') => false,
        _ => {
            return Err(TemporalError::ParseError {
                position: 0,
                reason: "sequence must start with '[' or '('".into(),
            })
        }
    };
    let upper_inc = match s.chars().last() {
        Some(']') => true,
        Some(')') => false,
        _ => {
            return Err(TemporalError::ParseError {
                position: s.len(),
                reason: "sequence must end with ']' or ')'".into(),
            })
        }
    };
    let inner = &s[1..s.len() - 1];
    let instants = split_top_level(inner)
        .iter()
        .map(|it| parse_instant::<V>(it.trim()))
        .collect::<Result<Vec<_>>>()?;
    let interpolation = forced_interp.unwrap_or(Interpolation::Linear);
    TSequence::new(instants, lower_inc, upper_inc, interpolation)
}

fn strip_wrap<'a>(s: &'a str, open: char, close: char) -> Result<&'a str> {
    let s = s.trim();
    if s.starts_with(open) && s.ends_with(close) {
        Ok(&s[1..s.len() - 1])
    } else {
        Err(TemporalError::ParseError {
            position: 0,
            reason: format!("expected input wrapped in '{open}' '{close}'"),
        })
    }
}

/// Splits `s` on commas at bracket depth 0, treating `"..."`-quoted text
/// (the [`crate::value::BaseValueText`] encoding for `String`) as opaque
/// so a comma inside a quoted `ttext` value doesn't get mistaken for a
/// top-level separator.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut in_quotes = false;
    let mut start = 0usize;
    let bytes = s.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] as char {
            '"' if !in_quotes => in_quotes = true,
            '"' if in_quotes => {
                // a doubled backslash before the quote keeps it escaped;
                // good enough for the simple escaping `to_text` applies.
                let mut backslashes = 0;
                let mut j = i;
                while j > start && bytes[j - 1] == b'\\' {
                    backslashes += 1;
                    j -= 1;
                }
                if backslashes % 2 == 0 {
                    in_quotes = false;
                }
            }
            '[' | '(' | '{' if !in_quotes => depth += 1,
            ']' | ')' | '}' if !in_quotes => depth -= 1,
            ',' if depth == 0 && !in_quotes => {
                out.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < s.len() {
        out.push(&s[start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_linear_sequence_set() {
        let text = "{[1@2000-01-01T00:00:00+00:00, 2@2000-01-02T00:00:00+00:00), [3@2000-01-03T00:00:00+00:00, 3@2000-01-04T00:00:00+00:00]}";
        let parsed = parse_temporal::<f64>(text).unwrap();
        let formatted = format_temporal(&parsed);
        let reparsed = parse_temporal::<f64>(&formatted).unwrap();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn round_trips_a_discrete_sequence() {
        let text = "{1@2000-01-01T00:00:00+00:00, 2@2000-01-02T00:00:00+00:00}";
        let parsed = parse_temporal::<i64>(text).unwrap();
        assert!(matches!(parsed, Temporal::Sequence(ref s) if s.interpolation() == Interpolation::Discrete));
        assert_eq!(format_temporal(&parsed), text);
    }

    #[test]
    fn round_trips_a_bare_instant() {
        let text = "true@2000-01-01T00:00:00+00:00";
        let parsed = parse_temporal::<bool>(text).unwrap();
        assert!(matches!(parsed, Temporal::Instant(_)));
        assert_eq!(format_temporal(&parsed), text);
    }

    #[test]
    fn stepwise_prefix_round_trips() {
        let text = "Interp=Stepwise;[1@2000-01-01T00:00:00+00:00, 2@2000-01-02T00:00:00+00:00)";
        let parsed = parse_temporal::<i64>(text).unwrap();
        assert_eq!(format_temporal(&parsed), text);
    }

    #[test]
    fn quoted_text_with_comma_survives_split() {
        let text = "[\"a, b\"@2000-01-01T00:00:00+00:00, \"c\"@2000-01-02T00:00:00+00:00)";
        let parsed = parse_sequence::<String>(text, Some(Interpolation::Stepwise)).unwrap();
        assert_eq!(parsed.start_value(), "a, b");
    }
}
