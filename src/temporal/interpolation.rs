use std::fmt;
use std::str::FromStr;

use crate::error::TemporalError;

/// How a temporal sequence's value behaves between recorded instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Value is defined only at the recorded instants; undefined
    /// in-between. Used by the discrete-sequence subtype.
    Discrete,
    /// Value is constant between samples, changing at the next instant.
    /// Valid for every base type.
    Stepwise,
    /// Value varies linearly between samples. Valid only for continuous
    /// base types (numbers, points) — see [`crate::registry::is_continuous`].
    Linear,
}

impl Interpolation {
    pub fn as_str(self) -> &'static str {
        match self {
            Interpolation::Discrete => "Discrete",
            Interpolation::Stepwise => "Stepwise",
            Interpolation::Linear => "Linear",
        }
    }

    pub fn is_continuous(self) -> bool {
        matches!(self, Interpolation::Linear)
    }
}

impl FromStr for Interpolation {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "discrete" => Ok(Interpolation::Discrete),
            "stepwise" | "step" => Ok(Interpolation::Stepwise),
            "linear" => Ok(Interpolation::Linear),
            other => Err(TemporalError::ParseError {
                position: 0,
                reason: format!("unknown interpolation '{other}'"),
            }),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
