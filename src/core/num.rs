use serde::{Deserialize, Serialize};

/// A resolved numeric value aligned to a point index: either a finite
/// number or explicitly missing.
///
/// Missing values are excluded from every reduction and propagate through
/// derived-field arithmetic instead of contaminating it with a finite
/// stand-in. Non-finite inputs are demoted to [`CalcNum::Missing`] at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalcNum {
    Valid(f64),
    #[default]
    Missing,
}

impl CalcNum {
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self::Valid(value)
        } else {
            Self::Missing
        }
    }

    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Valid(v) => Some(v),
            Self::Missing => None,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid(_))
    }

    #[must_use]
    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Applies `f` to a valid value; missing stays missing.
    #[must_use]
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Valid(v) => Self::new(f(v)),
            Self::Missing => Self::Missing,
        }
    }
}

impl From<f64> for CalcNum {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for CalcNum {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::new)
    }
}
