//! Color scales and the layout-level default palette table.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// One stop of a color scale: normalized offset plus CSS color string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub t: f64,
    pub color: String,
}

/// An ordered color-stop ramp over the normalized `[0, 1]` domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    stops: Vec<ColorStop>,
}

// Default ramps for the three automatic scale families.
const DIVERGING: &[(f64, &str)] = &[
    (0.0, "rgb(5,10,172)"),
    (0.35, "rgb(106,137,247)"),
    (0.5, "rgb(190,190,190)"),
    (0.6, "rgb(220,170,132)"),
    (0.7, "rgb(230,145,90)"),
    (1.0, "rgb(178,10,28)"),
];

const SEQUENTIAL: &[(f64, &str)] = &[
    (0.0, "rgb(220,220,220)"),
    (0.2, "rgb(245,195,157)"),
    (0.4, "rgb(245,160,105)"),
    (1.0, "rgb(178,10,28)"),
];

const SEQUENTIAL_MINUS: &[(f64, &str)] = &[
    (0.0, "rgb(5,10,172)"),
    (0.35, "rgb(40,60,190)"),
    (0.5, "rgb(70,100,245)"),
    (0.6, "rgb(90,120,245)"),
    (0.7, "rgb(106,137,247)"),
    (1.0, "rgb(220,220,220)"),
];

impl ColorScale {
    /// Builds a scale from explicit stops.
    ///
    /// Stops must be ascending, span exactly 0 to 1, and number at least two.
    pub fn new(stops: Vec<ColorStop>) -> CalcResult<Self> {
        if stops.len() < 2 {
            return Err(CalcError::InvalidConfig(
                "color scale needs at least two stops".to_owned(),
            ));
        }
        if stops[0].t != 0.0 || stops[stops.len() - 1].t != 1.0 {
            return Err(CalcError::InvalidConfig(
                "color scale stops must span 0 to 1".to_owned(),
            ));
        }
        for pair in stops.windows(2) {
            if !pair[0].t.is_finite() || pair[1].t < pair[0].t {
                return Err(CalcError::InvalidConfig(
                    "color scale stops must be finite and ascending".to_owned(),
                ));
            }
        }
        Ok(Self { stops })
    }

    /// Default scale for domains straddling zero.
    #[must_use]
    pub fn diverging() -> Self {
        Self::from_table(DIVERGING)
    }

    /// Default scale for non-negative domains.
    #[must_use]
    pub fn sequential() -> Self {
        Self::from_table(SEQUENTIAL)
    }

    /// Default scale for non-positive domains.
    #[must_use]
    pub fn sequential_minus() -> Self {
        Self::from_table(SEQUENTIAL_MINUS)
    }

    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    fn from_table(table: &[(f64, &str)]) -> Self {
        Self {
            stops: table
                .iter()
                .map(|(t, color)| ColorStop {
                    t: *t,
                    color: (*color).to_owned(),
                })
                .collect(),
        }
    }
}

/// Layout-level defaults consulted by automatic scale selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScaleDefaults {
    pub diverging: ColorScale,
    pub sequential: ColorScale,
    pub sequential_minus: ColorScale,
}

impl Default for ColorScaleDefaults {
    fn default() -> Self {
        Self {
            diverging: ColorScale::diverging(),
            sequential: ColorScale::sequential(),
            sequential_minus: ColorScale::sequential_minus(),
        }
    }
}
