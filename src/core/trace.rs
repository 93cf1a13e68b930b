use serde::{Deserialize, Serialize};

use crate::color::domain::ColorDomainSettings;
use crate::core::axis::RawValue;
use crate::error::{CalcError, CalcResult};

/// Which screen direction the trace's value dimension runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "v")]
    Vertical,
    #[serde(rename = "h")]
    Horizontal,
}

/// Marker styling relevant to calc: per-point color values and the
/// color-domain container they feed.
///
/// When `color_axis` names a shared axis, domain bounds live on that axis
/// instead of the local `color_domain` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Marker {
    pub colors: Option<Vec<RawValue>>,
    pub color_domain: ColorDomainSettings,
    pub color_axis: Option<String>,
}

/// A merged funnel trace specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelTrace {
    pub x: Vec<RawValue>,
    pub y: Vec<RawValue>,
    pub orientation: Orientation,
    pub ids: Option<Vec<String>>,
    pub text: Option<Vec<String>>,
    pub selected_points: Option<Vec<usize>>,
    pub marker: Marker,
}

impl Default for FunnelTrace {
    fn default() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            orientation: Orientation::Horizontal,
            ids: None,
            text: None,
            selected_points: None,
            marker: Marker::default(),
        }
    }
}

/// Which sample points to keep alongside each box summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxPoints {
    All,
    #[default]
    Outliers,
    SuspectedOutliers,
    None,
}

/// Whether to derive mean (and deviation) markers for each box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxMean {
    #[default]
    None,
    Mean,
    #[serde(rename = "sd")]
    MeanAndSd,
}

/// A merged box trace specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxTrace {
    pub x: Vec<RawValue>,
    pub y: Vec<RawValue>,
    pub orientation: Orientation,
    /// Position of a single box when no position array is supplied.
    pub pos0: f64,
    /// Used as the categorical position when the position axis is a
    /// category axis and no position array is supplied.
    pub name: Option<String>,
    /// Whisker width as a fraction of box width.
    pub whisker_width: f64,
    pub box_points: BoxPoints,
    pub box_mean: BoxMean,
    /// Jitter amount for overlaid raw points, echoed for the renderer.
    pub jitter: f64,
    /// Point position relative to the box, echoed for the renderer.
    pub point_pos: f64,
}

impl Default for BoxTrace {
    fn default() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            orientation: Orientation::Vertical,
            pos0: 0.0,
            name: None,
            whisker_width: 0.5,
            box_points: BoxPoints::default(),
            box_mean: BoxMean::default(),
            jitter: 0.0,
            point_pos: 0.0,
        }
    }
}

impl BoxTrace {
    pub fn validate(&self) -> CalcResult<()> {
        if !self.whisker_width.is_finite() || !(0.0..=1.0).contains(&self.whisker_width) {
            return Err(CalcError::InvalidConfig(
                "whisker width must be within 0..=1".to_owned(),
            ));
        }
        if !self.jitter.is_finite() || !(0.0..=1.0).contains(&self.jitter) {
            return Err(CalcError::InvalidConfig(
                "jitter must be within 0..=1".to_owned(),
            ));
        }
        if !self.point_pos.is_finite() || !(-2.0..=2.0).contains(&self.point_pos) {
            return Err(CalcError::InvalidConfig(
                "point position must be within -2..=2".to_owned(),
            ));
        }
        if !self.pos0.is_finite() {
            return Err(CalcError::InvalidConfig(
                "box position must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
