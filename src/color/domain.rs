//! Color-domain resolution: effective min/mid/max bounds and automatic
//! scale selection for one color-bearing container.

use serde::{Deserialize, Serialize};

use crate::color::scale::{ColorScale, ColorScaleDefaults};
use crate::core::aggregate::{agg_max, agg_min};
use crate::core::num::CalcNum;

/// User-editable color-domain settings.
///
/// `auto` is tri-state: only an explicit `Some(false)` disables
/// auto-ranging; unset behaves as enabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorDomainSettings {
    pub auto: Option<bool>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mid: Option<f64>,
    pub colorscale: Option<ColorScale>,
    pub autocolorscale: bool,
}

impl ColorDomainSettings {
    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.auto != Some(false)
    }
}

/// Effective, render-facing color domain produced by resolution.
///
/// Bounds are missing only when the input had no valid values; otherwise
/// `min < max` holds strictly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedColorDomain {
    pub min: CalcNum,
    pub max: CalcNum,
    pub scale: ColorScale,
}

impl ResolvedColorDomain {
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.min.is_valid() && self.max.is_valid()
    }

    /// Writes the public, re-editable copy of the resolved state back onto
    /// `settings`.
    ///
    /// Bounds are written only when resolution produced data; the scale is
    /// written only when the container asked for automatic selection.
    pub fn apply_to(&self, settings: &mut ColorDomainSettings) {
        if let (Some(min), Some(max)) = (self.min.value(), self.max.value()) {
            settings.min = Some(min);
            settings.max = Some(max);
        }
        if settings.autocolorscale {
            settings.colorscale = Some(self.scale.clone());
        }
    }
}

/// Resolves the effective numeric bounds mapping values to colors, and
/// optionally picks a named scale from the sign of the domain.
///
/// Never fails: an input with no valid values yields missing bounds that
/// downstream rendering must treat as "no data".
#[must_use]
pub fn resolve_color_domain(
    values: &[CalcNum],
    settings: &ColorDomainSettings,
    defaults: &ColorScaleDefaults,
) -> ResolvedColorDomain {
    let auto = settings.is_auto();

    let mut min = if auto || settings.min.is_none() {
        agg_min(values.iter().copied())
    } else {
        CalcNum::from(settings.min)
    };
    let mut max = if auto || settings.max.is_none() {
        agg_max(values.iter().copied())
    } else {
        CalcNum::from(settings.max)
    };

    // symmetrize about an explicit midpoint: the longer side is pulled in
    // to match the shorter, keeping the domain inside the data range
    if auto {
        if let (Some(lo), Some(hi), Some(mid)) = (min.value(), max.value(), settings.mid) {
            if hi - mid > mid - lo {
                max = CalcNum::new(mid + (mid - lo));
            } else if hi - mid < mid - lo {
                min = CalcNum::new(mid - (hi - mid));
            }
        }
    }

    // a zero-width domain cannot drive color interpolation
    if let (Some(lo), Some(hi)) = (min.value(), max.value()) {
        if lo == hi {
            min = CalcNum::new(lo - 0.5);
            max = CalcNum::new(hi + 0.5);
        }
    }

    let scale = select_scale(min, max, settings, defaults);
    ResolvedColorDomain { min, max, scale }
}

fn select_scale(
    min: CalcNum,
    max: CalcNum,
    settings: &ColorDomainSettings,
    defaults: &ColorScaleDefaults,
) -> ColorScale {
    if settings.autocolorscale {
        if let (Some(lo), Some(hi)) = (min.value(), max.value()) {
            return if lo * hi < 0.0 {
                defaults.diverging.clone()
            } else if lo >= 0.0 {
                defaults.sequential.clone()
            } else {
                defaults.sequential_minus.clone()
            };
        }
    }
    settings
        .colorscale
        .clone()
        .unwrap_or_else(|| defaults.sequential.clone())
}

#[cfg(test)]
mod tests {
    use super::{ColorDomainSettings, resolve_color_domain};
    use crate::color::scale::ColorScaleDefaults;
    use crate::core::num::CalcNum;

    fn nums(values: &[f64]) -> Vec<CalcNum> {
        values.iter().copied().map(CalcNum::new).collect()
    }

    #[test]
    fn explicit_bounds_win_only_when_auto_is_disabled() {
        let defaults = ColorScaleDefaults::default();
        let settings = ColorDomainSettings {
            min: Some(-100.0),
            max: Some(100.0),
            ..Default::default()
        };
        // auto unset: data bounds override the explicit values
        let resolved = resolve_color_domain(&nums(&[1.0, 9.0]), &settings, &defaults);
        assert_eq!(resolved.min.value(), Some(1.0));
        assert_eq!(resolved.max.value(), Some(9.0));

        let pinned = ColorDomainSettings {
            auto: Some(false),
            ..settings
        };
        let resolved = resolve_color_domain(&nums(&[1.0, 9.0]), &pinned, &defaults);
        assert_eq!(resolved.min.value(), Some(-100.0));
        assert_eq!(resolved.max.value(), Some(100.0));
    }

    #[test]
    fn all_missing_input_resolves_to_no_data() {
        let defaults = ColorScaleDefaults::default();
        let values = [CalcNum::Missing, CalcNum::Missing];
        let resolved =
            resolve_color_domain(&values, &ColorDomainSettings::default(), &defaults);
        assert!(!resolved.has_data());
    }
}
