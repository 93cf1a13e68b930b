use serde::{Deserialize, Serialize};

use crate::color::domain::{ColorDomainSettings, ResolvedColorDomain, resolve_color_domain};
use crate::color::scale::ColorScaleDefaults;
use crate::core::num::CalcNum;

/// A shared, cross-trace color container.
///
/// Traces naming this axis read their color-domain bounds from it instead
/// of their local marker container. The pipeline is the single writer: it
/// resolves the axis once per recompute cycle from the union of all member
/// traces' values, so member order cannot change the outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorAxis {
    pub settings: ColorDomainSettings,
    resolved: Option<ResolvedColorDomain>,
}

impl ColorAxis {
    #[must_use]
    pub fn new(settings: ColorDomainSettings) -> Self {
        Self {
            settings,
            resolved: None,
        }
    }

    /// The domain resolved this cycle, if any.
    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedColorDomain> {
        self.resolved.as_ref()
    }

    pub(crate) fn resolve(
        &mut self,
        values: &[CalcNum],
        defaults: &ColorScaleDefaults,
    ) -> ResolvedColorDomain {
        let resolved = resolve_color_domain(values, &self.settings, defaults);
        resolved.apply_to(&mut self.settings);
        self.resolved = Some(resolved.clone());
        resolved
    }

    pub(crate) fn clear(&mut self) {
        self.resolved = None;
    }
}
