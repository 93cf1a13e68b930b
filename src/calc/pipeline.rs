use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::calc::box_plot::{self, BoxCalc};
use crate::calc::funnel::{self, FunnelCalc};
use crate::color::axis::ColorAxis;
use crate::color::domain::{ColorDomainSettings, ResolvedColorDomain};
use crate::color::scale::ColorScaleDefaults;
use crate::core::axis::{Axis, RawValue};
use crate::core::num::CalcNum;
use crate::core::trace::{BoxTrace, FunnelTrace};
use crate::error::{CalcError, CalcResult};

/// Orchestrates per-trace calc across one figure's traces.
///
/// Owns the layout-level colorscale defaults and the registered shared
/// color axes, and is the single writer for shared color-domain state.
/// A shared axis is resolved at most once per recompute cycle, from the
/// union of its member traces' color values, so the order member traces
/// run in cannot change the shared bounds.
#[derive(Debug, Clone, Default)]
pub struct CalcPipeline {
    defaults: ColorScaleDefaults,
    color_axes: IndexMap<String, ColorAxis>,
}

impl CalcPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_defaults(defaults: ColorScaleDefaults) -> Self {
        Self {
            defaults,
            color_axes: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn defaults(&self) -> &ColorScaleDefaults {
        &self.defaults
    }

    pub fn register_color_axis(&mut self, name: impl Into<String>, settings: ColorDomainSettings) {
        self.color_axes
            .insert(name.into(), ColorAxis::new(settings));
    }

    #[must_use]
    pub fn color_axis(&self, name: &str) -> Option<&ColorAxis> {
        self.color_axes.get(name)
    }

    /// Starts a fresh recompute cycle: shared axes forget their resolved
    /// domains and will re-resolve from the next traces to run.
    pub fn begin_cycle(&mut self) {
        for axis in self.color_axes.values_mut() {
            axis.clear();
        }
    }

    /// Runs calc for one funnel trace.
    ///
    /// A trace bound to a shared color axis uses the axis' already-resolved
    /// domain when one exists this cycle; otherwise the axis is resolved
    /// from this trace's values alone.
    pub fn calc_funnel(
        &mut self,
        trace: &FunnelTrace,
        xaxis: &mut Axis,
        yaxis: &mut Axis,
    ) -> CalcResult<FunnelCalc> {
        let inputs = funnel::resolve_inputs(trace, xaxis, yaxis);
        let shared = self.shared_domain_or_resolve(trace)?;
        Ok(funnel::build(trace, inputs, shared, &self.defaults))
    }

    /// Runs calc for a sequence of funnel traces sharing one subplot.
    ///
    /// Every registered shared color axis with members in `traces` is
    /// resolved first, from the union of those members' color values; the
    /// member traces then all read one consistent domain.
    pub fn calc_funnels(
        &mut self,
        traces: &[FunnelTrace],
        xaxis: &mut Axis,
        yaxis: &mut Axis,
    ) -> CalcResult<Vec<FunnelCalc>> {
        let inputs: Vec<_> = traces
            .iter()
            .map(|trace| funnel::resolve_inputs(trace, xaxis, yaxis))
            .collect();
        self.resolve_shared_axes(traces)?;

        let mut out = Vec::with_capacity(traces.len());
        for (trace, inputs) in traces.iter().zip(inputs) {
            let shared = self.shared_domain(trace)?;
            out.push(funnel::build(trace, inputs, shared, &self.defaults));
        }
        Ok(out)
    }

    /// Like [`Self::calc_funnels`], fanning the per-trace transforms across
    /// threads. Axis materialization and shared-axis resolution still run
    /// on the calling thread, preserving the single-writer rule.
    #[cfg(feature = "parallel-calc")]
    pub fn calc_funnels_parallel(
        &mut self,
        traces: &[FunnelTrace],
        xaxis: &mut Axis,
        yaxis: &mut Axis,
    ) -> CalcResult<Vec<FunnelCalc>> {
        use rayon::prelude::*;

        let inputs: Vec<_> = traces
            .iter()
            .map(|trace| funnel::resolve_inputs(trace, xaxis, yaxis))
            .collect();
        self.resolve_shared_axes(traces)?;
        let shared: Vec<Option<ResolvedColorDomain>> = traces
            .iter()
            .map(|trace| self.shared_domain(trace))
            .collect::<CalcResult<_>>()?;

        let defaults = &self.defaults;
        Ok(traces
            .par_iter()
            .zip(inputs.into_par_iter())
            .zip(shared.into_par_iter())
            .map(|((trace, inputs), shared)| funnel::build(trace, inputs, shared, defaults))
            .collect())
    }

    /// Runs calc for one box trace. Boxes carry no color-domain state, so
    /// this never touches the shared axes.
    pub fn calc_box(
        &self,
        trace: &BoxTrace,
        xaxis: &mut Axis,
        yaxis: &mut Axis,
    ) -> CalcResult<BoxCalc> {
        box_plot::calc_box(trace, xaxis, yaxis)
    }

    fn resolve_shared_axes(&mut self, traces: &[FunnelTrace]) -> CalcResult<()> {
        for trace in traces {
            if let Some(name) = trace.marker.color_axis.as_deref() {
                if !self.color_axes.contains_key(name) {
                    return Err(CalcError::UnknownColorAxis {
                        name: name.to_owned(),
                    });
                }
            }
        }

        let Self {
            defaults,
            color_axes,
        } = self;
        for (name, axis) in color_axes.iter_mut() {
            let members: SmallVec<[usize; 4]> = traces
                .iter()
                .enumerate()
                .filter(|(_, trace)| trace.marker.color_axis.as_deref() == Some(name.as_str()))
                .map(|(index, _)| index)
                .collect();
            if members.is_empty() {
                continue;
            }

            let mut values = Vec::new();
            for &index in &members {
                values.extend(color_values(&traces[index]));
            }
            axis.resolve(&values, defaults);
            debug!(
                axis = %name,
                members = members.len(),
                "resolved shared color axis"
            );
        }
        Ok(())
    }

    fn shared_domain(&self, trace: &FunnelTrace) -> CalcResult<Option<ResolvedColorDomain>> {
        match trace.marker.color_axis.as_deref() {
            None => Ok(None),
            Some(name) => self
                .color_axes
                .get(name)
                .map(|axis| axis.resolved().cloned())
                .ok_or_else(|| CalcError::UnknownColorAxis {
                    name: name.to_owned(),
                }),
        }
    }

    fn shared_domain_or_resolve(
        &mut self,
        trace: &FunnelTrace,
    ) -> CalcResult<Option<ResolvedColorDomain>> {
        let Some(name) = trace.marker.color_axis.as_deref() else {
            return Ok(None);
        };
        let Self {
            defaults,
            color_axes,
        } = self;
        let Some(axis) = color_axes.get_mut(name) else {
            return Err(CalcError::UnknownColorAxis {
                name: name.to_owned(),
            });
        };
        if let Some(resolved) = axis.resolved() {
            return Ok(Some(resolved.clone()));
        }
        let values = color_values(trace);
        Ok(Some(axis.resolve(&values, defaults)))
    }
}

fn color_values(trace: &FunnelTrace) -> Vec<CalcNum> {
    trace
        .marker
        .colors
        .as_deref()
        .map(|colors| colors.iter().map(RawValue::as_number).collect())
        .unwrap_or_default()
}
