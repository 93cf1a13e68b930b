use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calc::CalcWarning;
use crate::calc::enrich;
use crate::color::domain::{ResolvedColorDomain, resolve_color_domain};
use crate::color::scale::ColorScaleDefaults;
use crate::core::axis::{Axis, RawValue};
use crate::core::num::CalcNum;
use crate::core::trace::{FunnelTrace, Orientation};

/// One funnel stage record, ordered by input index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelPoint {
    pub pos: CalcNum,
    pub size: CalcNum,
    /// Offset centering the stage shape on the size axis: `-0.5 * size`.
    pub base: CalcNum,
    /// Stage size relative to the first stage.
    pub ratio: CalcNum,
    /// True when this stage and the next both have valid sizes; drives the
    /// connecting ribbon between consecutive stages.
    pub connect_next: bool,
    pub id: Option<String>,
    pub text: Option<String>,
    pub selected: bool,
}

/// Calc output for one funnel trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelCalc {
    pub points: Vec<FunnelPoint>,
    pub color_domain: Option<ResolvedColorDomain>,
    pub warnings: Vec<CalcWarning>,
}

pub(crate) struct FunnelInputs {
    pos: Vec<CalcNum>,
    size: Vec<CalcNum>,
}

pub(crate) fn resolve_inputs(
    trace: &FunnelTrace,
    xaxis: &mut Axis,
    yaxis: &mut Axis,
) -> FunnelInputs {
    let (size, pos) = match trace.orientation {
        Orientation::Horizontal => (
            xaxis.make_calcdata(&trace.x),
            yaxis.make_calcdata(&trace.y),
        ),
        Orientation::Vertical => (
            yaxis.make_calcdata(&trace.y),
            xaxis.make_calcdata(&trace.x),
        ),
    };
    FunnelInputs { pos, size }
}

/// Converts raw size/position arrays into ordered funnel stage records.
///
/// Data anomalies never fail the transform: mismatched lengths truncate to
/// the shorter array, and negative sizes (a funnel stage cannot shrink
/// below zero) are demoted to missing. Both are reported on the warnings
/// channel.
///
/// A trace bound to a shared color axis gets no local color domain here;
/// resolving shared containers is the pipeline's job.
#[must_use]
pub fn calc_funnel(
    trace: &FunnelTrace,
    xaxis: &mut Axis,
    yaxis: &mut Axis,
    defaults: &ColorScaleDefaults,
) -> FunnelCalc {
    let inputs = resolve_inputs(trace, xaxis, yaxis);
    build(trace, inputs, None, defaults)
}

pub(crate) fn build(
    trace: &FunnelTrace,
    inputs: FunnelInputs,
    shared_domain: Option<ResolvedColorDomain>,
    defaults: &ColorScaleDefaults,
) -> FunnelCalc {
    let FunnelInputs { pos, size } = inputs;
    let mut warnings = Vec::new();

    let len = pos.len().min(size.len());
    if pos.len() != size.len() {
        debug!(
            pos_len = pos.len(),
            size_len = size.len(),
            "funnel arrays truncated to shorter length"
        );
        warnings.push(CalcWarning::LengthMismatch {
            expected: pos.len().max(size.len()),
            actual: len,
        });
    }

    let mut sizes = Vec::with_capacity(len);
    for (index, value) in size.into_iter().take(len).enumerate() {
        match value.value() {
            Some(v) if v < 0.0 => {
                warnings.push(CalcWarning::NegativeSize { index });
                sizes.push(CalcNum::Missing);
            }
            _ => sizes.push(value),
        }
    }

    let first = sizes.first().copied().unwrap_or(CalcNum::Missing);
    let selected = enrich::selection_flags(len, trace.selected_points.as_deref());

    let mut points = Vec::with_capacity(len);
    for (index, &size) in sizes.iter().enumerate() {
        let next_valid = sizes.get(index + 1).is_some_and(|next| next.is_valid());
        points.push(FunnelPoint {
            pos: pos[index],
            size,
            base: size.map(|v| -0.5 * v),
            ratio: stage_ratio(size, first),
            connect_next: size.is_valid() && next_valid,
            id: enrich::positional(trace.ids.as_deref(), index),
            text: enrich::positional(trace.text.as_deref(), index),
            selected: selected[index],
        });
    }

    let color_domain = resolve_trace_colors(trace, shared_domain, defaults, &mut warnings);

    FunnelCalc {
        points,
        color_domain,
        warnings,
    }
}

/// Ratio of a stage against the first stage.
///
/// A zero or missing first stage gives no meaningful reference, so every
/// ratio in the trace reports as missing rather than as infinity or NaN.
fn stage_ratio(size: CalcNum, first: CalcNum) -> CalcNum {
    match (size.value(), first.value()) {
        (Some(s), Some(f)) if f != 0.0 => CalcNum::new(s / f),
        _ => CalcNum::Missing,
    }
}

fn resolve_trace_colors(
    trace: &FunnelTrace,
    shared_domain: Option<ResolvedColorDomain>,
    defaults: &ColorScaleDefaults,
    warnings: &mut Vec<CalcWarning>,
) -> Option<ResolvedColorDomain> {
    if shared_domain.is_some() {
        return shared_domain;
    }
    if trace.marker.color_axis.is_some() {
        return None;
    }

    let colors = trace.marker.colors.as_ref()?;
    let values: Vec<CalcNum> = colors.iter().map(RawValue::as_number).collect();
    let resolved = resolve_color_domain(&values, &trace.marker.color_domain, defaults);
    if !resolved.has_data() {
        warnings.push(CalcWarning::EmptyColorDomain);
    }
    Some(resolved)
}
