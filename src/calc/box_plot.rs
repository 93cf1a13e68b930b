use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calc::CalcWarning;
use crate::core::aggregate::{mean, percentile, stdev};
use crate::core::axis::{Axis, AxisKind, RawValue};
use crate::core::num::CalcNum;
use crate::core::trace::{BoxPoints, BoxTrace, Orientation};
use crate::error::CalcResult;

/// One classified sample point kept alongside a box summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPoint {
    pub value: f64,
    /// Beyond the 4·Q1−3·Q3 / 4·Q3−3·Q1 fences.
    pub suspected: bool,
}

/// Statistical summary for one category of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub pos: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation, for mean-and-deviation markers.
    pub sd: f64,
    pub q1: f64,
    pub med: f64,
    pub q3: f64,
    /// Lower whisker end: smallest sample inside the 1.5·IQR fence.
    pub lf: f64,
    /// Upper whisker end: largest sample inside the 1.5·IQR fence.
    pub uf: f64,
    /// Lower suspected-outlier fence, 4·Q1 − 3·Q3.
    pub lo: f64,
    /// Upper suspected-outlier fence, 4·Q3 − 3·Q1.
    pub uo: f64,
    pub points: Vec<BoxPoint>,
}

/// Calc output for one box trace: per-category summaries ordered by
/// ascending position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxCalc {
    pub stats: Vec<BoxStats>,
    /// Box half-width on the position axis: half the smallest gap between
    /// distinct positions, 0.5 when fewer than two boxes exist.
    pub d_pos: f64,
    /// Whisker half-extent on the position axis, `whisker_width · d_pos`.
    pub whisker_extent: f64,
    pub warnings: Vec<CalcWarning>,
}

/// Converts a raw sample array plus positional labels into per-category
/// statistical summaries.
///
/// Style/behavior knobs are validated up front; data anomalies never fail
/// the transform. Samples with a missing value or position simply drop out,
/// and an input with no usable samples yields an empty summary sequence.
pub fn calc_box(trace: &BoxTrace, xaxis: &mut Axis, yaxis: &mut Axis) -> CalcResult<BoxCalc> {
    trace.validate()?;

    let mut warnings = Vec::new();
    let (vals, pos) = resolve_inputs(trace, xaxis, yaxis, &mut warnings);

    let mut groups: IndexMap<OrderedFloat<f64>, Vec<f64>> = IndexMap::new();
    for (p, v) in pos.iter().zip(vals.iter()) {
        if let (Some(p), Some(v)) = (p.value(), v.value()) {
            groups.entry(OrderedFloat(p)).or_default().push(v);
        }
    }
    groups.sort_keys();

    let positions: Vec<f64> = groups.keys().map(|key| key.0).collect();
    let d_pos = half_min_gap(&positions);

    let stats = groups
        .into_iter()
        .map(|(pos, mut samples)| {
            samples.sort_by(f64::total_cmp);
            summarize(pos.0, &samples, trace.box_points)
        })
        .collect();

    Ok(BoxCalc {
        stats,
        d_pos,
        whisker_extent: trace.whisker_width * d_pos,
        warnings,
    })
}

fn resolve_inputs(
    trace: &BoxTrace,
    xaxis: &mut Axis,
    yaxis: &mut Axis,
    warnings: &mut Vec<CalcWarning>,
) -> (Vec<CalcNum>, Vec<CalcNum>) {
    let (mut vals, pos_axis, pos_raw): (_, &mut Axis, &[RawValue]) = match trace.orientation {
        Orientation::Vertical => (yaxis.make_calcdata(&trace.y), xaxis, &trace.x),
        Orientation::Horizontal => (xaxis.make_calcdata(&trace.x), yaxis, &trace.y),
    };

    if pos_raw.is_empty() {
        // single box: every sample shares one position
        let pos = vec![CalcNum::new(single_position(trace, pos_axis)); vals.len()];
        return (vals, pos);
    }

    let mut pos = pos_axis.make_calcdata(pos_raw);
    if pos.len() != vals.len() {
        debug!(
            pos_len = pos.len(),
            val_len = vals.len(),
            "box arrays truncated to shorter length"
        );
        warnings.push(CalcWarning::LengthMismatch {
            expected: pos.len().max(vals.len()),
            actual: pos.len().min(vals.len()),
        });
        let len = pos.len().min(vals.len());
        pos.truncate(len);
        vals.truncate(len);
    }
    (vals, pos)
}

fn single_position(trace: &BoxTrace, pos_axis: &mut Axis) -> f64 {
    if pos_axis.kind() == AxisKind::Category {
        if let Some(name) = trace.name.as_deref() {
            if let Some(index) = pos_axis.intern_category(name) {
                return index as f64;
            }
        }
    }
    trace.pos0
}

fn summarize(pos: f64, sorted: &[f64], mode: BoxPoints) -> BoxStats {
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let q1 = percentile(sorted, 0.25).unwrap_or(min);
    let med = percentile(sorted, 0.5).unwrap_or(min);
    let q3 = percentile(sorted, 0.75).unwrap_or(max);

    let lf = whisker_low(sorted, q1, q3);
    let uf = whisker_high(sorted, q1, q3);
    let lo = 4.0 * q1 - 3.0 * q3;
    let uo = 4.0 * q3 - 3.0 * q1;

    let values: Vec<CalcNum> = sorted.iter().copied().map(CalcNum::new).collect();

    BoxStats {
        pos,
        min,
        max,
        mean: mean(values.iter().copied()).value().unwrap_or(min),
        sd: stdev(&values).value().unwrap_or(0.0),
        q1,
        med,
        q3,
        lf,
        uf,
        lo,
        uo,
        points: classify(sorted, mode, lf, uf, lo, uo),
    }
}

/// Smallest sample at or above 2.5·Q1 − 1.5·Q3, clamped to at most Q1.
fn whisker_low(sorted: &[f64], q1: f64, q3: f64) -> f64 {
    let fence = 2.5 * q1 - 1.5 * q3;
    sorted
        .iter()
        .copied()
        .find(|v| *v >= fence)
        .map_or(q1, |v| v.min(q1))
}

/// Largest sample at or below 2.5·Q3 − 1.5·Q1, clamped to at least Q3.
fn whisker_high(sorted: &[f64], q1: f64, q3: f64) -> f64 {
    let fence = 2.5 * q3 - 1.5 * q1;
    sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= fence)
        .map_or(q3, |v| v.max(q3))
}

fn classify(sorted: &[f64], mode: BoxPoints, lf: f64, uf: f64, lo: f64, uo: f64) -> Vec<BoxPoint> {
    match mode {
        BoxPoints::None => Vec::new(),
        BoxPoints::All => sorted
            .iter()
            .map(|&value| BoxPoint {
                value,
                suspected: false,
            })
            .collect(),
        BoxPoints::Outliers => sorted
            .iter()
            .filter(|&&v| v < lf || v > uf)
            .map(|&value| BoxPoint {
                value,
                suspected: false,
            })
            .collect(),
        BoxPoints::SuspectedOutliers => sorted
            .iter()
            .filter(|&&v| v < lf || v > uf)
            .map(|&value| BoxPoint {
                value,
                suspected: value < lo || value > uo,
            })
            .collect(),
    }
}

fn half_min_gap(positions: &[f64]) -> f64 {
    let mut min_gap = f64::INFINITY;
    for pair in positions.windows(2) {
        min_gap = min_gap.min(pair[1] - pair[0]);
    }
    if min_gap.is_finite() { 0.5 * min_gap } else { 0.5 }
}
