use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tracecalc::calc::calc_funnel;
use tracecalc::color::{ColorDomainSettings, ColorScaleDefaults, resolve_color_domain};
use tracecalc::core::aggregate::{agg_max, agg_min};
use tracecalc::core::{Axis, AxisKind, CalcNum, FunnelTrace, RawValue};

fn bench_aggregate_10k(c: &mut Criterion) {
    let values: Vec<CalcNum> = (0..10_000)
        .map(|i| {
            if i % 7 == 0 {
                CalcNum::Missing
            } else {
                CalcNum::new((i as f64).sin() * 500.0)
            }
        })
        .collect();

    c.bench_function("aggregate_min_max_10k", |b| {
        b.iter(|| {
            let min = agg_min(black_box(&values).iter().copied());
            let max = agg_max(black_box(&values).iter().copied());
            (min, max)
        })
    });
}

fn bench_color_domain_10k(c: &mut Criterion) {
    let values: Vec<CalcNum> = (0..10_000)
        .map(|i| CalcNum::new((i as f64).cos() * 250.0))
        .collect();
    let settings = ColorDomainSettings {
        mid: Some(10.0),
        autocolorscale: true,
        ..Default::default()
    };
    let defaults = ColorScaleDefaults::default();

    c.bench_function("color_domain_resolve_10k", |b| {
        b.iter(|| resolve_color_domain(black_box(&values), black_box(&settings), &defaults))
    });
}

fn bench_funnel_calc_10k(c: &mut Criterion) {
    let trace = FunnelTrace {
        x: (0..10_000)
            .map(|i| RawValue::from(10_000.0 - i as f64))
            .collect(),
        y: (0..10_000).map(|i| RawValue::from(i as f64)).collect(),
        ..Default::default()
    };
    let defaults = ColorScaleDefaults::default();

    c.bench_function("funnel_calc_10k", |b| {
        b.iter(|| {
            let mut xa = Axis::new(AxisKind::Linear);
            let mut ya = Axis::new(AxisKind::Linear);
            calc_funnel(black_box(&trace), &mut xa, &mut ya, &defaults)
        })
    });
}

criterion_group!(
    benches,
    bench_aggregate_10k,
    bench_color_domain_10k,
    bench_funnel_calc_10k
);
criterion_main!(benches);
