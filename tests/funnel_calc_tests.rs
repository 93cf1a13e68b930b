use tracecalc::calc::{CalcWarning, calc_funnel};
use tracecalc::color::{ColorDomainSettings, ColorScaleDefaults};
use tracecalc::core::{Axis, AxisKind, FunnelTrace, Marker, Orientation, RawValue};

fn numbers(values: &[f64]) -> Vec<RawValue> {
    values.iter().copied().map(RawValue::from).collect()
}

fn labels(names: &[&str]) -> Vec<RawValue> {
    names.iter().copied().map(RawValue::from).collect()
}

/// Horizontal funnel: sizes on x, stage labels on y.
fn horizontal(sizes: &[f64], stages: &[&str]) -> (FunnelTrace, Axis, Axis) {
    let trace = FunnelTrace {
        x: numbers(sizes),
        y: labels(stages),
        ..Default::default()
    };
    (trace, Axis::new(AxisKind::Linear), Axis::new(AxisKind::Category))
}

#[test]
fn negative_size_goes_missing_and_breaks_connectivity() {
    let (trace, mut xa, mut ya) = horizontal(
        &[10.0, 8.0, -1.0, 5.0],
        &["visit", "signup", "trial", "purchase"],
    );
    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());

    assert_eq!(calc.points.len(), 4);
    assert!(calc.points[2].size.is_missing());
    assert!(calc.points[0].connect_next);
    assert!(!calc.points[1].connect_next);
    assert!(!calc.points[2].connect_next);
    // last stage has no successor
    assert!(!calc.points[3].connect_next);
    assert!(calc.warnings.contains(&CalcWarning::NegativeSize { index: 2 }));
}

#[test]
fn ratios_are_relative_to_the_first_stage() {
    let (trace, mut xa, mut ya) = horizontal(&[10.0, 5.0, 2.0], &["a", "b", "c"]);
    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());

    assert_eq!(calc.points[0].ratio.value(), Some(1.0));
    assert_eq!(calc.points[1].ratio.value(), Some(0.5));
    assert_eq!(calc.points[2].ratio.value(), Some(0.2));
}

#[test]
fn base_offset_centers_the_stage() {
    let (trace, mut xa, mut ya) = horizontal(&[8.0], &["a"]);
    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());
    assert_eq!(calc.points[0].base.value(), Some(-4.0));
}

#[test]
fn mismatched_lengths_truncate_to_the_shorter_array() {
    let (trace, mut xa, mut ya) =
        horizontal(&[10.0, 5.0, 2.0], &["a", "b", "c", "d", "e"]);
    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());

    assert_eq!(calc.points.len(), 3);
    assert!(calc.warnings.contains(&CalcWarning::LengthMismatch {
        expected: 5,
        actual: 3
    }));
}

#[test]
fn zero_first_stage_makes_every_ratio_missing() {
    let (trace, mut xa, mut ya) = horizontal(&[0.0, 5.0, 2.0], &["a", "b", "c"]);
    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());
    assert!(calc.points.iter().all(|p| p.ratio.is_missing()));
}

#[test]
fn missing_first_stage_makes_every_ratio_missing() {
    let mut trace = FunnelTrace {
        x: numbers(&[5.0, 2.0]),
        y: labels(&["a", "b"]),
        ..Default::default()
    };
    trace.x.insert(0, RawValue::Null);
    trace.y.insert(0, RawValue::from("start"));

    let mut xa = Axis::new(AxisKind::Linear);
    let mut ya = Axis::new(AxisKind::Category);
    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());

    assert_eq!(calc.points.len(), 3);
    assert!(calc.points.iter().all(|p| p.ratio.is_missing()));
    // later stages still connect to each other
    assert!(calc.points[1].connect_next);
}

#[test]
fn vertical_orientation_swaps_size_and_position_axes() {
    let trace = FunnelTrace {
        x: labels(&["a", "b"]),
        y: numbers(&[10.0, 4.0]),
        orientation: Orientation::Vertical,
        ..Default::default()
    };
    let mut xa = Axis::new(AxisKind::Category);
    let mut ya = Axis::new(AxisKind::Linear);
    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());

    assert_eq!(calc.points[0].size.value(), Some(10.0));
    assert_eq!(calc.points[0].pos.value(), Some(0.0));
    assert_eq!(calc.points[1].size.value(), Some(4.0));
    assert_eq!(calc.points[1].pos.value(), Some(1.0));
}

#[test]
fn ids_and_text_overlay_positionally() {
    let (mut trace, mut xa, mut ya) = horizontal(&[10.0, 5.0, 2.0], &["a", "b", "c"]);
    trace.ids = Some(vec!["s1".to_owned(), "s2".to_owned()]);
    trace.text = Some(vec!["first".to_owned()]);

    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());
    assert_eq!(calc.points[0].id.as_deref(), Some("s1"));
    assert_eq!(calc.points[1].id.as_deref(), Some("s2"));
    assert_eq!(calc.points[2].id, None);
    assert_eq!(calc.points[0].text.as_deref(), Some("first"));
    assert_eq!(calc.points[1].text, None);
}

#[test]
fn selection_flags_follow_selected_points() {
    let (mut trace, mut xa, mut ya) = horizontal(&[10.0, 5.0, 2.0], &["a", "b", "c"]);
    trace.selected_points = Some(vec![1, 7]);

    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());
    assert!(!calc.points[0].selected);
    assert!(calc.points[1].selected);
    assert!(!calc.points[2].selected);
}

#[test]
fn marker_colors_resolve_a_local_color_domain() {
    let (mut trace, mut xa, mut ya) = horizontal(&[10.0, 5.0, 2.0], &["a", "b", "c"]);
    trace.marker = Marker {
        colors: Some(numbers(&[1.0, 4.0, 9.0])),
        color_domain: ColorDomainSettings::default(),
        color_axis: None,
    };

    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());
    let domain = calc.color_domain.expect("local color domain");
    assert_eq!(domain.min.value(), Some(1.0));
    assert_eq!(domain.max.value(), Some(9.0));
}

#[test]
fn shared_axis_membership_defers_color_resolution() {
    let (mut trace, mut xa, mut ya) = horizontal(&[10.0, 5.0], &["a", "b"]);
    trace.marker = Marker {
        colors: Some(numbers(&[1.0, 4.0])),
        color_domain: ColorDomainSettings::default(),
        color_axis: Some("coloraxis".to_owned()),
    };

    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());
    assert!(calc.color_domain.is_none());
}

#[test]
fn empty_trace_produces_empty_calcdata() {
    let (trace, mut xa, mut ya) = horizontal(&[], &[]);
    let calc = calc_funnel(&trace, &mut xa, &mut ya, &ColorScaleDefaults::default());
    assert!(calc.points.is_empty());
    assert!(calc.warnings.is_empty());
}
