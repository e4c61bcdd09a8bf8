use super::*;

fn handles(x1: f64, y1: f64, x2: f64, y2: f64) -> Easing {
    Easing::from_handles(Some(Point::new(x1, y1)), Some(Point::new(x2, y2)))
}

#[test]
fn missing_handles_resolve_to_linear() {
    assert_eq!(Easing::from_handles(None, None), Easing::Linear);
    assert_eq!(
        Easing::from_handles(Some(Point::new(0.2, 0.2)), None),
        Easing::Linear
    );
    assert_eq!(
        Easing::from_handles(None, Some(Point::new(0.8, 0.8))),
        Easing::Linear
    );
}

#[test]
fn endpoints_are_stable() {
    for ease in [
        Easing::Linear,
        handles(0.2, 0.2, 0.8, 0.8),
        handles(0.42, 0.0, 0.58, 1.0),
        handles(0.33, 0.0, 0.67, 1.0),
    ] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn cubic_is_monotonic_non_decreasing() {
    let ease = handles(0.2, 0.2, 0.8, 0.8);
    let mut prev = ease.apply(0.0);
    for i in 1..=200 {
        let v = ease.apply(i as f64 / 200.0);
        assert!(v + 1e-9 >= prev, "dip at step {i}: {prev} -> {v}");
        prev = v;
    }
}

#[test]
fn symmetric_curve_passes_through_midpoint() {
    let ease = handles(0.2, 0.2, 0.8, 0.8);
    assert!((ease.apply(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn ease_in_out_lags_then_leads() {
    let ease = handles(0.42, 0.0, 0.58, 1.0);
    assert!(ease.apply(0.25) < 0.25);
    assert!(ease.apply(0.75) > 0.75);
}

#[test]
fn out_of_range_input_is_clamped() {
    let ease = handles(0.42, 0.0, 0.58, 1.0);
    assert_eq!(ease.apply(-0.5), 0.0);
    assert_eq!(ease.apply(1.5), 1.0);
    assert_eq!(Easing::Linear.apply(2.0), 1.0);
}

#[test]
fn time_handles_are_clamped() {
    let ease = handles(-0.3, 0.1, 1.4, 0.9);
    assert_eq!(
        ease,
        Easing::CubicBezier {
            x1: 0.0,
            y1: 0.1,
            x2: 1.0,
            y2: 0.9
        }
    );
}

#[test]
fn serializes_with_snake_case_tags() {
    let s = serde_json::to_string(&Easing::Linear).unwrap();
    assert_eq!(s, "\"linear\"");
    let s = serde_json::to_string(&handles(0.1, 0.2, 0.3, 0.4)).unwrap();
    assert!(s.starts_with("{\"cubic_bezier\":"));
}
