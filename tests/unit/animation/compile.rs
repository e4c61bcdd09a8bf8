use super::*;
use crate::foundation::core::{DisplayScale, FrameRate, PathEl};
use crate::keyframe::model::parse_keyframes;
use serde_json::json;

fn compile_with(value: serde_json::Value, scale: f64, spatial: bool) -> PathValueResult<PathDescriptor> {
    let items = value.as_array().cloned().unwrap_or_default();
    let keyframes = parse_keyframes(&items)?;
    let span = KeyframeSpan::resolve(&keyframes, FrameRate::new(30.0).unwrap())?;
    let codec = PointCodec::new(DisplayScale::new(scale).unwrap(), spatial);
    compile_keyframes(&keyframes, &span, &codec)
}

fn compile(value: serde_json::Value) -> PathValueResult<PathDescriptor> {
    compile_with(value, 1.0, true)
}

fn assert_aligned(d: &PathDescriptor) {
    assert_eq!(d.breakpoints().len(), d.segment_count());
    assert_eq!(d.easings().len(), d.segment_count());
    assert_eq!(d.key_times().len(), d.path().elements().len());
    assert_eq!(d.key_times()[0], 0.0);
    assert!(d.breakpoints().windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn single_linear_segment() {
    let d = compile(json!([
        { "t": 0, "s": [0, 0], "e": [10, 0] },
        { "t": 30, "s": [10, 0] }
    ]))
    .unwrap();

    assert_aligned(&d);
    assert_eq!(d.duration_ms(), 1000);
    assert_eq!(d.delay_ms(), 0);
    assert_eq!(d.initial_point(), Point::ZERO);
    assert_eq!(
        d.path().elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(10.0, 0.0)),
        ]
    );
    assert_eq!(d.breakpoints(), &[1.0]);
    assert_eq!(d.easings(), &[Easing::Linear]);
    assert!(d.has_animation());
}

#[test]
fn hold_inserts_padding_and_synthetic_segments() {
    let d = compile(json!([
        { "t": 0, "s": [0, 0], "h": 1 },
        { "t": 15, "s": [0, 0], "e": [5, 5] },
        { "t": 30, "s": [5, 5] }
    ]))
    .unwrap();

    assert_aligned(&d);
    assert_eq!(d.initial_point(), Point::ZERO);
    assert_eq!(d.breakpoints(), &[0.5 - HOLD_EPSILON, 0.5, 1.0]);
    assert_eq!(
        d.path().elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(5.0, 5.0)),
        ]
    );
    assert!(d.easings().iter().all(|e| *e == Easing::Linear));
}

#[test]
fn hold_jump_ends_where_next_keyframe_starts() {
    let d = compile(json!([
        { "t": 0, "s": [0, 0], "e": [10, 0] },
        { "t": 10, "s": [10, 0], "h": 1 },
        { "t": 20, "s": [50, 50], "e": [60, 60] },
        { "t": 30, "s": [60, 60] }
    ]))
    .unwrap();

    assert_aligned(&d);
    assert_eq!(
        d.path().elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(10.0, 0.0)),
            PathEl::LineTo(Point::new(10.0, 0.0)),
            PathEl::LineTo(Point::new(50.0, 50.0)),
            PathEl::LineTo(Point::new(60.0, 60.0)),
        ]
    );
    let third = 10.0 / 30.0;
    let two_thirds = 20.0 / 30.0;
    assert_eq!(
        d.breakpoints(),
        &[third, two_thirds - HOLD_EPSILON, two_thirds, 1.0]
    );
}

#[test]
fn spatial_handles_produce_cubic_segment() {
    let d = compile(json!([
        { "t": 0, "s": [0, 0], "e": [100, 0], "to": [10, 20], "ti": [-10, 20] },
        { "t": 30, "s": [100, 0] }
    ]))
    .unwrap();

    assert_aligned(&d);
    assert_eq!(
        d.path().elements()[1],
        PathEl::CurveTo(
            Point::new(10.0, 20.0),
            Point::new(90.0, 20.0),
            Point::new(100.0, 0.0)
        )
    );
}

#[test]
fn single_spatial_handle_falls_back_to_line() {
    let d = compile(json!([
        { "t": 0, "s": [0, 0], "e": [100, 0], "to": [10, 20] },
        { "t": 30, "s": [100, 0] }
    ]))
    .unwrap();
    assert_eq!(d.path().elements()[1], PathEl::LineTo(Point::new(100.0, 0.0)));
}

#[test]
fn timing_handles_are_unscaled() {
    let d = compile_with(
        json!([
            {
                "t": 0, "s": [1, 1], "e": [2, 2],
                "o": { "x": [0.2], "y": [0.1] },
                "i": { "x": 0.7, "y": 0.9 }
            },
            { "t": 30, "s": [2, 2] }
        ]),
        2.0,
        true,
    )
    .unwrap();

    assert_eq!(d.initial_point(), Point::new(2.0, 2.0));
    let Easing::CubicBezier { x1, y1, x2, y2 } = d.easings()[0] else {
        panic!("expected cubic easing, got {:?}", d.easings()[0]);
    };
    for (got, want) in [(x1, 0.2), (y1, 0.1), (x2, 0.7), (y2, 0.9)] {
        assert!((got - want).abs() < 1e-12, "{got} != {want}");
    }
}

#[test]
fn non_spatial_mode_keeps_raw_coordinates() {
    let d = compile_with(
        json!([
            { "t": 0, "s": [1, 1], "e": [2, 2] },
            { "t": 30, "s": [2, 2] }
        ]),
        4.0,
        false,
    )
    .unwrap();
    assert_eq!(d.initial_point(), Point::new(1.0, 1.0));
    assert_eq!(d.path().elements()[1], PathEl::LineTo(Point::new(2.0, 2.0)));
}

#[test]
fn malformed_coordinate_aborts() {
    let err = compile(json!([
        { "t": 0, "s": [0, 0], "e": [[], 5] },
        { "t": 30, "s": [10, 0] }
    ]))
    .unwrap_err();
    assert!(matches!(err, PathValueError::MalformedKeyframe { index: 0, .. }));
}

#[test]
fn missing_frame_marker_aborts() {
    let err = compile(json!([
        { "t": 0, "s": [0, 0], "e": [5, 5] },
        { "s": [5, 5], "e": [6, 6] },
        { "t": 30, "s": [6, 6] }
    ]))
    .unwrap_err();
    assert!(matches!(err, PathValueError::MalformedKeyframe { index: 1, .. }));
}

#[test]
fn out_of_order_frames_abort() {
    let err = compile(json!([
        { "t": 0, "s": [0, 0], "e": [5, 5] },
        { "t": 20, "s": [5, 5], "e": [6, 6] },
        { "t": 10, "s": [6, 6], "e": [7, 7] },
        { "t": 30, "s": [7, 7] }
    ]))
    .unwrap_err();
    assert!(matches!(err, PathValueError::MalformedKeyframe { index: 2, .. }));
}

#[test]
fn trailing_end_point_is_misaligned() {
    let err = compile(json!([
        { "t": 0, "s": [0, 0], "e": [5, 5] },
        { "t": 30, "s": [5, 5], "e": [9, 9] }
    ]))
    .unwrap_err();
    assert!(matches!(
        err,
        PathValueError::MisalignedTimeline {
            vertices: 3,
            key_times: 2,
            easings: 2
        }
    ));
}

#[test]
fn hold_with_end_point_is_misaligned() {
    let err = compile(json!([
        { "t": 0, "s": [0, 0], "e": [5, 5], "h": 1 },
        { "t": 30, "s": [5, 5] }
    ]))
    .unwrap_err();
    assert!(matches!(
        err,
        PathValueError::MisalignedTimeline {
            vertices: 4,
            key_times: 3,
            easings: 3
        }
    ));
}

#[test]
fn empty_list_is_missing_value() {
    let span = KeyframeSpan {
        start_frame: 0,
        end_frame: 1,
        duration_frames: 1,
        duration_ms: 33,
        delay_ms: 0,
    };
    let codec = PointCodec::new(DisplayScale::ONE, true);
    let err = compile_keyframes(&[], &span, &codec).unwrap_err();
    assert!(matches!(err, PathValueError::MissingValue(_)));
}

#[test]
fn multi_segment_invariants_hold() {
    let d = compile(json!([
        { "t": 0, "s": [0, 0], "e": [10, 0], "to": [3, 0], "ti": [-3, 0] },
        { "t": 6, "s": [10, 0], "e": [10, 10] },
        { "t": 12, "s": [10, 10], "h": 1 },
        { "t": 18, "s": [0, 10], "e": [0, 0],
          "o": { "x": 0.33, "y": 0 }, "i": { "x": 0.67, "y": 1 } },
        { "t": 30, "s": [0, 0] }
    ]))
    .unwrap();
    assert_aligned(&d);
    assert_eq!(d.segment_count(), 5);
    let bp = d.breakpoints();
    for w in bp.windows(2) {
        let gap = w[1] - w[0];
        assert!(gap >= HOLD_EPSILON - 1e-12, "gap {gap} too small");
    }
}
