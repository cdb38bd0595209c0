use chartkit::core::{Axis, AxisOrientation};
use proptest::prelude::*;

fn model_range() -> impl Strategy<Value = (f64, f64)> {
    (-1.0e6..1.0e6f64, 1.0e-3..1.0e6f64).prop_map(|(first, length)| (first, first + length))
}

fn screen_range() -> impl Strategy<Value = (f64, f64)> {
    (0.0..500.0f64, 10.0..2000.0f64).prop_map(|(first, length)| (first, first + length))
}

fn horizontal_axis() -> impl Strategy<Value = Axis> {
    (model_range(), screen_range()).prop_map(|((fm, lm), (fs, ls))| {
        Axis::new(AxisOrientation::Horizontal, fm, lm, fs, ls).expect("valid axis")
    })
}

/// One gesture picked from the whole input space the axis accepts.
#[derive(Debug, Clone, Copy)]
enum Gesture {
    Pan(f64),
    Zoom { scale: f64, center: f64 },
}

fn gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (-3000.0..3000.0f64).prop_map(Gesture::Pan),
        (0.1..10.0f64, -1000.0..3000.0f64)
            .prop_map(|(scale, center)| Gesture::Zoom { scale, center }),
    ]
}

fn assert_window_invariants(axis: &Axis) {
    let tolerance = 1e-6;
    assert!(
        axis.first_screen() >= axis.first_screen_init() - tolerance,
        "window escaped init lower bound: {axis:?}"
    );
    assert!(
        axis.last_screen() <= axis.last_screen_init() + tolerance,
        "window escaped init upper bound: {axis:?}"
    );
    assert!(
        axis.screen_length() <= axis.init_screen_length() + tolerance,
        "window grew past init length: {axis:?}"
    );
    assert!(axis.screen_length() > 0.0, "window collapsed: {axis:?}");
}

proptest! {
    #[test]
    fn transform_round_trips_within_relative_tolerance(
        axis in horizontal_axis(),
        fraction in 0.0..1.0f64,
    ) {
        let scalar = axis.first_model() + fraction * axis.model_length();
        let recovered = axis.scalar_for_screen_loc(axis.screen_loc_for_scalar(scalar));
        prop_assert!((recovered - scalar).abs() <= 1e-6 * (1.0 + scalar.abs()));
    }

    #[test]
    fn pan_preserves_window_length_and_bounds(
        axis in horizontal_axis(),
        zoom_scale in 1.0..8.0f64,
        delta in -5000.0..5000.0f64,
    ) {
        let mut axis = axis;
        let mid = (axis.first_screen() + axis.last_screen()) / 2.0;
        axis.zoom(zoom_scale, 1.0, mid, 0.0).expect("zoom");
        let length = axis.screen_length();

        axis.pan(delta, 0.0).expect("pan");
        prop_assert!((axis.screen_length() - length).abs() <= 1e-9 * length.max(1.0));
        assert_window_invariants(&axis);
    }

    #[test]
    fn zoom_keeps_window_inside_init_bounds(
        axis in horizontal_axis(),
        scale in 0.1..10.0f64,
        center in -1000.0..3000.0f64,
    ) {
        let mut axis = axis;
        axis.zoom(scale, 1.0, center, 0.0).expect("zoom");
        assert_window_invariants(&axis);
        prop_assert!(
            (axis.zoom_factor() - axis.init_screen_length() / axis.screen_length()).abs() <= 1e-9
        );
    }

    #[test]
    fn unclamped_zoom_in_preserves_the_anchored_model_value(
        axis in horizontal_axis(),
        scale in 1.0..8.0f64,
        fraction in 0.05..0.95f64,
    ) {
        let mut axis = axis;
        // Anchor inside the current window: zooming in can then never
        // overflow the init bounds, so the anchor must hold exactly.
        let center = axis.first_screen() + fraction * axis.screen_length();
        let anchored = axis.scalar_for_screen_loc(center);

        axis.zoom(scale, 1.0, center, 0.0).expect("zoom");
        let after = axis.scalar_for_screen_loc(center);
        prop_assert!((after - anchored).abs() <= 1e-6 * (1.0 + anchored.abs()));
    }

    #[test]
    fn gesture_sequences_never_break_window_invariants(
        axis in horizontal_axis(),
        gestures in proptest::collection::vec(gesture(), 1..20),
    ) {
        let mut axis = axis;
        for gesture in gestures {
            match gesture {
                Gesture::Pan(delta) => axis.pan(delta, 0.0).expect("pan"),
                Gesture::Zoom { scale, center } => {
                    axis.zoom(scale, 1.0, center, 0.0).expect("zoom");
                }
            }
            assert_window_invariants(&axis);
        }
    }

    #[test]
    fn vertical_axes_hold_the_same_invariants(
        (fm, lm) in model_range(),
        (lo, hi) in screen_range(),
        gestures in proptest::collection::vec(gesture(), 1..10),
    ) {
        let mut axis =
            Axis::new(AxisOrientation::Vertical, fm, lm, hi, lo).expect("valid axis");
        for gesture in gestures {
            match gesture {
                Gesture::Pan(delta) => axis.pan(0.0, delta).expect("pan"),
                Gesture::Zoom { scale, center } => {
                    axis.zoom(1.0, scale, 0.0, center).expect("zoom");
                }
            }
            prop_assert!(axis.screen_length() > 0.0);
            prop_assert!(axis.screen_length() <= axis.init_screen_length() + 1e-6);
            // first_screen is the bottom edge for vertical axes.
            prop_assert!(axis.first_screen() <= axis.first_screen_init() + 1e-6);
            prop_assert!(axis.last_screen() >= axis.last_screen_init() - 1e-6);
        }
    }
}
