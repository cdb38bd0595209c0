use approx::assert_relative_eq;
use chartkit::core::{Axis, AxisOrientation};

#[test]
fn horizontal_axis_matches_reference_scenario() {
    let axis = Axis::new(AxisOrientation::Horizontal, 0.0, 100.0, 0.0, 500.0).expect("valid axis");

    assert_eq!(axis.screen_loc_for_scalar(50.0), 250.0);
    assert_eq!(axis.scalar_for_screen_loc(250.0), 50.0);
    assert_eq!(axis.screen_loc_for_scalar(0.0), 0.0);
    assert_eq!(axis.screen_loc_for_scalar(100.0), 500.0);
}

#[test]
fn round_trip_stays_within_tolerance_across_model_range() {
    let axis =
        Axis::new(AxisOrientation::Horizontal, -40.0, 260.0, 12.5, 987.5).expect("valid axis");

    let mut scalar = -40.0;
    while scalar <= 260.0 {
        let screen = axis.screen_loc_for_scalar(scalar);
        let recovered = axis.scalar_for_screen_loc(screen);
        assert!(
            (recovered - scalar).abs() <= 1e-6,
            "round trip drifted at {scalar}: {recovered}"
        );
        scalar += 0.37;
    }
}

#[test]
fn vertical_axis_maps_growing_model_values_upward() {
    let axis = Axis::new(AxisOrientation::Vertical, 0.0, 200.0, 480.0, 80.0).expect("valid axis");

    assert_eq!(axis.screen_loc_for_scalar(0.0), 480.0);
    assert_eq!(axis.screen_loc_for_scalar(200.0), 80.0);
    assert_relative_eq!(axis.screen_loc_for_scalar(100.0), 280.0, epsilon = 1e-9);
    assert_relative_eq!(axis.scalar_for_screen_loc(280.0), 100.0, epsilon = 1e-9);
}

#[test]
fn degenerate_model_ranges_fail_at_construction() {
    assert!(Axis::new(AxisOrientation::Horizontal, 1.0, 1.0, 0.0, 100.0).is_err());
    assert!(Axis::new(AxisOrientation::Horizontal, 5.0, 1.0, 0.0, 100.0).is_err());
    assert!(Axis::new(AxisOrientation::Vertical, 0.0, f64::NAN, 100.0, 0.0).is_err());
}

#[test]
fn screen_length_follows_orientation() {
    let horizontal =
        Axis::new(AxisOrientation::Horizontal, 0.0, 10.0, 20.0, 320.0).expect("valid axis");
    let vertical = Axis::new(AxisOrientation::Vertical, 0.0, 10.0, 320.0, 20.0).expect("valid axis");
    assert_eq!(horizontal.screen_length(), 300.0);
    assert_eq!(vertical.screen_length(), 300.0);
}
