use approx::assert_relative_eq;
use chartkit::core::geometry::ScreenPoint;
use chartkit::core::{
    Axis, AxisLabel, AxisLabelsSource, AxisLayer, AxisOrientation, AxisValuesGenerator,
    ChartSettings, FixedValues, LabelSettings,
};
use chartkit::render::{TextHAlign, UniformGlyphMeasurer};
use smallvec::smallvec;

fn fixed(values: Vec<f64>) -> AxisValuesGenerator {
    AxisValuesGenerator::Fixed(FixedValues::new(values).expect("values"))
}

fn horizontal_axis() -> Axis {
    Axis::new(AxisOrientation::Horizontal, 0.0, 100.0, 0.0, 400.0).expect("axis")
}

#[test]
fn single_row_thickness_adds_spacing_stroke_and_title_gap() {
    let measurer = UniformGlyphMeasurer::default();
    let axis = horizontal_axis();
    let mut layer = AxisLayer::new(
        AxisOrientation::Horizontal,
        fixed(vec![0.0, 50.0, 100.0]),
        AxisLabelsSource::new(LabelSettings::default()),
        None,
        ChartSettings::default(),
    );

    // One row of 12px labels: 12 * 1.2 line height, plus labels_spacing (5),
    // stroke (1), labels-to-axis gap (5), and the title gap (8) with no title.
    let expected = (12.0 * 1.2 + 5.0) + 1.0 + 5.0 + 8.0;
    assert_relative_eq!(layer.thickness(&axis, &measurer), expected, epsilon = 1e-9);
}

#[test]
fn title_extent_grows_thickness_by_its_line_height() {
    let measurer = UniformGlyphMeasurer::default();
    let axis = horizontal_axis();
    let settings = ChartSettings::default();

    let mut untitled = AxisLayer::new(
        AxisOrientation::Horizontal,
        fixed(vec![0.0, 100.0]),
        AxisLabelsSource::new(LabelSettings::default()),
        None,
        settings,
    );
    let mut titled = AxisLayer::new(
        AxisOrientation::Horizontal,
        fixed(vec![0.0, 100.0]),
        AxisLabelsSource::new(LabelSettings::default()),
        Some(AxisLabel::new("elapsed", LabelSettings::default())),
        settings,
    );

    let delta = titled.thickness(&axis, &measurer) - untitled.thickness(&axis, &measurer);
    assert_relative_eq!(delta, 12.0 * 1.2, epsilon = 1e-9);
}

#[test]
fn horizontal_scene_places_rows_below_the_line_in_order() {
    let measurer = UniformGlyphMeasurer::default();
    let axis = horizontal_axis();

    let mut labels = AxisLabelsSource::new(LabelSettings::default());
    labels.insert(
        50.0,
        smallvec![
            AxisLabel::new("Mar", LabelSettings::default()),
            AxisLabel::new("2026", LabelSettings::default()),
        ],
    );
    let mut layer = AxisLayer::new(
        AxisOrientation::Horizontal,
        fixed(vec![50.0]),
        labels,
        None,
        ChartSettings::default(),
    );
    layer.set_line(ScreenPoint::new(0.0, 300.0), ScreenPoint::new(400.0, 300.0));

    let scene = layer.build_scene(&axis, &measurer);
    assert_eq!(scene.labels.len(), 2);

    // Both rows share the tick x and are centered on it.
    let tick_x = axis.screen_loc_for_scalar(50.0);
    for text in &scene.labels {
        assert_relative_eq!(text.x, tick_x, epsilon = 1e-9);
        assert_eq!(text.h_align, TextHAlign::Center);
    }

    // Row 0 sits just below the line; row 1 is offset by row 0's extent plus
    // labels_spacing.
    let labels_top = 300.0 + 1.0 + 5.0;
    assert_relative_eq!(scene.labels[0].y, labels_top, epsilon = 1e-9);
    assert_relative_eq!(
        scene.labels[1].y,
        labels_top + 12.0 * 1.2 + 5.0,
        epsilon = 1e-9
    );
}

#[test]
fn vertical_scene_right_aligns_labels_left_of_the_line() {
    let measurer = UniformGlyphMeasurer::default();
    let axis = Axis::new(AxisOrientation::Vertical, 0.0, 100.0, 300.0, 0.0).expect("axis");

    let mut layer = AxisLayer::new(
        AxisOrientation::Vertical,
        fixed(vec![0.0, 100.0]),
        AxisLabelsSource::new(LabelSettings::default()),
        None,
        ChartSettings::default(),
    );
    layer.set_line(ScreenPoint::new(60.0, 300.0), ScreenPoint::new(60.0, 0.0));

    let scene = layer.build_scene(&axis, &measurer);
    assert_eq!(scene.labels.len(), 2);

    let labels_right = 60.0 - 1.0 - 5.0;
    for text in &scene.labels {
        assert_eq!(text.h_align, TextHAlign::Right);
        assert_relative_eq!(text.x, labels_right, epsilon = 1e-9);
    }

    // Tick at scalar 0 maps to the bottom of the screen range; the label box
    // is vertically centered on it.
    let tick_y = axis.screen_loc_for_scalar(0.0);
    assert_relative_eq!(
        scene.labels[0].y,
        tick_y - (12.0 * 1.2) / 2.0,
        epsilon = 1e-9
    );
}

#[test]
fn hidden_labels_keep_their_row_slot_but_emit_no_text() {
    let measurer = UniformGlyphMeasurer::default();
    let axis = horizontal_axis();

    let mut hidden_top = AxisLabel::new("top", LabelSettings::default());
    hidden_top.hidden = true;
    let mut labels = AxisLabelsSource::new(LabelSettings::default());
    labels.insert(
        50.0,
        smallvec![hidden_top, AxisLabel::new("bottom", LabelSettings::default())],
    );

    let mut layer = AxisLayer::new(
        AxisOrientation::Horizontal,
        fixed(vec![50.0]),
        labels,
        None,
        ChartSettings::default(),
    );
    layer.set_line(ScreenPoint::new(0.0, 300.0), ScreenPoint::new(400.0, 300.0));

    let scene = layer.build_scene(&axis, &measurer);
    assert_eq!(scene.labels.len(), 1);
    assert_eq!(scene.labels[0].text, "bottom");

    // Row 0 collapsed to zero extent, so the surviving row still pays only
    // the inter-row spacing above it.
    let labels_top = 300.0 + 1.0 + 5.0;
    assert_relative_eq!(scene.labels[0].y, labels_top + 5.0, epsilon = 1e-9);
}

#[test]
fn horizontal_title_is_centered_under_the_label_block() {
    let measurer = UniformGlyphMeasurer::default();
    let axis = horizontal_axis();

    let mut layer = AxisLayer::new(
        AxisOrientation::Horizontal,
        fixed(vec![0.0, 100.0]),
        AxisLabelsSource::new(LabelSettings::default()),
        Some(AxisLabel::new("time", LabelSettings::default())),
        ChartSettings::default(),
    );
    layer.set_line(ScreenPoint::new(0.0, 300.0), ScreenPoint::new(400.0, 300.0));

    let scene = layer.build_scene(&axis, &measurer);
    let title = scene.title.expect("title text");
    assert_relative_eq!(title.x, 200.0, epsilon = 1e-9);

    let labels_top = 300.0 + 1.0 + 5.0;
    let labels_total = 12.0 * 1.2 + 5.0;
    assert_relative_eq!(title.y, labels_top + labels_total + 8.0, epsilon = 1e-9);
}
