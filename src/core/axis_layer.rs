use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::{SmallVec, smallvec};

use crate::core::axis::{Axis, AxisOrientation};
use crate::core::axis_label::{AxisLabel, LabelSettings};
use crate::core::axis_value::{AxisValue, format_scalar};
use crate::core::axis_values_generator::AxisValuesGenerator;
use crate::core::geometry::ScreenPoint;
use crate::core::settings::ChartSettings;
use crate::render::{Color, LinePrimitive, TextHAlign, TextMeasurer, TextPrimitive};

/// Stack of labels rendered on one tick. Most ticks carry a single label.
pub type LabelStack = SmallVec<[AxisLabel; 2]>;

/// Maps axis scalars to their stacked labels.
///
/// Scalars without an explicit entry get a plain-formatted label on first
/// access, so repeated layout passes reuse the same measured instances.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabelsSource {
    by_scalar: IndexMap<OrderedFloat<f64>, LabelStack>,
    default_settings: LabelSettings,
}

impl AxisLabelsSource {
    #[must_use]
    pub fn new(default_settings: LabelSettings) -> Self {
        Self {
            by_scalar: IndexMap::new(),
            default_settings,
        }
    }

    /// One label per axis value, using the value's display label.
    #[must_use]
    pub fn from_axis_values(values: &[AxisValue], settings: LabelSettings) -> Self {
        let mut source = Self::new(settings);
        for value in values {
            source.insert(
                value.scalar(),
                smallvec![AxisLabel::new(value.display_label(), settings)],
            );
        }
        source
    }

    pub fn insert(&mut self, scalar: f64, labels: LabelStack) {
        self.by_scalar.insert(OrderedFloat(scalar), labels);
    }

    pub fn labels_for(&mut self, scalar: f64) -> &mut LabelStack {
        let settings = self.default_settings;
        self.by_scalar
            .entry(OrderedFloat(scalar))
            .or_insert_with(|| smallvec![AxisLabel::new(format_scalar(scalar), settings)])
    }

    pub fn invalidate_measurements(&mut self) {
        for stack in self.by_scalar.values_mut() {
            for label in stack {
                label.invalidate_measurement();
            }
        }
    }
}

/// Positioned draw instructions for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayerScene {
    pub line: LinePrimitive,
    pub labels: Vec<TextPrimitive>,
    pub title: Option<TextPrimitive>,
}

/// Lays out tick labels (with multi-row stacking), the axis line, and the
/// title for one axis, and reports the total thickness the axis needs.
///
/// Row extents are memoized; `invalidate_layout` must be called whenever the
/// axis screen length or the label set changes. Hiding a label after a layout
/// pass deliberately does not shift sibling rows until the next invalidation.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayer {
    orientation: AxisOrientation,
    values_generator: AxisValuesGenerator,
    labels: AxisLabelsSource,
    title: Option<AxisLabel>,
    settings: ChartSettings,
    origin: ScreenPoint,
    end: ScreenPoint,
    row_extents: Option<Vec<f64>>,
}

impl AxisLayer {
    #[must_use]
    pub fn new(
        orientation: AxisOrientation,
        values_generator: AxisValuesGenerator,
        labels: AxisLabelsSource,
        title: Option<AxisLabel>,
        settings: ChartSettings,
    ) -> Self {
        Self {
            orientation,
            values_generator,
            labels,
            title,
            settings,
            origin: ScreenPoint::default(),
            end: ScreenPoint::default(),
            row_extents: None,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    /// Axis line endpoints in global screen space, assigned by the
    /// coordinate space once the inner frame is known.
    pub fn set_line(&mut self, origin: ScreenPoint, end: ScreenPoint) {
        self.origin = origin;
        self.end = end;
    }

    pub fn invalidate_layout(&mut self) {
        self.row_extents = None;
    }

    /// Per-row maximum label extent across all ticks occupying that row.
    /// Hidden labels are skipped during aggregation; rows they occupied
    /// before being hidden keep their slot until the next invalidation.
    pub fn row_extents(&mut self, axis: &Axis, measurer: &dyn TextMeasurer) -> Vec<f64> {
        if let Some(extents) = &self.row_extents {
            return extents.clone();
        }

        let orientation = self.orientation;
        let ticks = self.values_generator.generate(axis);
        let mut extents: Vec<f64> = Vec::new();
        for scalar in &ticks {
            let stack = self.labels.labels_for(*scalar);
            for (row, label) in stack.iter_mut().enumerate() {
                if row == extents.len() {
                    extents.push(0.0);
                }
                if label.hidden {
                    continue;
                }
                let size = label.measured_size(measurer);
                let extent = match orientation {
                    AxisOrientation::Horizontal => size.height,
                    AxisOrientation::Vertical => size.width,
                };
                extents[row] = extents[row].max(extent);
            }
        }

        self.row_extents = Some(extents.clone());
        extents
    }

    fn labels_total_extent(&mut self, axis: &Axis, measurer: &dyn TextMeasurer) -> f64 {
        self.row_extents(axis, measurer)
            .iter()
            .map(|extent| extent + self.settings.labels_spacing)
            .sum()
    }

    fn title_extent(&mut self, measurer: &dyn TextMeasurer) -> f64 {
        let orientation = self.orientation;
        match &mut self.title {
            Some(title) => {
                let size = title.measured_size(measurer);
                match orientation {
                    AxisOrientation::Horizontal => size.height,
                    AxisOrientation::Vertical => size.width,
                }
            }
            None => 0.0,
        }
    }

    /// Total extent the axis claims from the chart frame: label rows plus
    /// spacing constants, stroke width, and title extent. Feeds the
    /// coordinate-space layout negotiation.
    pub fn thickness(&mut self, axis: &Axis, measurer: &dyn TextMeasurer) -> f64 {
        let labels_to_axis = match self.orientation {
            AxisOrientation::Horizontal => self.settings.labels_to_axis_spacing_x,
            AxisOrientation::Vertical => self.settings.labels_to_axis_spacing_y,
        };
        self.labels_total_extent(axis, measurer)
            + self.settings.axis_stroke_width
            + labels_to_axis
            + self.settings.axis_title_labels_to_labels_spacing
            + self.title_extent(measurer)
    }

    fn row_offset(row_extents: &[f64], row: usize, spacing: f64) -> f64 {
        row_extents[..row]
            .iter()
            .map(|extent| extent + spacing)
            .sum()
    }

    /// Produces positioned draw instructions for ticks, title, and axis line.
    /// Hidden labels keep their slot but emit no text.
    pub fn build_scene(&mut self, axis: &Axis, measurer: &dyn TextMeasurer) -> AxisLayerScene {
        match self.orientation {
            AxisOrientation::Horizontal => self.build_horizontal_scene(axis, measurer),
            AxisOrientation::Vertical => self.build_vertical_scene(axis, measurer),
        }
    }

    fn build_horizontal_scene(
        &mut self,
        axis: &Axis,
        measurer: &dyn TextMeasurer,
    ) -> AxisLayerScene {
        let row_extents = self.row_extents(axis, measurer);
        let spacing = self.settings.labels_spacing;
        let labels_top =
            self.origin.y + self.settings.axis_stroke_width + self.settings.labels_to_axis_spacing_x;

        let mut texts = Vec::new();
        for scalar in self.values_generator.generate(axis) {
            let tick_x = axis.screen_loc_for_scalar(scalar);
            let stack = self.labels.labels_for(scalar);
            for (row, label) in stack.iter().enumerate() {
                if label.hidden {
                    continue;
                }
                let y = labels_top + Self::row_offset(&row_extents, row, spacing);
                texts.push(
                    TextPrimitive::new(
                        label.text.clone(),
                        tick_x,
                        y,
                        label.settings.font_size_px,
                        Color::black(),
                        TextHAlign::Center,
                    )
                    .with_rotation(label.settings.rotation_degrees),
                );
            }
        }

        let labels_total = self.labels_total_extent(axis, measurer);
        let title = self.title.as_mut().map(|title| {
            let y = labels_top + labels_total + self.settings.axis_title_labels_to_labels_spacing;
            TextPrimitive::new(
                title.text.clone(),
                (self.origin.x + self.end.x) / 2.0,
                y,
                title.settings.font_size_px,
                Color::black(),
                TextHAlign::Center,
            )
            .with_rotation(title.settings.rotation_degrees)
        });

        AxisLayerScene {
            line: LinePrimitive::new(
                self.origin.x,
                self.origin.y,
                self.end.x,
                self.end.y,
                self.settings.axis_stroke_width,
                Color::black(),
            ),
            labels: texts,
            title,
        }
    }

    fn build_vertical_scene(&mut self, axis: &Axis, measurer: &dyn TextMeasurer) -> AxisLayerScene {
        let row_extents = self.row_extents(axis, measurer);
        let spacing = self.settings.labels_spacing;
        let labels_right =
            self.origin.x - self.settings.axis_stroke_width - self.settings.labels_to_axis_spacing_y;

        let mut texts = Vec::new();
        for scalar in self.values_generator.generate(axis) {
            let tick_y = axis.screen_loc_for_scalar(scalar);
            let stack = self.labels.labels_for(scalar);
            for (row, label) in stack.iter_mut().enumerate() {
                if label.hidden {
                    continue;
                }
                let size = label.measured_size(measurer);
                let x = labels_right - Self::row_offset(&row_extents, row, spacing);
                texts.push(
                    TextPrimitive::new(
                        label.text.clone(),
                        x,
                        tick_y - size.height / 2.0,
                        label.settings.font_size_px,
                        Color::black(),
                        TextHAlign::Right,
                    )
                    .with_rotation(label.settings.rotation_degrees),
                );
            }
        }

        let labels_total = self.labels_total_extent(axis, measurer);
        let title = self.title.as_mut().map(|title| {
            let x = labels_right - labels_total - self.settings.axis_title_labels_to_labels_spacing;
            TextPrimitive::new(
                title.text.clone(),
                x,
                (self.origin.y + self.end.y) / 2.0,
                title.settings.font_size_px,
                Color::black(),
                TextHAlign::Center,
            )
            .with_rotation(title.settings.rotation_degrees)
        });

        AxisLayerScene {
            line: LinePrimitive::new(
                self.origin.x,
                self.origin.y,
                self.end.x,
                self.end.y,
                self.settings.axis_stroke_width,
                Color::black(),
            ),
            labels: texts,
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::{AxisLabelsSource, AxisLayer};
    use crate::core::axis::{Axis, AxisOrientation};
    use crate::core::axis_label::{AxisLabel, LabelSettings};
    use crate::core::axis_values_generator::{AxisValuesGenerator, FixedValues};
    use crate::core::settings::ChartSettings;
    use crate::render::UniformGlyphMeasurer;

    fn fixed_generator(values: Vec<f64>) -> AxisValuesGenerator {
        AxisValuesGenerator::Fixed(FixedValues::new(values).expect("values"))
    }

    #[test]
    fn row_extents_take_max_across_ticks() {
        let measurer = UniformGlyphMeasurer::default();
        let axis = Axis::new(AxisOrientation::Horizontal, 0.0, 10.0, 0.0, 300.0).expect("axis");

        let mut labels = AxisLabelsSource::new(LabelSettings::default());
        labels.insert(
            0.0,
            smallvec![
                AxisLabel::new("a", LabelSettings::default()),
                AxisLabel::new(
                    "tall",
                    LabelSettings {
                        font_size_px: 20.0,
                        ..LabelSettings::default()
                    }
                ),
            ],
        );
        labels.insert(10.0, smallvec![AxisLabel::new("b", LabelSettings::default())]);

        let mut layer = AxisLayer::new(
            AxisOrientation::Horizontal,
            fixed_generator(vec![0.0, 10.0]),
            labels,
            None,
            ChartSettings::default(),
        );

        let extents = layer.row_extents(&axis, &measurer);
        assert_eq!(extents.len(), 2);
        assert!((extents[0] - 12.0 * 1.2).abs() <= 1e-9);
        assert!((extents[1] - 20.0 * 1.2).abs() <= 1e-9);
    }

    #[test]
    fn hiding_after_layout_does_not_shift_rows_until_invalidated() {
        let measurer = UniformGlyphMeasurer::default();
        let axis = Axis::new(AxisOrientation::Horizontal, 0.0, 10.0, 0.0, 300.0).expect("axis");

        let mut labels = AxisLabelsSource::new(LabelSettings::default());
        labels.insert(
            5.0,
            smallvec![
                AxisLabel::new("top", LabelSettings::default()),
                AxisLabel::new("bottom", LabelSettings::default()),
            ],
        );
        let mut layer = AxisLayer::new(
            AxisOrientation::Horizontal,
            fixed_generator(vec![5.0]),
            labels,
            None,
            ChartSettings::default(),
        );

        let before = layer.row_extents(&axis, &measurer);
        layer.labels.labels_for(5.0)[0].hidden = true;
        assert_eq!(layer.row_extents(&axis, &measurer), before);

        layer.invalidate_layout();
        let after = layer.row_extents(&axis, &measurer);
        assert_eq!(after[0], 0.0);
    }
}
