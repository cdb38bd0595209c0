use tracing::debug;

use crate::core::axis::{Axis, AxisOrientation};
use crate::core::axis_label::AxisLabel;
use crate::core::axis_layer::{AxisLabelsSource, AxisLayer, AxisLayerScene};
use crate::core::axis_values_generator::AxisValuesGenerator;
use crate::core::geometry::{ScreenPoint, ScreenRect};
use crate::core::settings::ChartSettings;
use crate::error::{ChartError, ChartResult};
use crate::render::TextMeasurer;

/// Everything needed to build one axis of a coordinate space.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub first_model: f64,
    pub last_model: f64,
    pub values_generator: AxisValuesGenerator,
    pub labels: AxisLabelsSource,
    pub title: Option<AxisLabel>,
}

/// Composes the X and Y axes plus chart settings into the usable inner
/// drawing frame.
///
/// Axis label space depends on measured labels while content space depends on
/// the outer frame, so construction runs one fixed-point negotiation: build
/// trial axis layers against the padded outer frame, measure their thickness,
/// shrink the inner frame by it, then finalize axis screen ranges against the
/// shrunk frame.
///
/// The space is the single mutation owner of both axes; layers read current
/// axis state through [`Self::x_axis`]/[`Self::y_axis`] on every event rather
/// than caching copies.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSpace {
    chart_frame: ScreenRect,
    inner_frame: ScreenRect,
    settings: ChartSettings,
    x_axis: Axis,
    y_axis: Axis,
    x_layer: AxisLayer,
    y_layer: AxisLayer,
}

impl CoordinateSpace {
    pub fn new(
        chart_frame: ScreenRect,
        settings: ChartSettings,
        x: AxisSpec,
        y: AxisSpec,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<Self> {
        let settings = settings.validate()?;
        chart_frame.validate()?;

        let x_layer = AxisLayer::new(
            AxisOrientation::Horizontal,
            x.values_generator,
            x.labels,
            x.title,
            settings,
        );
        let y_layer = AxisLayer::new(
            AxisOrientation::Vertical,
            y.values_generator,
            y.labels,
            y.title,
            settings,
        );

        let mut space = Self {
            chart_frame,
            inner_frame: chart_frame,
            settings,
            // Placeholder ranges, replaced by the negotiation below.
            x_axis: Axis::new(
                AxisOrientation::Horizontal,
                x.first_model,
                x.last_model,
                chart_frame.min_x(),
                chart_frame.max_x(),
            )?,
            y_axis: Axis::new(
                AxisOrientation::Vertical,
                y.first_model,
                y.last_model,
                chart_frame.max_y(),
                chart_frame.min_y(),
            )?,
            x_layer,
            y_layer,
        };
        space.negotiate(measurer)?;
        Ok(space)
    }

    /// Runs the layout negotiation against the current chart frame.
    /// Existing pan/zoom state is discarded: axes restart at 1x.
    fn negotiate(&mut self, measurer: &dyn TextMeasurer) -> ChartResult<()> {
        let trial = self
            .chart_frame
            .inset(
                self.settings.leading,
                self.settings.top,
                self.settings.trailing,
                self.settings.bottom,
            )
            .validate()?;

        let trial_x = Axis::new(
            AxisOrientation::Horizontal,
            self.x_axis.first_model(),
            self.x_axis.last_model(),
            trial.min_x(),
            trial.max_x(),
        )?;
        let trial_y = Axis::new(
            AxisOrientation::Vertical,
            self.y_axis.first_model(),
            self.y_axis.last_model(),
            trial.max_y(),
            trial.min_y(),
        )?;

        self.x_layer.invalidate_layout();
        self.y_layer.invalidate_layout();
        let y_width = self.y_layer.thickness(&trial_y, measurer);
        let x_height = self.x_layer.thickness(&trial_x, measurer);

        let inner = trial.inset(y_width, 0.0, 0.0, x_height).validate()?;
        debug!(
            y_width,
            x_height,
            inner_width = inner.width,
            inner_height = inner.height,
            "negotiated inner frame"
        );

        self.x_axis = Axis::new(
            AxisOrientation::Horizontal,
            self.x_axis.first_model(),
            self.x_axis.last_model(),
            inner.min_x(),
            inner.max_x(),
        )?;
        self.y_axis = Axis::new(
            AxisOrientation::Vertical,
            self.y_axis.first_model(),
            self.y_axis.last_model(),
            inner.max_y(),
            inner.min_y(),
        )?;
        self.inner_frame = inner;

        // Screen ranges changed, so measured row selections are stale.
        self.x_layer.invalidate_layout();
        self.y_layer.invalidate_layout();
        self.x_layer.set_line(
            ScreenPoint::new(inner.min_x(), inner.max_y()),
            ScreenPoint::new(inner.max_x(), inner.max_y()),
        );
        self.y_layer.set_line(
            ScreenPoint::new(inner.min_x(), inner.max_y()),
            ScreenPoint::new(inner.min_x(), inner.min_y()),
        );
        Ok(())
    }

    /// Recomputes the whole layout for a new outer frame (e.g. rotation).
    pub fn set_chart_frame(
        &mut self,
        chart_frame: ScreenRect,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<()> {
        chart_frame.validate()?;
        self.chart_frame = chart_frame;
        self.negotiate(measurer)
    }

    #[must_use]
    pub fn chart_frame(&self) -> ScreenRect {
        self.chart_frame
    }

    #[must_use]
    pub fn settings(&self) -> ChartSettings {
        self.settings
    }

    #[must_use]
    pub fn inner_frame(&self) -> ScreenRect {
        self.inner_frame
    }

    #[must_use]
    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    /// Screen location of a model-space point under the current windows.
    #[must_use]
    pub fn screen_loc(&self, x_scalar: f64, y_scalar: f64) -> ScreenPoint {
        ScreenPoint::new(
            self.x_axis.screen_loc_for_scalar(x_scalar),
            self.y_axis.screen_loc_for_scalar(y_scalar),
        )
    }

    /// Both components are validated before either axis is touched, so a
    /// rejected gesture leaves the space unchanged.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) -> ChartResult<()> {
        if !delta_x.is_finite() || !delta_y.is_finite() {
            return Err(ChartError::InvalidData(
                "pan deltas must be finite".to_owned(),
            ));
        }
        self.x_axis.pan(delta_x, delta_y)?;
        self.y_axis.pan(delta_x, delta_y)
    }

    pub fn zoom(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        center_x: f64,
        center_y: f64,
    ) -> ChartResult<()> {
        if !scale_x.is_finite() || scale_x <= 0.0 || !scale_y.is_finite() || scale_y <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom scales must be finite and > 0".to_owned(),
            ));
        }
        if !center_x.is_finite() || !center_y.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom center must be finite".to_owned(),
            ));
        }
        self.x_axis.zoom(scale_x, scale_y, center_x, center_y)?;
        self.y_axis.zoom(scale_x, scale_y, center_x, center_y)?;
        // Screen lengths changed, so non-overlap tick selection is stale.
        self.x_layer.invalidate_layout();
        self.y_layer.invalidate_layout();
        Ok(())
    }

    /// Draw instructions for both axes under the current windows.
    pub fn axis_scenes(&mut self, measurer: &dyn TextMeasurer) -> (AxisLayerScene, AxisLayerScene) {
        let x_scene = self.x_layer.build_scene(&self.x_axis, measurer);
        let y_scene = self.y_layer.build_scene(&self.y_axis, measurer);
        (x_scene, y_scene)
    }
}

/// Convenience spec for a plain numeric axis with fixed tick values.
impl AxisSpec {
    pub fn numeric(
        first_model: f64,
        last_model: f64,
        values_generator: AxisValuesGenerator,
        labels: AxisLabelsSource,
    ) -> Self {
        Self {
            first_model,
            last_model,
            values_generator,
            labels,
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: AxisLabel) -> Self {
        self.title = Some(title);
        self
    }
}
