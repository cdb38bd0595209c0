use tracing::trace;

use crate::core::chart_point::ChartPoint;
use crate::core::geometry::ScreenPoint;
use crate::layers::{ChartLayer, DisplayRequest, LayerContext};

/// Tolerance for "exact" screen-coordinate matches. Gesture math routinely
/// leaves sub-pixel noise, so strict float equality would never match.
pub const SCREEN_LOC_EPSILON: f64 = 1e-4;

const DEFAULT_TAP_RADIUS: f64 = 30.0;

/// Cached screen state for one chart point.
///
/// `index` is the point's position in the original input collection and stays
/// stable across any number of transform events; `screen_loc` is recomputed
/// on every viewport-affecting event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLayerModel {
    pub point: ChartPoint,
    pub index: usize,
    pub screen_loc: ScreenPoint,
}

/// One tap-query hit: the model snapshot plus its exact distance to the tap.
#[derive(Debug, Clone, PartialEq)]
pub struct TappedPointModel {
    pub model: PointLayerModel,
    pub distance: f64,
}

pub type TapHandler = Box<dyn FnMut(&[TappedPointModel])>;

/// Generic engine keeping a collection of [`PointLayerModel`] synchronized
/// with the coordinate space. Concrete visual layers consume the cached
/// screen locations; this layer itself draws nothing.
pub struct PointsLayer {
    points: Vec<ChartPoint>,
    models: Vec<PointLayerModel>,
    tap_radius: f64,
    tap_handler: Option<TapHandler>,
    display_delay_seconds: f64,
    min_x_space: Option<Option<f64>>,
    min_y_space: Option<Option<f64>>,
}

impl std::fmt::Debug for PointsLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointsLayer")
            .field("points", &self.points.len())
            .field("models", &self.models.len())
            .field("tap_radius", &self.tap_radius)
            .field("has_tap_handler", &self.tap_handler.is_some())
            .field("display_delay_seconds", &self.display_delay_seconds)
            .finish()
    }
}

impl PointsLayer {
    #[must_use]
    pub fn new(points: Vec<ChartPoint>) -> Self {
        Self {
            points,
            models: Vec::new(),
            tap_radius: DEFAULT_TAP_RADIUS,
            tap_handler: None,
            display_delay_seconds: 0.0,
            min_x_space: None,
            min_y_space: None,
        }
    }

    #[must_use]
    pub fn with_tap_handler(mut self, radius: f64, handler: TapHandler) -> Self {
        self.tap_radius = radius;
        self.tap_handler = Some(handler);
        self
    }

    /// Defers visibility: the layer's models exist immediately but the chart
    /// keeps the layer undrawn until the host completes the request.
    #[must_use]
    pub fn with_display_delay(mut self, seconds: f64) -> Self {
        self.display_delay_seconds = seconds;
        self
    }

    #[must_use]
    pub fn models(&self) -> &[PointLayerModel] {
        &self.models
    }

    #[must_use]
    pub fn screen_locs(&self) -> Vec<ScreenPoint> {
        self.models.iter().map(|model| model.screen_loc).collect()
    }

    /// Replaces the point collection. Models are rebuilt on the next
    /// `axes_changed`/`chart_initialized`, and cached spacing is invalidated.
    pub fn set_points(&mut self, points: Vec<ChartPoint>) {
        self.points = points;
        self.models.clear();
        self.min_x_space = None;
        self.min_y_space = None;
    }

    fn rebuild_models(&mut self, ctx: &LayerContext<'_>) {
        self.models = self
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| PointLayerModel {
                point: point.clone(),
                index,
                screen_loc: ctx.screen_loc(point.x().scalar(), point.y().scalar()),
            })
            .collect();
        // A spacing query may have run between set_points and this rebuild
        // and cached the empty-model answer.
        self.min_x_space = None;
        self.min_y_space = None;
    }

    /// Every model within `radius` of `center`, paired with its exact
    /// distance, in discovery (index) order. Callers that need nearest-first
    /// must sort themselves.
    #[must_use]
    pub fn tapped_models(&self, center: ScreenPoint, radius: f64) -> Vec<TappedPointModel> {
        self.models
            .iter()
            .filter_map(|model| {
                let distance = model.screen_loc.distance(center);
                (distance < radius).then(|| TappedPointModel {
                    model: model.clone(),
                    distance,
                })
            })
            .collect()
    }

    #[must_use]
    pub fn points_for_screen_loc(&self, screen_loc: ScreenPoint) -> Vec<&ChartPoint> {
        self.filter_points(|loc| {
            (loc.x - screen_loc.x).abs() <= SCREEN_LOC_EPSILON
                && (loc.y - screen_loc.y).abs() <= SCREEN_LOC_EPSILON
        })
    }

    #[must_use]
    pub fn points_for_screen_loc_x(&self, x: f64) -> Vec<&ChartPoint> {
        self.filter_points(|loc| (loc.x - x).abs() <= SCREEN_LOC_EPSILON)
    }

    #[must_use]
    pub fn points_for_screen_loc_y(&self, y: f64) -> Vec<&ChartPoint> {
        self.filter_points(|loc| (loc.y - y).abs() <= SCREEN_LOC_EPSILON)
    }

    fn filter_points(&self, include: impl Fn(ScreenPoint) -> bool) -> Vec<&ChartPoint> {
        self.models
            .iter()
            .filter(|model| include(model.screen_loc))
            .map(|model| &model.point)
            .collect()
    }

    /// Smallest absolute screen gap between consecutive (index-order) points
    /// on the x axis. `None` with fewer than two points. Cached for the
    /// layer's lifetime; replaced points invalidate the cache.
    pub fn min_x_screen_space(&mut self) -> Option<f64> {
        if let Some(cached) = self.min_x_space {
            return cached;
        }
        let computed = Self::min_axis_screen_space(&self.models, |loc| loc.x);
        self.min_x_space = Some(computed);
        computed
    }

    /// Same as [`Self::min_x_screen_space`] for the y axis.
    pub fn min_y_screen_space(&mut self) -> Option<f64> {
        if let Some(cached) = self.min_y_space {
            return cached;
        }
        let computed = Self::min_axis_screen_space(&self.models, |loc| loc.y);
        self.min_y_space = Some(computed);
        computed
    }

    fn min_axis_screen_space(
        models: &[PointLayerModel],
        dim: impl Fn(ScreenPoint) -> f64,
    ) -> Option<f64> {
        if models.len() < 2 {
            return None;
        }
        let mut min_space = f64::INFINITY;
        let mut previous = dim(models[0].screen_loc);
        for model in &models[1..] {
            let current = dim(model.screen_loc);
            min_space = min_space.min((current - previous).abs());
            previous = current;
        }
        Some(min_space)
    }
}

impl ChartLayer for PointsLayer {
    fn chart_initialized(&mut self, ctx: &LayerContext<'_>) {
        self.rebuild_models(ctx);
        trace!(models = self.models.len(), "points layer initialized");
    }

    fn axes_changed(&mut self, ctx: &LayerContext<'_>) {
        if self.models.len() == self.points.len() {
            for model in &mut self.models {
                model.screen_loc = ctx.screen_loc(model.point.x().scalar(), model.point.y().scalar());
            }
        } else {
            // Points were replaced since the last event.
            self.rebuild_models(ctx);
        }
    }

    fn handle_global_tap(&mut self, _ctx: &LayerContext<'_>, location: ScreenPoint) {
        if self.tap_handler.is_none() {
            return;
        }
        let tapped = self.tapped_models(location, self.tap_radius);
        if let Some(mut handler) = self.tap_handler.take() {
            handler(&tapped);
            self.tap_handler = Some(handler);
        }
    }

    fn teardown(&mut self) {
        self.tap_handler = None;
    }

    fn display_request(&self) -> Option<DisplayRequest> {
        (self.display_delay_seconds > 0.0).then_some(DisplayRequest {
            delay_seconds: self.display_delay_seconds,
        })
    }
}
