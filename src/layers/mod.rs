mod points_layer;

pub use points_layer::{PointLayerModel, PointsLayer, TapHandler, TappedPointModel};

use crate::core::axis::Axis;
use crate::core::geometry::{ScreenPoint, ScreenRect};
use crate::render::RenderFrame;

/// Read-only view of the coordinate space handed to layers on every event.
///
/// Layers must not cache axis state across events; they re-fetch it from the
/// context each time, so gesture-driven axis mutation stays with one owner.
#[derive(Debug, Clone, Copy)]
pub struct LayerContext<'a> {
    pub x_axis: &'a Axis,
    pub y_axis: &'a Axis,
    pub inner_frame: ScreenRect,
}

impl LayerContext<'_> {
    /// Screen location of a model-space point under the current windows.
    #[must_use]
    pub fn screen_loc(&self, x_scalar: f64, y_scalar: f64) -> ScreenPoint {
        ScreenPoint::new(
            self.x_axis.screen_loc_for_scalar(x_scalar),
            self.y_axis.screen_loc_for_scalar(y_scalar),
        )
    }
}

/// Deferred-visibility request emitted by a layer at attach time.
///
/// The core never waits: the composing chart records the request and the host
/// scheduler completes it later (or never, if the layer is removed first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRequest {
    pub delay_seconds: f64,
}

/// Lifecycle and transform-event contract for chart layers.
///
/// The composing chart calls these in layer insertion order, so a later layer
/// may assume earlier layers already observed the same event.
pub trait ChartLayer {
    /// Called once when the layer joins a chart with a finalized coordinate space.
    fn chart_initialized(&mut self, ctx: &LayerContext<'_>);

    /// Called after any axis-range-affecting event: zoom, pan, or inner-frame change.
    fn axes_changed(&mut self, ctx: &LayerContext<'_>);

    /// Global-space tap forwarded by the chart.
    fn handle_global_tap(&mut self, ctx: &LayerContext<'_>, location: ScreenPoint) {
        let _ = (ctx, location);
    }

    /// Contributes draw primitives for the current pass.
    fn build_scene(&mut self, ctx: &LayerContext<'_>, frame: &mut RenderFrame) {
        let _ = (ctx, frame);
    }

    /// Clears callback registrations and other host references.
    fn teardown(&mut self) {}

    /// Non-zero when the layer wants to become visible only after a delay.
    fn display_request(&self) -> Option<DisplayRequest> {
        None
    }
}
