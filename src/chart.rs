use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::coord_space::CoordinateSpace;
use crate::core::geometry::{ScreenPoint, ScreenRect};
use crate::error::{ChartError, ChartResult};
use crate::interaction::GestureEvent;
use crate::layers::{ChartLayer, DisplayRequest, LayerContext};
use crate::render::{RenderFrame, TextMeasurer};

/// Handle for one layer registered with a [`Chart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(u64);

impl LayerId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

struct LayerEntry {
    layer: Box<dyn ChartLayer>,
    visible: bool,
}

/// Orchestrates an ordered list of layers over one coordinate space.
///
/// Layers are initialized and notified in insertion order; the chart is the
/// only gesture-handling owner of the axes and forwards fresh axis state to
/// layers on every transform-affecting event.
pub struct Chart {
    coord_space: CoordinateSpace,
    layers: IndexMap<LayerId, LayerEntry>,
    next_layer_id: u64,
    pending_display: Vec<(LayerId, DisplayRequest)>,
}

impl Chart {
    #[must_use]
    pub fn new(coord_space: CoordinateSpace) -> Self {
        Self {
            coord_space,
            layers: IndexMap::new(),
            next_layer_id: 0,
            pending_display: Vec::new(),
        }
    }

    #[must_use]
    pub fn coord_space(&self) -> &CoordinateSpace {
        &self.coord_space
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_layer_visible(&self, id: LayerId) -> Option<bool> {
        self.layers.get(&id).map(|entry| entry.visible)
    }

    fn context(coord_space: &CoordinateSpace) -> LayerContext<'_> {
        LayerContext {
            x_axis: coord_space.x_axis(),
            y_axis: coord_space.y_axis(),
            inner_frame: coord_space.inner_frame(),
        }
    }

    /// Attaches a layer, initializing it against the finalized coordinate
    /// space. A non-zero display request keeps the layer undrawn until the
    /// host completes it via [`Self::complete_display`].
    pub fn add_layer(&mut self, mut layer: Box<dyn ChartLayer>) -> LayerId {
        let id = LayerId(self.next_layer_id);
        self.next_layer_id += 1;

        let ctx = Self::context(&self.coord_space);
        layer.chart_initialized(&ctx);

        let request = layer.display_request();
        let visible = request.is_none();
        if let Some(request) = request {
            self.pending_display.push((id, request));
        }
        self.layers.insert(id, LayerEntry { layer, visible });
        debug!(layer = id.raw(), deferred = !visible, "layer added");
        id
    }

    /// Detaches and tears down a layer. Any pending display request is
    /// voided so no deferred callback can fire on a removed layer.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        let Some(mut entry) = self.layers.shift_remove(&id) else {
            return false;
        };
        entry.layer.teardown();
        self.pending_display.retain(|(pending, _)| *pending != id);
        debug!(layer = id.raw(), "layer removed");
        true
    }

    /// Hands pending deferred-display requests to the host scheduler.
    pub fn take_display_requests(&mut self) -> Vec<(LayerId, DisplayRequest)> {
        std::mem::take(&mut self.pending_display)
    }

    /// Completes a deferred display. Returns `false` when the layer no
    /// longer exists, in which case the completion is a harmless no-op.
    pub fn complete_display(&mut self, id: LayerId) -> bool {
        match self.layers.get_mut(&id) {
            Some(entry) => {
                entry.visible = true;
                true
            }
            None => false,
        }
    }

    fn notify_axes_changed(&mut self) {
        let ctx = Self::context(&self.coord_space);
        for entry in self.layers.values_mut() {
            entry.layer.axes_changed(&ctx);
        }
    }

    /// Applies a pan delta to both axes, honoring the pan gate, then
    /// notifies every layer in order.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) -> ChartResult<()> {
        if !self.coord_space.settings().zoom_pan.pan_enabled {
            trace!("pan ignored: panning disabled");
            return Ok(());
        }
        self.coord_space.pan(delta_x, delta_y)?;
        self.notify_axes_changed();
        Ok(())
    }

    /// Applies an anchored zoom to both axes, honoring the zoom gate and the
    /// configured zoom ceiling, then notifies every layer in order.
    pub fn zoom(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        center_x: f64,
        center_y: f64,
    ) -> ChartResult<()> {
        let zoom_pan = self.coord_space.settings().zoom_pan;
        if !zoom_pan.zoom_enabled {
            trace!("zoom ignored: zooming disabled");
            return Ok(());
        }
        let (scale_x, scale_y) = match zoom_pan.max_zoom {
            Some(max_zoom) => (
                clamp_scale(scale_x, self.coord_space.x_axis().zoom_factor(), max_zoom),
                clamp_scale(scale_y, self.coord_space.y_axis().zoom_factor(), max_zoom),
            ),
            None => (scale_x, scale_y),
        };
        self.coord_space.zoom(scale_x, scale_y, center_x, center_y)?;
        self.notify_axes_changed();
        Ok(())
    }

    /// Relayouts against a new outer frame (e.g. rotation) and notifies
    /// every layer. Pan/zoom state resets to 1x.
    pub fn set_chart_frame(
        &mut self,
        chart_frame: ScreenRect,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<()> {
        self.coord_space.set_chart_frame(chart_frame, measurer)?;
        self.notify_axes_changed();
        Ok(())
    }

    /// Forwards a global-space tap to every layer in order.
    pub fn handle_tap(&mut self, location: ScreenPoint) {
        let ctx = Self::context(&self.coord_space);
        for entry in self.layers.values_mut() {
            entry.layer.handle_global_tap(&ctx, location);
        }
    }

    /// Dispatches one decoded gesture.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> ChartResult<()> {
        match event.validate()? {
            GestureEvent::Pan { delta_x, delta_y } => self.pan(delta_x, delta_y),
            GestureEvent::Zoom {
                scale_x,
                scale_y,
                center_x,
                center_y,
            } => self.zoom(scale_x, scale_y, center_x, center_y),
            GestureEvent::Tap { x, y } => {
                self.handle_tap(ScreenPoint::new(x, y));
                Ok(())
            }
        }
    }

    /// Materializes one draw pass: axis scenes first, then visible content
    /// layers in insertion order.
    pub fn build_frame(&mut self, measurer: &dyn TextMeasurer) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.coord_space.chart_frame());

        let (x_scene, y_scene) = self.coord_space.axis_scenes(measurer);
        for scene in [x_scene, y_scene] {
            frame.push_line(scene.line);
            for label in scene.labels {
                frame.push_text(label);
            }
            if let Some(title) = scene.title {
                frame.push_text(title);
            }
        }

        let ctx = Self::context(&self.coord_space);
        for entry in self.layers.values_mut() {
            if entry.visible {
                entry.layer.build_scene(&ctx, &mut frame);
            }
        }

        frame.validate()?;
        Ok(frame)
    }

    /// Converts a global chart point to inner-frame-local coordinates.
    #[must_use]
    pub fn to_inner_coordinates(&self, global: ScreenPoint) -> ScreenPoint {
        let inner = self.coord_space.inner_frame();
        global.offset(-inner.min_x(), -inner.min_y())
    }

    /// Converts an inner-frame-local point to global chart coordinates.
    #[must_use]
    pub fn to_global_coordinates(&self, local: ScreenPoint) -> ScreenPoint {
        let inner = self.coord_space.inner_frame();
        local.offset(inner.min_x(), inner.min_y())
    }

    /// Serializable diagnostics view of the chart state.
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            chart_frame: self.coord_space.chart_frame(),
            inner_frame: self.coord_space.inner_frame(),
            x_axis: *self.coord_space.x_axis(),
            y_axis: *self.coord_space.y_axis(),
            layer_count: self.layers.len(),
            visible_layer_count: self
                .layers
                .values()
                .filter(|entry| entry.visible)
                .count(),
            pending_display_count: self.pending_display.len(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|error| ChartError::InvalidData(format!("snapshot serialization: {error}")))
    }
}

/// Diagnostics DTO exported by [`Chart::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub chart_frame: ScreenRect,
    pub inner_frame: ScreenRect,
    pub x_axis: crate::core::Axis,
    pub y_axis: crate::core::Axis,
    pub layer_count: usize,
    pub visible_layer_count: usize,
    pub pending_display_count: usize,
}

/// Limits an incoming zoom-in scale so the axis zoom factor stays at or
/// below the configured ceiling. Zoom-out scales pass through untouched.
fn clamp_scale(scale: f64, current_zoom_factor: f64, max_zoom: f64) -> f64 {
    if !scale.is_finite() || scale <= 1.0 || current_zoom_factor <= 0.0 {
        return scale;
    }
    let allowed = max_zoom / current_zoom_factor;
    scale.min(allowed.max(1.0))
}
