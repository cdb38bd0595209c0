use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Gating and limits for gesture-driven viewport changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomPanSettings {
    pub pan_enabled: bool,
    pub zoom_enabled: bool,
    /// Upper bound on the per-axis zoom factor. `None` leaves it unbounded.
    pub max_zoom: Option<f64>,
}

impl Default for ZoomPanSettings {
    fn default() -> Self {
        Self {
            pan_enabled: true,
            zoom_enabled: true,
            max_zoom: None,
        }
    }
}

/// Spacing and stroke constants consumed by axis layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub leading: f64,
    pub top: f64,
    pub trailing: f64,
    pub bottom: f64,
    /// Spacing between stacked label rows on one tick.
    pub labels_spacing: f64,
    pub labels_to_axis_spacing_x: f64,
    pub labels_to_axis_spacing_y: f64,
    pub axis_title_labels_to_labels_spacing: f64,
    pub axis_stroke_width: f64,
    pub zoom_pan: ZoomPanSettings,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            leading: 0.0,
            top: 0.0,
            trailing: 0.0,
            bottom: 0.0,
            labels_spacing: 5.0,
            labels_to_axis_spacing_x: 5.0,
            labels_to_axis_spacing_y: 5.0,
            axis_title_labels_to_labels_spacing: 8.0,
            axis_stroke_width: 1.0,
            zoom_pan: ZoomPanSettings::default(),
        }
    }
}

impl ChartSettings {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("leading", self.leading),
            ("top", self.top),
            ("trailing", self.trailing),
            ("bottom", self.bottom),
            ("labels_spacing", self.labels_spacing),
            ("labels_to_axis_spacing_x", self.labels_to_axis_spacing_x),
            ("labels_to_axis_spacing_y", self.labels_to_axis_spacing_y),
            (
                "axis_title_labels_to_labels_spacing",
                self.axis_title_labels_to_labels_spacing,
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::Configuration(format!(
                    "chart setting `{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.axis_stroke_width.is_finite() || self.axis_stroke_width <= 0.0 {
            return Err(ChartError::Configuration(
                "axis stroke width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(max_zoom) = self.zoom_pan.max_zoom {
            if !max_zoom.is_finite() || max_zoom < 1.0 {
                return Err(ChartError::Configuration(
                    "max zoom must be finite and >= 1".to_owned(),
                ));
            }
        }
        Ok(self)
    }
}
