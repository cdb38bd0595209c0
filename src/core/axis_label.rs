use serde::{Deserialize, Serialize};

use crate::core::geometry::{ScreenSize, bounding_size_after_rotation};
use crate::render::TextMeasurer;

/// Visual settings for one axis label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelSettings {
    pub font_size_px: f64,
    pub rotation_degrees: f64,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            font_size_px: 12.0,
            rotation_degrees: 0.0,
        }
    }
}

/// One renderable axis label.
///
/// The measured bounding box (rotation-adjusted) is memoized explicitly:
/// call `invalidate_measurement` after changing anything the measurer sees.
/// Hiding a label does not invalidate measurement, so row layouts computed
/// before the label was hidden keep their offsets within a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub settings: LabelSettings,
    pub hidden: bool,
    measured: Option<ScreenSize>,
}

impl AxisLabel {
    #[must_use]
    pub fn new(text: impl Into<String>, settings: LabelSettings) -> Self {
        Self {
            text: text.into(),
            settings,
            hidden: false,
            measured: None,
        }
    }

    /// Bounding box of the label after rotation, measured once and cached.
    pub fn measured_size(&mut self, measurer: &dyn TextMeasurer) -> ScreenSize {
        if let Some(size) = self.measured {
            return size;
        }
        let raw = measurer.text_size(&self.text, self.settings.font_size_px);
        let size = bounding_size_after_rotation(raw, self.settings.rotation_degrees);
        self.measured = Some(size);
        size
    }

    /// Unrotated text box, used to center the glyph run on a tick.
    pub fn raw_text_size(&self, measurer: &dyn TextMeasurer) -> ScreenSize {
        measurer.text_size(&self.text, self.settings.font_size_px)
    }

    pub fn invalidate_measurement(&mut self) {
        self.measured = None;
    }
}
