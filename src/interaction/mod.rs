use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Already-decoded gesture delivered by the host's gesture recognizer.
///
/// All quantities are screen units; the core applies them synchronously and
/// the host triggers a redraw afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    Pan {
        delta_x: f64,
        delta_y: f64,
    },
    Zoom {
        scale_x: f64,
        scale_y: f64,
        center_x: f64,
        center_y: f64,
    },
    Tap {
        x: f64,
        y: f64,
    },
}

impl GestureEvent {
    pub fn validate(self) -> ChartResult<Self> {
        let finite = match self {
            Self::Pan { delta_x, delta_y } => delta_x.is_finite() && delta_y.is_finite(),
            Self::Zoom {
                scale_x,
                scale_y,
                center_x,
                center_y,
            } => {
                scale_x.is_finite()
                    && scale_x > 0.0
                    && scale_y.is_finite()
                    && scale_y > 0.0
                    && center_x.is_finite()
                    && center_y.is_finite()
            }
            Self::Tap { x, y } => x.is_finite() && y.is_finite(),
        };
        if !finite {
            return Err(ChartError::InvalidData(format!(
                "gesture event carries non-finite or non-positive components: {self:?}"
            )));
        }
        Ok(self)
    }
}
