use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};

/// Direction of an axis on the rendering surface.
///
/// Screen coordinates grow rightward and downward, so a `Vertical` axis maps
/// growing model values onto shrinking screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
}

/// Linear, invertible mapping between a model scalar range and a screen range.
///
/// The screen window `(first_screen, last_screen)` starts equal to the init
/// bounds and is mutated in place by pan/zoom. Invariants: the window always
/// lies within the init bounds and its length never exceeds the initial
/// length; `model_length` is fixed after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    orientation: AxisOrientation,
    first_model: f64,
    last_model: f64,
    first_screen: f64,
    last_screen: f64,
    first_screen_init: f64,
    last_screen_init: f64,
    zoom_factor: f64,
}

impl Axis {
    /// Builds an axis whose screen window equals the init bounds.
    ///
    /// `first_screen`/`last_screen` follow the axis direction: for a
    /// `Horizontal` axis `first_screen` is the left edge, for a `Vertical`
    /// axis it is the bottom edge (the larger screen coordinate).
    pub fn new(
        orientation: AxisOrientation,
        first_model: f64,
        last_model: f64,
        first_screen: f64,
        last_screen: f64,
    ) -> ChartResult<Self> {
        if !first_model.is_finite() || !last_model.is_finite() || last_model <= first_model {
            return Err(ChartError::Configuration(format!(
                "axis model range must be finite and non-degenerate, got [{first_model}, {last_model}]"
            )));
        }
        if !first_screen.is_finite() || !last_screen.is_finite() {
            return Err(ChartError::Configuration(
                "axis screen range must be finite".to_owned(),
            ));
        }
        let screen_length = match orientation {
            AxisOrientation::Horizontal => last_screen - first_screen,
            AxisOrientation::Vertical => first_screen - last_screen,
        };
        if screen_length <= 0.0 {
            return Err(ChartError::Configuration(format!(
                "axis screen range must have positive length in axis direction, got ({first_screen}, {last_screen})"
            )));
        }

        Ok(Self {
            orientation,
            first_model,
            last_model,
            first_screen,
            last_screen,
            first_screen_init: first_screen,
            last_screen_init: last_screen,
            zoom_factor: 1.0,
        })
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    #[must_use]
    pub fn first_model(&self) -> f64 {
        self.first_model
    }

    #[must_use]
    pub fn last_model(&self) -> f64 {
        self.last_model
    }

    #[must_use]
    pub fn model_length(&self) -> f64 {
        self.last_model - self.first_model
    }

    #[must_use]
    pub fn first_screen(&self) -> f64 {
        self.first_screen
    }

    #[must_use]
    pub fn last_screen(&self) -> f64 {
        self.last_screen
    }

    #[must_use]
    pub fn first_screen_init(&self) -> f64 {
        self.first_screen_init
    }

    #[must_use]
    pub fn last_screen_init(&self) -> f64 {
        self.last_screen_init
    }

    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    /// Current screen window as ascending `(min, max)` screen coordinates,
    /// regardless of orientation.
    #[must_use]
    pub fn visible_screen_bounds(&self) -> (f64, f64) {
        self.window_ascending()
    }

    /// Current screen window length, always positive.
    #[must_use]
    pub fn screen_length(&self) -> f64 {
        match self.orientation {
            AxisOrientation::Horizontal => self.last_screen - self.first_screen,
            AxisOrientation::Vertical => self.first_screen - self.last_screen,
        }
    }

    #[must_use]
    pub fn init_screen_length(&self) -> f64 {
        match self.orientation {
            AxisOrientation::Horizontal => self.last_screen_init - self.first_screen_init,
            AxisOrientation::Vertical => self.first_screen_init - self.last_screen_init,
        }
    }

    fn inner_screen_loc_for_scalar(&self, scalar: f64) -> f64 {
        (scalar - self.first_model) / self.model_length() * self.screen_length()
    }

    /// Screen coordinate for a model scalar under the current window.
    #[must_use]
    pub fn screen_loc_for_scalar(&self, scalar: f64) -> f64 {
        match self.orientation {
            AxisOrientation::Horizontal => self.first_screen + self.inner_screen_loc_for_scalar(scalar),
            AxisOrientation::Vertical => self.first_screen - self.inner_screen_loc_for_scalar(scalar),
        }
    }

    /// Exact inverse of [`Self::screen_loc_for_scalar`].
    #[must_use]
    pub fn scalar_for_screen_loc(&self, screen_loc: f64) -> f64 {
        let inner = match self.orientation {
            AxisOrientation::Horizontal => screen_loc - self.first_screen,
            AxisOrientation::Vertical => self.first_screen - screen_loc,
        };
        inner * self.model_length() / self.screen_length() + self.first_model
    }

    /// Shifts the screen window by the delta along the axis's own direction,
    /// saturating exactly at the init bounds. The foreign component of the
    /// delta is ignored. Out-of-range deltas are routine gesture input and
    /// are corrected silently.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) -> ChartResult<()> {
        let delta = match self.orientation {
            AxisOrientation::Horizontal => delta_x,
            AxisOrientation::Vertical => delta_y,
        };
        if !delta.is_finite() {
            return Err(ChartError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        if delta == 0.0 {
            return Ok(());
        }

        let (lo, hi) = self.window_ascending();
        let (lo_init, hi_init) = self.init_window_ascending();
        let length = hi - lo;

        let mut new_lo = lo + delta;
        if new_lo < lo_init {
            new_lo = lo_init;
        }
        if new_lo + length > hi_init {
            new_lo = hi_init - length;
        }

        trace!(
            orientation = ?self.orientation,
            delta,
            new_lo,
            "pan axis window"
        );
        self.set_window_ascending(new_lo, new_lo + length);
        Ok(())
    }

    /// Rescales the screen window anchored at the gesture focal point.
    ///
    /// The window is split at the anchor and each segment's length is divided
    /// by the axis's scale component, so the model value under the anchor is
    /// unchanged. Overflow past an init bound is redistributed to the other
    /// end; when the new length strictly exceeds the initial length the
    /// window snaps exactly back to the init bounds. The strict comparison is
    /// deliberate and matches zoom-in/zoom-out asymmetry of the historical
    /// behavior.
    pub fn zoom(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        center_x: f64,
        center_y: f64,
    ) -> ChartResult<()> {
        let (scale, center) = match self.orientation {
            AxisOrientation::Horizontal => (scale_x, center_x),
            AxisOrientation::Vertical => (scale_y, center_y),
        };
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom scale must be finite and > 0".to_owned(),
            ));
        }
        if !center.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom center must be finite".to_owned(),
            ));
        }
        if scale == 1.0 {
            return Ok(());
        }

        let (lo, hi) = self.window_ascending();
        let (lo_init, hi_init) = self.init_window_ascending();
        let init_length = hi_init - lo_init;

        let mut new_lo = center - (center - lo) / scale;
        let mut new_hi = center + (hi - center) / scale;

        if new_hi - new_lo > init_length {
            debug!(
                orientation = ?self.orientation,
                scale,
                "zoom out past 1x, snapping window to init bounds"
            );
            new_lo = lo_init;
            new_hi = hi_init;
        } else {
            if new_lo < lo_init {
                new_hi += lo_init - new_lo;
                new_lo = lo_init;
            }
            if new_hi > hi_init {
                new_lo -= new_hi - hi_init;
                new_hi = hi_init;
                if new_lo < lo_init {
                    new_lo = lo_init;
                }
            }
        }

        self.set_window_ascending(new_lo, new_hi);
        self.zoom_factor = self.init_screen_length() / self.screen_length();
        trace!(
            orientation = ?self.orientation,
            scale,
            center,
            zoom_factor = self.zoom_factor,
            "zoom axis window"
        );
        Ok(())
    }

    fn window_ascending(&self) -> (f64, f64) {
        match self.orientation {
            AxisOrientation::Horizontal => (self.first_screen, self.last_screen),
            AxisOrientation::Vertical => (self.last_screen, self.first_screen),
        }
    }

    fn init_window_ascending(&self) -> (f64, f64) {
        match self.orientation {
            AxisOrientation::Horizontal => (self.first_screen_init, self.last_screen_init),
            AxisOrientation::Vertical => (self.last_screen_init, self.first_screen_init),
        }
    }

    fn set_window_ascending(&mut self, lo: f64, hi: f64) {
        match self.orientation {
            AxisOrientation::Horizontal => {
                self.first_screen = lo;
                self.last_screen = hi;
            }
            AxisOrientation::Vertical => {
                self.first_screen = hi;
                self.last_screen = lo;
            }
        }
    }
}
