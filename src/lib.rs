//! chartkit: renderer-agnostic Cartesian charting core.
//!
//! This crate owns the model-to-screen transform engine, axis label layout,
//! coordinate-space negotiation, and the generic chart-point layer system.
//! Drawing, gesture decoding, animation timing, and text measurement stay
//! outside as host collaborators.

pub mod chart;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layers;
pub mod render;
pub mod telemetry;

pub use chart::{Chart, LayerId};
pub use crate::core::{Axis, AxisOrientation, AxisValue, ChartPoint, ChartSettings, CoordinateSpace};
pub use error::{ChartError, ChartResult};
