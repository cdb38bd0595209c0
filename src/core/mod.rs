pub mod axis;
pub mod axis_label;
pub mod axis_layer;
pub mod axis_value;
pub mod axis_values_generator;
pub mod chart_point;
pub mod coord_space;
pub mod geometry;
pub mod settings;
pub mod time;

pub use axis::{Axis, AxisOrientation};
pub use axis_label::{AxisLabel, LabelSettings};
pub use axis_layer::{AxisLabelsSource, AxisLayer, AxisLayerScene, LabelStack};
pub use axis_value::AxisValue;
pub use axis_values_generator::{
    AxisValuesGenerator, EvenSpacedValues, FixedValues, NonOverlappingValues,
};
pub use chart_point::ChartPoint;
pub use coord_space::{AxisSpec, CoordinateSpace};
pub use geometry::{ScreenPoint, ScreenRect, ScreenSize};
pub use settings::{ChartSettings, ZoomPanSettings};
