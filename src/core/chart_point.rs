use serde::{Deserialize, Serialize};

use crate::core::AxisValue;

/// Atomic data unit of a chart: one (x, y) pair of axis values.
/// Immutable; many points may share coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    x: AxisValue,
    y: AxisValue,
}

impl ChartPoint {
    #[must_use]
    pub fn new(x: AxisValue, y: AxisValue) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn x(&self) -> &AxisValue {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &AxisValue {
        &self.y
    }

    #[must_use]
    pub fn description(&self) -> String {
        format!("{}, {}", self.x.display_label(), self.y.display_label())
    }
}

#[cfg(test)]
mod tests {
    use super::ChartPoint;
    use crate::core::AxisValue;

    #[test]
    fn description_joins_both_labels() {
        let point = ChartPoint::new(
            AxisValue::categorical("Q1", 0),
            AxisValue::numeric(12.5).expect("valid value"),
        );
        assert_eq!(point.description(), "Q1, 12.50");
    }
}
