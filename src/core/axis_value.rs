use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::core::time::datetime_to_scalar;
use crate::error::{ChartError, ChartResult};

/// Typed value carried by one axis position.
///
/// `scalar` is the only quantity used for geometric mapping. `label` and
/// `order` are cosmetic: `label` overrides the plain scalar formatting and
/// `order` carries the explicit position of categorical values.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisValue {
    scalar: f64,
    label: Option<String>,
    order: Option<usize>,
}

impl AxisValue {
    pub fn numeric(scalar: f64) -> ChartResult<Self> {
        Self::build(scalar, None, None)
    }

    pub fn numeric_with_label(scalar: f64, label: impl Into<String>) -> ChartResult<Self> {
        Self::build(scalar, Some(label.into()), None)
    }

    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self {
            scalar: value as f64,
            label: Some(value.to_string()),
            order: None,
        }
    }

    /// Categorical value with an explicit ordering key. The scalar is derived
    /// from the order so categories land on consecutive integer positions.
    #[must_use]
    pub fn categorical(label: impl Into<String>, order: usize) -> Self {
        Self {
            scalar: order as f64,
            label: Some(label.into()),
            order: Some(order),
        }
    }

    /// Maps a timestamp onto the axis as unix seconds with sub-second precision.
    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>, label: Option<String>) -> Self {
        Self {
            scalar: datetime_to_scalar(time),
            label,
            order: None,
        }
    }

    pub fn from_decimal(value: Decimal) -> ChartResult<Self> {
        let scalar = value.to_f64().ok_or_else(|| {
            ChartError::InvalidData(format!("decimal `{value}` cannot be represented as f64"))
        })?;
        Self::build(scalar, Some(value.to_string()), None)
    }

    fn build(scalar: f64, label: Option<String>, order: Option<usize>) -> ChartResult<Self> {
        if !scalar.is_finite() {
            return Err(ChartError::Configuration(
                "axis value scalar must be finite".to_owned(),
            ));
        }
        Ok(Self {
            scalar,
            label,
            order,
        })
    }

    #[must_use]
    pub fn scalar(&self) -> f64 {
        self.scalar
    }

    #[must_use]
    pub fn order(&self) -> Option<usize> {
        self.order
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Label text, falling back to plain scalar formatting.
    #[must_use]
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format_scalar(self.scalar),
        }
    }
}

impl Eq for AxisValue {}

impl Ord for AxisValue {
    fn cmp(&self, other: &Self) -> Ordering {
        let primary = match (self.order, other.order) {
            (Some(a), Some(b)) if a != b => a.cmp(&b),
            _ => OrderedFloat(self.scalar).cmp(&OrderedFloat(other.scalar)),
        };
        // Cosmetic fields break ties so `Equal` agrees with `==`.
        primary
            .then_with(|| self.order.cmp(&other.order))
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for AxisValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plain fallback formatting: integers without a fraction, otherwise two decimals.
#[must_use]
pub(crate) fn format_scalar(scalar: f64) -> String {
    if scalar.fract() == 0.0 && scalar.abs() < 1e15 {
        format!("{scalar:.0}")
    } else {
        format!("{scalar:.2}")
    }
}
