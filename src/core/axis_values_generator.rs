use crate::core::axis::{Axis, AxisOrientation};
use crate::core::axis_label::LabelSettings;
use crate::core::axis_value::AxisValue;
use crate::core::geometry::{ScreenSize, bounding_size_after_rotation};
use crate::error::{ChartError, ChartResult};
use crate::render::TextMeasurer;

/// Produces the ordered subset of axis scalars to render as ticks for the
/// axis's current screen length.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisValuesGenerator {
    /// Precomputed static list, returned verbatim regardless of screen length.
    Fixed(FixedValues),
    /// Fixed candidate list filtered so rendered labels never overlap.
    FixedNonOverlapping(NonOverlappingValues),
    /// Multiples of a step covering the model range.
    EvenSpaced(EvenSpacedValues),
}

impl AxisValuesGenerator {
    #[must_use]
    pub fn generate(&self, axis: &Axis) -> Vec<f64> {
        match self {
            Self::Fixed(fixed) => fixed.values.clone(),
            Self::FixedNonOverlapping(non_overlapping) => {
                non_overlapping.select(axis.screen_length())
            }
            Self::EvenSpaced(spaced) => spaced.generate(axis),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixedValues {
    values: Vec<f64>,
}

impl FixedValues {
    pub fn new(values: Vec<f64>) -> ChartResult<Self> {
        if values.is_empty() {
            return Err(ChartError::Configuration(
                "fixed axis values list must not be empty".to_owned(),
            ));
        }
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::Configuration(
                "fixed axis values must be finite".to_owned(),
            ));
        }
        Ok(Self { values })
    }
}

/// Greedy non-overlap filter over a fixed candidate list.
///
/// Label sizes are measured once per candidate set; the visible subset is
/// recomputed from the axis screen length on every `generate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct NonOverlappingValues {
    candidates: Vec<AxisValue>,
    orientation: AxisOrientation,
    spacing: f64,
    max_label_size: ScreenSize,
    total_label_size: ScreenSize,
}

impl NonOverlappingValues {
    pub fn new(
        candidates: Vec<AxisValue>,
        orientation: AxisOrientation,
        spacing: f64,
        label_settings: LabelSettings,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<Self> {
        if candidates.is_empty() {
            return Err(ChartError::Configuration(
                "non-overlapping generator needs at least one candidate".to_owned(),
            ));
        }
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(ChartError::Configuration(
                "label spacing must be finite and >= 0".to_owned(),
            ));
        }

        let mut max_label_size = ScreenSize::zero();
        let mut total_label_size = ScreenSize::zero();
        for candidate in &candidates {
            let raw = measurer.text_size(&candidate.display_label(), label_settings.font_size_px);
            let size = bounding_size_after_rotation(raw, label_settings.rotation_degrees);
            max_label_size.width = max_label_size.width.max(size.width);
            max_label_size.height = max_label_size.height.max(size.height);
            total_label_size.width += size.width;
            total_label_size.height += size.height;
        }

        Ok(Self {
            candidates,
            orientation,
            spacing,
            max_label_size,
            total_label_size,
        })
    }

    #[must_use]
    pub fn max_label_size(&self) -> ScreenSize {
        self.max_label_size
    }

    #[must_use]
    pub fn total_label_size(&self) -> ScreenSize {
        self.total_label_size
    }

    /// Single greedy pass: each tick advances an equal-spaced cursor and a
    /// candidate survives only once the cursor has cleared the previous kept
    /// label's footprint plus spacing. The last candidate is always included,
    /// replacing the last kept one if they differ, so the axis extremity is
    /// labeled even when the greedy pass would have dropped it.
    fn select(&self, screen_length: f64) -> Vec<f64> {
        let extent = match self.orientation {
            AxisOrientation::Horizontal => self.max_label_size.width,
            AxisOrientation::Vertical => self.max_label_size.height,
        };
        let space_per_tick = screen_length / self.candidates.len() as f64;

        let mut kept: Vec<f64> = Vec::new();
        let mut cursor = 0.0;
        let mut current_label_end = 0.0;
        for candidate in &self.candidates {
            cursor += space_per_tick;
            if current_label_end <= cursor {
                kept.push(candidate.scalar());
                current_label_end = cursor + extent + self.spacing;
            }
        }

        let last_candidate = self.candidates[self.candidates.len() - 1].scalar();
        match kept.last_mut() {
            Some(last_kept) if *last_kept != last_candidate => *last_kept = last_candidate,
            None => kept.push(last_candidate),
            _ => {}
        }
        kept
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvenSpacedValues {
    step: f64,
}

impl EvenSpacedValues {
    pub fn new(step: f64) -> ChartResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ChartError::Configuration(
                "axis value step must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self { step })
    }

    fn generate(&self, axis: &Axis) -> Vec<f64> {
        let first = axis.first_model();
        let last = axis.last_model();
        let mut values = Vec::new();
        let mut multiple = (first / self.step).ceil();
        // Tolerance keeps the range ends included despite accumulation error.
        let epsilon = self.step * 1e-9;
        loop {
            let value = multiple * self.step;
            if value > last + epsilon {
                break;
            }
            if value >= first - epsilon {
                values.push(value);
            }
            multiple += 1.0;
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisValuesGenerator, EvenSpacedValues, FixedValues};
    use crate::core::axis::{Axis, AxisOrientation};

    #[test]
    fn fixed_values_ignore_screen_length() {
        let axis = Axis::new(AxisOrientation::Horizontal, 0.0, 10.0, 0.0, 40.0).expect("axis");
        let generator =
            AxisValuesGenerator::Fixed(FixedValues::new(vec![0.0, 5.0, 10.0]).expect("values"));
        assert_eq!(generator.generate(&axis), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn fixed_values_reject_empty_list() {
        assert!(FixedValues::new(Vec::new()).is_err());
    }

    #[test]
    fn even_spaced_values_cover_the_model_range() {
        let axis = Axis::new(AxisOrientation::Horizontal, 0.5, 4.0, 0.0, 400.0).expect("axis");
        let generator = AxisValuesGenerator::EvenSpaced(EvenSpacedValues::new(1.0).expect("step"));
        assert_eq!(generator.generate(&axis), vec![1.0, 2.0, 3.0, 4.0]);
    }
}
