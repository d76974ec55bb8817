use crate::core::data::pixel_value::PixelValue;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Escape {
    Interior,
    Exterior {
        smooth_value: f64,
        /// Plane distance to the set boundary, present only when requested.
        distance_estimate: Option<f64>,
    },
}

/// Classification of a single point, computed fresh per call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointResult {
    pub escape: Escape,
    /// Number of `z ← z² + c` steps performed, for instrumentation.
    pub iterations: u32,
}

impl PointResult {
    #[must_use]
    pub const fn interior(iterations: u32) -> Self {
        Self {
            escape: Escape::Interior,
            iterations,
        }
    }

    #[must_use]
    pub const fn exterior(smooth_value: f64, distance_estimate: Option<f64>, iterations: u32) -> Self {
        Self {
            escape: Escape::Exterior {
                smooth_value,
                distance_estimate,
            },
            iterations,
        }
    }

    #[must_use]
    pub fn is_interior(&self) -> bool {
        matches!(self.escape, Escape::Interior)
    }

    #[must_use]
    pub fn smooth_value(&self) -> Option<f64> {
        match self.escape {
            Escape::Interior => None,
            Escape::Exterior { smooth_value, .. } => Some(smooth_value),
        }
    }

    #[must_use]
    pub fn distance_estimate(&self) -> Option<f64> {
        match self.escape {
            Escape::Interior => None,
            Escape::Exterior {
                distance_estimate, ..
            } => distance_estimate,
        }
    }

    #[must_use]
    pub fn pixel_value(&self) -> PixelValue {
        match self.escape {
            Escape::Interior => PixelValue::Interior,
            Escape::Exterior { smooth_value, .. } => PixelValue::Exterior(smooth_value),
        }
    }
}
