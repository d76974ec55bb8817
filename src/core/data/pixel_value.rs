/// Raw per-pixel result kept between frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PixelValue {
    Interior,
    /// Smooth escape value.
    Exterior(f64),
}

impl PixelValue {
    #[must_use]
    pub fn is_interior(&self) -> bool {
        matches!(self, Self::Interior)
    }

    #[must_use]
    pub fn exterior_value(&self) -> Option<f64> {
        match self {
            Self::Interior => None,
            Self::Exterior(value) => Some(*value),
        }
    }
}
