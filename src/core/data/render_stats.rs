use std::ops::{Add, AddAssign};

/// Per-frame counters describing where each pixel value came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Points handed to the evaluator.
    pub evaluated: usize,
    /// Pixels copied from the previous frame.
    pub reused: usize,
    /// Pixels filled by an adaptive run without evaluation.
    pub skipped: usize,
    /// Pixels copied from the other side of the real axis.
    pub mirrored: usize,
    pub iterations: u64,
}

impl RenderStats {
    #[must_use]
    pub fn total_pixels(&self) -> usize {
        self.evaluated + self.reused + self.skipped + self.mirrored
    }
}

impl Add for RenderStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            evaluated: self.evaluated + other.evaluated,
            reused: self.reused + other.reused,
            skipped: self.skipped + other.skipped,
            mirrored: self.mirrored + other.mirrored,
            iterations: self.iterations + other.iterations,
        }
    }
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
