use crate::core::data::complex::Complex;
use crate::core::data::point_result::PointResult;
use crate::core::fractals::mandelbrot::params::{Optimisations, TuningParams};

/// A per-point evaluator the frame renderer can drive from many threads.
pub trait FractalAlgorithm: Sync {
    fn evaluate(&self, c: Complex, pixel_size: Option<f64>) -> PointResult;

    fn tuning(&self) -> TuningParams {
        TuningParams::default()
    }

    fn optimisations(&self) -> Optimisations {
        Optimisations::default()
    }
}
