use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::point_result::PointResult;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::fractals::mandelbrot::params::{MandelbrotParams, Optimisations, TuningParams};
use std::f64::consts::LN_2;

const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

const FIRST_PERIOD_CHECK: u32 = 20;
const PERIOD_TOLERANCE_SQUARED: f64 = 1e-20;

const MAX_REFINEMENT_STEPS: u32 = 4;
const REFINEMENT_LIMIT_SQUARED: f64 = 1e12;

#[must_use]
pub fn in_main_cardioid(c: Complex) -> bool {
    let shifted = c.real - 0.25;
    let imag_squared = c.imag * c.imag;
    let q = shifted * shifted + imag_squared;

    q * (q + shifted) < 0.25 * imag_squared
}

#[must_use]
pub fn in_period2_bulb(c: Complex) -> bool {
    let shifted = c.real + 1.0;

    shifted * shifted + c.imag * c.imag < 0.0625
}

/// Escape-time evaluator for `z ← z² + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotAlgorithm {
    params: MandelbrotParams,
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(params: MandelbrotParams) -> Self {
        Self { params }
    }

    pub fn with_max_iterations(max_iterations: u32) -> Result<Self, MandelbrotError> {
        Ok(Self::new(MandelbrotParams::with_max_iterations(max_iterations)?))
    }

    #[must_use]
    pub fn params(&self) -> &MandelbrotParams {
        &self.params
    }

    /// Classifies `c`. Passing `pixel_size` also tracks the derivative and
    /// returns a distance estimate for escaping points.
    #[must_use]
    pub fn evaluate(&self, c: Complex, pixel_size: Option<f64>) -> PointResult {
        if in_main_cardioid(c) || in_period2_bulb(c) {
            return PointResult::interior(0);
        }

        let max_iterations = self.params.max_iterations();
        let check_period = self.params.optimisations().periodicity_check;
        let track_derivative = pixel_size.is_some();

        let mut z = Complex::ZERO;
        let mut dz = Complex::ZERO;
        let mut saved = Complex::ZERO;
        let mut next_check = FIRST_PERIOD_CHECK;
        let mut period = FIRST_PERIOD_CHECK;

        for n in 1..=max_iterations {
            if track_derivative {
                dz = (z * dz).scale(2.0) + Complex::ONE;
            }
            z = z * z + c;

            if z.magnitude_squared() > ESCAPE_RADIUS_SQUARED {
                return self.escaped(c, z, dz, n, pixel_size);
            }

            if check_period && n == next_check {
                if (z - saved).magnitude_squared() < PERIOD_TOLERANCE_SQUARED {
                    return PointResult::interior(n);
                }
                saved = z;
                next_check = next_check.saturating_add(period);
                period = period.saturating_mul(2);
            }
        }

        PointResult::interior(max_iterations)
    }

    fn escaped(&self, c: Complex, z: Complex, dz: Complex, n: u32, pixel_size: Option<f64>) -> PointResult {
        let smooth_value = f64::from(n) + 1.0 - z.magnitude().ln().ln() / LN_2;

        let Some(pixel_size) = pixel_size else {
            return PointResult::exterior(smooth_value, None, n);
        };

        let tuning = self.params.tuning();
        let threshold = tuning.early_exit_multiplier * pixel_size;

        let mut z = z;
        let mut dz = dz;
        let mut distance = distance_estimate(z, dz, tuning.derivative_epsilon);
        let mut steps = 0;

        // keep iterating past escape; the estimate sharpens as |z| grows
        while steps < MAX_REFINEMENT_STEPS
            && distance < threshold
            && z.magnitude_squared() < REFINEMENT_LIMIT_SQUARED
        {
            dz = (z * dz).scale(2.0) + Complex::ONE;
            z = z * z + c;
            distance = distance_estimate(z, dz, tuning.derivative_epsilon);
            steps += 1;
        }

        PointResult::exterior(smooth_value, Some(distance), n + steps)
    }
}

fn distance_estimate(z: Complex, dz: Complex, epsilon: f64) -> f64 {
    let magnitude = z.magnitude();

    2.0 * magnitude * magnitude.ln() / dz.magnitude().max(epsilon)
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    fn evaluate(&self, c: Complex, pixel_size: Option<f64>) -> PointResult {
        MandelbrotAlgorithm::evaluate(self, c, pixel_size)
    }

    fn tuning(&self) -> TuningParams {
        *self.params.tuning()
    }

    fn optimisations(&self) -> Optimisations {
        self.params.optimisations()
    }
}
