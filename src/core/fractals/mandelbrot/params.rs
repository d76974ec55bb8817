use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use serde::Deserialize;

pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Knobs for adaptive skipping and distance estimation, fixed at startup.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuningParams {
    /// Fraction (< 1) of the estimated run actually filled.
    pub safety_factor: f64,
    /// Distances below this many pixel widths are too close to detail to skip.
    pub detail_multiplier: f64,
    /// Distance refinement stops once the estimate reaches this many pixel widths.
    pub early_exit_multiplier: f64,
    /// Lower bound on `|dz|` in the distance estimate.
    pub derivative_epsilon: f64,
    /// Longest run filled from a single evaluation.
    pub max_horizontal_skip: u32,
}

impl Default for TuningParams {
    fn default() -> Self {
        Self {
            safety_factor: 0.9,
            detail_multiplier: 1.5,
            early_exit_multiplier: 40.0,
            derivative_epsilon: 1e-12,
            max_horizontal_skip: 32,
        }
    }
}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl TuningParams {
    pub fn validate(&self) -> Result<(), MandelbrotError> {
        if !positive_finite(self.safety_factor) || self.safety_factor > 1.0 {
            return Err(MandelbrotError::InvalidSafetyFactor(self.safety_factor));
        }
        if !positive_finite(self.detail_multiplier) {
            return Err(MandelbrotError::InvalidDetailMultiplier(self.detail_multiplier));
        }
        if !positive_finite(self.early_exit_multiplier) {
            return Err(MandelbrotError::InvalidEarlyExitMultiplier(self.early_exit_multiplier));
        }
        if !positive_finite(self.derivative_epsilon) {
            return Err(MandelbrotError::InvalidDerivativeEpsilon(self.derivative_epsilon));
        }
        if self.max_horizontal_skip == 0 {
            return Err(MandelbrotError::ZeroMaxHorizontalSkip);
        }

        Ok(())
    }
}

/// Independently switchable render capabilities. Plain escape time is what
/// remains with everything off.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Optimisations {
    pub periodicity_check: bool,
    pub adaptive_skip: bool,
    pub overlap_cache: bool,
    pub axis_symmetry: bool,
}

impl Optimisations {
    pub const NONE: Self = Self {
        periodicity_check: false,
        adaptive_skip: false,
        overlap_cache: false,
        axis_symmetry: false,
    };

    pub const ALL: Self = Self {
        periodicity_check: true,
        adaptive_skip: true,
        overlap_cache: true,
        axis_symmetry: true,
    };
}

impl Default for Optimisations {
    fn default() -> Self {
        Self::ALL
    }
}

/// Validated algorithm parameters, immutable once built.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MandelbrotParams {
    max_iterations: u32,
    tuning: TuningParams,
    optimisations: Optimisations,
}

impl MandelbrotParams {
    pub fn new(
        max_iterations: u32,
        tuning: TuningParams,
        optimisations: Optimisations,
    ) -> Result<Self, MandelbrotError> {
        if max_iterations == 0 {
            return Err(MandelbrotError::ZeroMaxIterationsError);
        }

        tuning.validate()?;

        Ok(Self {
            max_iterations,
            tuning,
            optimisations,
        })
    }

    pub fn with_max_iterations(max_iterations: u32) -> Result<Self, MandelbrotError> {
        Self::new(max_iterations, TuningParams::default(), Optimisations::default())
    }

    pub fn display_name(&self) -> &str {
        "Mandelbrot"
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn tuning(&self) -> &TuningParams {
        &self.tuning
    }

    pub fn optimisations(&self) -> Optimisations {
        self.optimisations
    }
}

impl Default for MandelbrotParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tuning: TuningParams::default(),
            optimisations: Optimisations::default(),
        }
    }
}
