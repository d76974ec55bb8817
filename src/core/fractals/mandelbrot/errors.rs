use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MandelbrotError {
    #[error("Maximum iterations must be greater than zero")]
    ZeroMaxIterationsError,
    #[error("safety factor must lie in (0, 1], got {0}")]
    InvalidSafetyFactor(f64),
    #[error("detail multiplier must be positive and finite, got {0}")]
    InvalidDetailMultiplier(f64),
    #[error("early exit multiplier must be positive and finite, got {0}")]
    InvalidEarlyExitMultiplier(f64),
    #[error("derivative epsilon must be positive and finite, got {0}")]
    InvalidDerivativeEpsilon(f64),
    #[error("maximum horizontal skip must be at least one pixel")]
    ZeroMaxHorizontalSkip,
}
