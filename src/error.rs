//! Error taxonomy for the simulation engine.
//!
//! Every variant signals either a caller programming error or a genuine
//! numerical impossibility. None are transient; none are retried. Errors
//! propagate uncaught to the calling generator or test.

use thiserror::Error;

/// Errors raised by state-vector operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Complex division where the divisor is numerically zero.
    #[error("complex division by zero (|divisor|² = {norm_sqr:e})")]
    DivisionByZero { norm_sqr: f64 },

    /// A state vector failed the Σ|amplitude|² = 1 check.
    #[error("state vector not normalized ({context}): norm² = {norm_sqr}")]
    NotNormalized { context: String, norm_sqr: f64 },

    /// Attempted to condition on a measurement outcome with negligible
    /// probability.
    #[error(
        "cannot project qubit {qubit} onto outcome {outcome}: \
         probability {probability:e} is effectively zero"
    )]
    ZeroProbabilityOutcome {
        qubit: usize,
        outcome: u8,
        probability: f64,
    },

    /// A state vector had the wrong number of amplitudes for the operation.
    #[error("expected a state vector of {expected} amplitudes, got {actual}")]
    WrongDimension { expected: usize, actual: usize },

    /// Unrecognized gate name, or a parametric gate without its angle.
    #[error("gate {name:?} is not available: unrecognized name or missing rotation angle")]
    UnknownGate { name: String },
}

/// Convenience result type used throughout the engine.
pub type SimResult<T> = Result<T, SimError>;
