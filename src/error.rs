//! Error type shared by configuration, problem validation and search.

/// Errors raised by Adaptive Random Search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArsError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The problem cannot be searched (empty domain, zero dimensions, ...).
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    /// Rejection sampling found no in-bounds candidate within the retry budget.
    #[error("no in-bounds candidate after {attempts} attempts (half-width {half_width})")]
    SamplingExhausted {
        /// Number of rejected draws.
        attempts: usize,
        /// Neighborhood half-width that was being sampled.
        half_width: f64,
    },

    /// A neighborhood half-width is negative, NaN or overflowed to infinity.
    #[error("invalid step size: {half_width}")]
    InvalidStepSize {
        /// The offending half-width.
        half_width: f64,
    },

    /// The evaluation function returned NaN.
    #[error("evaluation produced an invalid score: {score}")]
    InvalidScore {
        /// The offending score.
        score: f64,
    },

    /// A coordinate vector does not match the problem's dimensionality.
    #[error("expected {expected} coordinates, got {actual}")]
    DimensionMismatch {
        /// Problem dimensionality.
        expected: usize,
        /// Length of the supplied vector.
        actual: usize,
    },

    /// A solution's score was assigned twice.
    #[error("solution has already been evaluated")]
    AlreadyEvaluated,
}
