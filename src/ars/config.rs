//! ARS configuration.

use crate::error::ArsError;

/// Configuration for Adaptive Random Search.
///
/// # Examples
///
/// ```
/// use u_ars::ars::ArsConfig;
///
/// let config = ArsConfig::default()
///     .with_max_iterations(5000)
///     .with_step_factor(1.3)
///     .with_jump_factor(10.0)
///     .with_jump_interval(100)
///     .with_patience(50)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArsConfig {
    /// Hard cap on outer iterations. Each iteration evaluates two candidates.
    pub max_iterations: usize,

    /// Multiplier for the "medium" larger step, and divisor when shrinking.
    pub step_factor: f64,

    /// Multiplier for the periodic large jump.
    pub jump_factor: f64,

    /// The large jump is used on iterations divisible by this period.
    pub jump_interval: usize,

    /// Consecutive non-improving iterations tolerated before shrinking.
    pub patience: usize,

    /// Initial step size as a fraction of the domain width.
    pub initial_step_ratio: f64,

    /// Rejection-sampling budget per candidate.
    pub max_sample_attempts: usize,

    /// Random seed for [`ArsRunner::run`](super::ArsRunner::run).
    pub seed: Option<u64>,
}

impl Default for ArsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            step_factor: 1.3,
            jump_factor: 10.0,
            jump_interval: 100,
            patience: 50,
            initial_step_ratio: 0.1,
            max_sample_attempts: 10_000,
            seed: None,
        }
    }
}

impl ArsConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_step_factor(mut self, factor: f64) -> Self {
        self.step_factor = factor;
        self
    }

    pub fn with_jump_factor(mut self, factor: f64) -> Self {
        self.jump_factor = factor;
        self
    }

    pub fn with_jump_interval(mut self, n: usize) -> Self {
        self.jump_interval = n;
        self
    }

    pub fn with_patience(mut self, n: usize) -> Self {
        self.patience = n;
        self
    }

    pub fn with_initial_step_ratio(mut self, ratio: f64) -> Self {
        self.initial_step_ratio = ratio;
        self
    }

    pub fn with_max_sample_attempts(mut self, n: usize) -> Self {
        self.max_sample_attempts = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ArsError> {
        if self.max_iterations == 0 {
            return Err(ArsError::InvalidConfig(
                "max_iterations must be positive".into(),
            ));
        }
        check_factor("step_factor", self.step_factor)?;
        check_factor("jump_factor", self.jump_factor)?;
        if self.jump_interval == 0 {
            return Err(ArsError::InvalidConfig(
                "jump_interval must be positive".into(),
            ));
        }
        if self.patience == 0 {
            return Err(ArsError::InvalidConfig("patience must be positive".into()));
        }
        check_factor("initial_step_ratio", self.initial_step_ratio)?;
        if self.max_sample_attempts == 0 {
            return Err(ArsError::InvalidConfig(
                "max_sample_attempts must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn check_factor(name: &str, value: f64) -> Result<(), ArsError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ArsError::InvalidConfig(format!(
            "{name} must be positive and finite, got {value}"
        )));
    }
    Ok(())
}
