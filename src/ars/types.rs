//! Core trait and solution type for Adaptive Random Search.

use crate::error::ArsError;

/// Defines a continuous optimization problem over a hyper-rectangle.
///
/// The user implements dimensionality, domain and evaluation. The ARS
/// engine handles initial sampling, neighborhood sampling, step-size
/// adaptation and acceptance.
///
/// # Direction
///
/// The default [`is_better`](ArsProblem::is_better) minimizes. Override it
/// (e.g. `a > b`) for maximization.
///
/// # Examples
///
/// ```
/// use u_ars::ars::ArsProblem;
///
/// struct Sphere { dim: usize }
///
/// impl ArsProblem for Sphere {
///     fn dimensions(&self) -> usize { self.dim }
///     fn domain(&self) -> (f64, f64) { (-5.0, 5.0) }
///     fn evaluate(&self, x: &[f64]) -> f64 { x.iter().map(|v| v * v).sum() }
/// }
///
/// let p = Sphere { dim: 2 };
/// assert!(p.in_bounds(&[5.0, -5.0]));
/// assert!(!p.in_bounds(&[5.1, 0.0]));
/// assert!(p.is_better(1.0, 2.0));
/// ```
pub trait ArsProblem: Send + Sync {
    /// Number of coordinates in a solution vector. Must be positive.
    fn dimensions(&self) -> usize;

    /// `(min, max)` bounds shared by every axis.
    fn domain(&self) -> (f64, f64);

    /// Scores a coordinate vector.
    ///
    /// Must be pure: the same vector always yields the same score.
    fn evaluate(&self, x: &[f64]) -> f64;

    /// Returns true iff every coordinate lies in `[min, max]`.
    fn in_bounds(&self, x: &[f64]) -> bool {
        let (min, max) = self.domain();
        x.iter().all(|&v| v >= min && v <= max)
    }

    /// Strict improvement predicate: is `a` better than `b`?
    fn is_better(&self, a: f64, b: f64) -> bool {
        a < b
    }

    /// Returns true when `score` matches the known optimum.
    ///
    /// The default never reports optimality, so the search runs for the
    /// full iteration budget.
    fn is_optimal(&self, _score: f64) -> bool {
        false
    }
}

/// A candidate point and its score.
///
/// The coordinates are fixed at construction. The score starts unset and
/// is written exactly once, when the engine evaluates the point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    data: Vec<f64>,
    score: Option<f64>,
}

impl Solution {
    /// Creates an unevaluated solution.
    pub fn new(data: Vec<f64>) -> Self {
        Self { data, score: None }
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn is_evaluated(&self) -> bool {
        self.score.is_some()
    }

    /// Records the score. Fails if the solution was already evaluated.
    pub fn set_score(&mut self, score: f64) -> Result<(), ArsError> {
        if self.score.is_some() {
            return Err(ArsError::AlreadyEvaluated);
        }
        self.score = Some(score);
        Ok(())
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }
}

/// Optimization direction for [`FnProblem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

/// Adapts a closure into an [`ArsProblem`].
///
/// # Examples
///
/// ```
/// use u_ars::ars::{ArsProblem, Direction, FnProblem};
///
/// let problem = FnProblem::new(3, (-1.0, 1.0), |x: &[f64]| x.iter().sum())
///     .with_direction(Direction::Maximize)
///     .with_optimum(3.0, 1e-6);
///
/// assert!(problem.is_better(2.0, 1.0));
/// assert!(problem.is_optimal(3.0 - 1e-9));
/// ```
pub struct FnProblem<F> {
    dimensions: usize,
    domain: (f64, f64),
    objective: F,
    direction: Direction,
    optimum: Option<(f64, f64)>,
}

impl<F> FnProblem<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    pub fn new(dimensions: usize, domain: (f64, f64), objective: F) -> Self {
        Self {
            dimensions,
            domain,
            objective,
            direction: Direction::Minimize,
            optimum: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the known optimal score and the tolerance used to match it.
    ///
    /// A tolerance of `0.0` requires exact equality.
    pub fn with_optimum(mut self, score: f64, tolerance: f64) -> Self {
        self.optimum = Some((score, tolerance.abs()));
        self
    }
}

impl<F> ArsProblem for FnProblem<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        (self.objective)(x)
    }

    fn is_better(&self, a: f64, b: f64) -> bool {
        match self.direction {
            Direction::Minimize => a < b,
            Direction::Maximize => a > b,
        }
    }

    fn is_optimal(&self, score: f64) -> bool {
        match self.optimum {
            Some((target, tolerance)) => (score - target).abs() <= tolerance,
            None => false,
        }
    }
}
