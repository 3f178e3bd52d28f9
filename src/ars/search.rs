//! The ARS step machine.
//!
//! # Algorithm
//!
//! 1. Draw a uniform point in the domain, evaluate it, set the step size
//!    to a fraction of the domain width
//! 2. At each iteration:
//!    a. Pick the larger-step factor: the jump factor every
//!    `jump_interval` iterations, otherwise the step factor
//!    b. Sample `step` around the current point with the current step size
//!    c. Sample `bigger_step` with the step size times the factor
//!    d. If either beats the current point, move to the better of the
//!    two; adopting `bigger_step` also adopts its step size
//!    e. Otherwise count a miss; after `patience` misses, shrink the step
//! 3. Terminate after `max_iterations` or once the best score is optimal
//!
//! # Reference
//!
//! Schumer, M. A. & Steiglitz, K. (1968). "Adaptive step size random search",
//! *IEEE Transactions on Automatic Control* 13(3), 270-276.

use rand::Rng;

use super::config::ArsConfig;
use super::sampling::{random_point, take_step};
use super::types::{ArsProblem, Solution};
use crate::error::ArsError;

/// What happened to the step size during one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The larger step won; the step size was multiplied by `factor`.
    AcceptedLarger {
        /// Factor used this iteration (step or jump factor).
        factor: f64,
    },
    /// The regular step won; the step size is unchanged.
    AcceptedSmaller,
    /// Neither candidate improved on the current point.
    Rejected,
    /// Neither candidate improved and patience ran out; the step size was
    /// divided by the step factor.
    Shrunk,
}

impl StepOutcome {
    pub fn is_improvement(&self) -> bool {
        matches!(
            self,
            StepOutcome::AcceptedLarger { .. } | StepOutcome::AcceptedSmaller
        )
    }
}

/// Single-trajectory Adaptive Random Search state.
///
/// Owns the current point, the best point ever evaluated and the adaptive
/// step size. Drive it with [`step`](Self::step) until
/// [`is_finished`](Self::is_finished), or use
/// [`ArsRunner`](super::ArsRunner) to do so.
///
/// # Examples
///
/// ```
/// use u_ars::ars::{ArsConfig, ArsSearch, FnProblem};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let problem = FnProblem::new(2, (-1.0, 1.0), |x: &[f64]| x[0] * x[0] + x[1] * x[1]);
/// let config = ArsConfig::default().with_max_iterations(10);
/// let mut search = ArsSearch::new(&problem, config, StdRng::seed_from_u64(1)).unwrap();
///
/// while !search.is_finished() {
///     search.step().unwrap();
/// }
/// assert_eq!(search.iteration(), 10);
/// ```
pub struct ArsSearch<'a, P: ArsProblem + ?Sized, R: Rng> {
    problem: &'a P,
    config: ArsConfig,
    rng: R,
    current: Solution,
    current_score: f64,
    best: Solution,
    best_score: f64,
    best_iteration: usize,
    step_size: f64,
    no_improvement_count: usize,
    iteration: usize,
    evaluations: usize,
    step_increases: usize,
    step_decreases: usize,
}

impl<'a, P: ArsProblem + ?Sized, R: Rng> ArsSearch<'a, P, R> {
    /// Starts a search from a uniformly random point in the domain.
    pub fn new(problem: &'a P, config: ArsConfig, mut rng: R) -> Result<Self, ArsError> {
        config.validate()?;
        validate_problem(problem)?;
        let start = random_point(problem, config.max_sample_attempts, &mut rng)?;
        Self::start(problem, config, rng, start)
    }

    /// Starts a search from a caller-supplied point.
    pub fn from_point(
        problem: &'a P,
        config: ArsConfig,
        rng: R,
        start: Vec<f64>,
    ) -> Result<Self, ArsError> {
        config.validate()?;
        validate_problem(problem)?;
        if start.len() != problem.dimensions() {
            return Err(ArsError::DimensionMismatch {
                expected: problem.dimensions(),
                actual: start.len(),
            });
        }
        if !problem.in_bounds(&start) {
            return Err(ArsError::InvalidProblem(
                "start point lies outside the domain".into(),
            ));
        }
        Self::start(problem, config, rng, start)
    }

    fn start(
        problem: &'a P,
        config: ArsConfig,
        rng: R,
        start: Vec<f64>,
    ) -> Result<Self, ArsError> {
        let (min, max) = problem.domain();
        let step_size = config.initial_step_ratio * (max - min);

        let score = problem.evaluate(&start);
        if score.is_nan() {
            return Err(ArsError::InvalidScore { score });
        }
        let mut current = Solution::new(start);
        current.set_score(score)?;
        log::debug!("initial score {score}, step size {step_size}");

        Ok(Self {
            problem,
            config,
            rng,
            best: current.clone(),
            best_score: score,
            current,
            current_score: score,
            best_iteration: 0,
            step_size,
            no_improvement_count: 0,
            iteration: 0,
            evaluations: 1,
            step_increases: 0,
            step_decreases: 0,
        })
    }

    /// Runs one outer iteration (two candidate evaluations).
    pub fn step(&mut self) -> Result<StepOutcome, ArsError> {
        let factor = self.larger_step_factor();

        let (step, step_score) = self.sample_and_evaluate(self.step_size)?;
        let (bigger, bigger_score) = self.sample_and_evaluate(self.step_size * factor)?;

        let problem = self.problem;
        let outcome = if problem.is_better(bigger_score, self.current_score)
            || problem.is_better(step_score, self.current_score)
        {
            self.no_improvement_count = 0;
            if problem.is_better(bigger_score, step_score) {
                self.current = bigger;
                self.current_score = bigger_score;
                self.step_size *= factor;
                self.step_increases += 1;
                log::trace!(
                    "iteration {}: step size grown by {factor} to {}",
                    self.iteration,
                    self.step_size
                );
                StepOutcome::AcceptedLarger { factor }
            } else {
                self.current = step;
                self.current_score = step_score;
                StepOutcome::AcceptedSmaller
            }
        } else {
            self.no_improvement_count += 1;
            if self.no_improvement_count >= self.config.patience {
                self.step_size /= self.config.step_factor;
                self.no_improvement_count = 0;
                self.step_decreases += 1;
                log::trace!(
                    "iteration {}: step size shrunk to {}",
                    self.iteration,
                    self.step_size
                );
                StepOutcome::Shrunk
            } else {
                StepOutcome::Rejected
            }
        };

        self.iteration += 1;
        Ok(outcome)
    }

    /// Multiplier applied to the step size for this iteration's larger step.
    pub fn larger_step_factor(&self) -> f64 {
        if self.iteration % self.config.jump_interval == 0 {
            self.config.jump_factor
        } else {
            self.config.step_factor
        }
    }

    /// True once the iteration budget is spent or the best score is optimal.
    pub fn is_finished(&self) -> bool {
        self.iteration >= self.config.max_iterations || self.problem.is_optimal(self.best_score)
    }

    fn sample_and_evaluate(&mut self, half_width: f64) -> Result<(Solution, f64), ArsError> {
        let data = take_step(
            self.problem,
            self.current.data(),
            half_width,
            self.config.max_sample_attempts,
            &mut self.rng,
        )?;
        self.evaluate(data)
    }

    fn evaluate(&mut self, data: Vec<f64>) -> Result<(Solution, f64), ArsError> {
        let score = self.problem.evaluate(&data);
        if score.is_nan() {
            return Err(ArsError::InvalidScore { score });
        }
        let mut solution = Solution::new(data);
        solution.set_score(score)?;
        self.evaluations += 1;

        // Tracked over every evaluation, including candidates that do not
        // become the current point.
        if self.problem.is_better(score, self.best_score) {
            self.best = solution.clone();
            self.best_score = score;
            self.best_iteration = self.iteration;
            log::debug!("iteration {}: best score {score}", self.iteration);
        }

        Ok((solution, score))
    }

    pub fn current(&self) -> &Solution {
        &self.current
    }

    pub fn current_score(&self) -> f64 {
        self.current_score
    }

    pub fn best(&self) -> &Solution {
        &self.best
    }

    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    /// Iteration during which the best solution was evaluated.
    pub fn best_iteration(&self) -> usize {
        self.best_iteration
    }

    /// Current neighborhood half-width.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn no_improvement_count(&self) -> usize {
        self.no_improvement_count
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Number of objective evaluations, including the initial point.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn step_increases(&self) -> usize {
        self.step_increases
    }

    pub fn step_decreases(&self) -> usize {
        self.step_decreases
    }

    pub fn config(&self) -> &ArsConfig {
        &self.config
    }

    /// Consumes the search, returning the best solution.
    pub fn into_best(self) -> Solution {
        self.best
    }
}

fn validate_problem<P: ArsProblem + ?Sized>(problem: &P) -> Result<(), ArsError> {
    if problem.dimensions() == 0 {
        return Err(ArsError::InvalidProblem(
            "dimensions must be positive".into(),
        ));
    }
    let (min, max) = problem.domain();
    if !min.is_finite() || !max.is_finite() {
        return Err(ArsError::InvalidProblem(format!(
            "domain bounds must be finite, got [{min}, {max}]"
        )));
    }
    if max <= min {
        return Err(ArsError::InvalidProblem(format!(
            "domain must have positive width, got [{min}, {max}]"
        )));
    }
    if !(max - min).is_finite() {
        return Err(ArsError::InvalidProblem(format!(
            "domain width overflows, got [{min}, {max}]"
        )));
    }
    Ok(())
}
