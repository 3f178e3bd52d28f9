//! ARS execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::ArsConfig;
use super::search::ArsSearch;
use super::types::{ArsProblem, Solution};
use crate::error::ArsError;

/// Upper bound on the history reserved up front; longer runs grow on demand.
const HISTORY_RESERVE: usize = 4096;

/// Result of an Adaptive Random Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArsResult {
    /// The best solution evaluated during the run.
    pub best: Solution,

    /// Score of the best solution.
    pub best_score: f64,

    /// Outer iterations executed.
    pub iterations: usize,

    /// Objective evaluations, including the initial point.
    pub evaluations: usize,

    /// Iteration during which the best solution was evaluated.
    pub best_iteration: usize,

    /// Step size when the run stopped.
    pub final_step_size: f64,

    /// Number of iterations that adopted the larger step size.
    pub step_increases: usize,

    /// Number of patience-triggered shrinks.
    pub step_decreases: usize,

    /// Whether the problem reported the best score as optimal.
    pub reached_optimum: bool,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best score after initialization and after every iteration.
    pub cost_history: Vec<f64>,
}

/// Executes Adaptive Random Search.
pub struct ArsRunner;

impl ArsRunner {
    /// Runs ARS with an RNG seeded from `config.seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_ars::ars::{ArsConfig, ArsRunner, FnProblem};
    ///
    /// let problem = FnProblem::new(2, (-5.0, 5.0), |x: &[f64]| {
    ///     x.iter().map(|v| v * v).sum()
    /// });
    /// let config = ArsConfig::default().with_max_iterations(3000).with_seed(42);
    ///
    /// let result = ArsRunner::run(&problem, &config).unwrap();
    /// assert!(result.best_score < 0.1);
    /// ```
    pub fn run<P: ArsProblem>(problem: &P, config: &ArsConfig) -> Result<ArsResult, ArsError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs ARS with an optional cancellation token.
    pub fn run_with_cancel<P: ArsProblem>(
        problem: &P,
        config: &ArsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ArsResult, ArsError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::drive(problem, config, &mut rng, cancel)
    }

    /// Runs ARS drawing all randomness from `rng`. `config.seed` is ignored.
    pub fn run_with_rng<P: ArsProblem, R: Rng>(
        problem: &P,
        config: &ArsConfig,
        rng: &mut R,
    ) -> Result<ArsResult, ArsError> {
        Self::drive(problem, config, rng, None)
    }

    fn drive<P: ArsProblem, R: Rng>(
        problem: &P,
        config: &ArsConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ArsResult, ArsError> {
        let mut search = ArsSearch::new(problem, config.clone(), rng)?;

        let mut cost_history =
            Vec::with_capacity(config.max_iterations.min(HISTORY_RESERVE).saturating_add(1));
        cost_history.push(search.best_score());
        let mut cancelled = false;

        // At least one iteration runs; the stop test follows each iteration.
        loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            search.step()?;
            cost_history.push(search.best_score());

            if search.is_finished() {
                break;
            }
        }

        let reached_optimum = problem.is_optimal(search.best_score());
        log::info!(
            "ars finished after {} iterations ({} evaluations): best score {}",
            search.iteration(),
            search.evaluations(),
            search.best_score()
        );

        Ok(ArsResult {
            best_score: search.best_score(),
            iterations: search.iteration(),
            evaluations: search.evaluations(),
            best_iteration: search.best_iteration(),
            final_step_size: search.step_size(),
            step_increases: search.step_increases(),
            step_decreases: search.step_decreases(),
            reached_optimum,
            cancelled,
            cost_history,
            best: search.into_best(),
        })
    }
}
