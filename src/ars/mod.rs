//! Adaptive Random Search (ARS).
//!
//! A derivative-free, single-trajectory metaheuristic for continuous
//! optimization. Candidates are sampled uniformly from a hypercube around
//! the current point. The cube's half-width (the step size) grows when a
//! larger step wins and shrinks after a run of unproductive iterations.
//! A periodic large jump helps the search leave shallow local optima.
//!
//! # Key Types
//!
//! - [`ArsProblem`]: Problem definition: domain, evaluation, direction
//! - [`ArsConfig`]: Step-size policy parameters and budgets
//! - [`ArsSearch`]: Step machine for driving the search manually
//! - [`ArsRunner`]: Executes the full loop and returns an [`ArsResult`]
//!
//! # References
//!
//! - Rastrigin, L. A. (1963), "The convergence of the random search method
//!   in the extremal control of a many parameter system"
//! - Schumer & Steiglitz (1968), "Adaptive step size random search"
//! - Brownlee (2011), *Clever Algorithms: Nature-Inspired Programming Recipes*

mod config;
mod runner;
mod sampling;
mod search;
mod types;

pub use config::ArsConfig;
pub use runner::{ArsResult, ArsRunner};
pub use search::{ArsSearch, StepOutcome};
pub use types::{ArsProblem, Direction, FnProblem, Solution};
