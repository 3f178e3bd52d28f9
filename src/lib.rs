//! Adaptive Random Search for continuous, bounded optimization.
//!
//! - **ARS**: single-trajectory search that samples a hypercube around the
//!   best-known point and adapts the cube's size to recent success.
//!   Problems plug in through the [`ars::ArsProblem`] trait; randomness is
//!   injected, so runs are reproducible from a seed.
//!
//! # Example
//!
//! ```
//! use u_ars::ars::{ArsConfig, ArsRunner, FnProblem};
//!
//! let problem = FnProblem::new(5, (-5.12, 5.12), |x: &[f64]| {
//!     x.iter().map(|v| v.powi(4)).sum()
//! });
//! let config = ArsConfig::default().with_max_iterations(500).with_seed(1);
//!
//! let result = ArsRunner::run(&problem, &config)?;
//! assert_eq!(result.best.data().len(), 5);
//! # Ok::<(), u_ars::ArsError>(())
//! ```

pub mod ars;
mod error;

pub use error::ArsError;
