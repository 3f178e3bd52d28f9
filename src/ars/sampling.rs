//! Uniform point generation inside the problem domain.

use rand::Rng;

use super::types::ArsProblem;
use crate::error::ArsError;

/// Draws a point uniformly inside the domain, one draw per axis.
///
/// Points rejected by [`ArsProblem::in_bounds`] are redrawn, up to
/// `max_attempts` times.
pub(crate) fn random_point<P, R>(
    problem: &P,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Vec<f64>, ArsError>
where
    P: ArsProblem + ?Sized,
    R: Rng,
{
    let (min, max) = problem.domain();
    for _ in 0..max_attempts {
        let point: Vec<f64> = (0..problem.dimensions())
            .map(|_| rng.random_range(min..=max))
            .collect();
        if problem.in_bounds(&point) {
            return Ok(point);
        }
    }

    Err(ArsError::SamplingExhausted {
        attempts: max_attempts,
        half_width: (max - min) / 2.0,
    })
}

/// Perturbs `base` by a uniform offset in `[-half_width, half_width]` per axis.
///
/// The result is uniform over the intersection of the neighborhood cube and
/// the region accepted by [`ArsProblem::in_bounds`]. Each offset is drawn from
/// the part of its axis interval that lies inside the domain box, which has
/// the same distribution as rejecting out-of-box draws but does not degrade
/// when the half-width dwarfs the domain. Candidates failing `in_bounds` are
/// rejected and every offset is resampled. Fails once `max_attempts` draws
/// have been rejected. Never clamps.
pub(crate) fn take_step<P, R>(
    problem: &P,
    base: &[f64],
    half_width: f64,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Vec<f64>, ArsError>
where
    P: ArsProblem + ?Sized,
    R: Rng,
{
    if !half_width.is_finite() || half_width < 0.0 {
        return Err(ArsError::InvalidStepSize { half_width });
    }

    let (min, max) = problem.domain();
    let ranges: Vec<(f64, f64)> = base
        .iter()
        .map(|&b| ((b - half_width).max(min), (b + half_width).min(max)))
        .collect();
    if ranges.iter().any(|&(lo, hi)| lo > hi) {
        return Err(ArsError::InvalidProblem(
            "base point lies outside the domain".into(),
        ));
    }

    let mut candidate = vec![0.0; base.len()];
    for _ in 0..max_attempts {
        for (c, &(lo, hi)) in candidate.iter_mut().zip(&ranges) {
            *c = rng.random_range(lo..=hi);
        }
        if problem.in_bounds(&candidate) {
            return Ok(candidate);
        }
    }

    Err(ArsError::SamplingExhausted {
        attempts: max_attempts,
        half_width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ars::FnProblem;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flat(
        dim: usize,
        min: f64,
        max: f64,
    ) -> FnProblem<impl Fn(&[f64]) -> f64 + Send + Sync> {
        FnProblem::new(dim, (min, max), |_: &[f64]| 0.0)
    }

    #[test]
    fn test_random_point_in_domain() {
        let problem = flat(5, -5.12, 5.12);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let p = random_point(&problem, 10, &mut rng).unwrap();
            assert_eq!(p.len(), 5);
            assert!(problem.in_bounds(&p));
        }
    }

    #[test]
    fn test_step_stays_within_neighborhood() {
        let problem = flat(3, -10.0, 10.0);
        let mut rng = StdRng::seed_from_u64(1);
        let base = [0.0, 1.0, -1.0];
        for _ in 0..500 {
            let c = take_step(&problem, &base, 0.5, 100, &mut rng).unwrap();
            for (x, b) in c.iter().zip(&base) {
                assert!((x - b).abs() <= 0.5 + 1e-12);
            }
        }
    }

    #[test]
    fn test_oversized_step_near_corner_terminates() {
        // half-width 2.0 on [-1, 1], starting from a corner
        let problem = flat(2, -1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(9);
        let base = [1.0, -1.0];
        let c = take_step(&problem, &base, 2.0, 10_000, &mut rng).unwrap();
        assert!(problem.in_bounds(&c));
    }

    #[test]
    fn test_huge_step_in_many_dimensions_terminates() {
        let problem = flat(10, -5.12, 5.12);
        let mut rng = StdRng::seed_from_u64(17);
        let base = vec![5.12; 10];
        let c = take_step(&problem, &base, 1.0e6, 10, &mut rng).unwrap();
        assert!(problem.in_bounds(&c));
    }

    #[test]
    fn test_custom_region_is_respected() {
        // Unit disc inside the [-1, 1] box.
        struct Disc;
        impl ArsProblem for Disc {
            fn dimensions(&self) -> usize {
                2
            }
            fn domain(&self) -> (f64, f64) {
                (-1.0, 1.0)
            }
            fn evaluate(&self, _x: &[f64]) -> f64 {
                0.0
            }
            fn in_bounds(&self, x: &[f64]) -> bool {
                x[0] * x[0] + x[1] * x[1] <= 1.0
            }
        }

        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let c = take_step(&Disc, &[0.7, 0.7], 0.5, 10_000, &mut rng).unwrap();
            assert!(Disc.in_bounds(&c));
        }
    }

    #[test]
    fn test_base_outside_domain() {
        let problem = flat(1, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            take_step(&problem, &[5.0], 0.1, 10, &mut rng),
            Err(ArsError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_exhausted_budget() {
        struct Nowhere;
        impl ArsProblem for Nowhere {
            fn dimensions(&self) -> usize {
                1
            }
            fn domain(&self) -> (f64, f64) {
                (0.0, 1.0)
            }
            fn evaluate(&self, _x: &[f64]) -> f64 {
                0.0
            }
            fn in_bounds(&self, _x: &[f64]) -> bool {
                false
            }
        }

        let mut rng = StdRng::seed_from_u64(3);
        let err = take_step(&Nowhere, &[0.5], 0.1, 25, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ArsError::SamplingExhausted {
                attempts: 25,
                half_width: 0.1
            }
        );
        assert!(random_point(&Nowhere, 25, &mut rng).is_err());
    }

    #[test]
    fn test_non_finite_half_width_rejected() {
        let problem = flat(1, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            take_step(&problem, &[0.5], f64::INFINITY, 10, &mut rng),
            Err(ArsError::InvalidStepSize {
                half_width: f64::INFINITY
            })
        );
        assert!(matches!(
            take_step(&problem, &[0.5], -0.1, 10, &mut rng),
            Err(ArsError::InvalidStepSize { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_step_always_in_bounds(
            seed in any::<u64>(),
            x in -1.0f64..=1.0,
            y in -1.0f64..=1.0,
            h in 0.001f64..3.0,
        ) {
            let problem = flat(2, -1.0, 1.0);
            let mut rng = StdRng::seed_from_u64(seed);
            let c = take_step(&problem, &[x, y], h, 100_000, &mut rng).unwrap();
            prop_assert!(problem.in_bounds(&c));
        }
    }
}
