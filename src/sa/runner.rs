//! SA execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, trace};

use super::config::SaConfig;
use super::types::{SaProblem, Termination};
use crate::error::RouteResult;
use crate::random::create_rng;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Cost of the initial solution.
    pub initial_cost: f64,

    /// Total number of candidates evaluated.
    pub iterations: usize,

    /// Number of temperature levels entered.
    pub temperature_levels: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (improving and worsening).
    pub accepted_moves: usize,

    /// Number of times the best solution improved.
    pub improvements: usize,

    /// Why the search stopped.
    pub termination: Termination,

    /// Best cost at the start and after every temperature level.
    pub cost_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization with a generator seeded from `config.seed`.
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> RouteResult<SaResult<P::Solution>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs SA with an optional cancellation token.
    ///
    /// The flag is checked once per temperature level. A cancelled run still
    /// returns the best solution found so far.
    pub fn run_with_cancel<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> RouteResult<SaResult<P::Solution>> {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(problem, config, &mut rng, cancel.as_deref())
    }

    /// Runs SA drawing every random decision from `rng`.
    ///
    /// `config.seed` is ignored here; the caller owns the generator.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidConfig`](crate::RouteError::InvalidConfig)
    /// for an invalid configuration, and propagates the first error raised by
    /// [`SaProblem::cost`].
    pub fn run_with_rng<P: SaProblem, R: Rng>(
        problem: &P,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> RouteResult<SaResult<P::Solution>> {
        config.validate()?;

        let mut current = problem.initial_solution(rng);
        let mut current_cost = problem.cost(&current)?;
        let initial_cost = current_cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut temperature_levels = 0usize;
        let mut accepted_moves = 0usize;
        let mut improvements = 0usize;
        let mut cancelled = false;

        let mut cost_history = vec![best_cost];

        debug!(initial_cost, temperature, "annealing started");

        'cooling: while temperature > config.min_temperature && best_cost > 0.0 {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            temperature_levels += 1;

            for _ in 0..config.iterations_per_temperature {
                let candidate = problem.neighbor(&current, rng);
                let candidate_cost = problem.cost(&candidate)?;
                iterations += 1;

                let delta = candidate_cost - current_cost;

                // Metropolis acceptance criterion
                if delta < 0.0 {
                    current = candidate;
                    current_cost = candidate_cost;
                    accepted_moves += 1;

                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                        improvements += 1;

                        if best_cost <= 0.0 {
                            cost_history.push(best_cost);
                            break 'cooling;
                        }
                    }
                } else if rng.random::<f64>() < acceptance_probability(delta, temperature) {
                    current = candidate;
                    current_cost = candidate_cost;
                    accepted_moves += 1;
                }
            }

            cost_history.push(best_cost);
            trace!(temperature, best_cost, current_cost, "temperature level done");

            temperature *= config.cooling_rate;
        }

        let termination = if cancelled {
            Termination::Cancelled
        } else if best_cost <= 0.0 {
            Termination::OptimalFound
        } else {
            Termination::MinTemperature
        };

        debug!(
            best_cost,
            improvements,
            iterations,
            reason = %termination,
            "annealing finished"
        );

        Ok(SaResult {
            best,
            best_cost,
            initial_cost,
            iterations,
            temperature_levels,
            final_temperature: temperature,
            accepted_moves,
            improvements,
            termination,
            cost_history,
        })
    }
}

/// Probability of accepting a move whose cost change is `delta`.
///
/// Improving moves (`delta < 0`) are always accepted. Otherwise the result is
/// `exp(-delta / temperature)` clamped to `[0, 1]`; at `temperature <= 0` a
/// worsening move is never accepted.
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        1.0
    } else if temperature > 0.0 {
        (-delta / temperature).exp().clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouteError;
    use crate::random::create_rng;

    // ---- Permutation sorting: cost = misplaced elements ----

    struct PermSortProblem {
        n: usize,
    }

    impl SaProblem for PermSortProblem {
        type Solution = Vec<usize>;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<usize> {
            (0..self.n).rev().collect()
        }

        fn cost(&self, perm: &Vec<usize>) -> RouteResult<f64> {
            Ok(perm.iter().enumerate().filter(|&(i, &v)| i != v).count() as f64)
        }

        fn neighbor<R: Rng>(&self, perm: &Vec<usize>, rng: &mut R) -> Vec<usize> {
            let mut new = perm.clone();
            let i = rng.random_range(0..self.n);
            let j = rng.random_range(0..self.n);
            new.swap(i, j);
            new
        }
    }

    // ---- Cost can never drop below a floor ----

    struct FlatProblem {
        cost: f64,
    }

    impl SaProblem for FlatProblem {
        type Solution = u32;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> u32 {
            0
        }

        fn cost(&self, _s: &u32) -> RouteResult<f64> {
            Ok(self.cost)
        }

        fn neighbor<R: Rng>(&self, s: &u32, _rng: &mut R) -> u32 {
            *s
        }
    }

    // ---- Every neighbor costs exactly `step` more ----

    struct UphillProblem {
        step: f64,
    }

    impl SaProblem for UphillProblem {
        type Solution = u64;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> u64 {
            0
        }

        fn cost(&self, s: &u64) -> RouteResult<f64> {
            Ok(1.0 + *s as f64 * self.step)
        }

        fn neighbor<R: Rng>(&self, s: &u64, _rng: &mut R) -> u64 {
            s + 1
        }
    }

    // ---- Cost evaluation fails after a few steps ----

    struct FailingProblem;

    impl SaProblem for FailingProblem {
        type Solution = usize;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> usize {
            0
        }

        fn cost(&self, s: &usize) -> RouteResult<f64> {
            if *s > 3 {
                Err(RouteError::IndexOutOfRange { index: *s, size: 4 })
            } else {
                Ok(10.0 - *s as f64)
            }
        }

        fn neighbor<R: Rng>(&self, s: &usize, _rng: &mut R) -> usize {
            s + 1
        }
    }

    fn quick_config() -> SaConfig {
        SaConfig::default()
            .with_initial_temperature(10.0)
            .with_cooling_rate(0.9)
            .with_min_temperature(0.01)
            .with_iterations_per_temperature(20)
            .with_seed(42)
    }

    #[test]
    fn test_acceptance_probability() {
        assert_eq!(acceptance_probability(-5.0, 10.0), 1.0);
        assert_eq!(acceptance_probability(-5.0, 0.0), 1.0);
        assert_eq!(acceptance_probability(0.0, 10.0), 1.0);
        assert!((acceptance_probability(10.0, 10.0) - (-1.0f64).exp()).abs() < 1e-12);
        assert_eq!(acceptance_probability(1.0, 0.0), 0.0);
        assert_eq!(acceptance_probability(1.0, -3.0), 0.0);
        assert_eq!(acceptance_probability(1e6, 1e-9), 0.0);
    }

    #[test]
    fn test_acceptance_frequency_matches_metropolis() {
        // one level at T = 4, every candidate exactly 3 worse
        let config = SaConfig::default()
            .with_initial_temperature(4.0)
            .with_cooling_rate(0.5)
            .with_min_temperature(2.5)
            .with_iterations_per_temperature(20_000)
            .with_seed(7);
        let result = SaRunner::run(&UphillProblem { step: 3.0 }, &config).unwrap();

        assert_eq!(result.temperature_levels, 1);
        assert_eq!(result.iterations, 20_000);
        assert_eq!(result.improvements, 0);
        assert_eq!(result.best_cost, 1.0);

        let freq = result.accepted_moves as f64 / result.iterations as f64;
        let expected = (-0.75f64).exp();
        assert!(
            (freq - expected).abs() < 0.02,
            "observed {freq}, expected {expected}"
        );
    }

    #[test]
    fn test_permutation_sort_converges() {
        let problem = PermSortProblem { n: 8 };
        let config = SaConfig::default()
            .with_initial_temperature(5.0)
            .with_cooling_rate(0.95)
            .with_min_temperature(0.01)
            .with_iterations_per_temperature(200)
            .with_seed(42);

        let result = SaRunner::run(&problem, &config).unwrap();

        assert_eq!(result.best_cost, 0.0);
        assert_eq!(result.best, (0..8).collect::<Vec<_>>());
        assert_eq!(result.termination, Termination::OptimalFound);
        assert!(result.improvements > 0);
        assert!(result.accepted_moves >= result.improvements);
    }

    #[test]
    fn test_optimal_stops_without_further_cooling() {
        let problem = PermSortProblem { n: 6 };
        let config = SaConfig::default()
            .with_initial_temperature(5.0)
            .with_cooling_rate(0.99)
            .with_min_temperature(0.001)
            .with_iterations_per_temperature(500)
            .with_seed(3);

        let result = SaRunner::run(&problem, &config).unwrap();

        assert_eq!(result.termination, Termination::OptimalFound);
        // the level that found the optimum did not cool
        let expected_t = 5.0 * 0.99f64.powi(result.temperature_levels as i32 - 1);
        assert!((result.final_temperature - expected_t).abs() < 1e-9);
        assert!(result.iterations <= result.temperature_levels * 500);
        assert!(result.final_temperature > config.min_temperature);
    }

    #[test]
    fn test_zero_initial_cost_skips_loop() {
        let result = SaRunner::run(&FlatProblem { cost: 0.0 }, &quick_config()).unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(result.temperature_levels, 0);
        assert_eq!(result.termination, Termination::OptimalFound);
        assert_eq!(result.final_temperature, 10.0);
    }

    #[test]
    fn test_runs_until_min_temperature() {
        let config = quick_config();
        let result = SaRunner::run(&FlatProblem { cost: 5.0 }, &config).unwrap();

        assert_eq!(result.termination, Termination::MinTemperature);
        assert!(result.final_temperature <= config.min_temperature);
        assert!(result.final_temperature / config.cooling_rate > config.min_temperature);
        assert_eq!(result.iterations, result.temperature_levels * 20);
        // delta == 0 is always accepted
        assert_eq!(result.accepted_moves, result.iterations);
        assert_eq!(result.improvements, 0);
        assert_eq!(result.cost_history.len(), result.temperature_levels + 1);
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let problem = PermSortProblem { n: 12 };
        let result = SaRunner::run(&problem, &quick_config()).unwrap();
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        assert!(result.best_cost <= result.initial_cost);
    }

    #[test]
    fn test_same_seed_same_result() {
        let problem = PermSortProblem { n: 10 };
        let a = SaRunner::run(&problem, &quick_config()).unwrap();
        let b = SaRunner::run(&problem, &quick_config()).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_cost_error_aborts_search() {
        let err = SaRunner::run(&FailingProblem, &quick_config()).unwrap_err();
        assert_eq!(err, RouteError::IndexOutOfRange { index: 4, size: 4 });
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = quick_config().with_cooling_rate(1.0);
        let err = SaRunner::run(&FlatProblem { cost: 1.0 }, &config).unwrap_err();
        assert!(matches!(err, RouteError::InvalidConfig(_)));
    }

    #[test]
    fn test_cancellation() {
        // flag raised before the run: deterministic cancellation
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            SaRunner::run_with_cancel(&PermSortProblem { n: 6 }, &quick_config(), Some(cancel))
                .unwrap();
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best_cost, result.initial_cost);
    }

    #[test]
    fn test_run_with_injected_rng() {
        let problem = PermSortProblem { n: 7 };
        let config = quick_config();
        let mut rng_a = create_rng(Some(99));
        let mut rng_b = create_rng(Some(99));
        let a = SaRunner::run_with_rng(&problem, &config, &mut rng_a, None).unwrap();
        let b = SaRunner::run_with_rng(&problem, &config, &mut rng_b, None).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }
}
