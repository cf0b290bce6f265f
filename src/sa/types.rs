//! Core trait and status types for Simulated Annealing.

use rand::Rng;

use crate::error::RouteResult;

/// Defines a Simulated Annealing problem.
///
/// The implementor supplies the starting solution, neighbor generation and
/// cost evaluation. [`SaRunner`](super::SaRunner) handles temperature,
/// acceptance and best tracking.
///
/// SA minimizes the cost. Costs are expected to be non-negative; a cost of
/// exactly zero is treated as optimal and ends the search.
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates a random initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Computes the cost of a solution. Lower is better.
    ///
    /// An error aborts the search and is returned to the caller.
    fn cost(&self, solution: &Self::Solution) -> RouteResult<f64>;

    /// Generates a neighbor of the current solution.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Best cost reached zero.
    OptimalFound,
    /// Temperature fell to the configured minimum.
    MinTemperature,
    /// The cancel flag was raised.
    Cancelled,
    /// The zone had no stores, so there was nothing to search.
    Skipped,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::OptimalFound => "optimal solution (cost = 0)",
            Self::MinTemperature => "minimum temperature reached",
            Self::Cancelled => "cancelled",
            Self::Skipped => "no stores assigned",
        };
        f.write_str(s)
    }
}
