//! The per-zone routing problem.

use std::sync::atomic::AtomicBool;

use rand::seq::{index, SliceRandom};
use rand::Rng;

use super::config::SaConfig;
use super::runner::{SaResult, SaRunner};
use super::types::{SaProblem, Termination};
use crate::cost::CostModel;
use crate::error::RouteResult;

/// Closed tour from a distribution center through every store of its zone.
///
/// Solutions are routes `[center, s_1, ..., s_k, center]`. The endpoints are
/// fixed; only the interior order is searched.
#[derive(Debug, Clone, Copy)]
pub struct ZoneTour<'a> {
    costs: &'a CostModel,
    center: usize,
    stores: &'a [usize],
}

impl<'a> ZoneTour<'a> {
    pub fn new(costs: &'a CostModel, center: usize, stores: &'a [usize]) -> Self {
        Self {
            costs,
            center,
            stores,
        }
    }

    pub fn center(&self) -> usize {
        self.center
    }

    pub fn stores(&self) -> &[usize] {
        self.stores
    }
}

impl SaProblem for ZoneTour<'_> {
    type Solution = Vec<usize>;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        initial_route(self.center, self.stores, rng)
    }

    fn cost(&self, route: &Vec<usize>) -> RouteResult<f64> {
        self.costs.route_cost(route)
    }

    fn neighbor<R: Rng>(&self, route: &Vec<usize>, rng: &mut R) -> Vec<usize> {
        swap_neighbor(route, rng)
    }
}

/// `center`, a uniformly random permutation of `stores`, then `center` again.
pub fn initial_route<R: Rng>(center: usize, stores: &[usize], rng: &mut R) -> Vec<usize> {
    let mut body = stores.to_vec();
    body.shuffle(rng);

    let mut route = Vec::with_capacity(body.len() + 2);
    route.push(center);
    route.extend(body);
    route.push(center);
    route
}

/// Copy of `route` with two distinct interior positions swapped.
///
/// Positions are drawn without replacement from `1..len - 1`, so the
/// endpoints never move. Routes with fewer than two interior stops are
/// returned unchanged.
pub fn swap_neighbor<R: Rng>(route: &[usize], rng: &mut R) -> Vec<usize> {
    let mut next = route.to_vec();
    if route.len() < 4 {
        return next;
    }
    let picks = index::sample(rng, route.len() - 2, 2);
    next.swap(picks.index(0) + 1, picks.index(1) + 1);
    next
}

/// Anneals the route of one zone.
///
/// A zone without stores is not searched: the result is the single-node route
/// `[center]` at cost 0 with [`Termination::Skipped`]. The configuration is
/// validated either way.
pub fn anneal_zone<R: Rng>(
    costs: &CostModel,
    center: usize,
    stores: &[usize],
    config: &SaConfig,
    rng: &mut R,
    cancel: Option<&AtomicBool>,
) -> RouteResult<SaResult<Vec<usize>>> {
    config.validate()?;
    if stores.is_empty() {
        return Ok(SaResult {
            best: vec![center],
            best_cost: 0.0,
            initial_cost: 0.0,
            iterations: 0,
            temperature_levels: 0,
            final_temperature: config.initial_temperature,
            accepted_moves: 0,
            improvements: 0,
            termination: Termination::Skipped,
            cost_history: vec![0.0],
        });
    }
    let tour = ZoneTour::new(costs, center, stores);
    SaRunner::run_with_rng(&tour, config, rng, cancel)
}
