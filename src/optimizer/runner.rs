//! Multi-zone optimization driver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::config::OptimizerConfig;
use super::types::{OptimizationOutcome, ZoneResult};
use crate::cost::CostModel;
use crate::error::{RouteError, RouteResult};
use crate::models::LocationTable;
use crate::random::{create_rng, zone_seed};
use crate::sa::anneal_zone;
use crate::zone::ZoneAssignment;

/// Runs the annealing search for every zone and aggregates the results.
pub struct ZoneOptimizer;

impl ZoneOptimizer {
    /// Optimizes zones `0..N` in ascending order.
    ///
    /// Zones without stores yield a result with route `[center]` and cost 0.
    /// An assignment without zones yields an empty outcome with total cost 0;
    /// use [`OptimizationOutcome::is_empty`] to detect it.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidConfig`] for invalid annealing parameters.
    /// - [`RouteError::DataUnavailable`] if a zone's center or stores are not
    ///   in `table`.
    /// - [`RouteError::IndexOutOfRange`] if a zone's locations do not fit the
    ///   cost matrix; the run stops at that zone.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_zoneroute::cost::CostModel;
    /// use u_zoneroute::models::{Location, LocationTable};
    /// use u_zoneroute::optimizer::{OptimizerConfig, ZoneOptimizer};
    /// use u_zoneroute::zone::ZoneAssigner;
    ///
    /// let table = LocationTable::new(vec![
    ///     Location::center("DC", 0.0, 0.0),
    ///     Location::store("s1", 0.0, 1.0, 40),
    /// ]).unwrap();
    /// let costs = CostModel::from_rows(&[vec![0.0, 3.0], vec![3.0, 0.0]]).unwrap();
    /// let zones = ZoneAssigner::assign(&table);
    ///
    /// let outcome = ZoneOptimizer::optimize_all(
    ///     &costs, &zones, &table, &OptimizerConfig::default().with_seed(1),
    /// ).unwrap();
    /// assert_eq!(outcome.zones[0].route, vec![0, 1, 0]);
    /// assert_eq!(outcome.total_cost, 6.0);
    /// ```
    pub fn optimize_all(
        costs: &CostModel,
        assignment: &ZoneAssignment,
        table: &LocationTable,
        config: &OptimizerConfig,
    ) -> RouteResult<OptimizationOutcome> {
        Self::optimize_all_with_cancel(costs, assignment, table, config, None)
    }

    /// Like [`optimize_all`](Self::optimize_all), with a cancellation token.
    ///
    /// The flag is checked before each zone and once per temperature level
    /// inside a zone. A zone interrupted mid-search keeps its best route so
    /// far; later zones are not started.
    pub fn optimize_all_with_cancel(
        costs: &CostModel,
        assignment: &ZoneAssignment,
        table: &LocationTable,
        config: &OptimizerConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> RouteResult<OptimizationOutcome> {
        config.validate()?;
        log_start(assignment, config);

        let cancel = cancel.as_deref();
        let mut zones = Vec::with_capacity(assignment.zone_count());
        let mut cancelled = false;

        for zone in 0..assignment.zone_count() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            zones.push(Self::solve_zone(costs, assignment, table, config, zone, cancel)?);
        }

        let outcome = OptimizationOutcome::new(zones, cancelled);
        log_finish(&outcome, config);
        Ok(outcome)
    }

    /// Solves all zones on the rayon thread pool.
    ///
    /// Each zone draws from its own seeded generator, so with a fixed seed
    /// the outcome equals that of [`optimize_all`](Self::optimize_all).
    #[cfg(feature = "parallel")]
    pub fn optimize_all_parallel(
        costs: &CostModel,
        assignment: &ZoneAssignment,
        table: &LocationTable,
        config: &OptimizerConfig,
    ) -> RouteResult<OptimizationOutcome> {
        use rayon::prelude::*;

        config.validate()?;
        log_start(assignment, config);

        let zones = (0..assignment.zone_count())
            .into_par_iter()
            .map(|zone| Self::solve_zone(costs, assignment, table, config, zone, None))
            .collect::<RouteResult<Vec<_>>>()?;

        let outcome = OptimizationOutcome::new(zones, false);
        log_finish(&outcome, config);
        Ok(outcome)
    }

    fn solve_zone(
        costs: &CostModel,
        assignment: &ZoneAssignment,
        table: &LocationTable,
        config: &OptimizerConfig,
        zone: usize,
        cancel: Option<&AtomicBool>,
    ) -> RouteResult<ZoneResult> {
        let center_id = assignment
            .center_id(zone)
            .ok_or_else(|| RouteError::DataUnavailable(format!("zone {zone} has no center")))?;
        let center = table.get(center_id).ok_or_else(|| {
            RouteError::DataUnavailable(format!(
                "center {center_id} of zone {zone} is not in the location table"
            ))
        })?;
        let stores = assignment.stores(zone);
        if let Some(&missing) = stores.iter().find(|&&id| table.get(id).is_none()) {
            return Err(RouteError::DataUnavailable(format!(
                "store {missing} of zone {zone} is not in the location table"
            )));
        }

        if config.report_progress {
            info!(zone, center = center.name(), stores = stores.len(), "optimizing zone");
        }

        let mut rng = create_rng(zone_seed(config.annealing.seed, zone));
        let search = anneal_zone(costs, center_id, stores, &config.annealing, &mut rng, cancel)
            .inspect_err(|e| warn!(zone, error = %e, "zone search aborted"))?;

        if config.report_progress {
            info!(
                zone,
                initial_cost = search.initial_cost,
                cost = search.best_cost,
                improvements = search.improvements,
                reason = %search.termination,
                "zone optimized"
            );
        }

        Ok(ZoneResult {
            zone,
            center_id,
            center_name: center.name().to_string(),
            route: search.best,
            cost: search.best_cost,
            store_count: stores.len(),
            total_capacity: table.total_capacity(stores),
            initial_cost: search.initial_cost,
            improvements: search.improvements,
            termination: search.termination,
        })
    }
}

fn log_start(assignment: &ZoneAssignment, config: &OptimizerConfig) {
    if assignment.is_empty() {
        warn!("zone assignment is empty; nothing to optimize");
        return;
    }
    if config.report_progress {
        let sa = &config.annealing;
        info!(
            zones = assignment.zone_count(),
            stores = assignment.store_count(),
            initial_temperature = sa.initial_temperature,
            cooling_rate = sa.cooling_rate,
            "starting route optimization by zones"
        );
    }
}

fn log_finish(outcome: &OptimizationOutcome, config: &OptimizerConfig) {
    if config.report_progress && !outcome.is_empty() {
        info!(
            zones = outcome.zones.len(),
            total_cost = outcome.total_cost,
            cancelled = outcome.cancelled,
            "route optimization finished"
        );
    }
}
