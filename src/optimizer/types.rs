//! Result types for multi-zone optimization.

use crate::models::LocationTable;
use crate::sa::Termination;

/// Optimized route of one zone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneResult {
    /// Zone id (position of the center among all centers).
    pub zone: usize,

    /// Location id of the zone's distribution center.
    pub center_id: usize,

    /// Name of the distribution center.
    pub center_name: String,

    /// Visiting order, starting and ending at the center.
    ///
    /// `[center]` alone for a zone without stores.
    pub route: Vec<usize>,

    /// Total cost of `route`.
    pub cost: f64,

    /// Number of stores in the zone.
    pub store_count: usize,

    /// Sum of the stores' capacities.
    pub total_capacity: u64,

    /// Cost of the random starting route.
    pub initial_cost: f64,

    /// Number of times the search improved its best route.
    pub improvements: usize,

    /// Why the zone's search stopped.
    pub termination: Termination,
}

impl ZoneResult {
    /// `true` if at least one store is assigned to this zone.
    pub fn is_active(&self) -> bool {
        self.store_count > 0
    }

    /// Store ids in visiting order, without the center endpoints.
    pub fn stops(&self) -> &[usize] {
        if self.route.len() < 2 {
            return &[];
        }
        &self.route[1..self.route.len() - 1]
    }

    /// Location names along the route, for reporting.
    ///
    /// Ids missing from `table` are skipped.
    pub fn route_names<'t>(&self, table: &'t LocationTable) -> Vec<&'t str> {
        self.route
            .iter()
            .filter_map(|&id| table.get(id))
            .map(|loc| loc.name())
            .collect()
    }
}

/// All zone results of a run, in ascending zone order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationOutcome {
    /// Per-zone results.
    pub zones: Vec<ZoneResult>,

    /// Sum of all zone costs.
    pub total_cost: f64,

    /// Whether the run was cancelled before every zone was solved.
    pub cancelled: bool,
}

impl OptimizationOutcome {
    pub(crate) fn new(zones: Vec<ZoneResult>, cancelled: bool) -> Self {
        let total_cost = zones.iter().map(|z| z.cost).sum();
        Self {
            zones,
            total_cost,
            cancelled,
        }
    }

    /// `true` when no zone was optimized.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Result of the given zone.
    pub fn zone(&self, zone: usize) -> Option<&ZoneResult> {
        self.zones.iter().find(|z| z.zone == zone)
    }

    /// Aggregate statistics over all zones.
    pub fn summary(&self) -> OptimizationSummary {
        let active: Vec<&ZoneResult> = self.zones.iter().filter(|z| z.is_active()).collect();
        let active_cost: f64 = active.iter().map(|z| z.cost).sum();
        let average_cost_per_active_zone = if active.is_empty() {
            0.0
        } else {
            active_cost / active.len() as f64
        };

        OptimizationSummary {
            total_zones: self.zones.len(),
            active_zones: active.len(),
            total_stores: self.zones.iter().map(|z| z.store_count).sum(),
            total_capacity: self.zones.iter().map(|z| z.total_capacity).sum(),
            total_cost: self.total_cost,
            average_cost_per_active_zone,
        }
    }
}

/// Aggregate statistics of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationSummary {
    pub total_zones: usize,
    /// Zones with at least one store.
    pub active_zones: usize,
    pub total_stores: usize,
    pub total_capacity: u64,
    pub total_cost: f64,
    /// 0 when there are no active zones.
    pub average_cost_per_active_zone: f64,
}
