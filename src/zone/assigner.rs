//! Nearest-center store partitioning.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::models::LocationTable;

/// Partition of stores into zones.
///
/// Zone `z` is anchored by the location `center_id(z)`. Every store of the
/// source table belongs to exactly one zone.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneAssignment {
    centers: Vec<usize>,
    zones: Vec<Vec<usize>>,
    store_zone: BTreeMap<usize, usize>,
}

impl ZoneAssignment {
    /// Number of zones (one per distribution center).
    pub fn zone_count(&self) -> usize {
        self.centers.len()
    }

    /// `true` when there is nothing to optimize.
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Location id of the center anchoring `zone`.
    pub fn center_id(&self, zone: usize) -> Option<usize> {
        self.centers.get(zone).copied()
    }

    /// Center location ids, indexed by zone.
    pub fn center_ids(&self) -> &[usize] {
        &self.centers
    }

    /// Store ids assigned to `zone`, in table order. Empty for unknown zones.
    pub fn stores(&self, zone: usize) -> &[usize] {
        self.zones.get(zone).map_or(&[], Vec::as_slice)
    }

    /// Zone a store was assigned to.
    pub fn zone_of(&self, store_id: usize) -> Option<usize> {
        self.store_zone.get(&store_id).copied()
    }

    /// `store_id -> zone` mapping, ordered by store id.
    pub fn store_zones(&self) -> &BTreeMap<usize, usize> {
        &self.store_zone
    }

    /// Total number of assigned stores.
    pub fn store_count(&self) -> usize {
        self.store_zone.len()
    }
}

/// Assigns stores to their nearest distribution center.
pub struct ZoneAssigner;

impl ZoneAssigner {
    /// Builds the zone partition for a location table.
    ///
    /// Centers keep their table order; zone ids follow it. Distances are
    /// Euclidean on raw `(latitude, longitude)`. On a tie the lower zone id
    /// wins. A table without centers yields an empty assignment.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_zoneroute::models::{Location, LocationTable};
    /// use u_zoneroute::zone::ZoneAssigner;
    ///
    /// let table = LocationTable::new(vec![
    ///     Location::center("West", 0.0, 0.0),
    ///     Location::center("East", 10.0, 10.0),
    ///     Location::store("s1", 0.0, 1.0, 10),
    ///     Location::store("s2", 11.0, 10.0, 20),
    /// ]).unwrap();
    ///
    /// let zones = ZoneAssigner::assign(&table);
    /// assert_eq!(zones.stores(0), &[2]);
    /// assert_eq!(zones.stores(1), &[3]);
    /// ```
    pub fn assign(table: &LocationTable) -> ZoneAssignment {
        let centers = table.center_ids();
        if centers.is_empty() {
            warn!("no distribution centers in location table; nothing to assign");
            return ZoneAssignment::default();
        }

        let mut zones = vec![Vec::new(); centers.len()];
        let mut store_zone = BTreeMap::new();

        for (store_id, store) in table.iter().filter(|(_, loc)| loc.is_store()) {
            let mut best_zone = 0;
            let mut best_dist = f64::INFINITY;
            for (zone, &center_id) in centers.iter().enumerate() {
                let Some(center) = table.get(center_id) else {
                    continue;
                };
                let d = store.euclidean_to(center);
                // strict: the first minimum wins ties
                if d < best_dist {
                    best_dist = d;
                    best_zone = zone;
                }
            }
            zones[best_zone].push(store_id);
            store_zone.insert(store_id, best_zone);
        }

        debug!(
            zones = centers.len(),
            stores = store_zone.len(),
            "stores assigned to zones by proximity"
        );

        ZoneAssignment {
            centers,
            zones,
            store_zone,
        }
    }
}
