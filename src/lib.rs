//! Zone-based store routing.
//!
//! Assigns delivery stores to their nearest distribution center, then finds a
//! low-cost visiting order for each zone with simulated annealing over a
//! combined (distance + fuel) cost matrix.
//!
//! - **Cost model** ([`cost`]): dense combined cost matrix with
//!   point-to-point and route-total lookups.
//! - **Zones** ([`zone`]): nearest-center partition of the stores, ties to
//!   the lower center index.
//! - **Simulated Annealing** ([`sa`]): random initial tour, two-store swap
//!   neighborhood, Metropolis acceptance, geometric cooling, early stop at
//!   zero cost.
//! - **Optimizer** ([`optimizer`]): per-zone orchestration, results in zone
//!   order, global totals and summary.
//!
//! # Architecture
//!
//! The crate consumes an already loaded [`models::LocationTable`] and a
//! square cost matrix. Loading spreadsheets, building haversine matrices,
//! rendering maps and formatting reports belong to the caller. Progress is
//! reported through `tracing` events; no subscriber is installed here.
//!
//! # Example
//!
//! ```
//! use u_zoneroute::cost::CostModel;
//! use u_zoneroute::models::{Location, LocationTable};
//! use u_zoneroute::optimizer::{OptimizerConfig, ZoneOptimizer};
//! use u_zoneroute::sa::SaConfig;
//! use u_zoneroute::zone::ZoneAssigner;
//!
//! let table = LocationTable::new(vec![
//!     Location::center("DC North", 0.0, 0.0),
//!     Location::store("Store A", 0.0, 1.0, 120),
//!     Location::store("Store B", 1.0, 1.0, 80),
//! ])?;
//! let distance = vec![
//!     vec![0.0, 1.0, 1.4],
//!     vec![1.0, 0.0, 1.0],
//!     vec![1.4, 1.0, 0.0],
//! ];
//! let fuel = vec![vec![0.0; 3]; 3];
//! let costs = CostModel::combine(&distance, &fuel)?;
//!
//! let zones = ZoneAssigner::assign(&table);
//! let config = OptimizerConfig::default().with_annealing(
//!     SaConfig::default()
//!         .with_initial_temperature(100.0)
//!         .with_cooling_rate(0.9)
//!         .with_iterations_per_temperature(10)
//!         .with_seed(42),
//! );
//! let outcome = ZoneOptimizer::optimize_all(&costs, &zones, &table, &config)?;
//!
//! assert!((outcome.total_cost - 3.4).abs() < 1e-9);
//! assert_eq!(outcome.summary().active_zones, 1);
//! # Ok::<(), u_zoneroute::RouteError>(())
//! ```

pub mod cost;
pub mod error;
pub mod models;
pub mod optimizer;
pub mod random;
pub mod sa;
pub mod zone;

pub use error::{RouteError, RouteResult};
