//! Zone-by-zone route optimization.
//!
//! [`ZoneOptimizer`] takes the zone partition, runs one annealing search per
//! zone against a shared [`CostModel`](crate::cost::CostModel), and collects
//! the per-zone results in zone order together with the global total.
//!
//! Zones never share mutable state. The default driver solves them one after
//! another so that results and log output come out in a fixed order; the
//! `parallel` feature adds a rayon driver producing the same results.

mod config;
mod runner;
mod types;

pub use config::OptimizerConfig;
pub use runner::ZoneOptimizer;
pub use types::{OptimizationOutcome, OptimizationSummary, ZoneResult};
