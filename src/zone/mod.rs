//! Zone assignment.
//!
//! Every store is attached to its nearest distribution center, measured as
//! straight-line distance over raw latitude/longitude. Each center plus the
//! stores attached to it forms a zone, identified by the center's position
//! among the table's centers.

mod assigner;

pub use assigner::{ZoneAssigner, ZoneAssignment};
