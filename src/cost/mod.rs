//! Travel-cost model.
//!
//! A single dense matrix holding, for every ordered pair of locations, the
//! combined cost of driving between them (distance-derived cost plus fuel
//! cost). The matrix is built once per run and only read afterwards, so one
//! [`CostModel`] can be shared by every zone search.

mod model;

pub use model::CostModel;
