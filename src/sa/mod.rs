//! Simulated Annealing (SA) over zone routes.
//!
//! A single-solution trajectory search. Worsening moves are accepted with a
//! probability that shrinks as the temperature is cooled geometrically,
//! which lets the search leave local optima early and settle later.
//!
//! [`SaRunner`] drives any [`SaProblem`]; [`ZoneTour`] is the routing problem
//! for one zone: a closed tour from the distribution center through each of
//! its stores, improved by swapping two stores.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod tour;
mod types;

pub use config::SaConfig;
pub use runner::{acceptance_probability, SaResult, SaRunner};
pub use tour::{anneal_zone, initial_route, swap_neighbor, ZoneTour};
pub use types::{SaProblem, Termination};
