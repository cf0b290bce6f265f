//! Input domain types: locations and the location table.

mod location;

pub use location::{Location, LocationKind, LocationTable};
