//! Locations and the location table.

use std::str::FromStr;

use crate::error::{RouteError, RouteResult};

/// Category of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LocationKind {
    /// A distribution center. Each one anchors a zone.
    DistributionCenter,
    /// A store to be visited.
    Store,
}

impl FromStr for LocationKind {
    type Err = RouteError;

    /// Parses a category label, case-insensitive.
    ///
    /// Besides the English labels, the labels found in the source
    /// spreadsheets (`"Centro de Distribución"`, `"Tienda"`) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "distribution center" | "distribution_center" | "center" | "dc"
            | "centro de distribución" | "centro de distribucion" => {
                Ok(Self::DistributionCenter)
            }
            "store" | "tienda" => Ok(Self::Store),
            _ => Err(RouteError::UnknownLocationKind(s.to_string())),
        }
    }
}

/// A distribution center or store.
///
/// The location id is its position in the owning [`LocationTable`].
///
/// # Examples
///
/// ```
/// use u_zoneroute::models::{Location, LocationKind};
///
/// let store = Location::new(LocationKind::Store, "Store 1", 19.43, -99.13, 1200);
/// assert!(store.is_store());
/// assert_eq!(store.coordinates(), (19.43, -99.13));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    kind: LocationKind,
    name: String,
    latitude: f64,
    longitude: f64,
    capacity: u64,
}

impl Location {
    /// Creates a location.
    pub fn new(
        kind: LocationKind,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        capacity: u64,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            latitude,
            longitude,
            capacity,
        }
    }

    /// Shorthand for a distribution center with zero capacity.
    pub fn center(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self::new(LocationKind::DistributionCenter, name, latitude, longitude, 0)
    }

    /// Shorthand for a store.
    pub fn store(name: impl Into<String>, latitude: f64, longitude: f64, capacity: u64) -> Self {
        Self::new(LocationKind::Store, name, latitude, longitude, capacity)
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `(latitude, longitude)`.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Sales capacity of the location.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn is_center(&self) -> bool {
        self.kind == LocationKind::DistributionCenter
    }

    pub fn is_store(&self) -> bool {
        self.kind == LocationKind::Store
    }

    /// Straight-line distance on raw coordinates (not geodesic).
    pub fn euclidean_to(&self, other: &Location) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

/// Ordered, non-empty table of locations.
///
/// Row order defines location ids, which index the cost matrix.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLocationTable"))]
pub struct LocationTable {
    locations: Vec<Location>,
}

/// Unchecked wire form of [`LocationTable`]; deserialization goes through
/// [`LocationTable::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawLocationTable {
    locations: Vec<Location>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLocationTable> for LocationTable {
    type Error = RouteError;

    fn try_from(raw: RawLocationTable) -> RouteResult<Self> {
        Self::new(raw.locations)
    }
}

impl LocationTable {
    /// Builds a table from rows in their loaded order.
    ///
    /// # Errors
    ///
    /// [`RouteError::DataUnavailable`] if `locations` is empty and
    /// [`RouteError::InvalidLocation`] if a row has non-finite coordinates.
    pub fn new(locations: Vec<Location>) -> RouteResult<Self> {
        if locations.is_empty() {
            return Err(RouteError::DataUnavailable("location table is empty".into()));
        }
        for (index, loc) in locations.iter().enumerate() {
            if !loc.latitude.is_finite() || !loc.longitude.is_finite() {
                return Err(RouteError::InvalidLocation {
                    index,
                    reason: format!(
                        "non-finite coordinates ({}, {})",
                        loc.latitude, loc.longitude
                    ),
                });
            }
        }
        Ok(Self { locations })
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Location with the given id.
    pub fn get(&self, id: usize) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Iterates `(id, location)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Location)> {
        self.locations.iter().enumerate()
    }

    /// Ids of distribution centers, in table order.
    pub fn center_ids(&self) -> Vec<usize> {
        self.ids_of(LocationKind::DistributionCenter)
    }

    /// Ids of stores, in table order.
    pub fn store_ids(&self) -> Vec<usize> {
        self.ids_of(LocationKind::Store)
    }

    /// Sum of the capacities of the given locations. Unknown ids count as 0.
    pub fn total_capacity(&self, ids: &[usize]) -> u64 {
        ids.iter()
            .filter_map(|&id| self.get(id))
            .map(Location::capacity)
            .sum()
    }

    fn ids_of(&self, kind: LocationKind) -> Vec<usize> {
        self.iter()
            .filter(|(_, loc)| loc.kind == kind)
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> LocationTable {
        LocationTable::new(vec![
            Location::center("North DC", 0.0, 0.0),
            Location::store("A", 0.0, 1.0, 100),
            Location::center("South DC", 10.0, 10.0),
            Location::store("B", 3.0, 4.0, 250),
        ])
        .expect("valid table")
    }

    #[test]
    fn test_parse_kind_labels() {
        assert_eq!(
            "Distribution Center".parse::<LocationKind>().unwrap(),
            LocationKind::DistributionCenter
        );
        assert_eq!(
            "Centro de Distribución".parse::<LocationKind>().unwrap(),
            LocationKind::DistributionCenter
        );
        assert_eq!(" Tienda ".parse::<LocationKind>().unwrap(), LocationKind::Store);
        assert_eq!("store".parse::<LocationKind>().unwrap(), LocationKind::Store);
    }

    #[test]
    fn test_parse_kind_unknown() {
        let err = "warehouse".parse::<LocationKind>().unwrap_err();
        assert_eq!(err, RouteError::UnknownLocationKind("warehouse".into()));
    }

    #[test]
    fn test_center_and_store_ids_follow_table_order() {
        let table = sample_table();
        assert_eq!(table.center_ids(), vec![0, 2]);
        assert_eq!(table.store_ids(), vec![1, 3]);
    }

    #[test]
    fn test_total_capacity() {
        let table = sample_table();
        assert_eq!(table.total_capacity(&[1, 3]), 350);
        assert_eq!(table.total_capacity(&[]), 0);
        assert_eq!(table.total_capacity(&[99]), 0);
    }

    #[test]
    fn test_euclidean_on_raw_coordinates() {
        let table = sample_table();
        let dc = table.get(0).unwrap();
        let b = table.get(3).unwrap();
        assert!((dc.euclidean_to(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = LocationTable::new(vec![]).unwrap_err();
        assert!(matches!(err, RouteError::DataUnavailable(_)));
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let err = LocationTable::new(vec![
            Location::center("DC", 0.0, 0.0),
            Location::store("Bad", f64::NAN, 1.0, 10),
        ])
        .unwrap_err();
        assert!(matches!(err, RouteError::InvalidLocation { index: 1, .. }));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let table: LocationTable = serde_json::from_str(
            r#"{"locations":[
                {"kind":"distribution_center","name":"DC","latitude":0.0,"longitude":0.0,"capacity":0},
                {"kind":"store","name":"s1","latitude":1.0,"longitude":2.0,"capacity":30}
            ]}"#,
        )
        .unwrap();
        assert_eq!(table.center_ids(), vec![0]);
        assert_eq!(table.total_capacity(&[1]), 30);

        let empty = serde_json::from_str::<LocationTable>(r#"{"locations":[]}"#);
        assert!(empty.is_err());
    }
}
