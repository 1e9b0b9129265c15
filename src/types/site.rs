// src/types/site.rs
use geo::{Coord, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::crs::Crs;

/// Identifier of the entity a service area belongs to (e.g. a practitioner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub u64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the address record a site was located from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AddressId(pub u64);

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-chosen key a location provider filters by (e.g. a profession code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub u32);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One located entity: a generator point with its owner attribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub owner: OwnerId,
    pub address: Option<AddressId>,
    pub position: Coord<f64>,
}

impl Site {
    pub fn new(owner: OwnerId, x: f64, y: f64) -> Self {
        Self {
            owner,
            address: None,
            position: Coord { x, y },
        }
    }

    pub fn with_address(mut self, address: AddressId) -> Self {
        self.address = Some(address);
        self
    }
}

/// Input point collection together with its reference-frame tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSet {
    pub crs: Crs,
    pub sites: Vec<Site>,
}

impl SiteSet {
    pub fn new(crs: Crs, sites: Vec<Site>) -> Self {
        Self { crs, sites }
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Administrative boundary the partition is restricted to.
///
/// May be multi-part and carry holes; the pipeline treats it as opaque
/// geometry and never repairs self-intersections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub crs: Crs,
    pub geometry: MultiPolygon<f64>,
}

impl Territory {
    pub fn new(crs: Crs, geometry: MultiPolygon<f64>) -> Self {
        Self { crs, geometry }
    }

    pub fn from_polygon(crs: Crs, polygon: Polygon<f64>) -> Self {
        Self {
            crs,
            geometry: MultiPolygon::new(vec![polygon]),
        }
    }
}

/// Final output record: one owner's share of the territory.
///
/// Without dissolve there is one record per retained site, so an owner with
/// several distinct addresses appears several times; with dissolve the
/// owner's parts are unioned into a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceArea {
    pub owner: OwnerId,
    pub address: Option<AddressId>,
    pub geometry: MultiPolygon<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_construction() {
        let site = Site::new(OwnerId(7), 1.5, -2.0).with_address(AddressId(42));
        assert_eq!(site.owner, OwnerId(7));
        assert_eq!(site.address, Some(AddressId(42)));
        assert_eq!(site.position, Coord { x: 1.5, y: -2.0 });
    }

    #[test]
    fn test_site_set_len() {
        let set = SiteSet::new(
            Crs::epsg(2154),
            vec![Site::new(OwnerId(1), 0.0, 0.0), Site::new(OwnerId(2), 1.0, 1.0)],
        );
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
