// src/providers/territory.rs

use anyhow::Result;

use crate::types::Territory;

/// Source of the administrative territory that bounds every service area.
///
/// Implementations typically load an administrative boundary from a
/// geospatial store and reproject it; here the core only requires the
/// final geometry in the working CRS.
pub trait TerritoryProvider {
    fn territory(&self) -> Result<Territory>;
}

/// Provider handing out a territory held in memory, used by tests and demos.
#[derive(Debug, Clone)]
pub struct InMemoryTerritory {
    territory: Territory,
}

impl InMemoryTerritory {
    pub fn new(territory: Territory) -> Self {
        Self { territory }
    }
}

impl TerritoryProvider for InMemoryTerritory {
    fn territory(&self) -> Result<Territory> {
        Ok(self.territory.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Crs;
    use geo::polygon;

    #[test]
    fn test_in_memory_round_trip() {
        let boundary = polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
        ];
        let provider = InMemoryTerritory::new(Territory::from_polygon(Crs::epsg(2154), boundary));

        let territory = provider.territory().unwrap();
        assert_eq!(territory.crs, Crs::epsg(2154));
        assert_eq!(territory.geometry.0.len(), 1);
    }
}
