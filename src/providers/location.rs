// src/providers/location.rs

use anyhow::Result;

use crate::types::{CategoryId, Crs, Site, SiteSet};

/// Source of located entity sites, already projected into the target CRS.
///
/// Implementations wrap whatever store holds the entity and address
/// records (relational store, remote API, flat file); the partition core
/// only ever sees the resulting `SiteSet`.
pub trait LocationProvider {
    /// Sites whose category matches any entry of `categories`; an empty
    /// filter selects every site.
    fn sites(&self, categories: &[CategoryId]) -> Result<SiteSet>;
}

/// Provider over records already in memory, used by tests and demos.
#[derive(Debug, Clone)]
pub struct InMemoryLocations {
    crs: Crs,
    records: Vec<(CategoryId, Site)>,
}

impl InMemoryLocations {
    pub fn new(crs: Crs) -> Self {
        Self {
            crs,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, category: CategoryId, site: Site) {
        self.records.push((category, site));
    }
}

impl LocationProvider for InMemoryLocations {
    fn sites(&self, categories: &[CategoryId]) -> Result<SiteSet> {
        let sites = self
            .records
            .iter()
            .filter(|(category, _)| categories.is_empty() || categories.contains(category))
            .map(|(_, site)| *site)
            .collect();
        Ok(SiteSet::new(self.crs.clone(), sites))
    }
}
