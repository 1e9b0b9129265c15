// src/lib.rs

//! Nearest-practitioner service areas over a territory.
//!
//! Given one projected point per located practitioner and the polygon of an
//! administrative territory, this crate computes the planar Voronoi
//! partition of the territory: every point of the territory falls into the
//! service area of its nearest practitioner. Unbounded hull cells are capped
//! far outside the data extent, every cell is clipped to a buffered copy of
//! the territory, and per-site polygons can be dissolved into one
//! multipolygon per owner.
//!
//! # Example
//!
//! ```
//! use catchment::{partition, Crs, OwnerId, PartitionConfig, Site, SiteSet, Territory};
//! use geo::{polygon, Area};
//!
//! let crs = Crs::epsg(2154);
//! let sites = SiteSet::new(
//!     crs.clone(),
//!     vec![
//!         Site::new(OwnerId(1), 0.0, 0.0),
//!         Site::new(OwnerId(2), 10.0, 0.0),
//!         Site::new(OwnerId(3), 0.0, 10.0),
//!     ],
//! );
//! let territory = Territory::from_polygon(
//!     crs,
//!     polygon![
//!         (x: 0.0, y: 0.0),
//!         (x: 100.0, y: 0.0),
//!         (x: 100.0, y: 100.0),
//!         (x: 0.0, y: 100.0),
//!     ],
//! );
//!
//! let config = PartitionConfig::new().with_buffer_distance(0.0);
//! let areas = partition(&sites, &territory, &config).expect("partition should succeed");
//!
//! // The three service areas tile the whole territory.
//! assert_eq!(areas.len(), 3);
//! let total: f64 = areas.iter().map(|area| area.geometry.unsigned_area()).sum();
//! assert!((total - 10_000.0).abs() < 1e-3);
//! ```

pub mod clip;
pub mod dissolve;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod providers;
pub mod render;
pub mod tessellation;
pub mod types;

pub use error::{PartitionError, PartitionResult};
pub use pipeline::{CappingRadius, PartitionConfig, ServiceAreaBuilder};
pub use types::{
    AddressId, Bounds2D, CategoryId, Crs, OwnerId, ServiceArea, Site, SiteSet, Territory,
};

/// Computes the service areas for one set of sites over one territory.
///
/// Convenience wrapper over [`ServiceAreaBuilder`] for one-shot use; callers
/// partitioning several site sets against the same configuration should
/// build the [`ServiceAreaBuilder`] once and reuse it.
pub fn partition(
    sites: &SiteSet,
    territory: &Territory,
    config: &PartitionConfig,
) -> PartitionResult<Vec<ServiceArea>> {
    ServiceAreaBuilder::new(config.clone())?.build(sites, territory)
}
