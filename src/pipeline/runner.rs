// src/pipeline/runner.rs

use geo::BoundingRect;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::clip::{BoundaryClipper, ClippedCell};
use crate::dissolve::aggregate;
use crate::error::{PartitionError, PartitionResult};
use crate::normalize::normalize_sites;
use crate::pipeline::config::{CAPPING_SAFETY_FACTOR, CappingRadius, PartitionConfig};
use crate::tessellation::{FiniteCell, TessellationBuilder, reconstruct_cell, sites_centroid};
use crate::types::{Bounds2D, ServiceArea, Site, SiteSet, Territory};

/// Orchestrates the five partition stages for one run.
pub struct ServiceAreaBuilder {
    config: PartitionConfig,
}

impl ServiceAreaBuilder {
    pub fn new(config: PartitionConfig) -> PartitionResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Runs normalization, tessellation, reconstruction, clipping and
    /// aggregation in order. Reconstruction and clipping fan out per cell;
    /// collection preserves input order, so identical input produces
    /// bit-identical output.
    pub fn build(
        &self,
        sites: &SiteSet,
        territory: &Territory,
    ) -> PartitionResult<Vec<ServiceArea>> {
        if sites.crs != territory.crs {
            return Err(PartitionError::CrsMismatch {
                sites: sites.crs.clone(),
                territory: territory.crs.clone(),
            });
        }

        info!("Partitioning {} sites in {}", sites.len(), sites.crs);

        // Stage 1: validate and deduplicate.
        let normalized = normalize_sites(&sites.sites)?;
        debug!("{} sites retained after normalization", normalized.len());

        // Stage 2: full-plane tessellation.
        let cells = TessellationBuilder::build_cells(&normalized)?;

        // Stage 3: make every cell finite.
        let capping_radius = self.resolve_capping_radius(&normalized, territory)?;
        debug!("Capping radius resolved to {}", capping_radius);
        let centroid = sites_centroid(&normalized);
        let finite: Vec<FiniteCell> = cells
            .par_iter()
            .map(|cell| reconstruct_cell(cell, &normalized, centroid, capping_radius))
            .collect::<PartitionResult<_>>()?;

        // Stage 4: restrict to the buffered territory.
        let clipper = BoundaryClipper::new(territory, self.config.buffer_distance);
        let clipped: Vec<ClippedCell> = finite
            .par_iter()
            .filter_map(|cell| clipper.clip(cell))
            .collect();
        debug!(
            "{} of {} cells intersect the buffered territory",
            clipped.len(),
            finite.len()
        );

        // Stage 5: group and attribute.
        let areas = aggregate(clipped, &normalized, self.config.dissolve);
        info!("Produced {} service areas", areas.len());
        Ok(areas)
    }

    /// Resolves the configured capping radius against the combined extent
    /// of the normalized sites and the territory, so a far-away boundary
    /// cannot out-run the cap.
    fn resolve_capping_radius(
        &self,
        sites: &[Site],
        territory: &Territory,
    ) -> PartitionResult<f64> {
        let site_bounds = Bounds2D::from_coords_iter(sites.iter().map(|s| s.position))
            .ok_or_else(|| PartitionError::InvalidConfiguration {
                message: "cannot derive an extent from an empty site list".to_string(),
            })?;
        let territory_bounds = territory
            .geometry
            .bounding_rect()
            .map(Bounds2D::from)
            .unwrap_or_else(Bounds2D::empty);
        let diagonal = site_bounds.union(&territory_bounds).diagonal();

        match self.config.capping_radius {
            CappingRadius::Auto => Ok(diagonal * CAPPING_SAFETY_FACTOR),
            CappingRadius::Fixed(radius) => {
                if radius <= diagonal {
                    return Err(PartitionError::InvalidConfiguration {
                        message: format!(
                            "capping radius {} does not clear the input extent diagonal {}",
                            radius, diagonal
                        ),
                    });
                }
                Ok(radius)
            }
        }
    }
}
