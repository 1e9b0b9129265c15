// src/clip/clipper.rs

use geo::{BooleanOps, MultiPolygon};
use tracing::debug;

use crate::clip::buffer::dilate;
use crate::tessellation::FiniteCell;
use crate::types::Territory;

/// A finite cell restricted to the buffered territory; the intersection may
/// be disconnected, hence multi-part.
#[derive(Debug, Clone)]
pub struct ClippedCell {
    pub site_index: usize,
    pub parts: MultiPolygon<f64>,
}

/// Intersects finite cells with the buffered territory.
///
/// The buffered geometry is prepared once per run; each `clip` call is then
/// a pure function of the cell, running on the robust boolean kernel.
pub struct BoundaryClipper {
    prepared: MultiPolygon<f64>,
}

impl BoundaryClipper {
    pub fn new(territory: &Territory, buffer_distance: f64) -> Self {
        Self {
            prepared: dilate(&territory.geometry, buffer_distance),
        }
    }

    /// The buffered clip region.
    pub fn clip_region(&self) -> &MultiPolygon<f64> {
        &self.prepared
    }

    /// Returns `None` when the cell lies entirely outside the buffered
    /// territory; dropping such cells is an expected outcome, not an error.
    pub fn clip(&self, cell: &FiniteCell) -> Option<ClippedCell> {
        let cell_geometry = MultiPolygon::new(vec![cell.polygon.clone()]);
        let parts = self.prepared.intersection(&cell_geometry);
        if parts.0.is_empty() {
            debug!(
                "Cell of site {} lies outside the buffered territory",
                cell.site_index
            );
            return None;
        }
        Some(ClippedCell {
            site_index: cell.site_index,
            parts,
        })
    }
}
