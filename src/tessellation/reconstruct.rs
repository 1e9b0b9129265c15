// src/tessellation/reconstruct.rs

use geo::{ConvexHull, LineString, MultiPoint, Point, Polygon};
use nalgebra::Vector2;
use tracing::warn;

use crate::error::{PartitionError, PartitionResult};
use crate::tessellation::builder::{OpenRay, TessellationCell};
use crate::types::{Coord, Site};

/// A tessellation cell made finite: one closed simple polygon per site.
#[derive(Debug, Clone)]
pub struct FiniteCell {
    pub site_index: usize,
    pub polygon: Polygon<f64>,
}

/// Mean of the normalized generator positions, the reference point the
/// outward-ray orientation is measured against.
pub fn sites_centroid(sites: &[Site]) -> Coord<f64> {
    let n = sites.len().max(1) as f64;
    let mut sum = Coord { x: 0.0, y: 0.0 };
    for site in sites {
        sum.x += site.position.x;
        sum.y += site.position.y;
    }
    Coord {
        x: sum.x / n,
        y: sum.y / n,
    }
}

/// Converts one cell into a finite polygon.
///
/// Closed cells pass through. Open cells get one synthetic vertex per
/// unbounded ridge, placed `capping_radius` along the ridge away from its
/// anchor; the outward side is the one whose ridge midpoint lies away from
/// `centroid` (sign of the midpoint-minus-centroid dot normal). That
/// orientation test is a known approximation for strongly non-convex site
/// distributions; the oversized radius keeps the error outside any
/// realistically buffered territory.
///
/// Rings that degenerate (under 3 distinct vertices or zero area) fall back
/// to the convex hull of whatever vertices exist; if not even a hull has
/// area, the cell is reported as a `Reconstruction` failure with its ridge
/// diagnostics rather than silently guessed at.
pub fn reconstruct_cell(
    cell: &TessellationCell,
    sites: &[Site],
    centroid: Coord<f64>,
    capping_radius: f64,
) -> PartitionResult<FiniteCell> {
    let owner_site = &sites[cell.site_index];
    let mut ring = cell.vertices.clone();

    if let Some(rays) = &cell.rays {
        let far_head = cap_ray(&rays.head, owner_site, centroid, capping_radius)?;
        let far_tail = cap_ray(&rays.tail, owner_site, centroid, capping_radius)?;
        ring.insert(0, far_head);
        ring.push(far_tail);
    }

    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    let area = signed_area(&ring);
    if ring.len() >= 3 && area != 0.0 {
        if area < 0.0 {
            ring.reverse();
        }
        return Ok(FiniteCell {
            site_index: cell.site_index,
            polygon: Polygon::new(LineString::from(ring), vec![]),
        });
    }

    // Degenerate ring: accept the convex hull of the vertices we have as a
    // degraded but valid region.
    let points: Vec<Point<f64>> = ring.iter().map(|c| Point::new(c.x, c.y)).collect();
    let hull = MultiPoint::new(points).convex_hull();
    if hull.exterior().0.len() >= 4 && signed_area(&hull.exterior().0) != 0.0 {
        warn!(
            "Degenerate cell ring for owner {}, using convex hull of {} vertices",
            owner_site.owner,
            ring.len()
        );
        return Ok(FiniteCell {
            site_index: cell.site_index,
            polygon: hull,
        });
    }

    Err(PartitionError::Reconstruction {
        owner: owner_site.owner,
        detail: format!(
            "no valid ring from {} vertices, ridges: {:?}",
            ring.len(),
            cell.rays
        ),
    })
}

fn cap_ray(
    ray: &OpenRay,
    owner_site: &Site,
    centroid: Coord<f64>,
    capping_radius: f64,
) -> PartitionResult<Coord<f64>> {
    let owner = owner_site.position;
    let tangent = Vector2::new(ray.neighbor.x - owner.x, ray.neighbor.y - owner.y);
    let tangent = tangent
        .try_normalize(1e-12)
        .ok_or_else(|| PartitionError::Reconstruction {
            owner: owner_site.owner,
            detail: format!("ridge between coincident generators: {:?}", ray),
        })?;

    // The ridge runs along the perpendicular bisector of owner and neighbor.
    let normal = Vector2::new(-tangent.y, tangent.x);
    let midpoint = Vector2::new(
        (owner.x + ray.neighbor.x) * 0.5,
        (owner.y + ray.neighbor.y) * 0.5,
    );
    let from_centroid = midpoint - Vector2::new(centroid.x, centroid.y);
    let direction = if from_centroid.dot(&normal) >= 0.0 {
        normal
    } else {
        -normal
    };

    Ok(Coord {
        x: ray.anchor.x + direction.x * capping_radius,
        y: ray.anchor.y + direction.y * capping_radius,
    })
}

fn signed_area(ring: &[Coord<f64>]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    0.5 * sum
}
