// src/tessellation/builder.rs

use spade::{DelaunayTriangulation, Point2, Triangulation};
use tracing::debug;

use crate::error::{PartitionError, PartitionResult};
use crate::types::{Coord, Site, SpadePoint};

/// One unbounded ridge of an open cell.
///
/// The ridge lies on the perpendicular bisector of the owner and `neighbor`
/// generators and starts at the finite `anchor` vertex, so the pair fixes
/// the ray's line; the reconstructor picks the outward direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenRay {
    /// Finite ridge endpoint: circumcenter of the inner face at the hull edge.
    pub anchor: Coord<f64>,
    /// Generator on the other side of the ridge.
    pub neighbor: Coord<f64>,
}

/// Both unbounded ridges of an open cell, attached to the ends of the
/// vertex chain: `head` before the first vertex, `tail` after the last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRays {
    pub head: OpenRay,
    pub tail: OpenRay,
}

/// Raw nearest-point cell extracted from the Delaunay dual.
///
/// `vertices` holds circumcenters in ring-connectivity order, never sorted
/// by angle. Closed cells carry `rays: None`; cells of convex-hull sites
/// are open and carry both ridge descriptors.
#[derive(Debug, Clone)]
pub struct TessellationCell {
    /// Index of the generator in the normalized site list.
    pub site_index: usize,
    pub vertices: Vec<Coord<f64>>,
    pub rays: Option<CellRays>,
}

impl TessellationCell {
    pub fn is_open(&self) -> bool {
        self.rays.is_some()
    }
}

/// Builds the full-plane nearest-point tessellation of the normalized sites.
pub struct TessellationBuilder;

impl TessellationBuilder {
    /// Triangulates the sites and extracts one cell per site.
    ///
    /// Vertex indices equal input indices (stable bulk load), so
    /// `cells[i].site_index == i` and owner attribution survives the
    /// tessellation unchanged.
    pub fn build_cells(sites: &[Site]) -> PartitionResult<Vec<TessellationCell>> {
        let points: Vec<SpadePoint> = sites
            .iter()
            .map(|s| Point2::new(s.position.x, s.position.y))
            .collect();

        let triangulation = DelaunayTriangulation::<SpadePoint>::bulk_load_stable(points)
            .map_err(|e| PartitionError::TriangulationFailed {
                reason: format!("bulk load rejected the site set: {:?}", e),
            })?;

        if triangulation.num_vertices() != sites.len() {
            // The normalizer guarantees distinct coordinates, so a merged
            // vertex would break the index <-> owner correspondence.
            return Err(PartitionError::TriangulationFailed {
                reason: format!(
                    "triangulation merged sites: {} in, {} kept",
                    sites.len(),
                    triangulation.num_vertices()
                ),
            });
        }

        // num_all_faces counts the outer face, so 1 means not a single
        // triangle: at least 3 distinct sites, all collinear.
        if triangulation.num_all_faces() <= 1 {
            return Err(PartitionError::DegenerateInput {
                point_count: sites.len(),
            });
        }

        let mut cells = Vec::with_capacity(triangulation.num_vertices());

        for vertex in triangulation.vertices() {
            let site_index = vertex.fix().index();
            let edges: Vec<_> = vertex.out_edges().collect();

            // A hull site has exactly one outgoing edge whose left face is
            // the outer face. Rotating the fan to end on that edge leaves
            // the inner faces contiguous in circulator order.
            let outer_pos = edges.iter().position(|e| e.face().is_outer());

            let Some(outer_pos) = outer_pos else {
                let mut ring = Vec::with_capacity(edges.len());
                for edge in &edges {
                    if let Some(inner) = edge.face().as_inner() {
                        let cc = inner.circumcenter();
                        ring.push(Coord { x: cc.x, y: cc.y });
                    }
                }
                ring.dedup();
                while ring.len() > 1 && ring.first() == ring.last() {
                    ring.pop();
                }
                cells.push(TessellationCell {
                    site_index,
                    vertices: ring,
                    rays: None,
                });
                continue;
            };

            let mut ordered = Vec::with_capacity(edges.len());
            ordered.extend(edges[outer_pos + 1..].iter().copied());
            ordered.extend(edges[..=outer_pos].iter().copied());

            let mut chain = Vec::with_capacity(ordered.len() - 1);
            for edge in &ordered[..ordered.len() - 1] {
                match edge.face().as_inner() {
                    Some(inner) => {
                        let cc = inner.circumcenter();
                        chain.push(Coord { x: cc.x, y: cc.y });
                    }
                    None => {
                        return Err(PartitionError::TriangulationFailed {
                            reason: format!("non-contiguous outer fan at site {}", site_index),
                        });
                    }
                }
            }
            chain.dedup();

            // The two hull edges at this site carry the unbounded ridges:
            // the rotated fan ends on the edge whose own face is outer, and
            // somewhere in the fan sits the edge whose reversed face is outer.
            let leaving_hull = ordered[ordered.len() - 1];
            let arriving_hull = ordered[..ordered.len() - 1]
                .iter()
                .copied()
                .find(|e| e.rev().face().is_outer())
                .ok_or_else(|| PartitionError::TriangulationFailed {
                    reason: format!("missing second hull edge at site {}", site_index),
                })?;

            let arriving_anchor = arriving_hull
                .face()
                .as_inner()
                .map(|f| f.circumcenter())
                .ok_or_else(|| PartitionError::TriangulationFailed {
                    reason: format!("hull edge without inner face at site {}", site_index),
                })?;
            let leaving_anchor = leaving_hull
                .rev()
                .face()
                .as_inner()
                .map(|f| f.circumcenter())
                .ok_or_else(|| PartitionError::TriangulationFailed {
                    reason: format!("hull edge without inner face at site {}", site_index),
                })?;

            let arriving_ray = OpenRay {
                anchor: to_coord(arriving_anchor),
                neighbor: to_coord(arriving_hull.to().position()),
            };
            let leaving_ray = OpenRay {
                anchor: to_coord(leaving_anchor),
                neighbor: to_coord(leaving_hull.to().position()),
            };

            let (&first, &last) = match (chain.first(), chain.last()) {
                (Some(first), Some(last)) => (first, last),
                _ => {
                    return Err(PartitionError::TriangulationFailed {
                        reason: format!("hull site {} has no adjacent inner face", site_index),
                    });
                }
            };

            // A ridge anchor is the circumcenter of a fan end face, so it
            // must coincide with one end of the vertex chain; pair each ray
            // with its end instead of trusting a circulator direction.
            let rays = if arriving_ray.anchor == first && leaving_ray.anchor == last {
                CellRays {
                    head: arriving_ray,
                    tail: leaving_ray,
                }
            } else if leaving_ray.anchor == first && arriving_ray.anchor == last {
                CellRays {
                    head: leaving_ray,
                    tail: arriving_ray,
                }
            } else {
                return Err(PartitionError::TriangulationFailed {
                    reason: format!(
                        "hull ridge anchors detached from cell ring at site {}",
                        site_index
                    ),
                });
            };

            cells.push(TessellationCell {
                site_index,
                vertices: chain,
                rays: Some(rays),
            });
        }

        debug!(
            "Extracted {} tessellation cells ({} open)",
            cells.len(),
            cells.iter().filter(|c| c.is_open()).count()
        );

        Ok(cells)
    }
}

fn to_coord(p: SpadePoint) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}
