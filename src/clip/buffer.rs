// src/clip/buffer.rs

use geo::{Coord, LineString, MultiPolygon, Polygon, unary_union};
use nalgebra::Vector2;

/// Segments per quarter circle when approximating round buffer corners.
pub const QUARTER_SEGMENTS: usize = 8;

/// Morphological dilation of a region by `distance`.
///
/// Computed as the union of the input with one quad per ring edge and one
/// disc per ring vertex, which is the Minkowski sum with a disc up to the
/// polygonal disc approximation. Hole edges dilate symmetrically, so holes
/// shrink by the same distance. `distance == 0` is the identity; negative
/// distances are rejected by config validation before this is reached.
pub fn dilate(geometry: &MultiPolygon<f64>, distance: f64) -> MultiPolygon<f64> {
    if distance <= 0.0 {
        return geometry.clone();
    }

    let mut pieces: Vec<MultiPolygon<f64>> = vec![geometry.clone()];
    for polygon in &geometry.0 {
        collect_ring_pieces(polygon.exterior(), distance, &mut pieces);
        for interior in polygon.interiors() {
            collect_ring_pieces(interior, distance, &mut pieces);
        }
    }

    unary_union(pieces.iter())
}

fn collect_ring_pieces(ring: &LineString<f64>, distance: f64, out: &mut Vec<MultiPolygon<f64>>) {
    let coords = &ring.0;
    if coords.len() < 2 {
        return;
    }
    for window in coords.windows(2) {
        if let Some(quad) = edge_quad(window[0], window[1], distance) {
            out.push(MultiPolygon::new(vec![quad]));
        }
    }
    // One disc per distinct vertex; the closing coordinate repeats the first.
    for c in &coords[..coords.len() - 1] {
        out.push(MultiPolygon::new(vec![vertex_disc(*c, distance)]));
    }
}

fn edge_quad(a: Coord<f64>, b: Coord<f64>, distance: f64) -> Option<Polygon<f64>> {
    let along = Vector2::new(b.x - a.x, b.y - a.y).try_normalize(1e-12)?;
    let n = Vector2::new(-along.y, along.x) * distance;
    Some(Polygon::new(
        LineString::from(vec![
            Coord {
                x: a.x - n.x,
                y: a.y - n.y,
            },
            Coord {
                x: b.x - n.x,
                y: b.y - n.y,
            },
            Coord {
                x: b.x + n.x,
                y: b.y + n.y,
            },
            Coord {
                x: a.x + n.x,
                y: a.y + n.y,
            },
        ]),
        vec![],
    ))
}

fn vertex_disc(center: Coord<f64>, radius: f64) -> Polygon<f64> {
    let steps = QUARTER_SEGMENTS * 4;
    let mut coords = Vec::with_capacity(steps);
    for i in 0..steps {
        let angle = i as f64 * std::f64::consts::TAU / steps as f64;
        coords.push(Coord {
            x: center.x + radius * angle.cos(),
            y: center.y + radius * angle.sin(),
        });
    }
    Polygon::new(LineString::from(coords), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{Area, BooleanOps};

    fn square(min: f64, max: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                Coord { x: min, y: min },
                Coord { x: max, y: min },
                Coord { x: max, y: max },
                Coord { x: min, y: max },
            ]),
            vec![],
        )
    }

    fn inscribed_disc_area(radius: f64) -> f64 {
        let steps = (QUARTER_SEGMENTS * 4) as f64;
        0.5 * steps * radius * radius * (std::f64::consts::TAU / steps).sin()
    }

    #[test]
    fn test_zero_distance_is_identity() {
        let geometry = MultiPolygon::new(vec![square(0.0, 10.0)]);
        assert_eq!(dilate(&geometry, 0.0), geometry);
    }

    #[test]
    fn test_square_dilation_area() {
        let geometry = MultiPolygon::new(vec![square(0.0, 10.0)]);
        let dilated = dilate(&geometry, 5.0);

        // 10x10 core, four 10x5 side strips, four quarter-disc corners.
        let expected = 100.0 + 200.0 + inscribed_disc_area(5.0);
        assert_relative_eq!(dilated.unsigned_area(), expected, epsilon = 1e-3);
    }

    #[test]
    fn test_dilation_contains_original() {
        let geometry = MultiPolygon::new(vec![square(-3.0, 4.0), square(20.0, 22.0)]);
        let dilated = dilate(&geometry, 1.5);
        let leftover = geometry.difference(&dilated);
        assert!(leftover.0.is_empty(), "dilation must cover the input");
    }

    #[test]
    fn test_hole_shrinks_symmetrically() {
        let outer = LineString::from(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 20.0, y: 0.0 },
            Coord { x: 20.0, y: 20.0 },
            Coord { x: 0.0, y: 20.0 },
        ]);
        let hole = LineString::from(vec![
            Coord { x: 5.0, y: 5.0 },
            Coord { x: 5.0, y: 15.0 },
            Coord { x: 15.0, y: 15.0 },
            Coord { x: 15.0, y: 5.0 },
        ]);
        let geometry = MultiPolygon::new(vec![Polygon::new(outer, vec![hole])]);
        let dilated = dilate(&geometry, 2.0);

        assert_eq!(dilated.0.len(), 1);
        assert_eq!(dilated.0[0].interiors().len(), 1, "hole must survive a 2-unit dilation");

        // Outer ring grows with rounded corners, the hole shrinks to 6x6
        // with sharp corners.
        let expected = (400.0 + 4.0 * 20.0 * 2.0 + inscribed_disc_area(2.0)) - 36.0;
        assert_relative_eq!(dilated.unsigned_area(), expected, epsilon = 1e-3);
    }

    #[test]
    fn test_disjoint_parts_merge_when_close() {
        let geometry = MultiPolygon::new(vec![square(0.0, 10.0), square(12.0, 22.0)]);
        let dilated = dilate(&geometry, 2.0);
        // The 2-unit gap closes once both sides grow by 2.
        assert_eq!(dilated.0.len(), 1);
    }
}
