// src/render/svg.rs

use std::io;
use std::path::Path as FilePath;

use geo::{BoundingRect, Coord, LineString, MultiPolygon};
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path, Style};
use svg::Document;
use tracing::info;

use crate::types::{Bounds2D, ServiceArea, Site, Territory};

/// Fill colors cycled across service areas.
const AREA_PALETTE: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Stroke and marker sizes relative to the drawing extent, so the output
/// looks the same for meter-scale and kilometer-scale coordinates.
struct SvgScale {
    stroke_normal: f64,
    stroke_thin: f64,
    point_radius: f64,
}

impl SvgScale {
    fn new(bounds: &Bounds2D) -> Self {
        let reference = (bounds.width() + bounds.height()) / 2.0;
        Self {
            stroke_normal: reference * 0.005,
            stroke_thin: reference * 0.002,
            point_radius: reference * 0.004,
        }
    }
}

/// Writes a diagnostic SVG of a computed partition: the territory outline,
/// an optional dashed outline of the buffered clip region, one filled
/// region per service area and one dot per generator site.
///
/// This is a debugging aid, not a map renderer. The canvas covers the
/// territory, clip region and all sites with a small margin; the y axis
/// keeps SVG orientation, so projected coordinates appear mirrored
/// vertically.
pub fn render_partition(
    filename: impl AsRef<FilePath>,
    territory: &Territory,
    clip_region: Option<&MultiPolygon<f64>>,
    areas: &[ServiceArea],
    sites: &[Site],
) -> io::Result<()> {
    let mut bounds = territory
        .geometry
        .bounding_rect()
        .map(Bounds2D::from)
        .unwrap_or_else(Bounds2D::empty);
    if let Some(region) = clip_region {
        if let Some(rect) = region.bounding_rect() {
            bounds = bounds.union(&Bounds2D::from(rect));
        }
    }
    for site in sites {
        bounds.expand_to_include_coord(site.position);
    }
    if !bounds.is_valid() {
        // Nothing to draw; keep the file well formed anyway.
        bounds = Bounds2D {
            min: Coord { x: 0.0, y: 0.0 },
            max: Coord { x: 1.0, y: 1.0 },
        };
    }
    let bounds = bounds.expand(bounds.diagonal() * 0.02);

    let scale = SvgScale::new(&bounds);
    let dash = scale.stroke_normal * 2.0;
    let style = format!(
        "\
        .territory {{ fill: #f0f0f0; stroke: #888888; stroke-width: {:.4}; }}\n\
        .clip-region {{ fill: none; stroke: #888888; stroke-width: {:.4}; stroke-dasharray: {:.4} {:.4}; }}\n\
        .service-area {{ fill-opacity: 0.6; stroke: #333333; stroke-width: {:.4}; }}\n\
        .site {{ fill: #222222; stroke: #ffffff; stroke-width: {:.4}; }}",
        scale.stroke_normal, scale.stroke_thin, dash, dash, scale.stroke_thin, scale.stroke_thin,
    );

    let mut document = Document::new()
        .set(
            "viewBox",
            (bounds.min.x, bounds.min.y, bounds.width(), bounds.height()),
        )
        .add(Style::new(style))
        .add(multi_polygon_path(&territory.geometry).set("class", "territory"));

    if let Some(region) = clip_region {
        document = document.add(multi_polygon_path(region).set("class", "clip-region"));
    }

    let mut regions = Group::new();
    for (index, area) in areas.iter().enumerate() {
        let fill = AREA_PALETTE[index % AREA_PALETTE.len()];
        regions = regions.add(
            multi_polygon_path(&area.geometry)
                .set("class", "service-area")
                .set("fill", fill),
        );
    }
    document = document.add(regions);

    let mut dots = Group::new();
    for site in sites {
        dots = dots.add(
            Circle::new()
                .set("cx", site.position.x)
                .set("cy", site.position.y)
                .set("r", scale.point_radius)
                .set("class", "site"),
        );
    }
    document = document.add(dots);

    svg::save(&filename, &document)?;
    info!(
        "partition debug SVG written to {}",
        filename.as_ref().display()
    );
    Ok(())
}

/// One `<path>` per multipolygon, holes carried as extra subpaths under the
/// evenodd fill rule.
fn multi_polygon_path(geometry: &MultiPolygon<f64>) -> Path {
    let mut data = Data::new();
    for polygon in &geometry.0 {
        data = append_ring(data, polygon.exterior());
        for interior in polygon.interiors() {
            data = append_ring(data, interior);
        }
    }
    Path::new().set("d", data).set("fill-rule", "evenodd")
}

fn append_ring(mut data: Data, ring: &LineString<f64>) -> Data {
    let coords = &ring.0;
    if coords.len() < 2 {
        return data;
    }
    // Closed rings repeat the first coordinate; `close` replaces it.
    let end = if coords.first() == coords.last() {
        coords.len() - 1
    } else {
        coords.len()
    };
    data = data.move_to((coords[0].x, coords[0].y));
    for coord in &coords[1..end] {
        data = data.line_to((coord.x, coord.y));
    }
    data.close()
}
