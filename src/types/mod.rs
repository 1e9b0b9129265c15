// src/types/mod.rs
pub mod bounds;
pub mod crs;
pub mod site;

pub use bounds::*;
pub use crs::*;
pub use site::*;

// Re-export commonly used external types
pub use geo::{Coord, MultiPolygon, Polygon};
pub use spade::Point2;

pub type SpadePoint = Point2<f64>;
