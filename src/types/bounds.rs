// src/types/bounds.rs

use geo::{Coord, Rect};
use std::fmt;

use crate::error::{PartitionError, PartitionResult};

/// 2D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Coord<f64>,
    pub max: Coord<f64>,
}

impl Bounds2D {
    /// Creates a new bounding box
    pub fn new(min: Coord<f64>, max: Coord<f64>) -> PartitionResult<Self> {
        if min.x > max.x || min.y > max.y {
            return Err(PartitionError::InvalidConfiguration {
                message: format!("Invalid bounds: min {:?} > max {:?}", min, max),
            });
        }

        Ok(Self { min, max })
    }

    /// Creates a bounding box enclosing every coordinate of the iterator
    pub fn from_coords_iter<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        let mut coords_iter = coords.into_iter();
        let first = coords_iter.next()?;

        let mut min = first;
        let mut max = first;

        for coord in coords_iter {
            min.x = min.x.min(coord.x);
            min.y = min.y.min(coord.y);
            max.x = max.x.max(coord.x);
            max.y = max.y.max(coord.y);
        }

        Some(Self { min, max })
    }

    /// Empty bounding box (invalid)
    pub fn empty() -> Self {
        Self {
            min: Coord {
                x: f64::INFINITY,
                y: f64::INFINITY,
            },
            max: Coord {
                x: f64::NEG_INFINITY,
                y: f64::NEG_INFINITY,
            },
        }
    }

    /// Checks whether the bounding box is valid
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.x.is_finite()
            && self.min.y.is_finite()
            && self.max.x.is_finite()
            && self.max.y.is_finite()
    }

    /// Checks whether the bounding box is empty
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Width of the bounding box
    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Height of the bounding box
    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Diagonal length, the scale reference for the capping radius
    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }

    /// Center of the bounding box
    pub fn center(&self) -> Coord<f64> {
        (self.min + self.max) * 0.5
    }

    /// Checks whether a coordinate lies inside the bounding box
    pub fn contains_coord(&self, coord: Coord<f64>) -> bool {
        coord.x >= self.min.x
            && coord.x <= self.max.x
            && coord.y >= self.min.y
            && coord.y <= self.max.y
    }

    /// Unites two bounding boxes
    pub fn union(&self, other: &Bounds2D) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }

        Self {
            min: Coord {
                x: self.min.x.min(other.min.x),
                y: self.min.y.min(other.min.y),
            },
            max: Coord {
                x: self.max.x.max(other.max.x),
                y: self.max.y.max(other.max.y),
            },
        }
    }

    /// Grows the bounding box to include a coordinate
    pub fn expand_to_include_coord(&mut self, coord: Coord<f64>) {
        if self.is_empty() {
            self.min = coord;
            self.max = coord;
        } else {
            self.min.x = self.min.x.min(coord.x);
            self.min.y = self.min.y.min(coord.y);
            self.max.x = self.max.x.max(coord.x);
            self.max.y = self.max.y.max(coord.y);
        }
    }

    /// Grows the bounding box by a margin on every side
    pub fn expand(&self, margin: f64) -> Self {
        if self.is_empty() {
            return *self;
        }

        Self {
            min: Coord {
                x: self.min.x - margin,
                y: self.min.y - margin,
            },
            max: Coord {
                x: self.max.x + margin,
                y: self.max.y + margin,
            },
        }
    }

    /// The four corner coordinates of the bounding box
    pub fn corners(&self) -> [Coord<f64>; 4] {
        [
            self.min,
            Coord {
                x: self.max.x,
                y: self.min.y,
            },
            self.max,
            Coord {
                x: self.min.x,
                y: self.max.y,
            },
        ]
    }
}

impl From<Rect<f64>> for Bounds2D {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            min: rect.min(),
            max: rect.max(),
        }
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Bounds2D(empty)")
        } else {
            write!(f, "Bounds2D({:?} to {:?})", self.min, self.max)
        }
    }
}
