// src/error.rs
use thiserror::Error;

use crate::types::{Crs, OwnerId};

#[derive(Error, Debug)]
pub enum PartitionError {
    #[error("Insufficient distinct sites: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Degenerate input: all {point_count} distinct sites are collinear")]
    DegenerateInput { point_count: usize },

    #[error("Coordinate system mismatch: sites are in {sites}, territory is in {territory}")]
    CrsMismatch { sites: Crs, territory: Crs },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Triangulation failed: {reason}")]
    TriangulationFailed { reason: String },

    #[error("Cell reconstruction failed for owner {owner}: {detail}")]
    Reconstruction { owner: OwnerId, detail: String },
}

pub type PartitionResult<T> = Result<T, PartitionError>;
