//! Spatial-subsystem error type.

use thiserror::Error;

use hs_core::ObjectId;

/// Errors produced by `hs-spatial`.
///
/// An unreachable pair is deliberately *not* an error: the route table just
/// leaves it out.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("object id {0} is used more than once in the layout")]
    DuplicateObject(ObjectId),

    #[error("object {0} not found in layout")]
    ObjectNotFound(ObjectId),

    #[error("hall bounds must be positive, got {width} x {height}")]
    InvalidBounds { width: f32, height: f32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
