use rewarp_image::ImageError;
use thiserror::Error;

use crate::parallel::ParallelError;

/// An error type for the geometric transformations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WarpError {
    /// The matrix does not have one of the supported shapes.
    #[error("Transformation matrix must be 2x2, 2x3, 3x3, 3x4, 4x3 or 4x4, got {0}x{1}")]
    InvalidMatrixShape(usize, usize),

    /// The matrix cannot be inverted.
    #[error("Transformation matrix is singular (determinant {0})")]
    SingularMatrix(f32),

    /// The plane z = 0 of the source is seen edge-on, so a destination pixel
    /// cannot be traced back onto it.
    #[error("The source plane is degenerate under the inverse transformation")]
    DegeneratePlane,

    /// A corner of the source is mapped to infinity.
    #[error("A corner of the source maps to infinity")]
    InfiniteExtent,

    /// Keeping the origin would require a negative destination size.
    #[error("Keeping the origin requires a negative size ({0}, {1})")]
    NegativeExtent(i32, i32),

    /// A point was transformed before a source size was bound.
    #[error("No source size bound, call bind first")]
    NotBound,

    /// The source image has no pixels.
    #[error("The source image is empty")]
    EmptySource,

    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error coming from the parallel row iteration.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
