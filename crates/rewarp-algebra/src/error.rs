/// An error type for the algebra module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AlgebraError {
    /// The number of entries does not match the requested shape.
    #[error("Data length ({0}) does not match a {1}x{2} matrix")]
    InvalidDataLength(usize, usize, usize),

    /// The shapes of the operands of a product do not agree.
    #[error("Cannot multiply a {0}x{1} matrix by a {2}x{3} matrix")]
    DimensionMismatch(usize, usize, usize, usize),

    /// A rotation axis with zero length was given.
    #[error("Cannot compute a rotation around a zero axis")]
    ZeroAxis,

    /// A square matrix of a given order was expected.
    #[error("Expected a {2}x{2} matrix, got a {0}x{1} matrix")]
    NotSquare(usize, usize, usize),

    /// A projection with zero focal distance was requested.
    #[error("The focal distance of a projection must be non-zero")]
    ZeroFocalDistance,
}
