use rewarp_algebra::TransformMatrix;

use crate::interpolation::{BoundaryType, GridInterpolator, InterpolationMode};
use crate::parallel::ExecutionStrategy;

/// Policy choosing the size of the destination and its position relative to
/// the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResizeMode {
    /// The destination has the size of the source and the same origin.
    #[default]
    KeepDimensions,
    /// The transformed origin stays at `(0, 0)` and the destination is sized to
    /// reach the largest transformed corner.
    KeepOrigin,
    /// The destination is sized and shifted so the whole transformed source fits.
    AdjustDimensions,
}

/// Parameters of a [`MatrixTransform`](super::MatrixTransform).
///
/// # Example
///
/// ```
/// use rewarp_algebra::TransformMatrix;
/// use rewarp_imgproc::interpolation::InterpolationMode;
/// use rewarp_imgproc::warp::{MatrixTransformParams, ResizeMode};
///
/// let params = MatrixTransformParams::default()
///     .with_transformation(TransformMatrix::from_rows([[0.0, -1.0], [1.0, 0.0]]))
///     .with_resize_mode(ResizeMode::AdjustDimensions)
///     .with_interpolation(InterpolationMode::Nearest);
///
/// assert_eq!(params.transformation.shape(), (2, 2));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixTransformParams {
    /// The homogeneous matrix mapping source coordinates to destination coordinates.
    pub transformation: TransformMatrix,
    /// How the destination is sized.
    pub resize_mode: ResizeMode,
    /// How the source is read between pixels.
    pub interpolation: InterpolationMode,
    /// How the source is read outside its borders.
    pub boundary: BoundaryType,
    /// How the rows of the destination are scheduled.
    pub execution: ExecutionStrategy,
}

impl Default for MatrixTransformParams {
    fn default() -> Self {
        Self {
            transformation: TransformMatrix::identity(2),
            resize_mode: ResizeMode::default(),
            interpolation: InterpolationMode::default(),
            boundary: BoundaryType::default(),
            execution: ExecutionStrategy::default(),
        }
    }
}

impl MatrixTransformParams {
    /// Set the transformation matrix.
    pub fn with_transformation(mut self, transformation: TransformMatrix) -> Self {
        self.transformation = transformation;
        self
    }

    /// Set the resize mode.
    pub fn with_resize_mode(mut self, resize_mode: ResizeMode) -> Self {
        self.resize_mode = resize_mode;
        self
    }

    /// Set the interpolation mode.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set the boundary type.
    pub fn with_boundary(mut self, boundary: BoundaryType) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the execution strategy.
    pub fn with_execution(mut self, execution: ExecutionStrategy) -> Self {
        self.execution = execution;
        self
    }

    /// The interpolator described by these parameters.
    pub fn interpolator(&self) -> GridInterpolator {
        GridInterpolator::new(self.interpolation, self.boundary)
    }
}
