//! One analyzed transformation per admissible matrix shape.
//!
//! Each shape keeps the matrix entries it needs, forward and inverted, as
//! plain scalars. The shape is matched once when the matrix is analyzed.

mod affine;
mod linear;
mod projective;
mod projective3d;

pub use affine::Affine2x3;
pub use linear::Linear2x2;
pub use projective::Projective2d;
pub use projective3d::Projective3d;

use rewarp_algebra::{Point2f, Point3f, TransformMatrix};
use rewarp_image::{Image, ImageSize};

use super::dims::{corner_points, extent_from_corners, Extent};
use super::error::WarpError;
use super::params::ResizeMode;
use super::resample::ResamplePlan;
use crate::interpolation::Interpolator;
use crate::parallel::ExecutionStrategy;

/// The admissible shapes of a transformation matrix, as `rows x cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixShape {
    /// 2x2: linear map of the plane.
    M2x2,
    /// 2x3: affine map of the plane.
    M2x3,
    /// 3x3: homography of the plane.
    M3x3,
    /// 3x4: projection of space onto the plane; the z column is dropped
    /// because the source lies on z = 0.
    M3x4,
    /// 4x3: the plane embedded in space, z passed through.
    M4x3,
    /// 4x4: projective map of space, the source lying on z = 0.
    M4x4,
}

impl MatrixShape {
    /// Classify a matrix by its number of rows and columns.
    ///
    /// # Errors
    ///
    /// If the shape is not admissible.
    pub fn classify(rows: usize, cols: usize) -> Result<Self, WarpError> {
        match (rows, cols) {
            (2, 2) => Ok(Self::M2x2),
            (2, 3) => Ok(Self::M2x3),
            (3, 3) => Ok(Self::M3x3),
            (3, 4) => Ok(Self::M3x4),
            (4, 3) => Ok(Self::M4x3),
            (4, 4) => Ok(Self::M4x4),
            _ => Err(WarpError::InvalidMatrixShape(rows, cols)),
        }
    }
}

/// What every shape knows how to do with its coefficients.
pub(crate) trait ShapeHelper {
    /// Apply the original matrix to a source point; `z` is the depth of the
    /// transformed point for the 3-D shapes and zero otherwise.
    fn forward(&self, p: Point2f) -> Point3f;

    /// Apply the inverse to a destination point already shifted by the
    /// offset; `z` is the destination depth lying on the source plane.
    fn backward(&self, p: Point2f) -> Point3f;

    /// Transform a source corner, failing when it goes to infinity.
    fn corner(&self, p: Point2f) -> Result<Point2f, WarpError>;

    /// Whether destination points can be traced back into the source.
    fn check_backward(&self) -> Result<(), WarpError> {
        Ok(())
    }

    /// Coefficients tracing destination pixels back to the source, with the
    /// offset folded into the constants.
    fn plan(&self, offset: Point2f) -> ResamplePlan;
}

/// Fails when `|det|` is below the machine epsilon, or not a number.
pub(crate) fn check_determinant(det: f32) -> Result<(), WarpError> {
    if det.abs() >= f32::EPSILON {
        Ok(())
    } else {
        Err(WarpError::SingularMatrix(det))
    }
}

/// Weight of a projective corner, rejecting the line at infinity.
pub(crate) fn corner_weight(w: f32) -> Result<f32, WarpError> {
    if w == 0.0 {
        Err(WarpError::InfiniteExtent)
    } else {
        Ok(w)
    }
}

/// A transformation matrix analyzed for one of the admissible shapes.
///
/// Built once per matrix by [`AnalyzedTransform::analyze`] and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzedTransform {
    /// From a 2x2 matrix.
    Linear2x2(Linear2x2),
    /// From a 2x3 matrix.
    Affine2x3(Affine2x3),
    /// From a 3x3 matrix, or a 3x4 one read through its columns 0, 1 and 3.
    Projective3x3(Projective2d),
    /// From a 4x4 matrix.
    Projective3D4x4(Projective3d),
    /// From a 4x3 matrix embedded into 4x4.
    Projective3D4x3(Projective3d),
}

impl AnalyzedTransform {
    /// Classify and invert `matrix`.
    ///
    /// # Errors
    ///
    /// If the shape is not admissible or the matrix is singular.
    ///
    /// # Example
    ///
    /// ```
    /// use rewarp_algebra::TransformMatrix;
    /// use rewarp_imgproc::warp::{AnalyzedTransform, MatrixShape};
    ///
    /// let m = TransformMatrix::from_rows([[1.0, 0.0, 5.0], [0.0, 1.0, 3.0]]);
    /// let analyzed = AnalyzedTransform::analyze(&m).unwrap();
    /// assert_eq!(analyzed.shape(), MatrixShape::M2x3);
    /// ```
    pub fn analyze(matrix: &TransformMatrix) -> Result<Self, WarpError> {
        let shape = MatrixShape::classify(matrix.rows(), matrix.cols())?;
        let analyzed = match shape {
            MatrixShape::M2x2 => Self::Linear2x2(Linear2x2::analyze(matrix)?),
            MatrixShape::M2x3 => Self::Affine2x3(Affine2x3::analyze(matrix)?),
            MatrixShape::M3x3 | MatrixShape::M3x4 => {
                Self::Projective3x3(Projective2d::analyze(matrix)?)
            }
            MatrixShape::M4x4 => Self::Projective3D4x4(Projective3d::analyze(matrix)?),
            MatrixShape::M4x3 => Self::Projective3D4x3(Projective3d::analyze(matrix)?),
        };
        log::debug!(
            "analyzed a {}x{} transformation matrix as {:?}",
            matrix.rows(),
            matrix.cols(),
            shape
        );
        Ok(analyzed)
    }

    /// The shape of the matrix this transformation was analyzed from.
    pub fn shape(&self) -> MatrixShape {
        match self {
            Self::Linear2x2(_) => MatrixShape::M2x2,
            Self::Affine2x3(_) => MatrixShape::M2x3,
            Self::Projective3x3(h) => h.shape(),
            Self::Projective3D4x4(_) => MatrixShape::M4x4,
            Self::Projective3D4x3(_) => MatrixShape::M4x3,
        }
    }

    fn helper(&self) -> &dyn ShapeHelper {
        match self {
            Self::Linear2x2(h) => h,
            Self::Affine2x3(h) => h,
            Self::Projective3x3(h) => h,
            Self::Projective3D4x4(h) | Self::Projective3D4x3(h) => h,
        }
    }

    /// Size and offset of the destination for a source of size `size`.
    ///
    /// # Errors
    ///
    /// If a corner goes to infinity, or `KeepOrigin` needs a negative size.
    pub fn eval_dims(&self, size: ImageSize, mode: ResizeMode) -> Result<Extent, WarpError> {
        if mode == ResizeMode::KeepDimensions {
            return Ok(Extent::at_origin(size));
        }
        let helper = self.helper();
        let [tl, tr, bl, br] = corner_points(size);
        let corners = [
            helper.corner(tl)?,
            helper.corner(tr)?,
            helper.corner(bl)?,
            helper.corner(br)?,
        ];
        extent_from_corners(&corners, mode)
    }

    /// Map a source point into the destination frame whose origin is `offset`.
    pub fn forward(&self, p: Point2f, offset: Point2f) -> Point2f {
        self.forward_with_depth(p, offset).xy()
    }

    /// Map a destination point, relative to `offset`, back into the source.
    ///
    /// # Errors
    ///
    /// If the source plane of a 3-D shape is seen edge-on.
    pub fn backward(&self, p: Point2f, offset: Point2f) -> Result<Point2f, WarpError> {
        Ok(self.backward_with_depth(p, offset)?.xy())
    }

    /// Like [`Self::forward`], also returning the depth of the transformed
    /// point (always zero for the 2-D shapes).
    pub fn forward_with_depth(&self, p: Point2f, offset: Point2f) -> Point3f {
        let q = self.helper().forward(p);
        Point3f::new(q.x - offset.x, q.y - offset.y, q.z)
    }

    /// Like [`Self::backward`], also returning the destination depth that
    /// lies on the source plane (always zero for the 2-D shapes).
    pub fn backward_with_depth(
        &self,
        p: Point2f,
        offset: Point2f,
    ) -> Result<Point3f, WarpError> {
        let helper = self.helper();
        helper.check_backward()?;
        Ok(helper.backward(p + offset))
    }

    /// Fails when destination points cannot be traced back into the source,
    /// i.e. for a 3-D shape whose source plane is seen edge-on.
    pub fn check_backward(&self) -> Result<(), WarpError> {
        self.helper().check_backward()
    }

    /// Resample `src` into `dst`, whose pixel `(0, 0)` sits at `offset`.
    ///
    /// Every pixel of `dst` (and `depth`) is written; those whose projective
    /// weight is exactly zero are set to the default value.
    pub fn resample_into<T, const C: usize, I>(
        &self,
        src: &Image<T, C>,
        dst: &mut Image<T, C>,
        depth: Option<&mut Image<f32, 1>>,
        offset: Point2f,
        interpolator: &I,
        strategy: ExecutionStrategy,
    ) -> Result<(), WarpError>
    where
        T: Copy + Default + Send + Sync,
        I: Interpolator<T, C> + ?Sized,
    {
        let helper = self.helper();
        helper.check_backward()?;
        helper
            .plan(offset)
            .resample(src, dst, depth, interpolator, strategy)
    }

    /// Resample `src` into a fresh destination of the given extent.
    ///
    /// The returned depth grid has the size of the destination.
    pub fn resample<T, const C: usize, I>(
        &self,
        src: &Image<T, C>,
        extent: &Extent,
        interpolator: &I,
        strategy: ExecutionStrategy,
        with_depth: bool,
    ) -> Result<(Image<T, C>, Option<Image<f32, 1>>), WarpError>
    where
        T: Copy + Default + Send + Sync,
        I: Interpolator<T, C> + ?Sized,
    {
        self.check_backward()?;
        let mut dst = Image::from_size_val(extent.size, T::default())?;
        let mut depth = if with_depth {
            Some(Image::from_size_val(extent.size, 0.0f32)?)
        } else {
            None
        };
        self.resample_into(
            src,
            &mut dst,
            depth.as_mut(),
            extent.offset,
            interpolator,
            strategy,
        )?;
        Ok((dst, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn samples() -> Vec<TransformMatrix> {
        vec![
            TransformMatrix::from_rows([[0.8, -0.3], [0.4, 1.1]]),
            TransformMatrix::from_rows([[0.9, 0.2, 5.0], [-0.1, 1.2, -3.0]]),
            TransformMatrix::from_rows([
                [1.1, 0.1, 2.0],
                [0.05, 0.9, 1.0],
                [0.001, 0.002, 1.0],
            ]),
            TransformMatrix::from_rows([
                [1.0, 0.1, 0.3, 2.0],
                [0.0, 0.9, -0.2, 1.0],
                [0.001, 0.001, 0.5, 1.0],
            ]),
            TransformMatrix::from_rows([
                [0.9, 0.1, 1.0],
                [-0.1, 1.0, 2.0],
                [0.2, 0.1, 0.5],
                [0.001, 0.002, 1.0],
            ]),
            TransformMatrix::from_rows([
                [0.95, -0.1, 0.2, 3.0],
                [0.1, 0.95, 0.1, -2.0],
                [0.05, 0.02, 1.0, 4.0],
                [0.001, 0.0005, 0.01, 1.0],
            ]),
        ]
    }

    #[test]
    fn shape_dispatch() -> Result<(), WarpError> {
        let shapes: Vec<MatrixShape> = samples()
            .iter()
            .map(AnalyzedTransform::analyze)
            .map(|a| a.map(|a| a.shape()))
            .collect::<Result<_, _>>()?;
        assert_eq!(
            shapes,
            vec![
                MatrixShape::M2x2,
                MatrixShape::M2x3,
                MatrixShape::M3x3,
                MatrixShape::M3x4,
                MatrixShape::M4x3,
                MatrixShape::M4x4
            ]
        );
        Ok(())
    }

    #[test]
    fn invalid_shapes() {
        for (rows, cols) in [(1, 1), (3, 2), (4, 5), (0, 0)] {
            let m = TransformMatrix::zeros(rows, cols);
            assert_eq!(
                AnalyzedTransform::analyze(&m),
                Err(WarpError::InvalidMatrixShape(rows, cols))
            );
        }
    }

    #[test]
    fn round_trip_all_shapes() -> Result<(), WarpError> {
        let mut rng = StdRng::seed_from_u64(42);
        for m in samples() {
            let analyzed = AnalyzedTransform::analyze(&m)?;
            let offset = Point2f::new(rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0));
            for _ in 0..100 {
                let p = Point2f::new(rng.random_range(0.0..64.0), rng.random_range(0.0..64.0));
                let q = analyzed.backward(analyzed.forward(p, offset), offset)?;
                assert_relative_eq!(q.x, p.x, epsilon = 1e-2);
                assert_relative_eq!(q.y, p.y, epsilon = 1e-2);
            }
        }
        Ok(())
    }

    #[test]
    fn depth_round_trip() -> Result<(), WarpError> {
        for m in samples().into_iter().skip(4) {
            let analyzed = AnalyzedTransform::analyze(&m)?;
            let p = Point2f::new(10.0, 20.0);
            let fwd = analyzed.forward_with_depth(p, Point2f::default());
            let back = analyzed.backward_with_depth(fwd.xy(), Point2f::default())?;
            assert_relative_eq!(back.x, p.x, epsilon = 1e-3);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-3);
            assert_relative_eq!(back.z, fwd.z, epsilon = 1e-3);
        }
        Ok(())
    }

    #[test]
    fn bounding_box_holds_all_corners() -> Result<(), WarpError> {
        let size = ImageSize {
            width: 40,
            height: 30,
        };
        for m in samples() {
            let analyzed = AnalyzedTransform::analyze(&m)?;
            let extent = analyzed.eval_dims(size, ResizeMode::AdjustDimensions)?;
            for c in corner_points(size) {
                let q = analyzed.forward(c, extent.offset);
                assert!(q.x >= -1e-3 && q.y >= -1e-3, "{q:?} below the offset");
                assert!(q.x <= extent.size.width as f32 - 1.0 + 0.5);
                assert!(q.y <= extent.size.height as f32 - 1.0 + 0.5);
            }
        }
        Ok(())
    }

    #[test]
    fn keep_dimensions_does_not_transform() -> Result<(), WarpError> {
        // the corner (3, 0) goes to infinity
        let m = TransformMatrix::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, -3.0]]);
        let analyzed = AnalyzedTransform::analyze(&m)?;
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        assert_eq!(
            analyzed.eval_dims(size, ResizeMode::KeepDimensions)?,
            Extent::at_origin(size)
        );
        assert_eq!(
            analyzed.eval_dims(size, ResizeMode::AdjustDimensions),
            Err(WarpError::InfiniteExtent)
        );
        Ok(())
    }

    #[test]
    fn edge_on_plane_maps_forward_only() -> Result<(), Box<dyn std::error::Error>> {
        // y and z swapped: the source plane z = 0 is seen edge-on
        let m = TransformMatrix::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let analyzed = AnalyzedTransform::analyze(&m)?;
        assert_eq!(analyzed.shape(), MatrixShape::M4x4);

        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let extent = analyzed.eval_dims(size, ResizeMode::AdjustDimensions)?;
        assert_eq!(extent.size.width, 3);
        assert_eq!(extent.size.height, 1);
        assert_eq!(
            analyzed.forward(Point2f::new(2.0, 1.0), Point2f::default()),
            Point2f::new(2.0, 0.0)
        );

        assert_eq!(
            analyzed.backward(Point2f::new(0.0, 0.0), Point2f::default()),
            Err(WarpError::DegeneratePlane)
        );
        let src = Image::<f32, 1>::from_size_val(size, 1.0)?;
        let res = analyzed.resample(
            &src,
            &extent,
            &|_: &Image<f32, 1>, _: f32, _: f32| [0.0f32],
            ExecutionStrategy::Serial,
            false,
        );
        assert_eq!(res, Err(WarpError::DegeneratePlane));
        Ok(())
    }
}
