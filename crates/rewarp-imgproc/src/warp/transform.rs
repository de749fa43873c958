use rewarp_algebra::{Point2f, Point2i, Point3f, TransformMatrix};
use rewarp_image::{Image, ImageDtype, ImageSize};

use super::dims::Extent;
use super::error::WarpError;
use super::helper::AnalyzedTransform;
use super::params::{MatrixTransformParams, ResizeMode};
use crate::interpolation::{BoundaryType, GridInterpolator, InterpolationMode, Interpolator};
use crate::parallel::ExecutionStrategy;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Binding {
    source: ImageSize,
    extent: Extent,
}

/// Geometric transformation of images and points by a homogeneous matrix.
///
/// The matrix is analyzed once, when it is set. Images are resampled with
/// [`apply`](Self::apply) and its variants. Single points and point sets are
/// mapped with [`forward`](Self::forward) / [`backward`](Self::backward)
/// after a source size has been bound with [`bind`](Self::bind), which fixes
/// the offset of the destination frame.
///
/// A rejected matrix is kept as the current state: every operation then
/// returns its error until a valid matrix is set.
///
/// # Example
///
/// ```
/// use rewarp_algebra::{Point2f, TransformMatrix};
/// use rewarp_image::Image;
/// use rewarp_imgproc::warp::{MatrixTransform, MatrixTransformParams, ResizeMode};
///
/// let params = MatrixTransformParams::default()
///     .with_transformation(TransformMatrix::from_rows([[1.0, 0.0, 5.0], [0.0, 1.0, 3.0]]))
///     .with_resize_mode(ResizeMode::AdjustDimensions);
/// let mut transform = MatrixTransform::new(params);
///
/// let src = Image::<f32, 1>::from_size_val([10, 10].into(), 1.0).unwrap();
/// let (dst, offset) = transform.apply_with_offset(&src).unwrap();
/// assert_eq!(dst.size(), src.size());
/// assert_eq!(offset, Point2f::new(5.0, 3.0));
///
/// transform.bind(src.size()).unwrap();
/// assert_eq!(transform.forward(Point2f::new(2.0, 2.0)).unwrap(), Point2f::new(2.0, 2.0));
/// ```
#[derive(Debug, Clone)]
pub struct MatrixTransform {
    params: MatrixTransformParams,
    state: Result<AnalyzedTransform, WarpError>,
    binding: Option<Binding>,
}

impl Default for MatrixTransform {
    fn default() -> Self {
        Self::new(MatrixTransformParams::default())
    }
}

impl MatrixTransform {
    /// Create a transformation and analyze its matrix.
    ///
    /// A matrix that cannot be used is not an error here; it is reported by
    /// [`analyzed`](Self::analyzed) and by every operation.
    pub fn new(params: MatrixTransformParams) -> Self {
        let state = analyze(&params.transformation);
        Self {
            params,
            state,
            binding: None,
        }
    }

    /// The current parameters.
    pub fn params(&self) -> &MatrixTransformParams {
        &self.params
    }

    /// The analyzed matrix, or the reason it was rejected.
    pub fn analyzed(&self) -> Result<&AnalyzedTransform, WarpError> {
        self.state.as_ref().map_err(Clone::clone)
    }

    /// Replace all parameters.
    ///
    /// The matrix is analyzed again and a bound size is bound again; if that
    /// fails the binding is dropped.
    ///
    /// # Errors
    ///
    /// If the new matrix is rejected.
    pub fn set_params(&mut self, params: MatrixTransformParams) -> Result<(), WarpError> {
        self.state = analyze(&params.transformation);
        self.params = params;
        self.rebind();
        self.analyzed().map(|_| ())
    }

    /// Replace the transformation matrix, keeping the other parameters.
    ///
    /// # Errors
    ///
    /// If the new matrix is rejected.
    pub fn set_matrix(&mut self, transformation: TransformMatrix) -> Result<(), WarpError> {
        let params = MatrixTransformParams {
            transformation,
            ..self.params.clone()
        };
        self.set_params(params)
    }

    /// Replace the resize mode; a bound size is bound again.
    ///
    /// # Errors
    ///
    /// If the current matrix is rejected.
    pub fn set_resize_mode(&mut self, resize_mode: ResizeMode) -> Result<(), WarpError> {
        self.params.resize_mode = resize_mode;
        self.rebind();
        self.analyzed().map(|_| ())
    }

    fn rebind(&mut self) {
        if let Some(binding) = self.binding.take() {
            if let Err(err) = self.bind(binding.source) {
                log::warn!(
                    "dropping the binding of {} after a parameter change: {err}",
                    binding.source
                );
            }
        }
    }

    /// Size and offset of the destination for a source of size `size`.
    ///
    /// # Errors
    ///
    /// If the matrix is rejected or the extent cannot be realized.
    pub fn eval_dims(&self, size: ImageSize) -> Result<Extent, WarpError> {
        self.analyzed()?.eval_dims(size, self.params.resize_mode)
    }

    /// Resample `src` with the interpolator of the parameters.
    ///
    /// # Errors
    ///
    /// If the matrix is rejected, the source is empty, or the extent cannot
    /// be realized.
    pub fn apply<T: ImageDtype, const C: usize>(
        &self,
        src: &Image<T, C>,
    ) -> Result<Image<T, C>, WarpError> {
        self.apply_with_offset(src).map(|(dst, _)| dst)
    }

    /// Like [`apply`](Self::apply), also returning the offset of the destination.
    pub fn apply_with_offset<T: ImageDtype, const C: usize>(
        &self,
        src: &Image<T, C>,
    ) -> Result<(Image<T, C>, Point2f), WarpError> {
        self.apply_with_interpolator(src, &self.params.interpolator())
    }

    /// Like [`apply_with_offset`](Self::apply_with_offset), also returning for
    /// each destination pixel the depth of the point on the source plane.
    ///
    /// The depth grid is all zeros for the 2-D shapes, and keeps zero where
    /// the projective weight vanishes.
    pub fn apply_with_depth<T: ImageDtype, const C: usize>(
        &self,
        src: &Image<T, C>,
    ) -> Result<(Image<T, C>, Image<f32, 1>, Point2f), WarpError> {
        let interpolator = self.params.interpolator();
        let (dst, depth, offset) = self.run(src, &interpolator, true)?;
        let depth = match depth {
            Some(depth) => depth,
            None => Image::from_size_val(dst.size(), 0.0)?,
        };
        Ok((dst, depth, offset))
    }

    /// Resample `src` through a caller supplied interpolator.
    pub fn apply_with_interpolator<T, const C: usize, I>(
        &self,
        src: &Image<T, C>,
        interpolator: &I,
    ) -> Result<(Image<T, C>, Point2f), WarpError>
    where
        T: Copy + Default + Send + Sync,
        I: Interpolator<T, C> + ?Sized,
    {
        let (dst, _, offset) = self.run(src, interpolator, false)?;
        Ok((dst, offset))
    }

    fn run<T, const C: usize, I>(
        &self,
        src: &Image<T, C>,
        interpolator: &I,
        with_depth: bool,
    ) -> Result<(Image<T, C>, Option<Image<f32, 1>>, Point2f), WarpError>
    where
        T: Copy + Default + Send + Sync,
        I: Interpolator<T, C> + ?Sized,
    {
        let analyzed = self.analyzed()?;
        if src.size().is_empty() {
            return Err(WarpError::EmptySource);
        }
        let extent = analyzed.eval_dims(src.size(), self.params.resize_mode)?;
        let (dst, depth) =
            analyzed.resample(src, &extent, interpolator, self.params.execution, with_depth)?;
        Ok((dst, depth, extent.offset))
    }

    /// Bind a source size, fixing the offset used by the point transforms.
    ///
    /// # Errors
    ///
    /// If the matrix is rejected or the extent cannot be realized; any
    /// previous binding is dropped.
    pub fn bind(&mut self, source: ImageSize) -> Result<Extent, WarpError> {
        self.binding = None;
        let extent = self.eval_dims(source)?;
        log::debug!(
            "bound {source}: destination {} with offset ({}, {})",
            extent.size,
            extent.offset.x,
            extent.offset.y
        );
        self.binding = Some(Binding { source, extent });
        Ok(extent)
    }

    /// The extent of the bound source size, if any.
    pub fn bound_extent(&self) -> Option<&Extent> {
        self.binding.as_ref().map(|b| &b.extent)
    }

    fn bound(&self) -> Result<(&AnalyzedTransform, Point2f), WarpError> {
        let analyzed = self.analyzed()?;
        let binding = self.binding.as_ref().ok_or(WarpError::NotBound)?;
        Ok((analyzed, binding.extent.offset))
    }

    /// Map a source point into the destination frame.
    ///
    /// # Errors
    ///
    /// If no size is bound or the matrix is rejected.
    pub fn forward(&self, p: Point2f) -> Result<Point2f, WarpError> {
        let (analyzed, offset) = self.bound()?;
        Ok(analyzed.forward(p, offset))
    }

    /// Map a destination point back into the source.
    ///
    /// # Errors
    ///
    /// If no size is bound, the matrix is rejected, or the source plane of
    /// a 3-D matrix is seen edge-on.
    pub fn backward(&self, p: Point2f) -> Result<Point2f, WarpError> {
        let (analyzed, offset) = self.bound()?;
        analyzed.backward(p, offset)
    }

    /// Map a source point, also returning the depth of the transformed point.
    pub fn forward_with_depth(&self, p: Point2f) -> Result<Point3f, WarpError> {
        let (analyzed, offset) = self.bound()?;
        Ok(analyzed.forward_with_depth(p, offset))
    }

    /// Map a destination point back, also returning the destination depth
    /// lying on the source plane.
    pub fn backward_with_depth(&self, p: Point2f) -> Result<Point3f, WarpError> {
        let (analyzed, offset) = self.bound()?;
        analyzed.backward_with_depth(p, offset)
    }

    /// Map every point of a list, in order.
    pub fn forward_points(&self, points: &[Point2f]) -> Result<Vec<Point2f>, WarpError> {
        let (analyzed, offset) = self.bound()?;
        Ok(points.iter().map(|&p| analyzed.forward(p, offset)).collect())
    }

    /// Map every point of a list back, in order.
    pub fn backward_points(&self, points: &[Point2f]) -> Result<Vec<Point2f>, WarpError> {
        let (analyzed, offset) = self.bound()?;
        points.iter().map(|&p| analyzed.backward(p, offset)).collect()
    }

    /// Map a fixed number of points.
    pub fn forward_array<const N: usize>(
        &self,
        points: [Point2f; N],
    ) -> Result<[Point2f; N], WarpError> {
        let (analyzed, offset) = self.bound()?;
        Ok(points.map(|p| analyzed.forward(p, offset)))
    }

    /// Map a fixed number of points back.
    pub fn backward_array<const N: usize>(
        &self,
        points: [Point2f; N],
    ) -> Result<[Point2f; N], WarpError> {
        let (analyzed, offset) = self.bound()?;
        let mut mapped = points;
        for p in mapped.iter_mut() {
            *p = analyzed.backward(*p, offset)?;
        }
        Ok(mapped)
    }

    /// Map pixel positions, rounding the results half away from zero.
    pub fn forward_pixels(&self, points: &[Point2i]) -> Result<Vec<Point2i>, WarpError> {
        let (analyzed, offset) = self.bound()?;
        Ok(points
            .iter()
            .map(|&p| analyzed.forward(p.into(), offset).round())
            .collect())
    }

    /// Map pixel positions back, rounding the results half away from zero.
    pub fn backward_pixels(&self, points: &[Point2i]) -> Result<Vec<Point2i>, WarpError> {
        let (analyzed, offset) = self.bound()?;
        points
            .iter()
            .map(|&p| analyzed.backward(p.into(), offset).map(|q| q.round()))
            .collect()
    }
}

fn analyze(matrix: &TransformMatrix) -> Result<AnalyzedTransform, WarpError> {
    AnalyzedTransform::analyze(matrix).inspect_err(|err| {
        log::warn!(
            "rejected a {}x{} transformation matrix: {err}",
            matrix.rows(),
            matrix.cols()
        )
    })
}

/// Resample `src` into a caller-sized `dst` whose origin is the origin of the
/// transformed source; out-of-range samples are zero.
///
/// On failure `dst` is cleared to the default value.
pub(crate) fn warp_with_matrix<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    matrix: &TransformMatrix,
    interpolation: InterpolationMode,
) -> Result<(), WarpError> {
    let res = if src.size().is_empty() {
        Err(WarpError::EmptySource)
    } else {
        analyze(matrix).and_then(|analyzed| {
            analyzed.resample_into(
                src,
                dst,
                None,
                Point2f::default(),
                &GridInterpolator::new(interpolation, BoundaryType::Zero),
                ExecutionStrategy::ParallelRows,
            )
        })
    };
    if res.is_err() {
        dst.fill(T::default());
    }
    res
}
