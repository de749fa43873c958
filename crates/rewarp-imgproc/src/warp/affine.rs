use rewarp_algebra::TransformMatrix;
use rewarp_image::{Image, ImageDtype};

use super::error::WarpError;
use super::transform::warp_with_matrix;
use crate::interpolation::InterpolationMode;

/// Applies an affine transformation to an image.
///
/// The destination keeps its size; samples falling outside the source are zero.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `m` - The 2x3 affine transformation matrix src -> dst, row-major.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// If the matrix is singular or the source is empty; `dst` is then cleared.
///
/// # Example
///
/// ```
/// use rewarp_image::{Image, ImageSize};
/// use rewarp_imgproc::interpolation::InterpolationMode;
/// use rewarp_imgproc::warp::warp_affine;
///
/// let src = Image::<_, 3>::from_size_val(
///    ImageSize {
///       width: 4,
///       height: 5,
///    },
///    1f32,
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
///
/// let mut dst = Image::<_, 3>::from_size_val(src.size(), 0.0).unwrap();
///
/// warp_affine(&src, &mut dst, &m, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(dst, src);
/// ```
pub fn warp_affine<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f32; 6],
    interpolation: InterpolationMode,
) -> Result<(), WarpError> {
    let matrix = TransformMatrix::from_rows([[m[0], m[1], m[2]], [m[3], m[4], m[5]]]);
    warp_with_matrix(src, dst, &matrix, interpolation)
}
