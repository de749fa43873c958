use rewarp_image::{Image, ImageDtype};

use super::boundary::BoundaryType;

const INDEX_LIMIT: f32 = (1u32 << 30) as f32;

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `row` - The y coordinate of the pixel to interpolate.
/// * `col` - The x coordinate of the pixel to interpolate.
/// * `boundary` - How positions outside the image are resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    row: f32,
    col: f32,
    boundary: BoundaryType,
) -> [T; C] {
    let mut pixel = [T::default(); C];
    if !row.is_finite() || !col.is_finite() {
        return pixel;
    }

    let iv = row.round().clamp(-INDEX_LIMIT, INDEX_LIMIT) as isize;
    let iu = col.round().clamp(-INDEX_LIMIT, INDEX_LIMIT) as isize;

    if let (Some(iv), Some(iu)) = (
        boundary.resolve(iv, image.rows()),
        boundary.resolve(iu, image.cols()),
    ) {
        let base = (iv * image.cols() + iu) * C;
        pixel.copy_from_slice(&image.as_slice()[base..base + C]);
    }

    pixel
}
