use rewarp_image::{Image, ImageDtype};

use super::boundary::BoundaryType;

// keeps the neighbour index arithmetic far away from isize overflow
const INDEX_LIMIT: f32 = (1u32 << 30) as f32;

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `row` - The y coordinate of the pixel to interpolate.
/// * `col` - The x coordinate of the pixel to interpolate.
/// * `boundary` - How neighbours outside the image are resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    row: f32,
    col: f32,
    boundary: BoundaryType,
) -> [T; C] {
    if !row.is_finite() || !col.is_finite() {
        return [T::default(); C];
    }

    let (rows, cols) = (image.rows(), image.cols());

    let row0 = row.floor();
    let col0 = col.floor();

    let frac_v = row - row0;
    let frac_u = col - col0;

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let iv0 = row0.clamp(-INDEX_LIMIT, INDEX_LIMIT) as isize;
    let iu0 = col0.clamp(-INDEX_LIMIT, INDEX_LIMIT) as isize;

    let data = image.as_slice();
    let mut pixel = [T::default(); C];

    if iv0 >= 0 && iu0 >= 0 && ((iv0 + 1) as usize) < rows && ((iu0 + 1) as usize) < cols {
        // all four neighbours are inside the image
        let (iv0, iu0) = (iv0 as usize, iu0 as usize);
        let base00 = (iv0 * cols + iu0) * C;
        let base10 = base00 + cols * C;

        let p00 = &data[base00..base00 + C];
        let p01 = &data[base00 + C..base00 + 2 * C];
        let p10 = &data[base10..base10 + C];
        let p11 = &data[base10 + C..base10 + 2 * C];

        for k in 0..C {
            pixel[k] = T::from_f32(
                p00[k].into() * w00
                    + p01[k].into() * w01
                    + p10[k].into() * w10
                    + p11[k].into() * w11,
            );
        }
        return pixel;
    }

    let neighbours = [
        (iv0, iu0, w00),
        (iv0, iu0 + 1, w01),
        (iv0 + 1, iu0, w10),
        (iv0 + 1, iu0 + 1, w11),
    ];

    let mut acc = [0.0f32; C];
    for (v, u, w) in neighbours {
        match (boundary.resolve(v, rows), boundary.resolve(u, cols)) {
            (Some(v), Some(u)) => {
                let base = (v * cols + u) * C;
                for k in 0..C {
                    acc[k] += data[base + k].into() * w;
                }
            }
            _ => {
                if boundary == BoundaryType::NoBoundary && w != 0.0 {
                    return pixel;
                }
            }
        }
    }

    for k in 0..C {
        pixel[k] = T::from_f32(acc[k]);
    }
    pixel
}
