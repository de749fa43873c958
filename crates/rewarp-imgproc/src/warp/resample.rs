use rewarp_image::Image;

use super::error::WarpError;
use crate::interpolation::Interpolator;
use crate::parallel::{self, ExecutionStrategy};

/// An expression `dx * x + dy * y + c` over the destination pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Linear {
    pub dx: f32,
    pub dy: f32,
    pub c: f32,
}

impl Linear {
    pub(crate) const fn new(dx: f32, dy: f32, c: f32) -> Self {
        Self { dx, dy, c }
    }

    // value at the first pixel of row `y`
    #[inline]
    fn at_row(&self, y: usize) -> f32 {
        self.dy * y as f32 + self.c
    }
}

/// Coefficients tracing each destination pixel back into the source.
///
/// The source column and row are `col / weight` and `row / weight`; without
/// a weight the mapping is affine. `depth` records, for the 3-D shapes, the z
/// of the destination point lying on the source plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResamplePlan {
    pub col: Linear,
    pub row: Linear,
    pub weight: Option<Linear>,
    pub depth: Option<Linear>,
}

impl ResamplePlan {
    pub(crate) fn affine(col: Linear, row: Linear) -> Self {
        Self {
            col,
            row,
            weight: None,
            depth: None,
        }
    }

    pub(crate) fn projective(col: Linear, row: Linear, weight: Linear) -> Self {
        Self {
            col,
            row,
            weight: Some(weight),
            depth: None,
        }
    }

    pub(crate) fn with_depth(mut self, depth: Linear) -> Self {
        self.depth = Some(depth);
        self
    }

    // Each row starts from values computed from `y` alone and is advanced by
    // running sums, so the result does not depend on how rows are scheduled.
    fn sample_row<T: Copy + Default, const C: usize, I: Interpolator<T, C> + ?Sized>(
        &self,
        src: &Image<T, C>,
        interpolator: &I,
        y: usize,
        row: &mut [T],
        mut depth: Option<&mut [f32]>,
    ) {
        let mut col = self.col.at_row(y);
        let mut r = self.row.at_row(y);
        let (mut w, w_step) = match self.weight {
            Some(l) => (l.at_row(y), l.dx),
            None => (1.0, 0.0),
        };
        let (mut z, z_step) = match self.depth {
            Some(l) => (l.at_row(y), l.dx),
            None => (0.0, 0.0),
        };

        for (x, pixel) in row.chunks_exact_mut(C).enumerate() {
            // only an exactly vanishing weight is skipped
            if w != 0.0 {
                let value = interpolator.interpolate(src, r / w, col / w);
                pixel.copy_from_slice(&value);
                if let Some(d) = depth.as_deref_mut() {
                    d[x] = z;
                }
            } else {
                pixel.fill(T::default());
                if let Some(d) = depth.as_deref_mut() {
                    d[x] = 0.0;
                }
            }
            col += self.col.dx;
            r += self.row.dx;
            w += w_step;
            z += z_step;
        }
    }

    /// Fill `dst` (and `depth`, if given) by tracing every pixel back into `src`.
    ///
    /// Every pixel is written; a vanishing weight gives the default value.
    /// `depth` must have the size of `dst`.
    pub(crate) fn resample<T, const C: usize, I>(
        &self,
        src: &Image<T, C>,
        dst: &mut Image<T, C>,
        depth: Option<&mut Image<f32, 1>>,
        interpolator: &I,
        strategy: ExecutionStrategy,
    ) -> Result<(), WarpError>
    where
        T: Copy + Default + Send + Sync,
        I: Interpolator<T, C> + ?Sized,
    {
        let stride = dst.cols() * C;
        match depth {
            None => parallel::par_iter_rows_indexed(
                dst.as_slice_mut(),
                stride,
                strategy,
                |y, row| self.sample_row(src, interpolator, y, row, None),
            )?,
            Some(depth) => {
                let depth_stride = depth.cols();
                parallel::par_iter_rows_indexed_two(
                    dst.as_slice_mut(),
                    stride,
                    depth.as_slice_mut(),
                    depth_stride,
                    strategy,
                    |y, row, depth_row| {
                        self.sample_row(src, interpolator, y, row, Some(depth_row))
                    },
                )?
            }
        }
        Ok(())
    }
}
