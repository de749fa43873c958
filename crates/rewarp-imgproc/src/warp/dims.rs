use rewarp_algebra::Point2f;
use rewarp_image::ImageSize;

use super::error::WarpError;
use super::params::ResizeMode;

/// Size of a destination grid and the position of its origin in the frame of
/// the transformed source.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    /// Size of the destination grid.
    pub size: ImageSize,
    /// Transformed coordinate that lands on the destination pixel `(0, 0)`.
    pub offset: Point2f,
}

impl Extent {
    /// An extent of the given size with its origin at `(0, 0)`.
    pub fn at_origin(size: ImageSize) -> Self {
        Self {
            size,
            offset: Point2f::default(),
        }
    }
}

/// The corners `(0,0)`, `(w-1,0)`, `(0,h-1)`, `(w-1,h-1)` of a source grid.
pub(crate) fn corner_points(size: ImageSize) -> [Point2f; 4] {
    let (x1, y1) = (size.width as f32 - 1.0, size.height as f32 - 1.0);
    [
        Point2f::new(0.0, 0.0),
        Point2f::new(x1, 0.0),
        Point2f::new(0.0, y1),
        Point2f::new(x1, y1),
    ]
}

// rounds half away from zero, rejects what does not fit an i32
fn round_extent(v: f32) -> Result<i32, WarpError> {
    let r = v.round();
    if !r.is_finite() || r > i32::MAX as f32 {
        return Err(WarpError::InfiniteExtent);
    }
    Ok(r as i32)
}

// the pixel count must fit a usize
fn extent_size(width: usize, height: usize) -> Result<ImageSize, WarpError> {
    width.checked_mul(height).ok_or(WarpError::InfiniteExtent)?;
    Ok(ImageSize { width, height })
}

/// Reduce the transformed corners of a source to a destination extent.
///
/// `KeepDimensions` never reaches this point, it is answered before the
/// corners are transformed.
pub(crate) fn extent_from_corners(
    corners: &[Point2f; 4],
    mode: ResizeMode,
) -> Result<Extent, WarpError> {
    let mut min = corners[0];
    let mut max = corners[0];
    for c in &corners[1..] {
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
    }

    if !min.is_finite() || !max.is_finite() || corners.iter().any(|c| !c.is_finite()) {
        return Err(WarpError::InfiniteExtent);
    }

    match mode {
        ResizeMode::KeepOrigin => {
            let (w, h) = (round_extent(max.x)?, round_extent(max.y)?);
            if w < 0 || h < 0 {
                return Err(WarpError::NegativeExtent(w, h));
            }
            Ok(Extent::at_origin(extent_size(w as usize, h as usize)?))
        }
        ResizeMode::AdjustDimensions | ResizeMode::KeepDimensions => {
            let w = round_extent(max.x - min.x + 1.0)?;
            let h = round_extent(max.y - min.y + 1.0)?;
            Ok(Extent {
                size: extent_size(w.max(0) as usize, h.max(0) as usize)?,
                offset: min,
            })
        }
    }
}
