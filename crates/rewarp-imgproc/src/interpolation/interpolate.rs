use super::bilinear::bilinear_interpolation;
use super::boundary::BoundaryType;
use super::nearest::nearest_neighbor_interpolation;
use rewarp_image::{Image, ImageDtype};

/// Interpolation mode used to read a source image at fractional coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Reads a value out of an image at a fractional position.
///
/// The geometric transformations only ever sample the source through this
/// trait, so the implementation decides how positions outside the image are
/// handled.
///
/// Any closure `Fn(&Image<T, C>, f32, f32) -> [T; C]` taking `(image, row, col)`
/// is an interpolator as well.
///
/// # Example
///
/// ```
/// use rewarp_image::Image;
/// use rewarp_imgproc::interpolation::Interpolator;
///
/// let image = Image::<f32, 1>::new([2, 1].into(), vec![1.0, 3.0]).unwrap();
/// let floor = |img: &Image<f32, 1>, row: f32, col: f32| {
///     [*img.get_pixel(col as usize, row as usize, 0).unwrap_or(&0.0)]
/// };
/// assert_eq!(floor.interpolate(&image, 0.0, 1.7), [3.0]);
/// ```
pub trait Interpolator<T, const C: usize>: Sync {
    /// Sample `image` at row `row` and column `col`.
    fn interpolate(&self, image: &Image<T, C>, row: f32, col: f32) -> [T; C];
}

impl<T, const C: usize, F> Interpolator<T, C> for F
where
    F: Fn(&Image<T, C>, f32, f32) -> [T; C] + Sync,
{
    fn interpolate(&self, image: &Image<T, C>, row: f32, col: f32) -> [T; C] {
        self(image, row, col)
    }
}

/// Interpolator over the pixel grid with a configurable boundary policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridInterpolator {
    /// How the value between pixels is computed.
    pub mode: InterpolationMode,
    /// How neighbours outside the image are resolved.
    pub boundary: BoundaryType,
}

impl GridInterpolator {
    /// Create a new grid interpolator.
    pub fn new(mode: InterpolationMode, boundary: BoundaryType) -> Self {
        Self { mode, boundary }
    }
}

impl<T: ImageDtype, const C: usize> Interpolator<T, C> for GridInterpolator {
    fn interpolate(&self, image: &Image<T, C>, row: f32, col: f32) -> [T; C] {
        interpolate_pixel(image, row, col, self.mode, self.boundary)
    }
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `row` - The y coordinate of the pixel to interpolate.
/// * `col` - The x coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
/// * `boundary` - How neighbours outside the image are resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub fn interpolate_pixel<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    row: f32,
    col: f32,
    interpolation: InterpolationMode,
    boundary: BoundaryType,
) -> [T; C] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, row, col, boundary),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, row, col, boundary),
    }
}
