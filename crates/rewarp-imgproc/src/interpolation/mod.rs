//! Pixel interpolation methods for image transformations.
//!
//! The geometric transformations never read a source image at fractional
//! coordinates themselves; they go through an [`Interpolator`], which also owns
//! the policy for positions outside the image.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//!
//! # Boundary Types
//!
//! See [`BoundaryType`] for how out-of-range neighbours are resolved.

mod bilinear;
mod boundary;
mod interpolate;
mod nearest;

pub use boundary::BoundaryType;
pub use interpolate::{interpolate_pixel, GridInterpolator, InterpolationMode, Interpolator};
