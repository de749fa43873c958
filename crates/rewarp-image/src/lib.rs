#![deny(missing_docs)]
//! Image types used as source and destination rasters of geometric transformations.

/// Error types for the image module.
pub mod error;

/// raster representation for computer vision purposes.
pub mod image;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
