//! Geometric image transformations driven by a homogeneous matrix.
//!
//! A [`MatrixTransform`] accepts matrices of six shapes:
//!
//! - 2x2: rotation, scaling and shear about the origin
//! - 2x3: affine transformations (the above plus translation)
//! - 3x3: homographies of the plane
//! - 3x4: projections of space onto the plane
//! - 4x3 and 4x4: projective maps of space, the image lying on z = 0
//!
//! The same analyzed matrix resamples whole images and maps single points
//! or point sets, forward and backward.
//!
//! # Examples
//!
//! Rotating an image by 90 degrees around its center, growing the
//! destination so nothing is cut:
//!
//! ```
//! use rewarp_algebra::{builders::rotation_matrix_2d, Point2f};
//! use rewarp_image::Image;
//! use rewarp_imgproc::warp::{MatrixTransform, MatrixTransformParams, ResizeMode};
//!
//! let src = Image::<u8, 1>::from_size_val([8, 4].into(), 255).unwrap();
//! let m = rotation_matrix_2d(Point2f::new(3.5, 1.5), std::f32::consts::FRAC_PI_2);
//! let transform = MatrixTransform::new(
//!     MatrixTransformParams::default()
//!         .with_transformation(m)
//!         .with_resize_mode(ResizeMode::AdjustDimensions),
//! );
//!
//! let dst = transform.apply(&src).unwrap();
//! assert_eq!((dst.width(), dst.height()), (4, 8));
//! ```

mod affine;
mod dims;
mod error;
mod helper;
mod params;
mod perspective;
mod resample;
mod transform;

pub use affine::warp_affine;
pub use dims::Extent;
pub use error::WarpError;
pub use helper::{
    Affine2x3, AnalyzedTransform, Linear2x2, MatrixShape, Projective2d, Projective3d,
};
pub use params::{MatrixTransformParams, ResizeMode};
pub use perspective::warp_perspective;
pub use transform::MatrixTransform;
