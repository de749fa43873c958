#![deny(missing_docs)]
//! Points and homogeneous transformation matrices.
//!
//! This crate provides:
//! - `Point2` / `Point3` coordinates used by the point-transform interfaces
//! - `TransformMatrix`, a small row-major matrix that remembers its shape
//! - closed-form builders for frequently used homogeneous matrices

/// closed-form builders of rotation, translation, scaling and projection matrices.
pub mod builders;

/// Error types for the algebra module.
pub mod error;

/// dense row-major transformation matrix.
pub mod matrix;

/// 2d and 3d point types.
pub mod point;

pub use crate::error::AlgebraError;
pub use crate::matrix::TransformMatrix;
pub use crate::point::{Point2, Point2f, Point2i, Point3, Point3f};
