use crate::error::AlgebraError;
use crate::matrix::TransformMatrix;
use crate::point::{Point2f, Point3f};

/// Returns a 3x3 homogeneous matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | cos  -sin  tx |
/// | sin   cos  ty |
/// | 0     0    1  |
///
/// where `tx = cx - cos * cx + sin * cy` and `ty = cy - sin * cx - cos * cy`,
/// so that the center is kept in place.
///
/// # Arguments
///
/// * `center` - The point that is kept constant.
/// * `angle` - The angle of rotation in radians.
///
/// # Example
///
/// ```
/// use rewarp_algebra::{builders::rotation_matrix_2d, Point2f};
///
/// let m = rotation_matrix_2d(Point2f::new(0.0, 0.0), std::f32::consts::FRAC_PI_2);
/// assert_eq!(m.shape(), (3, 3));
/// ```
pub fn rotation_matrix_2d(center: Point2f, angle: f32) -> TransformMatrix {
    let (sina, cosa) = angle.sin_cos();

    TransformMatrix::from_rows([
        [cosa, -sina, center.x - cosa * center.x + sina * center.y],
        [sina, cosa, center.y - sina * center.x - cosa * center.y],
        [0.0, 0.0, 1.0],
    ])
}

/// Returns a 4x4 homogeneous matrix for a 3D rotation around an axis passing
/// through `center`.
///
/// # Arguments
///
/// * `center` - A point of the rotation axis.
/// * `axis` - The direction of the rotation axis; it does not need to be normalized.
/// * `angle` - The angle of rotation in radians.
///
/// # Errors
///
/// If the axis has zero length.
pub fn rotation_matrix_3d(
    center: Point3f,
    axis: Point3f,
    angle: f32,
) -> Result<TransformMatrix, AlgebraError> {
    let axis = glam::Vec3::from(axis);
    if axis.length() < 1e-10 {
        return Err(AlgebraError::ZeroAxis);
    }
    let center = glam::Vec3::from(center);

    // move the center to the origin, rotate, move it back
    let m = glam::Mat4::from_translation(center)
        * glam::Mat4::from_axis_angle(axis.normalize(), angle)
        * glam::Mat4::from_translation(-center);
    Ok(m.into())
}

/// Returns the 3x3 homogeneous matrix shifting the plane by `s`.
pub fn translation_matrix_2d(s: Point2f) -> TransformMatrix {
    glam::Mat3::from_translation(s.into()).into()
}

/// Returns the 4x4 homogeneous matrix shifting the space by `s`.
pub fn translation_matrix_3d(s: Point3f) -> TransformMatrix {
    glam::Mat4::from_translation(s.into()).into()
}

/// Returns the 3x3 homogeneous matrix scaling each axis of the plane.
pub fn scaling_matrix_2d(s: Point2f) -> TransformMatrix {
    glam::Mat3::from_scale(s.into()).into()
}

/// Returns the 3x3 homogeneous matrix scaling both axes of the plane by `s`.
pub fn scaling_matrix_uniform(s: f32) -> TransformMatrix {
    scaling_matrix_2d(Point2f::new(s, s))
}

/// Returns the 4x4 homogeneous matrix scaling each axis of the space.
pub fn scaling_matrix_3d(s: Point3f) -> TransformMatrix {
    glam::Mat4::from_scale(s.into()).into()
}

/// Returns the 4x4 homogeneous projection matrix with focal distance `f`.
///
/// The matrix created has the form
///
/// | 1  0  0    0 |
/// | 0  1  0    0 |
/// | 0  0  1    0 |
/// | 0  0  1/f  1 |
///
/// # Errors
///
/// If `f` is zero.
pub fn projection_matrix(f: f32) -> Result<TransformMatrix, AlgebraError> {
    if f == 0.0 {
        return Err(AlgebraError::ZeroFocalDistance);
    }
    let mut m = glam::Mat4::IDENTITY;
    m.z_axis.w = 1.0 / f;
    Ok(m.into())
}
