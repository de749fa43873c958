use rewarp_algebra::{Point2f, Point3f, TransformMatrix};

use super::{check_determinant, ShapeHelper};
use crate::warp::error::WarpError;
use crate::warp::resample::{Linear, ResamplePlan};

/// A 2x2 matrix: rotation, scaling and shear about the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear2x2 {
    m: [f32; 4],
    inv: [f32; 4],
}

impl Linear2x2 {
    pub(crate) fn analyze(matrix: &TransformMatrix) -> Result<Self, WarpError> {
        let m = [
            matrix[(0, 0)],
            matrix[(0, 1)],
            matrix[(1, 0)],
            matrix[(1, 1)],
        ];
        let det = m[0] * m[3] - m[2] * m[1];
        check_determinant(det)?;

        Ok(Self {
            m,
            inv: [m[3] / det, -m[1] / det, -m[2] / det, m[0] / det],
        })
    }

    /// The inverse matrix, row-major.
    pub fn inverse(&self) -> [f32; 4] {
        self.inv
    }
}

impl ShapeHelper for Linear2x2 {
    fn forward(&self, p: Point2f) -> Point3f {
        let m = &self.m;
        Point3f::new(m[0] * p.x + m[1] * p.y, m[2] * p.x + m[3] * p.y, 0.0)
    }

    fn backward(&self, p: Point2f) -> Point3f {
        let i = &self.inv;
        Point3f::new(i[0] * p.x + i[1] * p.y, i[2] * p.x + i[3] * p.y, 0.0)
    }

    fn corner(&self, p: Point2f) -> Result<Point2f, WarpError> {
        Ok(self.forward(p).xy())
    }

    fn plan(&self, o: Point2f) -> ResamplePlan {
        let i = &self.inv;
        ResamplePlan::affine(
            Linear::new(i[0], i[1], i[0] * o.x + i[1] * o.y),
            Linear::new(i[2], i[3], i[2] * o.x + i[3] * o.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_rotation() -> Result<(), WarpError> {
        let m = TransformMatrix::from_rows([[0.0, -1.0], [1.0, 0.0]]);
        let helper = Linear2x2::analyze(&m)?;
        assert_eq!(helper.inverse(), [0.0, 1.0, -1.0, 0.0]);

        let p = helper.forward(Point2f::new(1.0, 0.0));
        assert_eq!(p, Point3f::new(0.0, 1.0, 0.0));
        assert_eq!(helper.backward(p.xy()).xy(), Point2f::new(1.0, 0.0));
        Ok(())
    }

    #[test]
    fn singular() {
        let m = TransformMatrix::from_rows([[1.0, 2.0], [0.0, 0.0]]);
        assert_eq!(Linear2x2::analyze(&m), Err(WarpError::SingularMatrix(0.0)));

        let m = TransformMatrix::from_rows([[f32::NAN, 0.0], [0.0, 1.0]]);
        assert!(matches!(
            Linear2x2::analyze(&m),
            Err(WarpError::SingularMatrix(_))
        ));
    }

    #[test]
    fn plan_folds_offset() -> Result<(), WarpError> {
        let m = TransformMatrix::from_rows([[2.0, 0.0], [0.0, 4.0]]);
        let plan = Linear2x2::analyze(&m)?.plan(Point2f::new(2.0, 8.0));
        assert_eq!(plan.col, Linear::new(0.5, 0.0, 1.0));
        assert_eq!(plan.row, Linear::new(0.0, 0.25, 2.0));
        assert_eq!(plan.weight, None);
        Ok(())
    }
}
