use rewarp_algebra::{Point2f, Point3f, TransformMatrix};

use super::{check_determinant, ShapeHelper};
use crate::warp::error::WarpError;
use crate::warp::resample::{Linear, ResamplePlan};

/// A 2x3 matrix: a linear map followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2x3 {
    m: [f32; 6],
    inv: [f32; 6],
}

impl Affine2x3 {
    pub(crate) fn analyze(matrix: &TransformMatrix) -> Result<Self, WarpError> {
        let mut m = [0.0; 6];
        m.copy_from_slice(&matrix.as_slice()[..6]);

        let det = m[0] * m[4] - m[3] * m[1];
        check_determinant(det)?;

        // only the linear block is inverted, the translation follows from it
        let inv = [
            m[4] / det,
            -m[1] / det,
            (m[1] * m[5] - m[2] * m[4]) / det,
            -m[3] / det,
            m[0] / det,
            (m[2] * m[3] - m[0] * m[5]) / det,
        ];

        Ok(Self { m, inv })
    }

    /// The inverse transformation as a row-major 2x3 matrix.
    pub fn inverse(&self) -> [f32; 6] {
        self.inv
    }
}

impl ShapeHelper for Affine2x3 {
    fn forward(&self, p: Point2f) -> Point3f {
        let m = &self.m;
        Point3f::new(
            m[0] * p.x + m[1] * p.y + m[2],
            m[3] * p.x + m[4] * p.y + m[5],
            0.0,
        )
    }

    fn backward(&self, p: Point2f) -> Point3f {
        let i = &self.inv;
        Point3f::new(
            i[0] * p.x + i[1] * p.y + i[2],
            i[3] * p.x + i[4] * p.y + i[5],
            0.0,
        )
    }

    fn corner(&self, p: Point2f) -> Result<Point2f, WarpError> {
        Ok(self.forward(p).xy())
    }

    fn plan(&self, o: Point2f) -> ResamplePlan {
        let i = &self.inv;
        ResamplePlan::affine(
            Linear::new(i[0], i[1], i[2] + i[0] * o.x + i[1] * o.y),
            Linear::new(i[3], i[4], i[5] + i[3] * o.x + i[4] * o.y),
        )
    }
}
