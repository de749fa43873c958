use rewarp_algebra::{Point2f, Point3f, TransformMatrix};

use super::{check_determinant, corner_weight, MatrixShape, ShapeHelper};
use crate::warp::error::WarpError;
use crate::warp::resample::{Linear, ResamplePlan};

#[rustfmt::skip]
fn determinant3x3(m: &[f32; 9]) -> f32 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) -
    m[1] * (m[3] * m[8] - m[5] * m[6]) +
    m[2] * (m[3] * m[7] - m[4] * m[6])
}

#[rustfmt::skip]
fn adjugate3x3(m: &[f32; 9]) -> [f32; 9] {
    [
        m[4] * m[8] - m[5] * m[7],  // [0, 0]
        m[2] * m[7] - m[1] * m[8],  // [0, 1]
        m[1] * m[5] - m[2] * m[4],  // [0, 2]
        m[5] * m[6] - m[3] * m[8],  // [1, 0]
        m[0] * m[8] - m[2] * m[6],  // [1, 1]
        m[2] * m[3] - m[0] * m[5],  // [1, 2]
        m[3] * m[7] - m[4] * m[6],  // [2, 0]
        m[1] * m[6] - m[0] * m[7],  // [2, 1]
        m[0] * m[4] - m[1] * m[3],  // [2, 2]
    ]
}

/// A homography of the plane.
///
/// Built from a 3x3 matrix, or from a 3x4 projection of space whose z column
/// is dropped since the source lies on z = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projective2d {
    shape: MatrixShape,
    m: [f32; 9],
    inv: [f32; 9],
}

impl Projective2d {
    pub(crate) fn analyze(matrix: &TransformMatrix) -> Result<Self, WarpError> {
        let (shape, cols) = if matrix.cols() == 4 {
            (MatrixShape::M3x4, [0, 1, 3])
        } else {
            (MatrixShape::M3x3, [0, 1, 2])
        };

        let mut m = [0.0; 9];
        for (r, row) in m.chunks_exact_mut(3).enumerate() {
            for (v, &c) in row.iter_mut().zip(cols.iter()) {
                *v = matrix[(r, c)];
            }
        }

        let det = determinant3x3(&m);
        check_determinant(det)?;

        let adj = adjugate3x3(&m);
        let inv_det = 1.0 / det;
        let mut inv = [0.0; 9];
        for i in 0..9 {
            inv[i] = adj[i] * inv_det;
        }

        Ok(Self { shape, m, inv })
    }

    /// The shape of the matrix this homography comes from.
    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    /// The inverse homography, row-major.
    pub fn inverse(&self) -> [f32; 9] {
        self.inv
    }
}

impl ShapeHelper for Projective2d {
    fn forward(&self, p: Point2f) -> Point3f {
        let m = &self.m;
        let w = m[6] * p.x + m[7] * p.y + m[8];
        Point3f::new(
            (m[0] * p.x + m[1] * p.y + m[2]) / w,
            (m[3] * p.x + m[4] * p.y + m[5]) / w,
            0.0,
        )
    }

    fn backward(&self, p: Point2f) -> Point3f {
        let i = &self.inv;
        let a = i[6] * p.x + i[7] * p.y + i[8];
        Point3f::new(
            (i[0] * p.x + i[1] * p.y + i[2]) / a,
            (i[3] * p.x + i[4] * p.y + i[5]) / a,
            0.0,
        )
    }

    fn corner(&self, p: Point2f) -> Result<Point2f, WarpError> {
        let m = &self.m;
        corner_weight(m[6] * p.x + m[7] * p.y + m[8])?;
        Ok(self.forward(p).xy())
    }

    fn plan(&self, o: Point2f) -> ResamplePlan {
        let i = &self.inv;
        ResamplePlan::projective(
            Linear::new(i[0], i[1], i[2] + i[0] * o.x + i[1] * o.y),
            Linear::new(i[3], i[4], i[5] + i[3] * o.x + i[4] * o.y),
            Linear::new(i[6], i[7], i[8] + i[6] * o.x + i[7] * o.y),
        )
    }
}
