use rewarp_algebra::{Point2f, Point3f, TransformMatrix};

use super::{check_determinant, corner_weight, ShapeHelper};
use crate::warp::error::WarpError;
use crate::warp::resample::{Linear, ResamplePlan};

/// Inverse of a 4x4 row-major matrix together with its determinant.
///
/// Computed in double precision through the 2x2 sub-determinants of the
/// upper and lower row pairs.
fn inverse4x4(m: &[f32; 16]) -> ([f32; 16], f64) {
    let a: [f64; 16] = m.map(f64::from);
    let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] = a;

    let s0 = a00 * a11 - a10 * a01;
    let s1 = a00 * a12 - a10 * a02;
    let s2 = a00 * a13 - a10 * a03;
    let s3 = a01 * a12 - a11 * a02;
    let s4 = a01 * a13 - a11 * a03;
    let s5 = a02 * a13 - a12 * a03;

    let c5 = a22 * a33 - a32 * a23;
    let c4 = a21 * a33 - a31 * a23;
    let c3 = a21 * a32 - a31 * a22;
    let c2 = a20 * a33 - a30 * a23;
    let c1 = a20 * a32 - a30 * a22;
    let c0 = a20 * a31 - a30 * a21;

    let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;

    let inv = [
        a11 * c5 - a12 * c4 + a13 * c3,
        -a01 * c5 + a02 * c4 - a03 * c3,
        a31 * s5 - a32 * s4 + a33 * s3,
        -a21 * s5 + a22 * s4 - a23 * s3,
        -a10 * c5 + a12 * c2 - a13 * c1,
        a00 * c5 - a02 * c2 + a03 * c1,
        -a30 * s5 + a32 * s2 - a33 * s1,
        a20 * s5 - a22 * s2 + a23 * s1,
        a10 * c4 - a11 * c2 + a13 * c0,
        -a00 * c4 + a01 * c2 - a03 * c0,
        a30 * s4 - a31 * s2 + a33 * s0,
        -a20 * s4 + a21 * s2 - a23 * s0,
        -a10 * c3 + a11 * c1 - a12 * c0,
        a00 * c3 - a01 * c1 + a02 * c0,
        -a30 * s3 + a31 * s1 - a32 * s0,
        a20 * s3 - a21 * s1 + a22 * s0,
    ];

    (inv.map(|v| (v / det) as f32), det)
}

/// A projective map of space applied to a source lying on the plane z = 0.
///
/// Built from a 4x4 matrix, or from a 4x3 one whose missing z column is the
/// identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projective3d {
    m: [f32; 16],
    inv: [f32; 16],
    det: f32,
}

impl Projective3d {
    pub(crate) fn analyze(matrix: &TransformMatrix) -> Result<Self, WarpError> {
        let mut m = [0.0; 16];
        if matrix.cols() == 3 {
            for (r, row) in m.chunks_exact_mut(4).enumerate() {
                row[0] = matrix[(r, 0)];
                row[1] = matrix[(r, 1)];
                row[2] = if r == 2 { 1.0 } else { 0.0 };
                row[3] = matrix[(r, 2)];
            }
        } else {
            m.copy_from_slice(&matrix.as_slice()[..16]);
        }

        let (inv, det) = inverse4x4(&m);
        let det = det as f32;
        check_determinant(det)?;

        Ok(Self { m, inv, det })
    }

    /// Whether the source plane z = 0 is seen edge-on.
    ///
    /// The z of a destination point on the source plane is solved from the
    /// third row of the inverse, which then cannot be done; only the forward
    /// direction remains usable.
    pub fn is_degenerate(&self) -> bool {
        !(self.inv[10].abs() >= f32::EPSILON)
    }

    /// The inverse matrix, row-major.
    pub fn inverse(&self) -> [f32; 16] {
        self.inv
    }

    /// The determinant of the (embedded) 4x4 matrix.
    pub fn determinant(&self) -> f32 {
        self.det
    }

    #[inline]
    fn weight(&self, p: Point2f) -> f32 {
        self.m[12] * p.x + self.m[13] * p.y + self.m[15]
    }
}

impl ShapeHelper for Projective3d {
    fn forward(&self, p: Point2f) -> Point3f {
        let m = &self.m;
        let w = self.weight(p);
        Point3f::new(
            (m[0] * p.x + m[1] * p.y + m[3]) / w,
            (m[4] * p.x + m[5] * p.y + m[7]) / w,
            (m[8] * p.x + m[9] * p.y + m[11]) / w,
        )
    }

    fn backward(&self, p: Point2f) -> Point3f {
        let i = &self.inv;
        let z = -(i[8] * p.x + i[9] * p.y + i[11]) / i[10];
        let a = i[12] * p.x + i[13] * p.y + i[14] * z + i[15];
        Point3f::new(
            (i[0] * p.x + i[1] * p.y + i[2] * z + i[3]) / a,
            (i[4] * p.x + i[5] * p.y + i[6] * z + i[7]) / a,
            z,
        )
    }

    fn corner(&self, p: Point2f) -> Result<Point2f, WarpError> {
        corner_weight(self.weight(p))?;
        Ok(self.forward(p).xy())
    }

    fn check_backward(&self) -> Result<(), WarpError> {
        if self.is_degenerate() {
            return Err(WarpError::DegeneratePlane);
        }
        Ok(())
    }

    fn plan(&self, o: Point2f) -> ResamplePlan {
        let i = &self.inv;

        // destination z on the source plane, linear in the pixel position
        let czx = -i[8] / i[10];
        let czy = -i[9] / i[10];
        let czo = -(i[11] + i[8] * o.x + i[9] * o.y) / i[10];

        let lift = |r: usize| {
            Linear::new(
                i[r] + i[r + 2] * czx,
                i[r + 1] + i[r + 2] * czy,
                i[r + 3] + i[r] * o.x + i[r + 1] * o.y + i[r + 2] * czo,
            )
        };

        ResamplePlan::projective(lift(0), lift(4), lift(12))
            .with_depth(Linear::new(czx, czy, czo))
    }
}
