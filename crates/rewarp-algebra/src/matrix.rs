use std::ops::{Index, IndexMut};

use crate::error::AlgebraError;

/// A dense, row-major matrix of `f32` entries that knows its own shape.
///
/// Transformation matrices come in several shapes (2x2, 2x3, 3x3, 3x4, 4x3 and
/// 4x4) and the shape itself carries meaning, so it is kept next to the data
/// instead of being encoded in the type.
///
/// # Example
///
/// ```
/// use rewarp_algebra::TransformMatrix;
///
/// let m = TransformMatrix::from_rows([[1.0, 0.0, 5.0], [0.0, 1.0, 3.0]]);
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m[(0, 2)], 5.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTransformMatrix")
)]
pub struct TransformMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

// deserialized matrices go through `TransformMatrix::new` to keep the length check
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTransformMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTransformMatrix> for TransformMatrix {
    type Error = AlgebraError;

    fn try_from(raw: RawTransformMatrix) -> Result<Self, Self::Error> {
        TransformMatrix::new(raw.rows, raw.cols, raw.data)
    }
}

impl TransformMatrix {
    /// Create a matrix from its row-major entries.
    ///
    /// # Errors
    ///
    /// If `data` does not hold exactly `rows * cols` entries.
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, AlgebraError> {
        if data.len() != rows * cols {
            return Err(AlgebraError::InvalidDataLength(data.len(), rows, cols));
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix from a fixed-size array of rows.
    pub fn from_rows<const R: usize, const C: usize>(rows: [[f32; C]; R]) -> Self {
        Self {
            rows: R,
            cols: C,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// The `n`x`n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// A matrix with all entries set to zero.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The `(rows, cols)` pair.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The row-major entries.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Entry at `(row, col)`, or `None` if out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Matrix product `self * rhs`.
    ///
    /// Products of two 3x3 or two 4x4 matrices go through `glam`.
    ///
    /// # Errors
    ///
    /// If the number of columns of `self` differs from the number of rows of `rhs`.
    ///
    /// # Example
    ///
    /// ```
    /// use rewarp_algebra::TransformMatrix;
    ///
    /// let a = TransformMatrix::from_rows([[2.0, 0.0], [0.0, 3.0]]);
    /// let b = TransformMatrix::from_rows([[1.0, 1.0], [0.0, 1.0]]);
    /// let c = a.matmul(&b).unwrap();
    /// assert_eq!(c.as_slice(), &[2.0, 2.0, 0.0, 3.0]);
    /// ```
    pub fn matmul(&self, rhs: &TransformMatrix) -> Result<TransformMatrix, AlgebraError> {
        if self.cols != rhs.rows {
            return Err(AlgebraError::DimensionMismatch(
                self.rows, self.cols, rhs.rows, rhs.cols,
            ));
        }

        match self.rows {
            3 if self.is_square() && rhs.is_square() => {
                Ok((glam::Mat3::try_from(self)? * glam::Mat3::try_from(rhs)?).into())
            }
            4 if self.is_square() && rhs.is_square() => {
                Ok((glam::Mat4::try_from(self)? * glam::Mat4::try_from(rhs)?).into())
            }
            _ => {
                let mut out = TransformMatrix::zeros(self.rows, rhs.cols);
                for r in 0..self.rows {
                    for c in 0..rhs.cols {
                        out[(r, c)] = (0..self.cols).map(|k| self[(r, k)] * rhs[(k, c)]).sum();
                    }
                }
                Ok(out)
            }
        }
    }

    fn is_square(&self) -> bool {
        self.rows == self.cols
    }
}

impl From<glam::Mat3> for TransformMatrix {
    fn from(m: glam::Mat3) -> Self {
        // glam is column-major: the transpose lists the rows
        Self {
            rows: 3,
            cols: 3,
            data: m.transpose().to_cols_array().to_vec(),
        }
    }
}

impl From<glam::Mat4> for TransformMatrix {
    fn from(m: glam::Mat4) -> Self {
        Self {
            rows: 4,
            cols: 4,
            data: m.transpose().to_cols_array().to_vec(),
        }
    }
}

impl TryFrom<&TransformMatrix> for glam::Mat3 {
    type Error = AlgebraError;

    fn try_from(m: &TransformMatrix) -> Result<Self, Self::Error> {
        let rows: [f32; 9] = match (m.shape(), m.data.as_slice().try_into()) {
            ((3, 3), Ok(rows)) => rows,
            _ => return Err(AlgebraError::NotSquare(m.rows, m.cols, 3)),
        };
        Ok(glam::Mat3::from_cols_array(&rows).transpose())
    }
}

impl TryFrom<&TransformMatrix> for glam::Mat4 {
    type Error = AlgebraError;

    fn try_from(m: &TransformMatrix) -> Result<Self, Self::Error> {
        let rows: [f32; 16] = match (m.shape(), m.data.as_slice().try_into()) {
            ((4, 4), Ok(rows)) => rows,
            _ => return Err(AlgebraError::NotSquare(m.rows, m.cols, 4)),
        };
        Ok(glam::Mat4::from_cols_array(&rows).transpose())
    }
}

impl Index<(usize, usize)> for TransformMatrix {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        debug_assert!(row < self.rows && col < self.cols);
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for TransformMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_new_checks_length() {
        assert_eq!(
            TransformMatrix::new(2, 3, vec![0.0; 5]),
            Err(AlgebraError::InvalidDataLength(5, 2, 3))
        );
        let m = TransformMatrix::new(3, 4, vec![0.0; 12]);
        assert!(m.is_ok());
    }

    #[test]
    fn matrix_identity() {
        let m = TransformMatrix::identity(3);
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m.as_slice(), &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(m.get(2, 2), Some(1.0));
        assert_eq!(m.get(3, 0), None);
    }

    #[test]
    fn matrix_matmul() -> Result<(), AlgebraError> {
        let a = TransformMatrix::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = TransformMatrix::from_rows([[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        let c = a.matmul(&b)?;
        assert_eq!(c.shape(), (2, 2));
        assert_eq!(c.as_slice(), &[4.0, 5.0, 10.0, 11.0]);

        assert_eq!(
            a.matmul(&a),
            Err(AlgebraError::DimensionMismatch(2, 3, 2, 3))
        );
        Ok(())
    }

    #[test]
    fn matrix_glam_conversions() -> Result<(), AlgebraError> {
        let m = TransformMatrix::from_rows([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 10.0],
        ]);
        let g = glam::Mat3::try_from(&m)?;
        // column 2 of the glam matrix is the last column of the rows above
        assert_eq!(g.z_axis, glam::Vec3::new(3.0, 6.0, 10.0));
        assert_eq!(TransformMatrix::from(g), m);

        assert_eq!(
            glam::Mat4::try_from(&m),
            Err(AlgebraError::NotSquare(3, 3, 4))
        );
        Ok(())
    }

    #[test]
    fn matrix_matmul_square() -> Result<(), AlgebraError> {
        let a = TransformMatrix::from_rows([[1.0, 2.0, 0.0], [0.0, 1.0, 3.0], [0.0, 0.0, 1.0]]);
        let b = TransformMatrix::from_rows([[2.0, 0.0, 1.0], [0.0, 2.0, 0.0], [0.0, 0.0, 1.0]]);
        let c = a.matmul(&b)?;
        assert_eq!(c.shape(), (3, 3));
        assert_eq!(c.as_slice(), &[2.0, 4.0, 1.0, 0.0, 2.0, 3.0, 0.0, 0.0, 1.0]);

        let mut t = TransformMatrix::identity(4);
        t[(0, 3)] = 5.0;
        let mut s = TransformMatrix::identity(4);
        s[(0, 0)] = 2.0;
        let ts = t.matmul(&s)?;
        assert_eq!(ts[(0, 0)], 2.0);
        assert_eq!(ts[(0, 3)], 5.0);
        let st = s.matmul(&t)?;
        assert_eq!(st[(0, 3)], 10.0);
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn matrix_serde() -> Result<(), Box<dyn std::error::Error>> {
        let m = TransformMatrix::from_rows([[0.0, -1.0], [1.0, 0.0]]);
        let serialized = serde_json::to_string(&m)?;
        let deserialized: TransformMatrix = serde_json::from_str(&serialized)?;
        assert_eq!(m, deserialized);

        let broken = r#"{"rows":2,"cols":2,"data":[1.0]}"#;
        assert!(serde_json::from_str::<TransformMatrix>(broken).is_err());
        Ok(())
    }
}
