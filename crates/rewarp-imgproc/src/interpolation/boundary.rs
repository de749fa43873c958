/// How an interpolator treats neighbours that fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryType {
    /// No boundary treatment: a sample needing any out-of-range neighbour is
    /// returned as the default value.
    NoBoundary,
    /// Out-of-range neighbours are taken as zero.
    #[default]
    Zero,
    /// The border pixels are repeated outwards.
    Constant,
    /// The image is repeated periodically.
    Periodic,
    /// The image is mirrored at its borders.
    Mirror,
}

impl BoundaryType {
    /// Map a possibly out-of-range index into `[0, len)`.
    ///
    /// Returns `None` when the neighbour does not exist under this boundary type.
    #[inline]
    pub(crate) fn resolve(&self, idx: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let n = len as isize;
        if (0..n).contains(&idx) {
            return Some(idx as usize);
        }
        match self {
            BoundaryType::NoBoundary | BoundaryType::Zero => None,
            BoundaryType::Constant => Some(idx.clamp(0, n - 1) as usize),
            BoundaryType::Periodic => Some(idx.rem_euclid(n) as usize),
            BoundaryType::Mirror => {
                let k = idx.rem_euclid(2 * n);
                let mirrored = if k < n { k } else { 2 * n - 1 - k };
                Some(mirrored as usize)
            }
        }
    }
}
