use serde::{Deserialize, Serialize};

/// Row/column extent of a grayscale grid, as broadcast to every worker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of bytes in a row-major `u8` buffer of this shape.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// True when the 3×3 operator has at least one interior pixel to write.
    #[inline]
    pub fn fits_kernel(&self) -> bool {
        self.rows >= 3 && self.cols >= 3
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_shapes() {
        assert!(GridShape::new(0, 5).is_empty());
        assert!(GridShape::new(4, 0).is_empty());
        assert!(!GridShape::new(2, 2).is_empty());
        assert!(!GridShape::new(2, 2).fits_kernel());
        assert!(GridShape::new(3, 3).fits_kernel());
        assert_eq!(GridShape::new(4, 6).len(), 24);
        assert_eq!(GridShape::new(4, 6).to_string(), "6x4");
    }
}
