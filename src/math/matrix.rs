//! Small matrix types: a dynamically sized matrix for general linear algebra
//! and a homogeneous 4x4 matrix for affine transforms of coordinates.

use nalgebra::{DMatrix, Point3, Vector3};

use crate::error::{MatrixError, Result};
use crate::geometry::Coordinate;

/// Read access shared by the matrix types.
pub trait Matrix {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Returns the element at `(row, col)`, or `None` when out of range.
    fn get(&self, row: usize, col: usize) -> Option<f64>;

    /// Returns `true` if the matrix is square.
    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }
}

/// Dense matrix of arbitrary dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixD {
    inner: DMatrix<f64>,
}

impl MatrixD {
    /// Creates a `rows x cols` zero matrix.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            inner: DMatrix::zeros(rows, cols),
        }
    }

    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self {
            inner: DMatrix::identity(n, n),
        }
    }

    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::DataLength` if `data.len() != rows * cols`.
    pub fn from_rows(rows: usize, cols: usize, data: &[f64]) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(MatrixError::DataLength {
                rows,
                cols,
                len: data.len(),
            }
            .into());
        }
        Ok(Self {
            inner: DMatrix::from_row_slice(rows, cols, data),
        })
    }

    /// Sets the element at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::DimensionMismatch` if the index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let (rows, cols) = self.inner.shape();
        match self.inner.get_mut((row, col)) {
            Some(v) => {
                *v = value;
                Ok(())
            }
            None => Err(MatrixError::DimensionMismatch {
                left_rows: rows,
                left_cols: cols,
                right_rows: row + 1,
                right_cols: col + 1,
            }
            .into()),
        }
    }

    /// Computes `self * other`.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::DimensionMismatch` if the inner dimensions differ.
    pub fn multiply(&self, other: &MatrixD) -> Result<MatrixD> {
        if self.cols() != other.rows() {
            return Err(MatrixError::DimensionMismatch {
                left_rows: self.rows(),
                left_cols: self.cols(),
                right_rows: other.rows(),
                right_cols: other.cols(),
            }
            .into());
        }
        Ok(MatrixD {
            inner: &self.inner * &other.inner,
        })
    }

    /// Multiplies every element by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> MatrixD {
        MatrixD {
            inner: &self.inner * factor,
        }
    }

    #[must_use]
    pub fn transpose(&self) -> MatrixD {
        MatrixD {
            inner: self.inner.transpose(),
        }
    }

    #[must_use]
    pub fn as_nalgebra(&self) -> &DMatrix<f64> {
        &self.inner
    }
}

impl Matrix for MatrixD {
    fn rows(&self) -> usize {
        self.inner.nrows()
    }

    fn cols(&self) -> usize {
        self.inner.ncols()
    }

    fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.inner.get((row, col)).copied()
    }
}

/// Homogeneous 4x4 affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    inner: nalgebra::Matrix4<f64>,
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    #[must_use]
    pub fn identity() -> Self {
        Self {
            inner: nalgebra::Matrix4::identity(),
        }
    }

    /// Creates a translation by `(dx, dy, dz)`.
    #[must_use]
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            inner: nalgebra::Matrix4::new_translation(&Vector3::new(dx, dy, dz)),
        }
    }

    /// Creates a non-uniform scaling about the origin.
    #[must_use]
    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            inner: nalgebra::Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)),
        }
    }

    /// Creates a counter-clockwise rotation about the z axis.
    #[must_use]
    pub fn rotation_z(angle: f64) -> Self {
        Self {
            inner: nalgebra::Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle)),
        }
    }

    /// Returns `self * other`: `other` is applied first.
    #[must_use]
    pub fn multiply(&self, other: &Matrix4) -> Matrix4 {
        Matrix4 {
            inner: self.inner * other.inner,
        }
    }

    /// Applies the transform to a coordinate. A missing `z` is treated as
    /// zero for the product and stays absent in the result.
    #[must_use]
    pub fn transform_coordinate(&self, c: &Coordinate) -> Coordinate {
        let z = if c.has_z() { c.z } else { 0.0 };
        let p = self.inner.transform_point(&Point3::new(c.x, c.y, z));
        if c.has_z() {
            Coordinate::with_z(p.x, p.y, p.z)
        } else {
            Coordinate::new(p.x, p.y)
        }
    }

    #[must_use]
    pub fn as_nalgebra(&self) -> &nalgebra::Matrix4<f64> {
        &self.inner
    }
}

impl From<nalgebra::Matrix4<f64>> for Matrix4 {
    fn from(inner: nalgebra::Matrix4<f64>) -> Self {
        Self { inner }
    }
}

impl Matrix for Matrix4 {
    fn rows(&self) -> usize {
        4
    }

    fn cols(&self) -> usize {
        4
    }

    fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.inner.get((row, col)).copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GeotopoError;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn multiply_dynamic() {
        let a = MatrixD::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = MatrixD::from_rows(3, 1, &[1.0, 0.0, -1.0]).unwrap();
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.rows(), 2);
        assert_eq!(c.cols(), 1);
        assert_eq!(c.get(0, 0), Some(-2.0));
        assert_eq!(c.get(1, 0), Some(-2.0));
        assert_eq!(c.get(2, 0), None);
    }

    #[test]
    fn multiply_dimension_mismatch() {
        let a = MatrixD::zeros(2, 3);
        let b = MatrixD::zeros(2, 3);
        let err = a.multiply(&b).unwrap_err();
        assert!(matches!(
            err,
            GeotopoError::Matrix(MatrixError::DimensionMismatch {
                left_cols: 3,
                right_rows: 2,
                ..
            })
        ));
    }

    #[test]
    fn from_rows_rejects_bad_length() {
        assert!(MatrixD::from_rows(2, 2, &[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn set_and_scale() {
        let mut m = MatrixD::identity(2);
        m.set(0, 1, 3.0).unwrap();
        assert!(m.set(2, 0, 1.0).is_err());
        let s = m.scale(2.0);
        assert_eq!(s.get(0, 0), Some(2.0));
        assert_eq!(s.get(0, 1), Some(6.0));
        assert_eq!(s.transpose().get(1, 0), Some(6.0));
        assert!(s.is_square());
    }

    #[test]
    fn affine_composition() {
        // Rotate a quarter turn, then translate.
        let m = Matrix4::translation(1.0, 0.0, 0.0).multiply(&Matrix4::rotation_z(FRAC_PI_2));
        let p = m.transform_coordinate(&Coordinate::new(1.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
        assert!(!p.has_z());
    }

    #[test]
    fn scaling_keeps_z() {
        let m = Matrix4::scaling(2.0, 3.0, 4.0);
        let p = m.transform_coordinate(&Coordinate::with_z(1.0, 1.0, 1.0));
        assert_eq!((p.x, p.y, p.z), (2.0, 3.0, 4.0));
        assert_eq!(m.get(3, 3), Some(1.0));
    }
}
