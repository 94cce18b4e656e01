//! Rectangular matrix math.

use std::fmt;
use std::ops::Mul;

use itertools::Itertools;
use thiserror::Error;

use crate::approx_cmp::is_approx_nonzero;
use crate::{EPSILON, Float};

/// Error produced by a matrix operation.
///
/// Every variant is a normal, recoverable outcome; the caller decides how to
/// present it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Multiplication operands have incompatible shapes.
    #[error("cannot multiply {lhs_rows}x{lhs_cols} matrix by {rhs_rows}x{rhs_cols} matrix")]
    DimensionMismatch {
        /// Rows of the left-hand operand.
        lhs_rows: usize,
        /// Columns of the left-hand operand.
        lhs_cols: usize,
        /// Rows of the right-hand operand.
        rhs_rows: usize,
        /// Columns of the right-hand operand.
        rhs_cols: usize,
    },
    /// Chained multiplication was given zero operands.
    #[error("empty operand sequence")]
    EmptyOperandSequence,
    /// Operation requires a 2x2 matrix.
    #[error("expected a 2x2 matrix; got {rows}x{cols}")]
    WrongShape {
        /// Rows of the offending matrix.
        rows: usize,
        /// Columns of the offending matrix.
        cols: usize,
    },
    /// Matrix is singular (determinant within [`EPSILON`] of zero).
    #[error("matrix is not invertible")]
    NotInvertible,
}

/// Rectangular matrix of [`Float`]s with at least one row and one column.
///
/// Elements are stored in **row-major** order. Matrices are values: no
/// operation mutates its operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Elements stored in **row-major** order.
    elems: Vec<Float>,
}
impl Matrix {
    /// Constructs a matrix with all zeros.
    ///
    /// # Panics
    ///
    /// This method panics if either dimension is zero.
    pub fn zero(rows: usize, cols: usize) -> Self {
        assert!(
            rows >= 1 && cols >= 1,
            "matrix must have at least one row and one column",
        );
        Self {
            rows,
            cols,
            elems: vec![0.0; rows * cols],
        }
    }
    /// Constructs an identity matrix.
    ///
    /// # Panics
    ///
    /// This method panics if `ndim` is zero.
    pub fn ident(ndim: usize) -> Self {
        Self::from_fn(ndim, ndim, |i, j| (i == j) as u8 as Float)
    }
    /// Constructs a matrix from a list of rows.
    ///
    /// ```
    /// # use matmath::prelude::*;
    /// assert_eq!(
    ///     Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]),
    ///     matmath::row_matrix![
    ///         [1.0, 2.0],
    ///         [3.0, 4.0],
    ///     ],
    /// );
    /// ```
    ///
    /// # Panics
    ///
    /// This method panics if the rows do not form a rectangular table with at
    /// least one row and one column.
    pub fn from_rows(rows: Vec<Vec<Float>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        assert!(
            !rows.is_empty() && cols >= 1,
            "matrix must have at least one row and one column",
        );
        assert!(
            rows.iter().all(|row| row.len() == cols),
            "matrix rows must all have the same length",
        );
        Self {
            rows: rows.len(),
            cols,
            elems: rows.concat(),
        }
    }
    /// Constructs a matrix from a list of `rows * cols` elements, in
    /// **row-major** order.
    ///
    /// # Panics
    ///
    /// This method panics if the element count does not match the shape, or if
    /// either dimension is zero.
    pub fn from_elems(rows: usize, cols: usize, elems: Vec<Float>) -> Self {
        assert!(
            rows >= 1 && cols >= 1,
            "matrix must have at least one row and one column",
        );
        assert_eq!(
            rows * cols,
            elems.len(),
            "{rows}x{cols} matrix must have {} elements; got {}",
            rows * cols,
            elems.len(),
        );
        Self { rows, cols, elems }
    }
    /// Constructs a matrix from a function for each element.
    pub fn from_fn(rows: usize, cols: usize, f: impl Fn(usize, usize) -> Float) -> Self {
        let f = &f;
        Self::from_elems(
            rows,
            cols,
            (0..rows)
                .flat_map(|i| (0..cols).map(move |j| f(i, j)))
                .collect(),
        )
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }
    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Returns the shape of the matrix as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    /// Returns whether the matrix is square with the given size.
    pub fn is_square(&self, ndim: usize) -> bool {
        self.shape() == (ndim, ndim)
    }

    /// Returns an element of the matrix.
    ///
    /// # Panics
    ///
    /// This method panics if `row >= self.rows() || col >= self.cols()`.
    pub fn get(&self, row: usize, col: usize) -> Float {
        assert!(row < self.rows);
        assert!(col < self.cols);
        self.elems[row * self.cols + col]
    }
    /// Returns a mutable reference to an element of the matrix.
    ///
    /// # Panics
    ///
    /// This method panics if `row >= self.rows() || col >= self.cols()`.
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut Float {
        assert!(row < self.rows);
        assert!(col < self.cols);
        &mut self.elems[row * self.cols + col]
    }
    /// Returns a slice of the `rows * cols` elements in **row-major** order.
    pub fn as_slice(&self) -> &[Float] {
        &self.elems
    }
    /// Returns an iterator over the rows of the matrix.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[Float]> {
        self.elems.chunks_exact(self.cols)
    }

    /// Multiplies this matrix by another, producing a matrix of shape
    /// `self.rows() x rhs.cols()`.
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] unless
    /// `self.cols() == rhs.rows()`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != rhs.rows {
            return Err(MatrixError::DimensionMismatch {
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: rhs.rows,
                rhs_cols: rhs.cols,
            });
        }

        let mut product = Matrix::zero(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.get(i, k) * rhs.get(k, j);
                }
                *product.get_mut(i, j) = sum;
            }
        }
        Ok(product)
    }

    /// Compares two matrices element-wise with the given tolerance.
    ///
    /// A shape mismatch is an ordinary "not equal" outcome, not an error.
    pub fn approx_eq(&self, other: &Matrix, tolerance: Float) -> bool {
        self.shape() == other.shape()
            && std::iter::zip(&self.elems, &other.elems).all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Returns the inverse of a 2x2 matrix.
    ///
    /// Fails with [`MatrixError::WrongShape`] if the matrix is not 2x2 and
    /// [`MatrixError::NotInvertible`] if it is singular.
    pub fn inverse_2x2(&self) -> Result<Matrix, MatrixError> {
        if !self.is_square(2) {
            return Err(MatrixError::WrongShape {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let (a, b) = (self.get(0, 0), self.get(0, 1));
        let (c, d) = (self.get(1, 0), self.get(1, 1));
        let det = a * d - b * c;
        if !is_approx_nonzero(&det) {
            return Err(MatrixError::NotInvertible);
        }
        Ok(Matrix::from_rows(vec![
            vec![d / det, -b / det],
            vec![-c / det, a / det],
        ]))
    }
}

/// Multiplies a sequence of matrices left to right.
///
/// A sequence of one matrix returns that matrix unchanged. Fails with
/// [`MatrixError::EmptyOperandSequence`] for a sequence of zero matrices and
/// short-circuits with [`MatrixError::DimensionMismatch`] at the first
/// incompatible adjacent pair.
pub fn multiply_all<'a>(
    matrices: impl IntoIterator<Item = &'a Matrix>,
) -> Result<Matrix, MatrixError> {
    let mut iter = matrices.into_iter();
    let first = iter.next().ok_or(MatrixError::EmptyOperandSequence)?;
    iter.try_fold(first.clone(), |product, m| product.multiply(m))
}

/// Constructs a matrix from rows.
#[macro_export]
macro_rules! row_matrix {
    ($([$($n:expr),* $(,)?]),* $(,)?) => {
        $crate::Matrix::from_rows(vec![$(vec![$($n as $crate::Float),*]),*])
    };
}

impl Mul for &Matrix {
    type Output = Matrix;

    /// # Panics
    ///
    /// This operator panics on a dimension mismatch; use
    /// [`Matrix::multiply`] to handle that case gracefully.
    fn mul(self, rhs: Self) -> Matrix {
        match self.multiply(rhs) {
            Ok(product) => product,
            Err(e) => panic!("{e}"),
        }
    }
}

impl approx::AbsDiffEq for Matrix {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.approx_eq(other, epsilon)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.iter_rows()
                .map(|row| format!("[{}]", row.iter().join(", ")))
                .join("\n"),
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Matrix {
    /// Serializes the matrix as its list of rows.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter_rows())
    }
}
