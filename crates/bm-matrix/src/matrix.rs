use std::ops::{Add, AddAssign, Index, IndexMut, Mul};

use crate::element::Accumulable;
use crate::error::{MatrixError, Result};

/// A dense `R x C` matrix with row-major element storage.
///
/// Dimensions are const generic parameters, so shape compatibility of `+`,
/// `+=`, and `*` is checked at compile time; there is no runtime dimension
/// mismatch once a call site type-checks. Element `(i, j)` lives at linear
/// index `i * C + j`, and the storage is never resized after construction.
///
/// `Matrix` has value semantics: `Clone` produces an independent copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<E, const R: usize, const C: usize> {
    elems: Vec<E>,
}

impl<E: Accumulable, const R: usize, const C: usize> Matrix<E, R, C> {
    /// Create a matrix with every element at `E::zero()`.
    pub fn new() -> Self {
        Matrix {
            elems: (0..R * C).map(|_| E::zero()).collect(),
        }
    }

    /// Build a matrix by evaluating `f(i, j)` for every position.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> E) -> Self {
        let mut elems = Vec::with_capacity(R * C);
        for i in 0..R {
            for j in 0..C {
                elems.push(f(i, j));
            }
        }
        Matrix { elems }
    }

    /// Build a matrix from literal row arrays.
    pub fn from_rows(rows: [[E; C]; R]) -> Self {
        let mut elems = Vec::with_capacity(R * C);
        for row in rows {
            elems.extend(row);
        }
        Matrix { elems }
    }
}

impl<E, const R: usize, const C: usize> Matrix<E, R, C> {
    /// Number of rows.
    pub const fn rows(&self) -> usize {
        R
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        C
    }

    /// Checked element access.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if `row >= R` or `col >= C`.
    pub fn at(&self, row: usize, col: usize) -> Result<&E> {
        if row >= R || col >= C {
            return Err(MatrixError::IndexOutOfRange {
                row,
                col,
                rows: R,
                cols: C,
            });
        }
        Ok(&self.elems[row * C + col])
    }

    /// Checked mutable element access.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if `row >= R` or `col >= C`; the matrix is
    /// untouched in that case.
    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut E> {
        if row >= R || col >= C {
            return Err(MatrixError::IndexOutOfRange {
                row,
                col,
                rows: R,
                cols: C,
            });
        }
        Ok(&mut self.elems[row * C + col])
    }

    /// Returns the elements as a row-major slice.
    pub fn as_slice(&self) -> &[E] {
        &self.elems
    }

    /// Returns the elements as a mutable row-major slice.
    pub fn as_mut_slice(&mut self) -> &mut [E] {
        &mut self.elems
    }
}

impl<E: Accumulable, const R: usize, const C: usize> Default for Matrix<E, R, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Hot-path element access: bounds are a `debug_assert!`, so debug builds
/// catch bad indices while release builds pay only the linear-index cost.
impl<E, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<E, R, C> {
    type Output = E;

    fn index(&self, (row, col): (usize, usize)) -> &E {
        debug_assert!(
            row < R && col < C,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            R,
            C
        );
        &self.elems[row * C + col]
    }
}

impl<E, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<E, R, C> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut E {
        debug_assert!(
            row < R && col < C,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            R,
            C
        );
        &mut self.elems[row * C + col]
    }
}

impl<E: Accumulable, const R: usize, const C: usize> AddAssign<&Matrix<E, R, C>>
    for Matrix<E, R, C>
{
    fn add_assign(&mut self, rhs: &Matrix<E, R, C>) {
        for (lhs, rhs) in self.elems.iter_mut().zip(&rhs.elems) {
            lhs.accumulate(rhs);
        }
    }
}

impl<E: Accumulable, const R: usize, const C: usize> AddAssign for Matrix<E, R, C> {
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}

impl<E: Accumulable, const R: usize, const C: usize> Add for &Matrix<E, R, C> {
    type Output = Matrix<E, R, C>;

    fn add(self, rhs: Self) -> Matrix<E, R, C> {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl<E: Accumulable, const R: usize, const C: usize> Add for Matrix<E, R, C> {
    type Output = Matrix<E, R, C>;

    fn add(self, rhs: Self) -> Matrix<E, R, C> {
        &self + &rhs
    }
}

/// Matrix multiplication: `[M x K] * [K x N] -> [M x N]`.
///
/// The textbook i-j-k triple loop, accumulating through `Accumulable` so the
/// same code runs whether `E` is a scalar or itself a square `Matrix`. The
/// loop order is deliberate: it is the access pattern whose cost the flat and
/// block layouts are compared under.
impl<E: Accumulable, const M: usize, const K: usize, const N: usize> Mul<&Matrix<E, K, N>>
    for &Matrix<E, M, K>
{
    type Output = Matrix<E, M, N>;

    fn mul(self, rhs: &Matrix<E, K, N>) -> Matrix<E, M, N> {
        let mut out: Matrix<E, M, N> = Matrix::new();
        for i in 0..M {
            for j in 0..N {
                for k in 0..K {
                    let prod = Accumulable::mul(&self[(i, k)], &rhs[(k, j)]);
                    out[(i, j)].accumulate(&prod);
                }
            }
        }
        out
    }
}

impl<E: Accumulable, const M: usize, const K: usize, const N: usize> Mul<Matrix<E, K, N>>
    for Matrix<E, M, K>
{
    type Output = Matrix<E, M, N>;

    fn mul(self, rhs: Matrix<E, K, N>) -> Matrix<E, M, N> {
        &self * &rhs
    }
}

/// A square matrix is itself a usable matrix element, which is what the
/// block (tiled) layout instantiates: `Matrix<Matrix<f64, B, B>, M, N>`.
impl<E: Accumulable, const N: usize> Accumulable for Matrix<E, N, N> {
    fn zero() -> Self {
        Matrix::new()
    }

    fn accumulate(&mut self, rhs: &Self) {
        *self += rhs;
    }

    fn mul(&self, rhs: &Self) -> Self {
        self * rhs
    }
}
