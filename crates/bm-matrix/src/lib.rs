//! `bm-matrix` - fixed-size dense matrices with a block-recursive layout.
//!
//! This crate provides:
//! - A `Matrix` type with const generic dimensions and row-major storage
//! - An `Accumulable` trait describing what a matrix element must support
//! - `partition`/`flatten` helpers for the tiled (matrix-of-matrices) layout
//! - A `MatrixError` type for the runtime-checkable failure modes
//!
//! Because `Matrix` implements `Accumulable` for square dimensions, a matrix
//! of matrices (`Matrix<Matrix<f64, B, B>, M, N>`) multiplies with the exact
//! same triple-loop algorithm as a matrix of scalars.

pub mod block;
pub mod element;
pub mod error;
pub mod matrix;

// Re-export primary types at the crate root for convenience.
pub use block::{flatten, partition, BlockMatrix};
pub use element::Accumulable;
pub use error::{MatrixError, Result};
pub use matrix::Matrix;
