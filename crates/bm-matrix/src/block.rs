//! Conversions between the flat layout and the block (tiled) layout.
//!
//! A block matrix is just `Matrix<Matrix<E, B, B>, RB, CB>`: the outer matrix
//! stores `B x B` tiles as its elements, so each tile is contiguous in memory
//! while the flat layout stores whole rows contiguously. Stable Rust cannot
//! relate `R` to `RB * B` at the type level, so these two conversion seams
//! check the shapes eagerly and return an error before touching any element.

use crate::element::Accumulable;
use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

/// An `RB x CB` matrix of `B x B` tiles.
pub type BlockMatrix<E, const RB: usize, const CB: usize, const B: usize> =
    Matrix<Matrix<E, B, B>, RB, CB>;

fn check_block_shape<
    const R: usize,
    const C: usize,
    const RB: usize,
    const CB: usize,
    const B: usize,
>() -> Result<()> {
    if RB * B != R || CB * B != C {
        return Err(MatrixError::BlockShapeMismatch {
            rows: R,
            cols: C,
            outer_rows: RB,
            outer_cols: CB,
            block: B,
        });
    }
    Ok(())
}

/// Copy a flat `R x C` matrix into `RB x CB` tiles of `B x B` elements.
///
/// Tile `(bi, bj)` holds flat elements `(bi*B + i, bj*B + j)`.
///
/// # Errors
/// Returns `BlockShapeMismatch` unless `R == RB * B` and `C == CB * B`.
pub fn partition<
    E: Accumulable,
    const R: usize,
    const C: usize,
    const RB: usize,
    const CB: usize,
    const B: usize,
>(
    flat: &Matrix<E, R, C>,
) -> Result<BlockMatrix<E, RB, CB, B>> {
    check_block_shape::<R, C, RB, CB, B>()?;
    let mut out = BlockMatrix::<E, RB, CB, B>::new();
    for bi in 0..RB {
        for bj in 0..CB {
            let tile = &mut out[(bi, bj)];
            for i in 0..B {
                for j in 0..B {
                    tile[(i, j)] = flat[(bi * B + i, bj * B + j)].clone();
                }
            }
        }
    }
    Ok(out)
}

/// Copy a block matrix back into the flat layout, the inverse of
/// [`partition`].
///
/// # Errors
/// Returns `BlockShapeMismatch` unless `R == RB * B` and `C == CB * B`.
pub fn flatten<
    E: Accumulable,
    const R: usize,
    const C: usize,
    const RB: usize,
    const CB: usize,
    const B: usize,
>(
    blocks: &BlockMatrix<E, RB, CB, B>,
) -> Result<Matrix<E, R, C>> {
    check_block_shape::<R, C, RB, CB, B>()?;
    let mut out = Matrix::<E, R, C>::new();
    for bi in 0..RB {
        for bj in 0..CB {
            let tile = &blocks[(bi, bj)];
            for i in 0..B {
                for j in 0..B {
                    out[(bi * B + i, bj * B + j)] = tile[(i, j)].clone();
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Deterministic non-trivial fill so tests need no RNG.
    fn sample(i: usize, j: usize) -> f64 {
        ((i * 31 + j * 17) % 97) as f64 * 0.5 - 24.0
    }

    #[test]
    fn test_partition_tile_placement() {
        let flat = Matrix::<f64, 4, 6>::from_fn(|i, j| (i * 6 + j) as f64);
        let blocks: BlockMatrix<f64, 2, 3, 2> = partition(&flat).unwrap();
        // Tile (1, 2) covers rows 2..4, cols 4..6.
        let tile = &blocks[(1, 2)];
        assert_eq!(tile.as_slice(), &[16.0, 17.0, 22.0, 23.0]);
    }

    #[test]
    fn test_partition_flatten_round_trip() {
        let flat = Matrix::<f64, 6, 6>::from_fn(sample);
        let blocks: BlockMatrix<f64, 3, 3, 2> = partition(&flat).unwrap();
        let back: Matrix<f64, 6, 6> = flatten(&blocks).unwrap();
        assert_eq!(back, flat);
    }

    #[test]
    fn test_partition_shape_mismatch() {
        let flat = Matrix::<f64, 5, 5>::new();
        let res: Result<BlockMatrix<f64, 2, 2, 2>> = partition(&flat);
        assert_eq!(
            res,
            Err(MatrixError::BlockShapeMismatch {
                rows: 5,
                cols: 5,
                outer_rows: 2,
                outer_cols: 2,
                block: 2,
            })
        );
    }

    #[test]
    fn test_flatten_shape_mismatch() {
        let blocks = BlockMatrix::<f64, 2, 2, 3>::new();
        let res: Result<Matrix<f64, 6, 7>> = flatten(&blocks);
        assert_eq!(
            res,
            Err(MatrixError::BlockShapeMismatch {
                rows: 6,
                cols: 7,
                outer_rows: 2,
                outer_cols: 2,
                block: 3,
            })
        );
    }

    #[test]
    fn test_flat_and_block_products_agree() {
        // The central property: multiplying in the block layout and
        // flattening must match the flat product within float tolerance
        // (the two loop structures sum in different orders).
        let a = Matrix::<f64, 12, 8>::from_fn(sample);
        let b = Matrix::<f64, 8, 12>::from_fn(|i, j| sample(j, i) * 1.5);

        let flat_product = &a * &b;

        let a2: BlockMatrix<f64, 3, 2, 4> = partition(&a).unwrap();
        let b2: BlockMatrix<f64, 2, 3, 4> = partition(&b).unwrap();
        let block_product: Matrix<f64, 12, 12> = flatten(&(&a2 * &b2)).unwrap();

        for i in 0..12 {
            for j in 0..12 {
                assert_relative_eq!(
                    flat_product[(i, j)],
                    block_product[(i, j)],
                    max_relative = 1e-9
                );
            }
        }
    }
}
