//! Benchmark driver comparing two memory layouts for matrix multiplication:
//! a flat row-major matrix of scalars versus a matrix of square tiles.
//!
//! Both runs perform the same number of scalar multiply-adds; only the
//! element-access pattern differs. An optional first CLI argument seeds the
//! RNG for reproducible fills.

use std::time::Instant;

use bm_matrix::{flatten, partition, BlockMatrix, Matrix};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Outer dimension of the block layout.
const OUTER: usize = 100;
/// Tile side length.
const BLOCK: usize = 10;
/// Side length of the flat matrices, OUTER * BLOCK.
const SIDE: usize = 1000;

const FILL_LOW: f64 = -10000.0;
const FILL_HIGH: f64 = 10000.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = match std::env::args().nth(1).and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let range = Uniform::new(FILL_LOW, FILL_HIGH);

    cross_check_layouts(&mut rng, range)?;

    let mut a = Matrix::<f64, SIDE, SIDE>::new();
    let mut b = Matrix::<f64, SIDE, SIDE>::new();
    fill(&mut a, &mut rng, range);
    fill(&mut b, &mut rng, range);

    let start = Instant::now();
    let _c = &a * &b;
    println!(
        "Time to multiply {} x {} matrices: {}ms",
        SIDE,
        SIDE,
        start.elapsed().as_millis()
    );

    let mut a2 = BlockMatrix::<f64, OUTER, OUTER, BLOCK>::new();
    let mut b2 = BlockMatrix::<f64, OUTER, OUTER, BLOCK>::new();
    fill_blocks(&mut a2, &mut rng, range);
    fill_blocks(&mut b2, &mut rng, range);

    let start = Instant::now();
    let _c2 = &a2 * &b2;
    println!(
        "Time to multiply {} x {} matrices in {} x {} tiles: {}ms",
        SIDE,
        SIDE,
        BLOCK,
        BLOCK,
        start.elapsed().as_millis()
    );

    Ok(())
}

/// Fill every element with a uniform sample from `range`.
fn fill<const R: usize, const C: usize>(
    m: &mut Matrix<f64, R, C>,
    rng: &mut StdRng,
    range: Uniform<f64>,
) {
    for elem in m.as_mut_slice() {
        *elem = range.sample(rng);
    }
}

/// Fill every tile of a block matrix with uniform samples.
fn fill_blocks<const RB: usize, const CB: usize, const B: usize>(
    m: &mut BlockMatrix<f64, RB, CB, B>,
    rng: &mut StdRng,
    range: Uniform<f64>,
) {
    for tile in m.as_mut_slice() {
        fill(tile, rng, range);
    }
}

/// Multiply a small random pair in both layouts and confirm the results
/// agree within float tolerance before spending time on the big runs.
fn cross_check_layouts(
    rng: &mut StdRng,
    range: Uniform<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    const TOLERANCE: f64 = 1e-9;

    let mut a = Matrix::<f64, 12, 12>::new();
    let mut b = Matrix::<f64, 12, 12>::new();
    fill(&mut a, rng, range);
    fill(&mut b, rng, range);

    let flat_product = &a * &b;

    let a2: BlockMatrix<f64, 3, 3, 4> = partition(&a)?;
    let b2: BlockMatrix<f64, 3, 3, 4> = partition(&b)?;
    let block_product: Matrix<f64, 12, 12> = flatten(&(&a2 * &b2))?;

    let worst = max_relative_error(flat_product.as_slice(), block_product.as_slice());
    if worst > TOLERANCE {
        return Err(format!(
            "layout cross-check failed: max relative error {:e} exceeds {:e}",
            worst, TOLERANCE
        )
        .into());
    }
    println!("Layout cross-check passed (max relative error {:e})", worst);
    Ok(())
}

/// Largest elementwise relative error between two equally long slices,
/// with absolute comparison below magnitude 1.0.
fn max_relative_error(xs: &[f64], ys: &[f64]) -> f64 {
    let mut worst = 0.0f64;
    for (x, y) in xs.iter().zip(ys) {
        let scale = x.abs().max(y.abs()).max(1.0);
        worst = worst.max((x - y).abs() / scale);
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_relative_error_identical() {
        let xs = [1.0, -2.5, 3000.0];
        assert_eq!(max_relative_error(&xs, &xs), 0.0);
    }

    #[test]
    fn test_max_relative_error_scales_by_magnitude() {
        // 1e-6 absolute difference at magnitude 1e3 is 1e-9 relative.
        let xs = [1000.0];
        let ys = [1000.000001];
        let err = max_relative_error(&xs, &ys);
        assert!(err > 0.9e-9 && err < 1.1e-9);
    }

    #[test]
    fn test_max_relative_error_small_values_compared_absolutely() {
        let err = max_relative_error(&[0.0], &[1e-12]);
        assert!(err <= 1e-12);
    }
}
