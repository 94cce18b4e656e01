//! Random and starter matrices for the puzzle palette.
//!
//! The palette is the tray of transformation matrices the player drags onto a
//! level. Random generation is intentionally not reproducible across games;
//! callers that need determinism (tests, replays) inject their own
//! [`Rng`].

use matmath::{Float, Matrix, row_matrix};
use rand::Rng;
use thiserror::Error;

/// Smallest cell value generated for palette matrices.
pub const PALETTE_MIN_VAL: i64 = -5;
/// Largest cell value generated for palette matrices.
pub const PALETTE_MAX_VAL: i64 = 5;

/// Error produced by random matrix generation with a malformed shape or
/// value range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot generate {rows}x{cols} matrix with values in [{min_val}, {max_val}]")]
pub struct InvalidRange {
    /// Requested row count.
    pub rows: usize,
    /// Requested column count.
    pub cols: usize,
    /// Requested lower bound (inclusive).
    pub min_val: i64,
    /// Requested upper bound (inclusive).
    pub max_val: i64,
}

/// Generates a matrix whose cells are drawn independently and uniformly from
/// the inclusive integer range `[min_val, max_val]`.
///
/// Fails with [`InvalidRange`] if either dimension is zero or
/// `min_val > max_val`.
pub fn random_matrix(
    rows: usize,
    cols: usize,
    min_val: i64,
    max_val: i64,
    rng: &mut impl Rng,
) -> Result<Matrix, InvalidRange> {
    if rows == 0 || cols == 0 || min_val > max_val {
        return Err(InvalidRange {
            rows,
            cols,
            min_val,
            max_val,
        });
    }
    let elems = std::iter::repeat_with(|| rng.random_range(min_val..=max_val) as Float)
        .take(rows * cols)
        .collect();
    Ok(Matrix::from_elems(rows, cols, elems))
}

/// Same as [`random_matrix`], seeded from the thread-local entropy source.
pub fn random_matrix_from_entropy(
    rows: usize,
    cols: usize,
    min_val: i64,
    max_val: i64,
) -> Result<Matrix, InvalidRange> {
    random_matrix(rows, cols, min_val, max_val, &mut rand::rng())
}

/// Generates `count` palette matrices of the given shape in the default
/// value range `[PALETTE_MIN_VAL, PALETTE_MAX_VAL]`.
pub fn random_palette(
    rows: usize,
    cols: usize,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Matrix>, InvalidRange> {
    (0..count)
        .map(|_| random_matrix(rows, cols, PALETTE_MIN_VAL, PALETTE_MAX_VAL, rng))
        .collect()
}

/// Returns the fixed starter matrices every palette begins with: the common
/// transformations players reach for before the random fill.
pub fn starter_matrices() -> Vec<Matrix> {
    vec![
        row_matrix![[1, 0], [0, 1]],
        row_matrix![[2, 0], [0, 2]],
        row_matrix![[0, 1], [1, 0]],
        row_matrix![[1, 2], [3, 4]],
        row_matrix![[1, 0, 0], [0, 1, 0], [0, 0, 1]],
    ]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_random_matrix_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let m = random_matrix(4, 6, -2, 2, &mut rng).expect("valid range");
        assert_eq!(m.shape(), (4, 6));
        for &cell in m.as_slice() {
            assert!((-2.0..=2.0).contains(&cell), "cell {cell} out of range");
            assert_eq!(cell.fract(), 0.0, "cell {cell} is not an integer");
        }
    }

    #[test]
    fn test_random_matrix_reproducible_with_seed() {
        let a = random_matrix(3, 3, -5, 5, &mut ChaCha8Rng::seed_from_u64(7));
        let b = random_matrix(3, 3, -5, 5, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_matrix_invalid_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            random_matrix(0, 3, -5, 5, &mut rng),
            Err(InvalidRange {
                rows: 0,
                cols: 3,
                min_val: -5,
                max_val: 5,
            }),
        );
        assert_eq!(
            random_matrix(2, 2, 5, -5, &mut rng),
            Err(InvalidRange {
                rows: 2,
                cols: 2,
                min_val: 5,
                max_val: -5,
            }),
        );
        // A single-value range is fine.
        let m = random_matrix(2, 2, 3, 3, &mut rng).expect("valid range");
        assert_eq!(m, row_matrix![[3, 3], [3, 3]]);
    }

    #[test]
    fn test_random_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let palette = random_palette(2, 2, 6, &mut rng).expect("valid range");
        assert_eq!(palette.len(), 6);
        for m in &palette {
            assert_eq!(m.shape(), (2, 2));
        }
    }

    #[test]
    fn test_starter_matrices() {
        let starters = starter_matrices();
        assert_eq!(starters[0], Matrix::ident(2));
        assert_eq!(starters[4], Matrix::ident(3));
    }
}
