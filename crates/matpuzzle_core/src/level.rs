//! Puzzle levels and attempt grading.

use itertools::chain;
use matmath::{EPSILON, Float, Matrix, MatrixError, multiply_all};
use serde::Serialize;

/// One puzzle: an input matrix, a target matrix, a hint, and the canonical
/// solution.
///
/// Every level must satisfy `input * solution ≈ target`; see
/// [`Level::is_consistent`]. Serialization is outbound-only, for the
/// level-loading endpoint of the embedding web layer.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Level {
    /// Display name, e.g. `Level 2: Double Trouble`.
    pub name: String,
    /// Matrix the player starts from.
    pub input: Matrix,
    /// Matrix the player must reach.
    pub target: Matrix,
    /// Hint text shown on request.
    pub hint: String,
    /// Canonical transformation satisfying `input * solution ≈ target`.
    ///
    /// Never ships to the client.
    #[serde(skip)]
    pub solution: Matrix,
}
impl Level {
    /// Constructs a new level.
    pub fn new(
        name: impl Into<String>,
        input: Matrix,
        target: Matrix,
        hint: impl Into<String>,
        solution: Matrix,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            target,
            hint: hint.into(),
            solution,
        }
    }

    /// Returns whether the level's authored data satisfies
    /// `input * solution ≈ target`.
    ///
    /// This also covers the shape invariants: a shape mismatch on either side
    /// of the equation makes the level inconsistent.
    pub fn is_consistent(&self) -> bool {
        match self.input.multiply(&self.solution) {
            Ok(product) => product.approx_eq(&self.target, EPSILON),
            Err(_) => false,
        }
    }

    /// Grades a player attempt with the default tolerance ([`EPSILON`]).
    ///
    /// The attempt is an ordered sequence of transformation matrices; the
    /// level input is multiplied by each of them left to right and the result
    /// is compared to the target. `Ok(false)` means a well-formed but wrong
    /// answer; an ill-formed attempt (empty, or with an incompatible
    /// adjacent pair) is an error for the caller to surface.
    pub fn check_attempt(&self, attempt: &[Matrix]) -> Result<bool, MatrixError> {
        self.check_attempt_with(attempt, EPSILON)
    }

    /// Grades a player attempt with a custom tolerance.
    pub fn check_attempt_with(
        &self,
        attempt: &[Matrix],
        tolerance: Float,
    ) -> Result<bool, MatrixError> {
        if attempt.is_empty() {
            return Err(MatrixError::EmptyOperandSequence);
        }
        let result = multiply_all(chain([&self.input], attempt))?;
        Ok(result.approx_eq(&self.target, tolerance))
    }

    /// Computes a single transformation matrix solving the level, as
    /// `input⁻¹ * target`.
    ///
    /// This is a hint helper for levels whose input is an invertible 2x2
    /// matrix; returns `None` for every other level.
    pub fn derived_solution(&self) -> Option<Matrix> {
        let inverse = self.input.inverse_2x2().ok()?;
        inverse.multiply(&self.target).ok()
    }
}

#[cfg(test)]
mod tests {
    use matmath::{assert_approx_eq, row_matrix};

    use super::*;

    fn double_trouble() -> Level {
        Level::new(
            "Level 2: Double Trouble",
            row_matrix![[1, 2], [3, 4]],
            row_matrix![[2, 4], [6, 8]],
            "Try multiplying each element by 2",
            row_matrix![[2, 0], [0, 2]],
        )
    }

    #[test]
    fn test_check_attempt() {
        let level = double_trouble();
        assert_eq!(
            level.check_attempt(&[row_matrix![[2, 0], [0, 2]]]),
            Ok(true),
        );
        assert_eq!(level.check_attempt(&[Matrix::ident(2)]), Ok(false));
    }

    #[test]
    fn test_check_attempt_multi_step() {
        let level = double_trouble();
        // Two swaps cancel; the doubling is all that remains.
        let swap = row_matrix![[0, 1], [1, 0]];
        let attempt = [swap.clone(), row_matrix![[2, 0], [0, 2]], swap];
        assert_eq!(level.check_attempt(&attempt), Ok(true));
    }

    #[test]
    fn test_check_attempt_ill_formed() {
        let level = double_trouble();
        assert_eq!(
            level.check_attempt(&[]),
            Err(MatrixError::EmptyOperandSequence),
        );
        assert!(matches!(
            level.check_attempt(&[row_matrix![[1], [2], [3]]]),
            Err(MatrixError::DimensionMismatch { .. }),
        ));
    }

    #[test]
    fn test_inconsistent_level() {
        let mut level = double_trouble();
        level.target = row_matrix![[0, 0], [0, 0]];
        assert!(!level.is_consistent());
        level.target = row_matrix![[2, 4, 0], [6, 8, 0]];
        assert!(!level.is_consistent());
    }

    #[test]
    fn test_derived_solution() {
        let level = double_trouble();
        assert_approx_eq!(
            level.derived_solution().expect("2x2 invertible input"),
            level.solution.clone(),
        );

        // Not available for levels with a rectangular input.
        let wide = Level::new(
            "wide",
            row_matrix![[1, 2, 3], [4, 5, 6]],
            row_matrix![[4, 5], [10, 11]],
            "",
            row_matrix![[1, 0], [0, 1], [1, 1]],
        );
        assert!(wide.is_consistent());
        assert_eq!(wide.derived_solution(), None);
    }
}
