//! Catalog of puzzle levels.
//!
//! The catalog is ordered by difficulty: 2x2 single transformations, then
//! compound 2x2 transformations, then 3x3 matrices, then the complex finale
//! levels. It is constructed once per process and read-only afterwards, so
//! it can be shared freely across request threads.

use std::sync::Arc;

use matmath::row_matrix;
use thiserror::Error;

use crate::level::Level;

/// Error produced by a catalog lookup with an out-of-range index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no level with index {index} (catalog has {count} levels)")]
pub struct LevelNotFound {
    /// Requested level index.
    pub index: usize,
    /// Number of levels in the catalog.
    pub count: usize,
}

/// Ordered, read-only collection of puzzle levels.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    levels: Vec<Arc<Level>>,
}
impl Catalog {
    /// Constructs a catalog from an ordered list of levels.
    ///
    /// Every level must satisfy `input * solution ≈ target`; a level that
    /// does not is an authoring bug, which panics in debug builds and is
    /// logged in release builds.
    pub fn new(levels: impl IntoIterator<Item = Level>) -> Self {
        let levels: Vec<Arc<Level>> = levels.into_iter().map(Arc::new).collect();
        for (index, level) in levels.iter().enumerate() {
            if !level.is_consistent() {
                debug_panic!(
                    "level {index} ({:?}) does not satisfy input * solution = target",
                    level.name,
                );
            }
        }
        log::debug!("catalog loaded with {} levels", levels.len());
        Self { levels }
    }

    /// Returns the built-in catalog, constructed on first use.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN_CATALOG
    }

    /// Returns the level with the given index.
    pub fn get_level(&self, index: usize) -> Result<Arc<Level>, LevelNotFound> {
        log::trace!("requesting level {index}");
        self.levels.get(index).map(Arc::clone).ok_or(LevelNotFound {
            index,
            count: self.levels.len(),
        })
    }

    /// Returns the number of levels in the catalog.
    pub fn len(&self) -> usize {
        self.levels.len()
    }
    /// Returns whether the catalog has no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
    /// Returns the levels in difficulty order.
    pub fn levels(&self) -> &[Arc<Level>] {
        &self.levels
    }
}

lazy_static! {
    static ref BUILTIN_CATALOG: Catalog = Catalog::new(builtin_levels());
}

/// The eight built-in levels.
fn builtin_levels() -> Vec<Level> {
    vec![
        // Levels 1-2: single 2x2 transformations
        Level::new(
            "Level 1: No Transformation",
            row_matrix![[1, 2], [3, 4]],
            row_matrix![[1, 2], [3, 4]],
            "What matrix when multiplied gives you the same matrix back?",
            row_matrix![[1, 0], [0, 1]],
        ),
        Level::new(
            "Level 2: Double Trouble",
            row_matrix![[1, 2], [3, 4]],
            row_matrix![[2, 4], [6, 8]],
            "Try multiplying each element by 2",
            row_matrix![[2, 0], [0, 2]],
        ),
        // Levels 3-4: compound 2x2 transformations
        Level::new(
            "Level 3: Swap and Stretch",
            row_matrix![[1, 2], [3, 4]],
            row_matrix![[4, 2], [8, 6]],
            "Swap the columns first, then double them. One matrix can do both at once.",
            row_matrix![[0, 2], [2, 0]],
        ),
        Level::new(
            "Level 4: Shear Madness",
            row_matrix![[1, 2], [3, 4]],
            row_matrix![[2, 6], [6, 14]],
            "Double everything, then shear the second column by the first.",
            row_matrix![[2, 2], [0, 2]],
        ),
        // Levels 5-6: 3x3 matrices
        Level::new(
            "Level 5: Third Dimension",
            row_matrix![[1, 0, 2], [0, 1, 1], [2, 1, 0]],
            row_matrix![[2, 0, 4], [0, 2, 2], [4, 2, 0]],
            "Scaling works the same in any dimension: stretch all three axes at once.",
            row_matrix![[2, 0, 0], [0, 2, 0], [0, 0, 2]],
        ),
        Level::new(
            "Level 6: Musical Columns",
            row_matrix![[1, 2, 3], [4, 5, 6], [7, 8, 9]],
            row_matrix![[3, 1, 2], [6, 4, 5], [9, 7, 8]],
            "Each input column should end up one slot to the right, wrapping around.",
            row_matrix![[0, 1, 0], [0, 0, 1], [1, 0, 0]],
        ),
        // Levels 7-8: complex challenges
        Level::new(
            "Level 7: Fold It Flat",
            row_matrix![[1, 2, 3], [4, 5, 6]],
            row_matrix![[4, 5], [10, 11]],
            "A 3x2 transformation folds three columns into two; let the last input \
             column feed both outputs.",
            row_matrix![[1, 0], [0, 1], [1, 1]],
        ),
        Level::new(
            "Level 8: Grand Finale",
            row_matrix![[1, 2], [3, 4]],
            row_matrix![[4, 5], [10, 9]],
            "Mix the columns: negative entries subtract what positive ones add.",
            row_matrix![[2, -1], [1, 3]],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use matmath::EPSILON;

    use super::*;

    #[test]
    fn test_builtin_catalog_consistency() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 8);
        for level in catalog.levels() {
            let product = level
                .input
                .multiply(&level.solution)
                .expect("level shapes must be compatible");
            assert!(
                product.approx_eq(&level.target, EPSILON),
                "{} is inconsistent:\n{product}",
                level.name,
            );
        }
    }

    #[test]
    fn test_builtin_catalog_progression() {
        let catalog = Catalog::builtin();
        let shapes: Vec<_> = catalog
            .levels()
            .iter()
            .map(|level| level.input.shape())
            .collect();
        // 2x2 levels first, then 3x3, then the complex finale.
        assert_eq!(&shapes[..4], &[(2, 2); 4][..]);
        assert_eq!(&shapes[4..6], &[(3, 3); 2][..]);
    }

    #[test]
    fn test_builtin_levels_solvable_through_grading() {
        let catalog = Catalog::builtin();
        for level in catalog.levels() {
            assert_eq!(
                level.check_attempt(std::slice::from_ref(&level.solution)),
                Ok(true),
                "{} rejects its own solution",
                level.name,
            );
            if level.input.is_square(2) {
                let derived = level.derived_solution().expect("2x2 inputs are invertible");
                assert!(derived.approx_eq(&level.solution, EPSILON));
            }
        }
    }

    #[test]
    fn test_get_level() {
        let catalog = Catalog::builtin();
        let level = catalog.get_level(0).expect("level 0 exists");
        assert_eq!(level.name, "Level 1: No Transformation");
        assert_eq!(
            catalog.get_level(999),
            Err(LevelNotFound {
                index: 999,
                count: 8,
            }),
        );
    }
}
