//! Puzzle engine backend for Matrix Multiplier Mayhem.
//!
//! A level hands the player an input matrix and a target matrix; the player
//! assembles transformation matrices so that multiplying the input by them,
//! left to right, lands on the target. This crate owns the level catalog,
//! attempt grading, and palette generation. It is stateless apart from the
//! read-only built-in catalog: per-player progress belongs to the embedding
//! web layer, which also owns all user-facing text.

#[macro_use]
extern crate lazy_static;

macro_rules! debug_panic {
    ($($tok:tt)*) => {
        match cfg!(debug_assertions) {
            true => panic!($($tok)*),
            false => log::error!($($tok)*),
        }
    };
}

pub mod catalog;
pub mod level;
pub mod palette;

/// Re-export of `matmath`.
pub use matmath;
pub use prelude::*;

/// Prelude of common imports.
pub mod prelude {
    pub use matmath::prelude::*;

    pub use crate::catalog::{Catalog, LevelNotFound};
    pub use crate::level::Level;
    pub use crate::palette::{InvalidRange, PALETTE_MAX_VAL, PALETTE_MIN_VAL};
}

/// Version string such as `matpuzzle_core v1.2.3`.
pub const ENGINE_VERSION_STRING: &str =
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));
