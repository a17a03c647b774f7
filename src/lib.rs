// THEORY:
// This file is the main entry point for the `tile_shuffle` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the
// public API that will be exposed to external consumers (a solver, a
// renderer, a scripted replay tool).
//
// The primary goal is to export the permutation engine (`TileGrid`,
// `PermutedGrid`, `MoveSimulator`) and its associated data structures
// (`TileId`, `MoveScript`, `Puzzle`, etc.) as the clean, high-level
// interface for the whole crate. The internal module tree (`core_modules`)
// stays reachable for callers that want the utility edges, but the types
// re-exported here are the supported surface.

pub mod core_modules;
pub mod puzzle;

pub use crate::core_modules::move_script::{MoveScript, ScriptEntry};
pub use crate::core_modules::permuted_grid::PermutedGrid;
pub use crate::core_modules::pixel::pixel::Pixel;
pub use crate::core_modules::raster::{PixelSource, TileSource};
pub use crate::core_modules::simulator::{Direction, MoveSimulator};
pub use crate::core_modules::source_image::SourceImage;
pub use crate::core_modules::tile::TileView;
pub use crate::core_modules::tile_grid::{MAX_DIVISIONS, TileGrid};
pub use crate::core_modules::tile_id::TileId;
pub use crate::puzzle::{Puzzle, PuzzleConfig};

/// Errors reported by the puzzle engine.
///
/// Construction-time problems are fatal and leave nothing half-built; the
/// move errors are recoverable and guaranteed to leave the grid and cursor
/// exactly as they were.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A tile, slot, or pixel coordinate outside the addressed extent.
    #[error("coordinate ({row}, {col}) outside extent {rows}x{cols}")]
    OutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },

    /// A simulator move whose target neighbor does not exist.
    #[error("cannot move {direction} from slot ({row}, {col})")]
    InvalidMove {
        direction: Direction,
        row: u32,
        col: u32,
    },

    /// A direction token outside the `R`/`L`/`U`/`D` alphabet.
    #[error("unknown direction token '{0}'")]
    UnknownCommand(char),

    /// A problem definition that cannot be built: indivisible dimensions,
    /// unusable tile counts, a mis-sized pixel buffer, or a slot table that
    /// is not a bijection.
    #[error("malformed problem: {0}")]
    MalformedProblem(String),

    /// Move-script text that does not match the interchange format.
    #[error("malformed move script at line {line}: {reason}")]
    MalformedScript { line: usize, reason: String },
}

/// Result type for puzzle engine operations.
pub type Result<T> = std::result::Result<T, Error>;
