// THEORY:
// The `puzzle` module is the problem-definition facade: it ties a partitioned
// image to the cost constants a solver needs. The crate does not solve
// anything itself; a solver reads the grid's current mapping and these
// costs, and answers with a move script. Everything here is immutable after
// construction; a half-built problem never escapes.

use crate::Result;
use crate::core_modules::source_image::SourceImage;
use crate::core_modules::tile_grid::TileGrid;

/// Plain-data construction parameters for a [`Puzzle`].
#[derive(Debug, Clone)]
pub struct PuzzleConfig {
    /// Tile count along the horizontal axis.
    pub div_x: u32,
    /// Tile count along the vertical axis.
    pub div_y: u32,
    /// Cost rate charged per selection.
    pub select_cost: i32,
    /// Cost rate charged per swap move.
    pub change_cost: i32,
    /// Upper bound on how many selections an answer may use.
    pub max_select_times: usize,
}

/// A complete problem definition: the partitioned image plus cost constants.
pub struct Puzzle {
    grid: TileGrid,
    change_cost: i32,
    select_cost: i32,
    max_select_times: usize,
}

impl Puzzle {
    /// Builds the problem. Fails when the image cannot be partitioned into
    /// the configured tile counts.
    pub fn new(image: SourceImage, config: &PuzzleConfig) -> Result<Self> {
        let grid = TileGrid::new(image, config.div_x, config.div_y)?;
        Ok(Self {
            grid,
            change_cost: config.change_cost,
            select_cost: config.select_cost,
            max_select_times: config.max_select_times,
        })
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Hands the grid over, e.g. to seed a `PermutedGrid`.
    pub fn into_grid(self) -> TileGrid {
        self.grid
    }

    /// Cost rate per swap move.
    pub fn change_cost(&self) -> i32 {
        self.change_cost
    }

    /// Cost rate per selection.
    pub fn select_cost(&self) -> i32 {
        self.select_cost
    }

    /// Maximum number of selections an answer may use.
    pub fn max_select_times(&self) -> usize {
        self.max_select_times
    }
}
