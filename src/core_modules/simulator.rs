// THEORY:
// The `MoveSimulator` is the interactive face of the engine: a cursor over a
// `PermutedGrid`'s slot space plus the four-direction move rule. A move swaps
// the cursor's slot with the neighbor in the given direction and the cursor
// follows the swap: the "pick up a tile and walk it around" mechanic.
//
// Key architectural principles:
// 1.  **Preconditions before effects**: a move off the edge of the grid is
//     refused before anything mutates, so a failed move leaves both the
//     cursor and the permutation table exactly as they were.
// 2.  **Select is free**: `select` repositions the cursor unconditionally.
//     It models picking up a different tile and is independent of the move
//     state machine.
// 3.  **Rendering is pure**: both renders are functions of the current table
//     and cursor. The highlighted form works on the composed copy, tinting
//     the cursor's slot toward a fixed color, and never writes back into the
//     simulator or the grid.

use std::fmt;

use crate::core_modules::permuted_grid::PermutedGrid;
use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::core_modules::source_image::SourceImage;
use crate::{Error, Result};

/// Color the cursor's tile is tinted toward in the highlighted render.
const HIGHLIGHT_COLOR: Pixel = Pixel::new(255, 0, 0, 255);
/// Mix factor toward the highlight color.
const HIGHLIGHT_BLEND: f64 = 0.5;

/// One of the four compass moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Parses a single move token.
    pub fn from_token(token: char) -> Result<Self> {
        match token {
            'R' => Ok(Direction::Right),
            'L' => Ok(Direction::Left),
            'U' => Ok(Direction::Up),
            'D' => Ok(Direction::Down),
            other => Err(Error::UnknownCommand(other)),
        }
    }

    /// The single-character move token.
    pub fn token(&self) -> char {
        match self {
            Direction::Right => 'R',
            Direction::Left => 'L',
            Direction::Up => 'U',
            Direction::Down => 'D',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Right => "right",
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        write!(formatter, "{name}")
    }
}

/// A cursor over a `PermutedGrid` that applies directional swap moves.
pub struct MoveSimulator {
    grid: PermutedGrid,
    /// The currently selected slot, `(row, col)`.
    cursor: (u32, u32),
}

impl MoveSimulator {
    /// Starts with the cursor on slot `(0, 0)`.
    pub fn new(grid: PermutedGrid) -> Self {
        Self {
            grid,
            cursor: (0, 0),
        }
    }

    pub fn cursor(&self) -> (u32, u32) {
        self.cursor
    }

    pub fn grid(&self) -> &PermutedGrid {
        &self.grid
    }

    /// Hands the grid back, e.g. to inspect or serialize the final mapping.
    pub fn into_grid(self) -> PermutedGrid {
        self.grid
    }

    /// Repositions the cursor. Always succeeds; the next move checks its own
    /// precondition against the grid extent.
    pub fn select(&mut self, row: u32, col: u32) {
        self.cursor = (row, col);
    }

    /// `select` by flattened row-major cell index, the form move scripts use.
    pub fn select_index(&mut self, index: usize) {
        let div_x = self.grid.div_x() as usize;
        self.select((index / div_x) as u32, (index % div_x) as u32);
    }

    /// Swaps the cursor's slot with its neighbor in `direction`, then moves
    /// the cursor onto that neighbor. Refused without mutation when the
    /// neighbor does not exist.
    pub fn step(&mut self, direction: Direction) -> Result<()> {
        let (row, col) = self.cursor;
        let blocked = match direction {
            Direction::Right => col + 1 >= self.grid.div_x(),
            Direction::Left => col == 0,
            Direction::Up => row == 0,
            Direction::Down => row + 1 >= self.grid.div_y(),
        };
        if blocked {
            return Err(Error::InvalidMove {
                direction,
                row,
                col,
            });
        }
        let target = match direction {
            Direction::Right => (row, col + 1),
            Direction::Left => (row, col - 1),
            Direction::Up => (row - 1, col),
            Direction::Down => (row + 1, col),
        };
        self.grid.swap_element(self.cursor, target)?;
        self.cursor = target;
        Ok(())
    }

    /// Parses a move token and steps. An unrecognized token is reported
    /// without touching the state.
    pub fn evaluate(&mut self, token: char) -> Result<()> {
        self.step(Direction::from_token(token)?)
    }

    /// The composed image under the current arrangement.
    pub fn render(&self) -> SourceImage {
        self.grid.render()
    }

    /// The composed image with every pixel of the cursor's slot tinted
    /// toward [`HIGHLIGHT_COLOR`]. A cursor parked outside the slot space
    /// highlights nothing.
    pub fn render_highlighted(&self) -> SourceImage {
        let mut output = self.grid.render();
        let (cursor_row, cursor_col) = self.cursor;
        if cursor_row >= self.grid.div_y() || cursor_col >= self.grid.div_x() {
            return output;
        }

        let tile_height = self.grid.grid().tile_height();
        let tile_width = self.grid.grid().tile_width();
        for row in cursor_row * tile_height..(cursor_row + 1) * tile_height {
            for col in cursor_col * tile_width..(cursor_col + 1) * tile_width {
                let start = output.byte_index(row, col);
                let tinted = Pixel::from(&output.as_bytes()[start..start + CHANNELS])
                    .blend(&HIGHLIGHT_COLOR, HIGHLIGHT_BLEND);
                output.bytes_mut()[start] = tinted.red;
                output.bytes_mut()[start + 1] = tinted.green;
                output.bytes_mut()[start + 2] = tinted.blue;
                output.bytes_mut()[start + 3] = tinted.alpha;
            }
        }

        output
    }
}
