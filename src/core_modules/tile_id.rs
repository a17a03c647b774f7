// THEORY:
// A `TileId` names a tile by its *original* grid cell, independent of where
// the tile currently sits after any number of swaps. It is the payload that
// moves through the permutation table: slots trade `TileId`s, never pixels.
//
// The identity packs one byte per axis into sixteen bits. Ordering and
// hashing both go through the packed value, so the order is row-major and
// equal identities always hash alike. The one-byte fields mean the type
// simply cannot name a cell beyond 256 per axis; `TileGrid` enforces that
// bound at construction so an in-range cell always fits.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::Result;
use crate::core_modules::raster::TileSource;
use crate::core_modules::tile::TileView;

/// Identity of a tile's original grid cell, packed row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileId {
    row: u8,
    col: u8,
}

impl TileId {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Builds an identity from a flattened row-major cell index.
    /// The caller guarantees the index lies inside a `div_x`-wide grid that
    /// fits the one-byte-per-axis bound.
    pub fn from_cell_index(index: usize, div_x: u32) -> Self {
        let row = index / div_x as usize;
        let col = index % div_x as usize;
        debug_assert!(row < 256 && col < 256, "cell index {index} outside packed range");
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    /// Original grid row.
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Original grid column.
    pub fn col(&self) -> u8 {
        self.col
    }

    /// The packed sixteen-bit form: row in the high byte, column in the low
    /// byte. Ordering and hashing are defined over this value.
    pub fn packed(&self) -> u16 {
        ((self.row as u16) << 8) | self.col as u16
    }

    /// Turns this identity back into pixel data: the tile at this id's
    /// coordinates inside any tile-addressable structure.
    pub fn resolve_in<'a, S: TileSource>(&self, source: &'a S) -> Result<TileView<'a>> {
        source.tile_at(self.row as u32, self.col as u32)
    }
}

impl PartialOrd for TileId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TileId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.packed().cmp(&other.packed())
    }
}

impl Hash for TileId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.packed().hash(state);
    }
}
