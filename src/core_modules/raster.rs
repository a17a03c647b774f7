// THEORY:
// The `raster` module defines the two capability traits the rest of the engine
// is written against. Several concrete types can stand in for "an image":
// the plain `SourceImage`, a borrowed `TileView`, the partitioned `TileGrid`,
// and the rearranged `PermutedGrid`. Rather than having each consumer name a
// concrete type, consumers that only need pixel reads take a `PixelSource`,
// and consumers that need to address whole tiles take a `TileSource`.
//
// `TileId::resolve_in` is the main client: it turns a stored identity back
// into pixel data against *any* tile-addressable structure.

use crate::Result;
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::tile::TileView;

/// Read access to a rectangular raster: dimensions plus pixel lookup.
pub trait PixelSource {
    /// Total height in pixels.
    fn height(&self) -> u32;
    /// Total width in pixels.
    fn width(&self) -> u32;
    /// The pixel at `(row, col)`, bounds-checked against the dimensions.
    fn pixel_at(&self, row: u32, col: u32) -> Result<Pixel>;
}

/// A raster that is additionally partitioned into a grid of tiles.
pub trait TileSource: PixelSource {
    /// Tile column count.
    fn div_x(&self) -> u32;
    /// Tile row count.
    fn div_y(&self) -> u32;
    /// A zero-copy view of the tile at grid cell `(row, col)`.
    fn tile_at(&self, row: u32, col: u32) -> Result<TileView<'_>>;
}
