// THEORY:
// The `PermutedGrid` is the central structure of the puzzle engine. It owns a
// `TileGrid` plus a row-major slot → `TileId` table describing which original
// tile currently sits in each slot. Rearranging the image is pure metadata:
// a swap exchanges two sixteen-bit identities, never pixels. Pixels move only
// when the composed image is rendered.
//
// Key architectural principles:
// 1.  **Bijection invariant**: the table is always a bijection onto the full
//     tile set of the grid: validated when a caller supplies an arrangement,
//     guaranteed by construction for the identity and shuffled forms, and
//     preserved by `swap_element` (a swap cannot introduce duplicates).
//     Failed operations are checked before any mutation, so the table is
//     never left half-updated.
// 2.  **Two ways to read**: `tile_at`/`pixel_at` resolve through the table
//     without copying; `render()` produces an independent composed image by
//     bulk-copying every slot's resolved rectangle.
// 3.  **Single serialization point**: all mutation goes through
//     `swap_element`, which is what makes the structure easy to reason about
//     for a host that wraps it in a mutex or keeps it single-owner.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::core_modules::raster::{PixelSource, TileSource};
use crate::core_modules::source_image::SourceImage;
use crate::core_modules::tile::TileView;
use crate::core_modules::tile_grid::TileGrid;
use crate::core_modules::tile_id::TileId;
use crate::{Error, Result};

/// A `TileGrid` plus the current slot → `TileId` arrangement.
#[derive(Debug, Clone)]
pub struct PermutedGrid {
    grid: TileGrid,
    /// Row-major, one entry per slot; always a bijection over the tile set.
    mapping: Vec<TileId>,
}

impl PermutedGrid {
    /// Every tile in its original slot.
    pub fn identity(grid: TileGrid) -> Self {
        let div_x = grid.div_x();
        let cells = (grid.div_x() * grid.div_y()) as usize;
        let mapping = (0..cells)
            .map(|index| TileId::from_cell_index(index, div_x))
            .collect();
        Self { grid, mapping }
    }

    /// A caller-supplied arrangement, one row of `TileId`s per slot row.
    /// The shape must match the grid and the ids must form a bijection over
    /// its tile set.
    pub fn with_mapping(grid: TileGrid, rows: Vec<Vec<TileId>>) -> Result<Self> {
        if rows.len() != grid.div_y() as usize {
            return Err(Error::MalformedProblem(format!(
                "mapping has {} rows, grid has {}",
                rows.len(),
                grid.div_y()
            )));
        }
        let mut mapping = Vec::with_capacity((grid.div_x() * grid.div_y()) as usize);
        let mut seen = HashSet::with_capacity(mapping.capacity());
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != grid.div_x() as usize {
                return Err(Error::MalformedProblem(format!(
                    "mapping row {} has {} entries, grid has {} columns",
                    row_index,
                    row.len(),
                    grid.div_x()
                )));
            }
            for id in row {
                if id.row() as u32 >= grid.div_y() || id.col() as u32 >= grid.div_x() {
                    return Err(Error::MalformedProblem(format!(
                        "tile id ({}, {}) outside a {}x{} grid",
                        id.row(),
                        id.col(),
                        grid.div_y(),
                        grid.div_x()
                    )));
                }
                if !seen.insert(id) {
                    return Err(Error::MalformedProblem(format!(
                        "tile id ({}, {}) appears more than once",
                        id.row(),
                        id.col()
                    )));
                }
                mapping.push(id);
            }
        }
        // full count + no duplicates + every id in range = bijection
        Ok(Self { grid, mapping })
    }

    /// A uniformly shuffled arrangement. Shuffling a complete identity table
    /// keeps it a bijection.
    pub fn shuffled<R: Rng>(grid: TileGrid, rng: &mut R) -> Self {
        let mut permuted = Self::identity(grid);
        permuted.mapping.shuffle(rng);
        permuted
    }

    pub fn div_x(&self) -> u32 {
        self.grid.div_x()
    }

    pub fn div_y(&self) -> u32 {
        self.grid.div_y()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// The underlying grid (original tile order).
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Read-only row-major snapshot of the slot → `TileId` table.
    pub fn current_mapping(&self) -> &[TileId] {
        &self.mapping
    }

    fn slot_index(&self, row: u32, col: u32) -> Result<usize> {
        if row >= self.div_y() || col >= self.div_x() {
            return Err(Error::OutOfBounds {
                row,
                col,
                rows: self.div_y(),
                cols: self.div_x(),
            });
        }
        Ok((row * self.div_x() + col) as usize)
    }

    /// The tile currently sitting in slot `(slot_row, slot_col)`: the stored
    /// identity resolved back through the owning grid to its original pixel
    /// rectangle.
    pub fn tile_at(&self, slot_row: u32, slot_col: u32) -> Result<TileView<'_>> {
        let index = self.slot_index(slot_row, slot_col)?;
        self.mapping[index].resolve_in(&self.grid)
    }

    /// Exchanges the identities held by two slots. Both slots are checked
    /// before anything moves, so a failed swap mutates nothing.
    pub fn swap_element(&mut self, slot_a: (u32, u32), slot_b: (u32, u32)) -> Result<()> {
        let index_a = self.slot_index(slot_a.0, slot_a.1)?;
        let index_b = self.slot_index(slot_b.0, slot_b.1)?;
        self.mapping.swap(index_a, index_b);
        Ok(())
    }

    /// Composed read-through without copying: locates the slot under the
    /// pixel, resolves its identity, and reads the backing image at the
    /// tile's original rectangle.
    pub fn pixel_at(&self, row: u32, col: u32) -> Result<Pixel> {
        if row >= self.height() || col >= self.width() {
            return Err(Error::OutOfBounds {
                row,
                col,
                rows: self.height(),
                cols: self.width(),
            });
        }
        let tile_height = self.grid.tile_height();
        let tile_width = self.grid.tile_width();
        let index = (row / tile_height * self.div_x() + col / tile_width) as usize;
        let id = self.mapping[index];
        self.grid.pixel_at(
            id.row() as u32 * tile_height + row % tile_height,
            id.col() as u32 * tile_width + col % tile_width,
        )
    }

    /// Renders the full composed image: clones the backing pixels, then
    /// copies every slot's resolved tile into the slot's rectangle. The
    /// result never aliases the original buffer.
    pub fn render(&self) -> SourceImage {
        let mut output = self.grid.image().clone();
        let source = self.grid.image();
        let tile_height = self.grid.tile_height();
        let tile_width = self.grid.tile_width();
        let line_bytes = tile_width as usize * CHANNELS;

        for slot_row in 0..self.div_y() {
            for slot_col in 0..self.div_x() {
                let id = self.mapping[(slot_row * self.div_x() + slot_col) as usize];
                if (id.row() as u32, id.col() as u32) == (slot_row, slot_col) {
                    // already in place from the clone
                    continue;
                }
                for line in 0..tile_height {
                    let src = source
                        .byte_index(id.row() as u32 * tile_height + line, id.col() as u32 * tile_width);
                    let dst =
                        output.byte_index(slot_row * tile_height + line, slot_col * tile_width);
                    output.bytes_mut()[dst..dst + line_bytes]
                        .copy_from_slice(&source.as_bytes()[src..src + line_bytes]);
                }
            }
        }

        output
    }
}

impl PixelSource for PermutedGrid {
    fn height(&self) -> u32 {
        PermutedGrid::height(self)
    }

    fn width(&self) -> u32 {
        PermutedGrid::width(self)
    }

    fn pixel_at(&self, row: u32, col: u32) -> Result<Pixel> {
        PermutedGrid::pixel_at(self, row, col)
    }
}

impl TileSource for PermutedGrid {
    fn div_x(&self) -> u32 {
        PermutedGrid::div_x(self)
    }

    fn div_y(&self) -> u32 {
        PermutedGrid::div_y(self)
    }

    fn tile_at(&self, row: u32, col: u32) -> Result<TileView<'_>> {
        PermutedGrid::tile_at(self, row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Builds a grid whose every tile is painted a solid color encoding its
    /// original cell: red = tile row, green = tile column.
    fn coded_grid(div_x: u32, div_y: u32, tile_width: u32, tile_height: u32) -> TileGrid {
        let width = div_x * tile_width;
        let height = div_y * tile_height;
        let mut buffer = Vec::with_capacity((width * height) as usize * CHANNELS);
        for row in 0..height {
            for col in 0..width {
                let tile_row = (row / tile_height) as u8;
                let tile_col = (col / tile_width) as u8;
                buffer.extend_from_slice(&[tile_row, tile_col, 0, 255]);
            }
        }
        let image = SourceImage::from_raw(width, height, buffer).expect("buffer sized to match");
        TileGrid::new(image, div_x, div_y).expect("dimensions divide evenly")
    }

    fn mapping_at(permuted: &PermutedGrid, row: u32, col: u32) -> TileId {
        permuted.current_mapping()[(row * permuted.div_x() + col) as usize]
    }

    #[test]
    fn identity_mapping_is_in_cell_order() {
        let permuted = PermutedGrid::identity(coded_grid(3, 2, 2, 2));
        let expected = [
            TileId::new(0, 0),
            TileId::new(0, 1),
            TileId::new(0, 2),
            TileId::new(1, 0),
            TileId::new(1, 1),
            TileId::new(1, 2),
        ];
        assert_eq!(permuted.current_mapping(), &expected);
    }

    #[test]
    fn corner_swap_on_a_2x2_grid() {
        let mut permuted = PermutedGrid::identity(coded_grid(2, 2, 2, 2));
        permuted.swap_element((0, 0), (1, 1)).unwrap();

        let expected = [
            TileId::new(1, 1),
            TileId::new(0, 1),
            TileId::new(1, 0),
            TileId::new(0, 0),
        ];
        assert_eq!(permuted.current_mapping(), &expected);
    }

    #[test]
    fn double_swap_restores_the_mapping() {
        let mut permuted = PermutedGrid::identity(coded_grid(3, 3, 2, 2));
        let before = permuted.current_mapping().to_vec();

        permuted.swap_element((0, 2), (2, 0)).unwrap();
        assert_ne!(permuted.current_mapping(), &before[..]);

        permuted.swap_element((0, 2), (2, 0)).unwrap();
        assert_eq!(permuted.current_mapping(), &before[..]);
    }

    #[test]
    fn swap_sequences_preserve_the_bijection() {
        let mut permuted = PermutedGrid::identity(coded_grid(4, 4, 2, 2));
        let original: HashSet<TileId> = permuted.current_mapping().iter().copied().collect();
        let mut rng = StdRng::seed_from_u64(17);

        let mut applied = Vec::new();
        for _ in 0..200 {
            let a = (rng.gen_range(0..4), rng.gen_range(0..4));
            let b = (rng.gen_range(0..4), rng.gen_range(0..4));
            permuted.swap_element(a, b).unwrap();
            applied.push((a, b));

            let current: HashSet<TileId> = permuted.current_mapping().iter().copied().collect();
            assert_eq!(current, original);
        }

        // replaying the swaps in reverse restores the identity arrangement
        for (a, b) in applied.into_iter().rev() {
            permuted.swap_element(a, b).unwrap();
        }
        let identity = PermutedGrid::identity(coded_grid(4, 4, 2, 2));
        assert_eq!(permuted.current_mapping(), identity.current_mapping());
    }

    #[test]
    fn failed_swap_is_a_no_op() {
        let mut permuted = PermutedGrid::identity(coded_grid(2, 2, 2, 2));
        let before = permuted.current_mapping().to_vec();

        let result = permuted.swap_element((0, 0), (5, 5));
        assert!(matches!(result, Err(Error::OutOfBounds { .. })));
        assert_eq!(permuted.current_mapping(), &before[..]);
    }

    #[test]
    fn caller_mapping_is_validated() {
        let duplicate = vec![
            vec![TileId::new(0, 0), TileId::new(0, 0)],
            vec![TileId::new(1, 0), TileId::new(1, 1)],
        ];
        let result = PermutedGrid::with_mapping(coded_grid(2, 2, 2, 2), duplicate);
        assert!(matches!(result, Err(Error::MalformedProblem(_))));

        let short_row = vec![vec![TileId::new(0, 0)]];
        let result = PermutedGrid::with_mapping(coded_grid(2, 2, 2, 2), short_row);
        assert!(matches!(result, Err(Error::MalformedProblem(_))));

        let out_of_grid = vec![
            vec![TileId::new(0, 0), TileId::new(0, 1)],
            vec![TileId::new(1, 0), TileId::new(7, 7)],
        ];
        let result = PermutedGrid::with_mapping(coded_grid(2, 2, 2, 2), out_of_grid);
        assert!(matches!(result, Err(Error::MalformedProblem(_))));
    }

    #[test]
    fn shuffled_mapping_stays_a_bijection() {
        let mut rng = StdRng::seed_from_u64(99);
        for (div_x, div_y) in [(2, 3), (5, 4), (16, 16)] {
            let permuted = PermutedGrid::shuffled(coded_grid(div_x, div_y, 1, 1), &mut rng);
            let unique: HashSet<TileId> = permuted.current_mapping().iter().copied().collect();
            assert_eq!(unique.len(), (div_x * div_y) as usize);
        }
    }

    #[test]
    fn tile_at_resolves_through_the_table() {
        let mut permuted = PermutedGrid::identity(coded_grid(2, 2, 2, 2));
        permuted.swap_element((0, 0), (1, 1)).unwrap();

        // slot (0, 0) now shows the tile originally at (1, 1)
        let tile = permuted.tile_at(0, 0).unwrap();
        assert_eq!(tile.pixel_at(0, 0).unwrap(), Pixel::new(1, 1, 0, 255));

        // resolving the identity directly against the base grid still yields
        // the original cell's pixels
        let id = mapping_at(&permuted, 0, 0);
        let original = id.resolve_in(permuted.grid()).unwrap();
        assert_eq!(original.pixel_at(0, 0).unwrap(), Pixel::new(1, 1, 0, 255));
    }

    #[test]
    fn render_moves_pixels_without_aliasing() {
        let mut permuted = PermutedGrid::identity(coded_grid(2, 2, 2, 2));
        permuted.swap_element((0, 0), (1, 1)).unwrap();

        let composed = permuted.render();

        // destination slot (0, 0) now carries tile (1, 1)'s pixels
        assert_eq!(composed.pixel_at(0, 0).unwrap(), Pixel::new(1, 1, 0, 255));
        assert_eq!(composed.pixel_at(2, 2).unwrap(), Pixel::new(0, 0, 0, 255));
        // untouched slots keep their own pixels
        assert_eq!(composed.pixel_at(0, 2).unwrap(), Pixel::new(0, 1, 0, 255));

        // the backing image is unchanged: render copies, never aliases
        assert_eq!(
            permuted.grid().image().pixel_at(0, 0).unwrap(),
            Pixel::new(0, 0, 0, 255)
        );
    }

    #[test]
    fn pixel_read_through_matches_render() {
        let mut rng = StdRng::seed_from_u64(5);
        let permuted = PermutedGrid::shuffled(coded_grid(3, 2, 2, 3), &mut rng);
        let composed = permuted.render();

        for row in 0..permuted.height() {
            for col in 0..permuted.width() {
                assert_eq!(
                    permuted.pixel_at(row, col).unwrap(),
                    composed.pixel_at(row, col).unwrap()
                );
            }
        }
    }
}
