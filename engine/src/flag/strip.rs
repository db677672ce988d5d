//! Row-major to column-major tile transfer.
//!
//! Image assets are stored row-major: tile `(col, row)` is found through map
//! cell `row * width + col`. The ripple needs each image column as one
//! contiguous run of tiles so that a column can be moved up or down by whole
//! pixel rows with a single copy:
//!
//! ```text
//!  map (3x3)          strip for column 1
//! ┌───┬───┬───┐       ┌───┐
//! │ a │ b │ c │       │ b │
//! ├───┼───┼───┤       ├───┤
//! │ d │ e │ f │  ──►  │ e │
//! ├───┼───┼───┤       ├───┤
//! │ g │ h │ i │       │ h │
//! └───┴───┴───┘       └───┘
//! ```

use crate::hardware::map_cell::MapCell;
use crate::hardware::tiles::{TILE_8BPP_BYTES, TILE_ROW_BYTES, TILE_SIZE};

/// Gathers `num_tiles` 8bpp tiles down one map column into `dest`.
///
/// `map_cells` starts at the column's top cell and `map_stride` is the map
/// width in cells. Flip flags of the cells are applied. Exactly
/// `num_tiles * TILE_8BPP_BYTES` bytes at the start of `dest` are written.
///
/// # Panics
/// If `dest` is too small or a cell points past the end of `tiles`; both mean
/// the asset doesn't match the strip geometry.
pub fn copy_vertical_tile_strip_8bpp(
    dest: &mut [u8],
    tiles: &[u8],
    map_cells: &[MapCell],
    map_stride: usize,
    num_tiles: usize,
) {
    let dest = &mut dest[..num_tiles * TILE_8BPP_BYTES];

    for (tile_dest, cell) in dest
        .chunks_exact_mut(TILE_8BPP_BYTES)
        .zip(map_cells.iter().step_by(map_stride))
    {
        let start = cell.tile_index() * TILE_8BPP_BYTES;
        let tile_src = &tiles[start..start + TILE_8BPP_BYTES];

        if !cell.horizontal_flip() && !cell.vertical_flip() {
            tile_dest.copy_from_slice(tile_src);
            continue;
        }

        for (row, row_dest) in tile_dest.chunks_exact_mut(TILE_ROW_BYTES).enumerate() {
            let src_row = if cell.vertical_flip() {
                TILE_SIZE - 1 - row
            } else {
                row
            };
            let row_src = &tile_src[src_row * TILE_ROW_BYTES..(src_row + 1) * TILE_ROW_BYTES];

            row_dest.copy_from_slice(row_src);
            if cell.horizontal_flip() {
                row_dest.reverse();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// 3x3 tiles grid, tile `n` is filled with marker `n + 1` and map cell `n`
    /// points to tile `n`.
    fn grid() -> (Vec<u8>, Vec<MapCell>) {
        let tiles = (0..9_u8)
            .flat_map(|marker| [marker + 1; TILE_8BPP_BYTES])
            .collect();
        let map = (0..9).map(MapCell::new).collect();
        (tiles, map)
    }

    fn markers(strip: &[u8]) -> Vec<u8> {
        strip
            .chunks_exact(TILE_8BPP_BYTES)
            .map(|tile| {
                assert!(tile.iter().all(|p| *p == tile[0]), "mixed tile");
                tile[0]
            })
            .collect()
    }

    #[test]
    fn column_with_padding() {
        let (tiles, map) = grid();

        // One padding tile above and one below the 3 tiles of the column.
        let mut strip = vec![0; 5 * TILE_8BPP_BYTES];
        copy_vertical_tile_strip_8bpp(&mut strip[TILE_8BPP_BYTES..], &tiles, &map[1..], 3, 3);

        assert_eq!(markers(&strip), vec![0, 2, 5, 8, 0]);
    }

    #[test]
    fn every_column() {
        let (tiles, map) = grid();
        for column in 0..3 {
            let mut strip = vec![0; 3 * TILE_8BPP_BYTES];
            copy_vertical_tile_strip_8bpp(&mut strip, &tiles, &map[column..], 3, 3);

            let expected: Vec<u8> = (0..3).map(|row| (row * 3 + column) as u8 + 1).collect();
            assert_eq!(markers(&strip), expected);
        }
    }

    #[test]
    fn leaves_bytes_past_the_strip_alone() {
        let (tiles, map) = grid();
        let mut strip = vec![0xEE; 3 * TILE_8BPP_BYTES];
        copy_vertical_tile_strip_8bpp(&mut strip, &tiles, &map[2..], 3, 2);

        assert_eq!(markers(&strip[..2 * TILE_8BPP_BYTES]), vec![3, 6]);
        assert!(strip[2 * TILE_8BPP_BYTES..].iter().all(|p| *p == 0xEE));
    }

    #[test]
    fn flipped_cells() {
        // Tile 0: pixel (x, y) holds 8 * y + x.
        let tiles: Vec<u8> = (0..64).collect();
        let map = [
            MapCell::new(0).with_flips(true, false),
            MapCell::new(0).with_flips(false, true),
        ];

        let mut strip = vec![0; 2 * TILE_8BPP_BYTES];
        copy_vertical_tile_strip_8bpp(&mut strip, &tiles, &map, 1, 2);

        // Horizontal flip: first row reversed.
        assert_eq!(&strip[..8], &[7, 6, 5, 4, 3, 2, 1, 0]);
        // Vertical flip: first row is the last source row.
        assert_eq!(&strip[64..72], &[56, 57, 58, 59, 60, 61, 62, 63]);
    }
}
