//! Tile and puzzle definitions.
//!
//! A puzzle is a set of equally sized square tiles whose count is a perfect
//! square. Tiles are validated once at load time and never mutated.

use std::collections::BTreeMap;

use crate::bitmap::{Bitmap, Direction, Pixel};
use crate::error::{PuzzleError, Result};
use crate::geometry::Transform;

/// Identifier of a tile, as given in the puzzle input.
pub type TileId = u32;

/// A tile bitmap with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub bitmap: Bitmap,
}

impl Tile {
    /// Builds a tile from text rows of `#` and `.`.
    pub fn from_rows<S: AsRef<str>>(id: TileId, rows: &[S]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(PuzzleError::EmptyTile { id });
        };
        let expected = first.as_ref().chars().count();

        let mut pixels = Vec::with_capacity(rows.len());
        for (row, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            let len = text.chars().count();
            if len != expected {
                return Err(PuzzleError::RaggedRow {
                    id,
                    row,
                    len,
                    expected,
                });
            }
            let line = text
                .chars()
                .enumerate()
                .map(|(col, c)| {
                    Pixel::from_char(c).ok_or(PuzzleError::InvalidPixel {
                        id,
                        row,
                        col,
                        found: c,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            pixels.push(line);
        }

        let bitmap = Bitmap::from_pixels(&pixels).ok_or(PuzzleError::BadShape {
            id,
            rows: rows.len(),
            cols: expected,
        })?;
        Ok(Self { id, bitmap })
    }

    #[inline]
    pub const fn side(&self) -> usize {
        self.bitmap.side()
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32, transform: &Transform) -> Pixel {
        self.bitmap.get(x, y, transform)
    }

    #[inline]
    pub fn border(&self, direction: Direction, transform: &Transform) -> Vec<Pixel> {
        self.bitmap.border(direction, transform)
    }

    #[inline]
    pub fn interior_row(&self, y: i32, transform: &Transform) -> Vec<Pixel> {
        self.bitmap.interior_row(y, transform)
    }
}

/// A placement decision: which tile, seen through which transform.
///
/// Ordered by tile id, then transform index; the solver tries candidates in
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileSelection {
    pub tile: TileId,
    pub transform: usize,
}

impl TileSelection {
    pub const fn new(tile: TileId, transform: usize) -> Self {
        Self { tile, transform }
    }
}

/// A validated puzzle: unique ids, equal square tiles, square tile count.
#[derive(Debug, Clone)]
pub struct Puzzle {
    tiles: BTreeMap<TileId, Tile>,
    grid_size: usize,
    tile_side: usize,
}

impl Puzzle {
    pub fn new(tiles: impl IntoIterator<Item = Tile>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        let mut tile_side = None;

        for tile in tiles {
            if tile.side() < 4 {
                return Err(PuzzleError::TooSmall {
                    id: tile.id,
                    side: tile.side(),
                });
            }
            let expected = *tile_side.get_or_insert(tile.side());
            if tile.side() != expected {
                return Err(PuzzleError::InconsistentTileSize {
                    id: tile.id,
                    side: tile.side(),
                    expected,
                });
            }
            let id = tile.id;
            if by_id.insert(id, tile).is_some() {
                return Err(PuzzleError::DuplicateTile(id));
            }
        }

        let Some(tile_side) = tile_side else {
            return Err(PuzzleError::NoTiles);
        };
        let count = by_id.len();
        let Some(grid_size) = integer_sqrt(count) else {
            return Err(PuzzleError::NotSquareCount(count));
        };

        Ok(Self {
            tiles: by_id,
            grid_size,
            tile_side,
        })
    }

    /// Builds a puzzle from raw `id -> rows` records.
    pub fn from_records<S: AsRef<str>>(
        records: impl IntoIterator<Item = (TileId, Vec<S>)>,
    ) -> Result<Self> {
        let tiles = records
            .into_iter()
            .map(|(id, rows)| Tile::from_rows(id, &rows))
            .collect::<Result<Vec<_>>>()?;
        Self::new(tiles)
    }

    /// Tiles in ascending id order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.values()
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Tile ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of tiles along one side of the grid.
    pub const fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Side length of every tile, border included.
    pub const fn tile_side(&self) -> usize {
        self.tile_side
    }
}

/// Returns `n` such that `n * n == value`, if one exists.
fn integer_sqrt(value: usize) -> Option<usize> {
    let root = value.isqrt();
    (root * root == value).then_some(root)
}
