//! Synthetic puzzle generation.
//!
//! Cuts an image into a grid of tiles whose borders are unambiguous: every
//! lattice edge between two tile corners carries its own border code, no code
//! is a palindrome, and no code equals another code reversed. Adjacent tiles
//! therefore match along exactly one border, in exactly one orientation, and
//! outer borders match nothing.
//!
//! Tile `(r, c)` owns the interior block of the image at
//! `r * (side - 2), c * (side - 2)`; its ring is built from the shared lattice
//! edges, so removing the rings of a solved placement gives the image back.

use crate::bitmap::{Bitmap, Pixel};
use crate::error::{PuzzleError, Result};
use crate::geometry::TransformationGroup;
use crate::tiles::{Tile, TileId};

/// Tiles cut from an image, plus where each id was cut from.
#[derive(Debug, Clone)]
pub struct SyntheticPuzzle {
    pub tiles: Vec<Tile>,
    /// Row-major ids by the position each tile was cut from.
    pub layout: Vec<TileId>,
    pub grid_size: usize,
}

impl SyntheticPuzzle {
    /// Product of the ids cut from the four corners of the image.
    pub fn corner_product(&self) -> u128 {
        let n = self.grid_size;
        [0, n - 1, n * (n - 1), n * n - 1]
            .iter()
            .map(|&i| u128::from(self.layout[i]))
            .product()
    }
}

/// Returns `count` border codes of `len` bits, in ascending order.
///
/// Each code is the smaller of a non-palindromic value and its reversal, so
/// no two codes (or their reversals) coincide.
fn border_codes(len: usize, count: usize) -> Option<Vec<u64>> {
    if len == 0 || len > 63 {
        return None;
    }
    let limit = 1u64 << len;
    let codes: Vec<u64> = (0..limit)
        .filter(|&value| value < reverse_bits(value, len))
        .take(count)
        .collect();
    (codes.len() == count).then_some(codes)
}

/// Reverses the low `len` bits of `value`; `len` must be in `1..=63`.
fn reverse_bits(value: u64, len: usize) -> u64 {
    value.reverse_bits() >> (64 - len)
}

#[inline]
fn code_pixel(code: u64, bit: usize) -> Pixel {
    if (code >> bit) & 1 == 1 {
        Pixel::Filled
    } else {
        Pixel::Empty
    }
}

/// Cuts `image` into `grid_size * grid_size` tiles of side `tile_side`.
///
/// `ids` are assigned row-major. With `scramble`, tile `k` is stored through
/// transform `(5k + 3) mod 8`, so the solver has to recover orientations.
pub fn cut(
    image: &[Vec<Pixel>],
    grid_size: usize,
    tile_side: usize,
    ids: &[TileId],
    scramble: bool,
    group: &TransformationGroup,
) -> Result<SyntheticPuzzle> {
    if tile_side < 4 || tile_side % 2 != 0 {
        return Err(PuzzleError::InvalidParameter {
            parameter: "tile_side",
            reason: format!("{tile_side} is not an even side of at least 4"),
        });
    }
    if grid_size == 0 || ids.len() != grid_size * grid_size {
        return Err(PuzzleError::InvalidParameter {
            parameter: "ids",
            reason: format!("{} ids for a {grid_size}x{grid_size} grid", ids.len()),
        });
    }
    let inner = tile_side - 2;
    let image_side = grid_size * inner;
    if image.len() != image_side || image.iter().any(|row| row.len() != image_side) {
        return Err(PuzzleError::InvalidParameter {
            parameter: "image",
            reason: format!("expected a {image_side}x{image_side} image"),
        });
    }

    let horizontal_edges = (grid_size + 1) * grid_size;
    let edge_count = 2 * horizontal_edges;
    let Some(codes) = border_codes(inner, edge_count) else {
        return Err(PuzzleError::InvalidParameter {
            parameter: "tile_side",
            reason: format!("{inner}-cell borders cannot encode {edge_count} distinct edges"),
        });
    };
    // horizontal edge above row r, column c; vertical edge left of column c, row r
    let above = |r: usize, c: usize| codes[r * grid_size + c];
    let left_of = |r: usize, c: usize| codes[horizontal_edges + r * (grid_size + 1) + c];
    let vertex = |r: usize, c: usize| {
        if (r + c) % 2 == 0 {
            Pixel::Filled
        } else {
            Pixel::Empty
        }
    };

    let last = tile_side - 1;
    let mut tiles = Vec::with_capacity(ids.len());
    for (k, &id) in ids.iter().enumerate() {
        let (r, c) = (k / grid_size, k % grid_size);
        let pixels: Vec<Vec<Pixel>> = (0..tile_side)
            .map(|y| {
                (0..tile_side)
                    .map(|x| {
                        let (on_left, on_right) = (x == 0, x == last);
                        let (on_top, on_bottom) = (y == 0, y == last);
                        if (on_left || on_right) && (on_top || on_bottom) {
                            vertex(r + usize::from(on_bottom), c + usize::from(on_right))
                        } else if on_top {
                            code_pixel(above(r, c), x - 1)
                        } else if on_bottom {
                            code_pixel(above(r + 1, c), x - 1)
                        } else if on_left {
                            code_pixel(left_of(r, c), y - 1)
                        } else if on_right {
                            code_pixel(left_of(r, c + 1), y - 1)
                        } else {
                            image[r * inner + y - 1][c * inner + x - 1]
                        }
                    })
                    .collect()
            })
            .collect();

        let Some(raw) = Bitmap::from_pixels(&pixels) else {
            unreachable!("tile side was validated as even and non-zero");
        };
        let bitmap = if scramble {
            raw.transformed(group.get((5 * k + 3) % group.len()))
        } else {
            raw
        };
        tiles.push(Tile { id, bitmap });
    }

    Ok(SyntheticPuzzle {
        tiles,
        layout: ids.to_vec(),
        grid_size,
    })
}

/// A deterministic pseudo-random image, for puzzles where content does not matter.
pub fn noise_image(side: usize, seed: u64) -> Vec<Vec<Pixel>> {
    let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
    (0..side)
        .map(|_| {
            (0..side)
                .map(|_| {
                    // xorshift64
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    if state % 3 == 0 {
                        Pixel::Filled
                    } else {
                        Pixel::Empty
                    }
                })
                .collect()
        })
        .collect()
}
