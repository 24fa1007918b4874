//! Load-time error types.
//!
//! Only malformed input is reported through these errors. Failing to find a
//! tiling is a normal search outcome (`None`), and broken internal invariants
//! panic.

use std::path::PathBuf;

use crate::tiles::TileId;

#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("line {line}: expected `Tile <id>:` header, found {found:?}")]
    MissingHeader { line: usize, found: String },

    #[error("line {line}: invalid tile id {found:?}")]
    InvalidTileId { line: usize, found: String },

    #[error("tile {id}: no rows")]
    EmptyTile { id: TileId },

    #[error("tile {id}: row {row} has length {len}, expected {expected}")]
    RaggedRow {
        id: TileId,
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("tile {id}: {rows}x{cols} is not a square with an even side")]
    BadShape { id: TileId, rows: usize, cols: usize },

    #[error("tile {id}: invalid pixel {found:?} at row {row}, column {col}")]
    InvalidPixel {
        id: TileId,
        row: usize,
        col: usize,
        found: char,
    },

    #[error("tile {id}: side {side} leaves no interior, tiles need a side of at least 4")]
    TooSmall { id: TileId, side: usize },

    #[error("tile {id}: side {side} differs from the first tile's side {expected}")]
    InconsistentTileSize {
        id: TileId,
        side: usize,
        expected: usize,
    },

    #[error("duplicate tile id {0}")]
    DuplicateTile(TileId),

    #[error("no tiles")]
    NoTiles,

    #[error("{0} tiles cannot form a square grid")]
    NotSquareCount(usize),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
