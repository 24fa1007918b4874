//! Puzzle and pattern input.
//!
//! Text format: blocks of a `Tile <id>:` header followed by the tile rows,
//! separated by blank lines.
//!
//! ```text
//! Tile 2311:
//! ..##.#..#.
//! ##..#.....
//! ...
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PuzzleError, Result};
use crate::monster::Pattern;
use crate::tiles::{Puzzle, TileId};

const HEADER_PREFIX: &str = "Tile ";

/// Splits puzzle text into `(id, rows)` records without validating the rows.
pub fn parse_records(text: &str) -> Result<Vec<(TileId, Vec<String>)>> {
    let mut records = Vec::new();
    let mut current: Option<(TileId, Vec<String>)> = None;

    for (number, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            records.extend(current.take());
            continue;
        }

        if let Some(rest) = line.strip_prefix(HEADER_PREFIX) {
            records.extend(current.take());
            let id = rest
                .strip_suffix(':')
                .and_then(|id| id.trim().parse::<TileId>().ok())
                .ok_or_else(|| PuzzleError::InvalidTileId {
                    line: number + 1,
                    found: line.to_string(),
                })?;
            current = Some((id, Vec::new()));
            continue;
        }

        match current.as_mut() {
            Some((_, rows)) => rows.push(line.to_string()),
            None => {
                return Err(PuzzleError::MissingHeader {
                    line: number + 1,
                    found: line.to_string(),
                })
            }
        }
    }
    records.extend(current);
    Ok(records)
}

/// Parses and validates a whole puzzle.
pub fn parse_puzzle(text: &str) -> Result<Puzzle> {
    let records = parse_records(text)?;
    debug!(tiles = records.len(), "parsed tile records");
    Puzzle::from_records(records)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| PuzzleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a puzzle file.
pub fn load(path: impl AsRef<Path>) -> Result<Puzzle> {
    parse_puzzle(&read(path.as_ref())?)
}

/// Reads a pattern file (`#` marks a cell).
pub fn load_pattern(path: impl AsRef<Path>) -> Result<Pattern> {
    Pattern::parse(&read(path.as_ref())?)
}
