//! Pattern search over an assembled image.
//!
//! The pattern stays fixed while the image is viewed through each of the 8
//! transforms. Within one orientation matches are found greedily in row-major
//! order and may not share cells. The orientation with the most matches wins;
//! ties go to the lowest transform index.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::bitmap::{Bitmap, Pixel};
use crate::error::{PuzzleError, Result};
use crate::geometry::{Coord, Transform, TransformationGroup};

/// The default pattern: 15 cells in a 20x3 box.
pub const SEA_MONSTER: &str = "                  # \n#    ##    ##    ###\n #  #  #  #  #  #   ";

/// A set of masked cells, as `(col, row)` offsets from the top-left of its
/// bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    cells: Vec<(usize, usize)>,
    width: usize,
    height: usize,
}

impl Pattern {
    /// Parses a pattern where `#` marks a masked cell and anything else is
    /// ignored. Blank rows and columns around the mask are dropped.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_text(text)
            .ok_or_else(|| PuzzleError::InvalidPattern("no `#` cells".to_string()))
    }

    pub fn sea_monster() -> Self {
        match Self::from_text(SEA_MONSTER) {
            Some(pattern) => pattern,
            None => unreachable!("the built-in pattern has cells"),
        }
    }

    fn from_text(text: &str) -> Option<Self> {
        let marked: Vec<(usize, usize)> = text
            .lines()
            .enumerate()
            .flat_map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .filter(|&(_, c)| c == '#')
                    .map(move |(col, _)| (col, row))
            })
            .collect();

        let min_col = marked.iter().map(|&(col, _)| col).min()?;
        let min_row = marked.iter().map(|&(_, row)| row).min()?;
        let cells: Vec<(usize, usize)> = marked
            .into_iter()
            .map(|(col, row)| (col - min_col, row - min_row))
            .collect();
        let width = cells.iter().map(|&(col, _)| col + 1).max()?;
        let height = cells.iter().map(|&(_, row)| row + 1).max()?;
        Some(Self {
            cells,
            width,
            height,
        })
    }

    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Sets the pattern's cells in `image` with its top-left at `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if the pattern does not fit inside `image` at that offset.
    pub fn stamp(&self, image: &mut [Vec<Pixel>], col: usize, row: usize) {
        for &(dx, dy) in &self.cells {
            image[row + dy][col + dx] = Pixel::Filled;
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::sea_monster()
    }
}

/// Outcome of a search: the winning orientation and what it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterReport {
    /// Index of the winning transform.
    pub transform: usize,
    pub matches: usize,
    /// Covered cells in the untransformed bitmap's symmetric coordinates.
    pub covered: BTreeSet<Coord>,
    /// Filled cells of the whole bitmap.
    pub filled: usize,
    /// Filled cells not covered by any match.
    pub roughness: usize,
}

impl MonsterReport {
    /// Draws the winning orientation of `bitmap` with covered cells as `O`.
    pub fn render(&self, bitmap: &Bitmap, group: &TransformationGroup) -> String {
        let transform = group.get(self.transform);
        let side = bitmap.side();
        (0..side)
            .map(|row| {
                (0..side)
                    .map(|col| {
                        let coord = bitmap.storage_coord(col, row, transform);
                        if self.covered.contains(&coord) {
                            'O'
                        } else {
                            bitmap.at(col, row, transform).as_char()
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Counts non-overlapping occurrences of `pattern` in every orientation of
/// `bitmap` and reports the best one.
pub fn detect(bitmap: &Bitmap, pattern: &Pattern, group: &TransformationGroup) -> MonsterReport {
    let mut best: Option<(usize, FxHashSet<(usize, usize)>)> = None;

    for transform in group.iter() {
        let claimed = scan(bitmap, pattern, transform);
        let matches = claimed.len() / pattern.cells.len();
        debug!(transform = transform.index, matches, "scanned orientation");
        let better = match &best {
            Some((_, current)) => claimed.len() > current.len(),
            None => true,
        };
        if better {
            best = Some((transform.index, claimed));
        }
    }

    let identity = group.identity().index;
    let (index, claimed) = best.unwrap_or((identity, FxHashSet::default()));
    let transform = group.get(index);
    let covered: BTreeSet<Coord> = claimed
        .into_iter()
        .map(|(col, row)| bitmap.storage_coord(col, row, transform))
        .collect();
    let filled = bitmap.filled_count();

    MonsterReport {
        transform: index,
        matches: covered.len() / pattern.cells.len(),
        roughness: filled - covered.len(),
        covered,
        filled,
    }
}

/// Claims every match in one orientation; returns the claimed display cells.
fn scan(bitmap: &Bitmap, pattern: &Pattern, transform: &Transform) -> FxHashSet<(usize, usize)> {
    let mut claimed = FxHashSet::default();
    let side = bitmap.side();
    if pattern.width > side || pattern.height > side {
        return claimed;
    }

    for row in 0..=side - pattern.height {
        for col in 0..=side - pattern.width {
            let fits = pattern.cells.iter().all(|&(dx, dy)| {
                let cell = (col + dx, row + dy);
                !claimed.contains(&cell) && bitmap.at(cell.0, cell.1, transform).is_filled()
            });
            if fits {
                let cells = pattern.cells.iter().map(|&(dx, dy)| (col + dx, row + dy));
                claimed.extend(cells);
            }
        }
    }
    claimed
}
