//! Jigsaw Tile Solver Library
//!
//! Reassembles a square image from square tiles that may be rotated or
//! flipped, then searches the image for a fixed pattern in every orientation.
//!
//! The pipeline is: [`input`] parses tiles into a [`Puzzle`],
//! [`NeighbourhoodIndex`] records which oriented tiles fit next to each other,
//! [`Puzzle::solve`] places every tile, [`assembly::assemble`] strips the
//! borders into one image, and [`monster::detect`] counts pattern matches.

pub mod assembly;
pub mod bitmap;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod monster;
pub mod neighbourhood;
pub mod solver;
pub mod synthetic;
pub mod tiles;

pub use error::{PuzzleError, Result};
pub use geometry::TransformationGroup;
pub use grid::Placement;
pub use monster::{MonsterReport, Pattern};
pub use neighbourhood::NeighbourhoodIndex;
pub use solver::{Pruning, SearchStats, SolverConfig};
pub use tiles::{Puzzle, Tile, TileId, TileSelection};

/// Filled cells of the assembled image not covered by a sea monster.
///
/// Returns `None` if the tiles cannot be placed.
pub fn water_roughness(puzzle: &Puzzle, config: &SolverConfig) -> Option<usize> {
    let group = TransformationGroup::new();
    let (placement, _) = puzzle.solve(&group, config);
    let image = assembly::assemble(puzzle, &placement?, &group);
    Some(monster::detect(&image, &Pattern::sea_monster(), &group).roughness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Pixel;
    use crate::synthetic::cut;

    const IDS: [TileId; 9] = [1951, 2311, 3079, 2729, 1427, 2473, 2971, 1489, 1171];

    /// Two sea monsters and three stray cells on a blank 24x24 image.
    fn monster_image() -> Vec<Vec<Pixel>> {
        let mut image = vec![vec![Pixel::Empty; 24]; 24];
        let monster = Pattern::sea_monster();
        monster.stamp(&mut image, 1, 2);
        monster.stamp(&mut image, 3, 10);
        for (row, col) in [(20, 20), (21, 5), (22, 12)] {
            image[row][col] = Pixel::Filled;
        }
        image
    }

    /// Renders a puzzle back into the text input format.
    fn puzzle_text(tiles: &[Tile], group: &TransformationGroup) -> String {
        tiles
            .iter()
            .map(|tile| {
                format!(
                    "Tile {}:\n{}\n",
                    tile.id,
                    tile.bitmap.rows(group.identity()).join("\n")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_water_roughness_end_to_end() {
        let group = TransformationGroup::new();
        let cut = cut(&monster_image(), 3, 10, &IDS, true, &group).unwrap();
        let text = puzzle_text(&cut.tiles, &group);
        let puzzle = input::parse_puzzle(&text).unwrap();

        for pruning in [Pruning::None, Pruning::DegreeBuckets, Pruning::WithFallback] {
            let config = SolverConfig { pruning };
            assert_eq!(water_roughness(&puzzle, &config), Some(3));
        }
    }

    #[test]
    fn test_pipeline_reports_corners_and_monsters() {
        let group = TransformationGroup::new();
        let cut = cut(&monster_image(), 3, 10, &IDS, true, &group).unwrap();
        let puzzle = Puzzle::new(cut.tiles.clone()).unwrap();

        let (placement, stats) = puzzle.solve(&group, &SolverConfig::default());
        let placement = placement.unwrap();
        assert!(!stats.fallback_used);
        assert_eq!(placement.corner_product(), cut.corner_product());

        let image = assembly::assemble(&puzzle, &placement, &group);
        assert_eq!(image.side(), 24);
        let report = monster::detect(&image, &Pattern::sea_monster(), &group);
        assert_eq!(report.matches, 2);
        assert_eq!(report.filled, 33);
        assert_eq!(report.covered.len(), 30);
        assert_eq!(report.roughness, report.filled - 15 * report.matches);
    }

    #[test]
    fn test_unsolvable_puzzle_has_no_roughness() {
        let group = TransformationGroup::new();
        let cut = cut(&monster_image(), 3, 10, &IDS, true, &group).unwrap();
        let mut tiles = cut.tiles;
        // flipping a corner pixel of the center tile breaks both borders through it
        let mut rows = tiles[4].bitmap.rows(group.identity());
        let flipped = if rows[0].starts_with('#') { "." } else { "#" };
        rows[0].replace_range(0..1, flipped);
        tiles[4] = Tile::from_rows(tiles[4].id, &rows).unwrap();

        let puzzle = Puzzle::new(tiles).unwrap();
        assert_eq!(water_roughness(&puzzle, &SolverConfig::default()), None);
    }
}
