//! Stitching a solved placement into one image.
//!
//! Each tile loses its outer ring; the remaining interiors are laid out edge
//! to edge in placement order, each read through its chosen transform.

use crate::bitmap::{Bitmap, Pixel};
use crate::geometry::TransformationGroup;
use crate::grid::Placement;
use crate::tiles::Puzzle;

/// Builds the image of a complete placement.
///
/// # Panics
///
/// Panics if a placed id is missing from the puzzle, or if the result is not
/// a square of side `(tile_side - 2) * width`. Both mean the placement does
/// not belong to this puzzle.
pub fn assemble(puzzle: &Puzzle, placement: &Placement, group: &TransformationGroup) -> Bitmap {
    let interior_side = puzzle.tile_side() - 2;
    let expected = interior_side * placement.width();

    let mut rows: Vec<Vec<Pixel>> = Vec::with_capacity(expected);
    for tile_row in placement.rows() {
        let mut band: Vec<Vec<Pixel>> = vec![Vec::with_capacity(expected); interior_side];
        for selection in tile_row {
            let id = selection.tile;
            let Some(tile) = puzzle.tile(id) else {
                panic!("placement uses tile {id} which the puzzle does not have");
            };
            let transform = group.get(selection.transform);
            for (line, y) in band.iter_mut().zip(tile.bitmap.interior_rows()) {
                line.extend(tile.interior_row(y, transform));
            }
        }
        rows.extend(band);
    }

    assert!(
        rows.len() == expected && rows.iter().all(|row| row.len() == expected),
        "assembled image is not {expected}x{expected}"
    );
    match Bitmap::from_pixels(&rows) {
        Some(bitmap) => bitmap,
        None => panic!("assembled image of side {expected} cannot be stored"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Matrix2x2;
    use crate::solver::SolverConfig;
    use crate::synthetic::{cut, noise_image};
    use crate::tiles::{Tile, TileSelection};

    fn tiles_2x2() -> Puzzle {
        let tiles = vec![
            Tile::from_rows(1, &["####", "#.##", "##.#", "####"]).unwrap(),
            Tile::from_rows(2, &["....", ".#..", "....", "...."]).unwrap(),
            Tile::from_rows(3, &["....", "....", ".##.", "...."]).unwrap(),
            Tile::from_rows(4, &["####", "#..#", "#.##", "####"]).unwrap(),
        ];
        Puzzle::new(tiles).unwrap()
    }

    /// Four tiles where each shared border fits exactly one partner. Tile 3 is
    /// stored mirrored and tile 4 half turned.
    fn matching_2x2() -> Puzzle {
        let tiles = vec![
            Tile::from_rows(1, &["###.", ".##.", "...#", "###."]).unwrap(),
            Tile::from_rows(2, &[".##.", "..#.", "###.", "...#"]).unwrap(),
            Tile::from_rows(3, &[".###", "..#.", "####", "#.#."]).unwrap(),
            Tile::from_rows(4, &["####", "#.##", "..#.", "#..."]).unwrap(),
        ];
        Puzzle::new(tiles).unwrap()
    }

    fn as_text(bitmap: &Bitmap, group: &TransformationGroup) -> Vec<String> {
        bitmap.rows(group.identity())
    }

    #[test]
    fn test_concatenates_interiors_in_placement_order() {
        let group = TransformationGroup::new();
        let puzzle = tiles_2x2();
        let selections = [1, 2, 3, 4].map(|id| TileSelection::new(id, 0)).to_vec();
        let image = assemble(&puzzle, &Placement::new(2, 2, selections), &group);
        assert_eq!(image.side(), 4);
        let rows = as_text(&image, &group);
        assert_eq!(rows, vec![".##.", "#...", "....", "##.#"]);
    }

    #[test]
    fn test_respects_tile_transforms() {
        let group = TransformationGroup::new();
        let puzzle = tiles_2x2();
        let turn = group.index_of(&Matrix2x2::QUARTER_TURN).unwrap();
        let selections = vec![
            TileSelection::new(4, 0),
            TileSelection::new(3, 0),
            TileSelection::new(2, turn),
            TileSelection::new(1, turn),
        ];
        let image = assemble(&puzzle, &Placement::new(2, 2, selections), &group);
        // clockwise: tile 2's interior "#." / ".." becomes ".#" / ".."
        let rows = as_text(&image, &group);
        assert_eq!(rows, vec!["....", ".###", ".##.", "...#"]);
    }

    #[test]
    fn test_solved_hand_built_tiles_assemble_to_known_image() {
        let group = TransformationGroup::new();
        let puzzle = matching_2x2();
        let (placement, stats) = puzzle.solve(&group, &SolverConfig::default());
        let placement = placement.unwrap();
        assert!(!stats.fallback_used);
        assert_eq!(placement.selections()[0], TileSelection::new(1, 0));
        assert_eq!(placement.corner_product(), 24);

        let image = assemble(&puzzle, &placement, &group);
        let rows = as_text(&image, &group);
        assert_eq!(rows, vec!["##.#", "..##", "#.#.", "###."]);
    }

    #[test]
    fn test_solved_synthetic_puzzle_reassembles_its_image() {
        let group = TransformationGroup::new();
        let image = noise_image(12, 99);
        let cut = cut(&image, 2, 8, &[1, 2, 3, 4], false, &group).unwrap();
        let puzzle = Puzzle::new(cut.tiles).unwrap();
        let placement = puzzle.solve(&group, &SolverConfig::default()).0.unwrap();
        let assembled = assemble(&puzzle, &placement, &group);
        let expected: Vec<String> = image
            .iter()
            .map(|row| row.iter().map(|p| p.as_char()).collect())
            .collect();
        assert_eq!(as_text(&assembled, &group), expected);
    }

    #[test]
    #[should_panic(expected = "does not have")]
    fn test_unknown_tile_is_fatal() {
        let group = TransformationGroup::new();
        let puzzle = tiles_2x2();
        let selections = [1, 2, 3, 9].map(|id| TileSelection::new(id, 0)).to_vec();
        assemble(&puzzle, &Placement::new(2, 2, selections), &group);
    }
}
