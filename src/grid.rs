//! Placement grid representation.
//!
//! Cells are filled in row-major order, so a partial placement is a prefix of
//! a flat vector and cell `i` sits at `(i % width, i / width)`.

use crate::tiles::{TileId, TileSelection};

/// Converts `(x, y)` grid coordinates to a row-major cell index.
#[inline(always)]
pub const fn coord_to_idx(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

/// Converts a row-major cell index to `(x, y)` grid coordinates.
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize, width: usize) -> (usize, usize) {
    (cell_index % width, cell_index / width)
}

/// Where a cell sits in the grid, which bounds how many neighbours its tile has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellRole {
    Corner,
    Border,
    Interior,
}

impl CellRole {
    pub const fn of(x: usize, y: usize, width: usize, height: usize) -> Self {
        let on_vertical_edge = x == 0 || x + 1 == width;
        let on_horizontal_edge = y == 0 || y + 1 == height;
        match (on_vertical_edge, on_horizontal_edge) {
            (true, true) => Self::Corner,
            (true, false) | (false, true) => Self::Border,
            (false, false) => Self::Interior,
        }
    }

    /// Role expected for a tile that can touch `degree` distinct tiles.
    pub const fn for_degree(degree: usize) -> Self {
        match degree {
            0..=2 => Self::Corner,
            3 => Self::Border,
            _ => Self::Interior,
        }
    }
}

/// Indices of the four corner cells: top-left, top-right, bottom-left, bottom-right.
pub const fn corner_indices(width: usize, height: usize) -> [usize; 4] {
    [
        0,
        coord_to_idx(width - 1, 0, width),
        coord_to_idx(0, height - 1, width),
        coord_to_idx(width - 1, height - 1, width),
    ]
}

/// A complete assignment of tile selections to grid cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    width: usize,
    height: usize,
    /// Row-major, one entry per cell.
    selections: Vec<TileSelection>,
}

impl Placement {
    /// Wraps a fully populated row-major selection list.
    ///
    /// # Panics
    ///
    /// Panics if the list does not have exactly `width * height` entries.
    pub fn new(width: usize, height: usize, selections: Vec<TileSelection>) -> Self {
        assert_eq!(selections.len(), width * height, "one selection per cell");
        Self {
            width,
            height,
            selections,
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&TileSelection> {
        if x >= self.width {
            return None;
        }
        self.selections.get(coord_to_idx(x, y, self.width))
    }

    pub fn selections(&self) -> &[TileSelection] {
        &self.selections
    }

    /// Rows of selections, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileSelection]> + '_ {
        self.selections.chunks(self.width)
    }

    /// Ids of the four corner tiles.
    pub fn corners(&self) -> [TileId; 4] {
        corner_indices(self.width, self.height)
            .map(|index| self.selections[index].tile)
    }

    /// Product of the four corner tile ids.
    pub fn corner_product(&self) -> u128 {
        self.corners().iter().map(|&id| u128::from(id)).product()
    }
}

/// Formats a placement as a table of `id/transform` entries.
pub fn format_placement(placement: &Placement) -> String {
    let cells: Vec<String> = placement
        .selections()
        .iter()
        .map(|s| format!("{}/{}", s.tile, s.transform))
        .collect();
    let width = cells.iter().map(String::len).max().unwrap_or(0);

    cells
        .chunks(placement.width())
        .map(|row| {
            let line: Vec<String> = row.iter().map(|cell| format!("{cell:<width$}")).collect();
            format!("{}\n", line.join("  ").trim_end())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for width in 1..5 {
            for idx in 0..width * 3 {
                let (x, y) = idx_to_coord(idx, width);
                assert!(x < width, "idx_to_coord({idx}, {width}) produced x = {x}");
                assert_eq!(coord_to_idx(x, y, width), idx, "Roundtrip failed for {idx}");
            }
        }
    }

    #[test]
    fn test_cell_roles_on_4x4() {
        let roles: Vec<CellRole> = (0..16)
            .map(|i| {
                let (x, y) = idx_to_coord(i, 4);
                CellRole::of(x, y, 4, 4)
            })
            .collect();
        let corners = roles.iter().filter(|&&r| r == CellRole::Corner).count();
        let borders = roles.iter().filter(|&&r| r == CellRole::Border).count();
        let interior = roles.iter().filter(|&&r| r == CellRole::Interior).count();
        assert_eq!((corners, borders, interior), (4, 8, 4));
        assert_eq!(roles[5], CellRole::Interior);
        assert_eq!(roles[1], CellRole::Border);
        assert_eq!(roles[15], CellRole::Corner);
    }

    #[test]
    fn test_single_cell_grid_is_a_corner() {
        assert_eq!(CellRole::of(0, 0, 1, 1), CellRole::Corner);
        assert_eq!(corner_indices(1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_roles_for_degree() {
        assert_eq!(CellRole::for_degree(0), CellRole::Corner);
        assert_eq!(CellRole::for_degree(2), CellRole::Corner);
        assert_eq!(CellRole::for_degree(3), CellRole::Border);
        assert_eq!(CellRole::for_degree(4), CellRole::Interior);
        assert_eq!(CellRole::for_degree(9), CellRole::Interior);
    }

    #[test]
    fn test_corner_product() {
        let selections = [1951, 311, 3079, 2729, 1427, 2473, 2971, 1489, 1171]
            .into_iter()
            .map(|id| TileSelection::new(id, 0))
            .collect();
        let placement = Placement::new(3, 3, selections);
        assert_eq!(placement.corners(), [1951, 3079, 2971, 1171]);
        assert_eq!(placement.corner_product(), 1951u128 * 3079 * 2971 * 1171);
    }

    #[test]
    fn test_format_placement() {
        let selections = vec![
            TileSelection::new(7, 0),
            TileSelection::new(12, 5),
            TileSelection::new(3, 2),
            TileSelection::new(104, 1),
        ];
        let placement = Placement::new(2, 2, selections);
        insta::assert_snapshot!(format_placement(&placement), @r"
        7/0    12/5
        3/2    104/1
        ");
    }
}
