//! Square bitmaps stored in symmetric coordinates.
//!
//! A bitmap of side `2h` stores its cells at `(x, y)` with `x, y` in
//! `[-h, h]` minus zero. Skipping the zero row and column puts the center of
//! the square at the origin, so every group transform maps valid coordinates
//! onto valid coordinates. Orientation is never applied in place: every read
//! takes the transform of the view it reads through.
//!
//! ```text
//! (-h,-h)    |
//!            |
//!   ---------+--------> x
//!            |
//!            |     (h,h)
//!            y
//! ```

use std::fmt;

use crate::geometry::{Coord, Transform};

/// A single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {
    Empty,
    Filled,
}

impl Pixel {
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Empty),
            '#' => Some(Self::Filled),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Filled => '#',
        }
    }

    #[inline]
    pub const fn is_filled(self) -> bool {
        matches!(self, Self::Filled)
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A side of a square, in the order up, right, down, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Converts a 0-based index along one axis to a symmetric coordinate.
#[inline]
pub const fn index_to_axis(index: usize, half: usize) -> i32 {
    if index < half {
        index as i32 - half as i32
    } else {
        index as i32 - half as i32 + 1
    }
}

/// Converts a symmetric coordinate to a 0-based index along one axis.
///
/// Returns `None` for zero or anything beyond `half`.
#[inline]
pub const fn axis_to_index(value: i32, half: usize) -> Option<usize> {
    let h = half as i32;
    if value == 0 || value < -h || value > h {
        None
    } else if value < 0 {
        Some((value + h) as usize)
    } else {
        Some((value + h - 1) as usize)
    }
}

/// Symmetric coordinates along one axis, in ascending order.
pub fn axis(half: usize) -> impl DoubleEndedIterator<Item = i32> + Clone {
    let h = half as i32;
    (-h..0).chain(1..=h)
}

/// An immutable square grid of pixels with an even side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    half: usize,
    /// Row-major, indexed by `axis_to_index(y) * side + axis_to_index(x)`.
    cells: Vec<Pixel>,
}

impl Bitmap {
    /// Builds a bitmap from rows of pixels.
    ///
    /// Returns `None` unless the rows form a non-empty square with an even side.
    pub fn from_pixels(rows: &[Vec<Pixel>]) -> Option<Self> {
        let side = rows.len();
        if side == 0 || side % 2 != 0 || rows.iter().any(|row| row.len() != side) {
            return None;
        }
        Some(Self {
            half: side / 2,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    #[inline]
    pub const fn side(&self) -> usize {
        self.half * 2
    }

    /// Reads the cell shown at `(x, y)` in the view through `transform`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate does not map into the bitmap. With group
    /// transforms that only happens for coordinates outside `[-h, h] \ {0}`,
    /// which is a caller bug.
    #[inline]
    pub fn get(&self, x: i32, y: i32, transform: &Transform) -> Pixel {
        match self.try_get(x, y, transform) {
            Some(pixel) => pixel,
            None => panic!(
                "coordinate ({x}, {y}) lies outside a bitmap of half-size {}",
                self.half
            ),
        }
    }

    pub fn try_get(&self, x: i32, y: i32, transform: &Transform) -> Option<Pixel> {
        let (sx, sy) = transform.backward((x, y));
        self.stored(sx, sy)
    }

    /// Reads a cell in storage coordinates.
    #[inline]
    fn stored(&self, x: i32, y: i32) -> Option<Pixel> {
        let col = axis_to_index(x, self.half)?;
        let row = axis_to_index(y, self.half)?;
        self.cells.get(row * self.side() + col).copied()
    }

    /// Reads the cell at 0-based display indices in the view through `transform`.
    #[inline]
    pub fn at(&self, col: usize, row: usize, transform: &Transform) -> Pixel {
        let x = index_to_axis(col, self.half);
        let y = index_to_axis(row, self.half);
        self.get(x, y, transform)
    }

    /// Maps 0-based display indices of a view back to storage coordinates.
    pub fn storage_coord(&self, col: usize, row: usize, transform: &Transform) -> Coord {
        let x = index_to_axis(col, self.half);
        let y = index_to_axis(row, self.half);
        transform.backward((x, y))
    }

    /// Returns one border of the view.
    ///
    /// Up and down are read left to right, left and right top to bottom, so
    /// `a.border(Right) == b.border(Left)` exactly when `b` fits right of `a`.
    pub fn border(&self, direction: Direction, transform: &Transform) -> Vec<Pixel> {
        let edge = self.half as i32;
        let cell = |x: i32, y: i32| self.get(x, y, transform);
        let line = axis(self.half);
        match direction {
            Direction::Up => line.map(|x| cell(x, -edge)).collect(),
            Direction::Down => line.map(|x| cell(x, edge)).collect(),
            Direction::Left => line.map(|y| cell(-edge, y)).collect(),
            Direction::Right => line.map(|y| cell(edge, y)).collect(),
        }
    }

    /// Returns row `y` of the view without its first and last cell.
    ///
    /// Only meaningful for interior rows; `y` itself is not checked against
    /// the outer ring.
    pub fn interior_row(&self, y: i32, transform: &Transform) -> Vec<Pixel> {
        let inner = self.half as i32 - 1;
        (-inner..0)
            .chain(1..=inner)
            .map(|x| self.get(x, y, transform))
            .collect()
    }

    /// Symmetric y coordinates of the interior rows, top to bottom.
    pub fn interior_rows(&self) -> impl Iterator<Item = i32> {
        let inner = self.half as i32 - 1;
        (-inner..0).chain(1..=inner)
    }

    /// Materializes the view through `transform` as a new bitmap.
    pub fn transformed(&self, transform: &Transform) -> Self {
        let cells = axis(self.half)
            .flat_map(|y| axis(self.half).map(move |x| (x, y)))
            .map(|(x, y)| self.get(x, y, transform))
            .collect();
        Self {
            half: self.half,
            cells,
        }
    }

    /// Renders the view through `transform` as text rows.
    pub fn rows(&self, transform: &Transform) -> Vec<String> {
        axis(self.half)
            .map(|y| {
                axis(self.half)
                    .map(|x| self.get(x, y, transform).as_char())
                    .collect()
            })
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|pixel| pixel.is_filled()).count()
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.side()) {
            for pixel in row {
                write!(f, "{pixel}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Matrix2x2, TransformationGroup};

    fn bitmap(rows: &[&str]) -> Bitmap {
        let pixels: Vec<Vec<Pixel>> = rows
            .iter()
            .map(|row| row.chars().map(|c| Pixel::from_char(c).unwrap()).collect())
            .collect();
        Bitmap::from_pixels(&pixels).unwrap()
    }

    fn as_text(pixels: &[Pixel]) -> String {
        pixels.iter().map(|p| p.as_char()).collect()
    }

    fn sample() -> Bitmap {
        bitmap(&["#..#", "##..", "...#", ".#.."])
    }

    #[test]
    fn test_axis_index_roundtrip() {
        for half in 1..6 {
            for index in 0..half * 2 {
                let value = index_to_axis(index, half);
                assert_ne!(value, 0);
                assert_eq!(axis_to_index(value, half), Some(index));
            }
            assert_eq!(axis_to_index(0, half), None);
            assert_eq!(axis_to_index(half as i32 + 1, half), None);
            assert_eq!(axis_to_index(-(half as i32) - 1, half), None);
        }
    }

    #[test]
    fn test_rejects_odd_and_ragged_rows() {
        let odd = vec![vec![Pixel::Empty; 3]; 3];
        assert!(Bitmap::from_pixels(&odd).is_none());
        let ragged = vec![vec![Pixel::Empty; 2], vec![Pixel::Empty; 3]];
        assert!(Bitmap::from_pixels(&ragged).is_none());
        assert!(Bitmap::from_pixels(&[]).is_none());
    }

    #[test]
    fn test_identity_borders() {
        let group = TransformationGroup::new();
        let tile = sample();
        let id = group.identity();
        assert_eq!(as_text(&tile.border(Direction::Up, id)), "#..#");
        assert_eq!(as_text(&tile.border(Direction::Down, id)), ".#..");
        assert_eq!(as_text(&tile.border(Direction::Left, id)), "##..");
        assert_eq!(as_text(&tile.border(Direction::Right, id)), "#.#.");
    }

    #[test]
    fn test_quarter_turn_view() {
        let group = TransformationGroup::new();
        let turn = group.get(group.index_of(&Matrix2x2::QUARTER_TURN).unwrap());
        let rows = sample().rows(turn);
        // clockwise: the old left column, read bottom-up, becomes the top row
        assert_eq!(rows, vec!["..##", "#.#.", "....", ".#.#"]);
    }

    #[test]
    fn test_right_border_rotates_onto_down_border() {
        let group = TransformationGroup::new();
        let turn = group.index_of(&Matrix2x2::QUARTER_TURN).unwrap();
        let tile = sample();
        for t in group.iter() {
            let rotated = group.get(group.compose(turn, t.index).unwrap());
            let mut right = tile.border(Direction::Right, t);
            right.reverse();
            assert_eq!(
                tile.border(Direction::Down, rotated),
                right,
                "Rotating view {} did not carry the right border down",
                t.index
            );
        }
    }

    #[test]
    fn test_interior_row_skips_outer_ring() {
        let rows = ["######", "#.##.#", "#....#", "#.#..#", "#....#", "######"];
        let tile = bitmap(&rows);
        let group = TransformationGroup::new();
        let rows: Vec<String> = tile
            .interior_rows()
            .map(|y| as_text(&tile.interior_row(y, group.identity())))
            .collect();
        assert_eq!(rows, vec![".##.", "....", ".#..", "...."]);
    }

    #[test]
    fn test_transformed_matches_view() {
        let group = TransformationGroup::new();
        let tile = sample();
        for t in group.iter() {
            let materialized = tile.transformed(t);
            assert_eq!(materialized.rows(group.identity()), tile.rows(t));
        }
    }

    #[test]
    fn test_filled_count_is_orientation_free() {
        let tile = sample();
        assert_eq!(tile.filled_count(), 6);
    }

    #[test]
    #[should_panic(expected = "outside a bitmap")]
    fn test_out_of_range_lookup_panics() {
        let group = TransformationGroup::new();
        sample().get(3, 1, group.identity());
    }

    #[test]
    fn test_display_prints_storage_rows() {
        insta::assert_snapshot!(sample().to_string(), @r"
        #..#
        ##..
        ...#
        .#..
        ");
    }
}
