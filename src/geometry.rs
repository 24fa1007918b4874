//! 2D rotation and reflection utilities.
//!
//! A square has 8 symmetries (the dihedral group of order 8): 4 rotations,
//! each optionally mirrored. They are represented as 2x2 integer matrices
//! acting on symmetric coordinates, so applying one never leaves the integers.

/// A coordinate pair `(x, y)`; `x` grows to the right, `y` grows downward.
pub type Coord = (i32, i32);

/// A 2x2 integer matrix `[a b | c d]` acting on column vectors `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix2x2 {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
}

impl Matrix2x2 {
    pub const IDENTITY: Self = Self::new(1, 0, 0, 1);

    /// Quarter turn clockwise on screen: `(x, y) -> (-y, x)`.
    pub const QUARTER_TURN: Self = Self::new(0, -1, 1, 0);

    /// Mirror across the horizontal axis: `(x, y) -> (x, -y)`.
    pub const FLIP_X_AXIS: Self = Self::new(1, 0, 0, -1);

    /// Mirror across the vertical axis: `(x, y) -> (-x, y)`.
    pub const FLIP_Y_AXIS: Self = Self::new(-1, 0, 0, 1);

    pub const fn new(a: i32, b: i32, c: i32, d: i32) -> Self {
        Self { a, b, c, d }
    }

    pub const fn determinant(&self) -> i32 {
        self.a * self.d - self.b * self.c
    }

    /// Returns `self * rhs`, i.e. the map that applies `rhs` first.
    pub const fn compose(&self, rhs: &Self) -> Self {
        Self::new(
            self.a * rhs.a + self.b * rhs.c,
            self.a * rhs.b + self.b * rhs.d,
            self.c * rhs.a + self.d * rhs.c,
            self.c * rhs.b + self.d * rhs.d,
        )
    }

    /// Returns the inverse, or `None` unless the determinant is 1 or -1.
    ///
    /// With a unit determinant `1/det == det`, so the inverse stays integral.
    pub const fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det != 1 && det != -1 {
            return None;
        }
        Some(Self::new(self.d * det, -self.b * det, -self.c * det, self.a * det))
    }

    #[inline]
    pub const fn apply(&self, (x, y): Coord) -> Coord {
        (self.a * x + self.b * y, self.c * x + self.d * y)
    }
}

/// One element of the group, with its inverse kept alongside.
///
/// Views are read by mapping display coordinates back to storage coordinates,
/// so the inverse is what lookups actually use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    pub index: usize,
    pub matrix: Matrix2x2,
    pub inverse: Matrix2x2,
}

impl Transform {
    /// Maps a storage coordinate to where it appears in the view.
    #[inline]
    pub const fn forward(&self, coord: Coord) -> Coord {
        self.matrix.apply(coord)
    }

    /// Maps a view coordinate back to the storage coordinate it shows.
    #[inline]
    pub const fn backward(&self, coord: Coord) -> Coord {
        self.inverse.apply(coord)
    }
}

/// Number of symmetries of a square.
pub const GROUP_ORDER: usize = 8;

/// All orientations of a square tile.
///
/// Built once and passed by reference to every component that reads views.
/// Index 0 is always the identity.
#[derive(Debug, Clone)]
pub struct TransformationGroup {
    transforms: Vec<Transform>,
}

impl TransformationGroup {
    /// Generates the group by composing every rotation with every flip.
    ///
    /// Ordering: for each rotation (0, 1, 2, 3 quarter turns) the flips are
    /// tried in the order none, x-axis, y-axis, both. Duplicates are dropped,
    /// keeping the first occurrence.
    pub fn new() -> Self {
        let flip_both = Matrix2x2::FLIP_X_AXIS.compose(&Matrix2x2::FLIP_Y_AXIS);
        let flips = [
            Matrix2x2::IDENTITY,
            Matrix2x2::FLIP_X_AXIS,
            Matrix2x2::FLIP_Y_AXIS,
            flip_both,
        ];

        let mut matrices: Vec<Matrix2x2> = Vec::with_capacity(GROUP_ORDER);
        let mut rotation = Matrix2x2::IDENTITY;
        for _ in 0..4 {
            for flip in &flips {
                let composed = flip.compose(&rotation);
                if !matrices.contains(&composed) {
                    matrices.push(composed);
                }
            }
            rotation = Matrix2x2::QUARTER_TURN.compose(&rotation);
        }
        assert_eq!(matrices.len(), GROUP_ORDER, "wrong number of symmetries");

        let transforms = matrices
            .into_iter()
            .enumerate()
            .map(|(index, matrix)| {
                let Some(inverse) = matrix.inverse() else {
                    panic!("transform {index} is singular");
                };
                Transform {
                    index,
                    matrix,
                    inverse,
                }
            })
            .collect();

        Self { transforms }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// The identity transform.
    #[inline]
    pub fn identity(&self) -> &Transform {
        &self.transforms[0]
    }

    /// Returns the transform with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 8`.
    #[inline]
    pub fn get(&self, index: usize) -> &Transform {
        &self.transforms[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transform> + '_ {
        self.transforms.iter()
    }

    /// Finds the index of a matrix, if it belongs to the group.
    pub fn index_of(&self, matrix: &Matrix2x2) -> Option<usize> {
        self.transforms.iter().position(|t| t.matrix == *matrix)
    }

    /// Index of `outer * inner`: the view obtained by applying `inner`, then `outer`.
    pub fn compose(&self, outer: usize, inner: usize) -> Option<usize> {
        let product = self.get(outer).matrix.compose(&self.get(inner).matrix);
        self.index_of(&product)
    }

    pub fn inverse_of(&self, index: usize) -> Option<usize> {
        self.index_of(&self.get(index).inverse)
    }

    /// Applies a transform to a coordinate pair.
    #[inline]
    pub fn apply(&self, index: usize, coord: Coord) -> Coord {
        self.get(index).forward(coord)
    }
}

impl Default for TransformationGroup {
    fn default() -> Self {
        Self::new()
    }
}
