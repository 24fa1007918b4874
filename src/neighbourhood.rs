//! Pairwise edge compatibility between tile orientations.
//!
//! Built in two phases:
//! 1. Discover which tiles could touch at all, comparing every side of each
//!    tile (as stored) with the opposite side of every other tile under all
//!    8 transforms. This gives each tile's degree.
//! 2. For every pair found in phase 1, compare the full 8x8 transform cross
//!    product and record right and down successors per selection.
//!
//! Degrees drive the corner/border/interior candidate buckets used by the
//! solver: on a rectangular puzzle with unambiguous borders, corner tiles have
//! degree 2, border tiles degree 3 and interior tiles degree 4.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use crate::bitmap::{Direction, Pixel};
use crate::geometry::TransformationGroup;
use crate::grid::CellRole;
use crate::tiles::{Puzzle, TileId, TileSelection};

/// Successor sets are ordered so the solver's candidate order is deterministic.
pub type Successors = BTreeSet<TileSelection>;

/// Every border of every tile under every transform, computed once.
///
/// Indexed by `[tile position][transform][direction]`.
struct BorderTable {
    ids: Vec<TileId>,
    borders: Vec<Vec<[Vec<Pixel>; 4]>>,
}

impl BorderTable {
    fn build(puzzle: &Puzzle, group: &TransformationGroup) -> Self {
        let ids = puzzle.ids().collect();
        let borders = puzzle
            .tiles()
            .map(|tile| {
                group
                    .iter()
                    .map(|transform| Direction::ALL.map(|d| tile.border(d, transform)))
                    .collect()
            })
            .collect();
        Self { ids, borders }
    }

    #[inline]
    fn border(&self, tile: usize, transform: usize, direction: Direction) -> &[Pixel] {
        &self.borders[tile][transform][direction.index()]
    }
}

/// Precomputed adjacency between tile selections. Read-only once built.
#[derive(Debug, Clone)]
pub struct NeighbourhoodIndex {
    ids: Vec<TileId>,
    degrees: BTreeMap<TileId, usize>,
    right_successors: FxHashMap<TileSelection, Successors>,
    down_successors: FxHashMap<TileSelection, Successors>,
}

impl NeighbourhoodIndex {
    pub fn build(puzzle: &Puzzle, group: &TransformationGroup) -> Self {
        let n = puzzle.len();
        info!(
            tiles = n,
            checks = n * n.saturating_sub(1) * group.len() * group.len(),
            "precomputing neighbourhood"
        );
        let table = BorderTable::build(puzzle, group);

        let neighbours = Self::possible_neighbours(&table, group);
        let degrees: BTreeMap<TileId, usize> = table
            .ids
            .iter()
            .map(|id| (*id, neighbours.get(id).map_or(0, FxHashSet::len)))
            .collect();

        let mut index = Self {
            ids: table.ids.clone(),
            degrees,
            right_successors: FxHashMap::default(),
            down_successors: FxHashMap::default(),
        };
        index.fill_successors(&table, group, &neighbours);

        info!(
            right = index.right_successors.len(),
            down = index.down_successors.len(),
            "built neighbourhood index"
        );
        for role in [CellRole::Corner, CellRole::Border, CellRole::Interior] {
            debug!(?role, tiles = index.bucket(role).len(), "degree bucket");
        }
        index
    }

    /// Phase 1: which tiles could touch, in any orientation.
    fn possible_neighbours(
        table: &BorderTable,
        group: &TransformationGroup,
    ) -> FxHashMap<TileId, FxHashSet<TileId>> {
        let mut neighbours: FxHashMap<TileId, FxHashSet<TileId>> = FxHashMap::default();
        let reference = group.identity().index;

        for first in 0..table.ids.len() {
            for second in (first + 1)..table.ids.len() {
                // the second tile's 8 views show each of its sides in both directions
                let touches = Direction::ALL.iter().any(|&side| {
                    let border = table.border(first, reference, side);
                    group
                        .iter()
                        .any(|t| table.border(second, t.index, side.opposite()) == border)
                });
                if touches {
                    let (a, b) = (table.ids[first], table.ids[second]);
                    neighbours.entry(a).or_default().insert(b);
                    neighbours.entry(b).or_default().insert(a);
                }
            }
        }
        neighbours
    }

    /// Phase 2: full transform cross product for every pair that can touch.
    fn fill_successors(
        &mut self,
        table: &BorderTable,
        group: &TransformationGroup,
        neighbours: &FxHashMap<TileId, FxHashSet<TileId>>,
    ) {
        let ids = table.ids.iter().enumerate();
        let position: FxHashMap<TileId, usize> = ids.map(|(i, &id)| (id, i)).collect();

        for (&a, adjacent) in neighbours {
            for &b in adjacent {
                let (first, second) = (position[&a], position[&b]);
                for t1 in group.iter() {
                    let right = table.border(first, t1.index, Direction::Right);
                    let down = table.border(first, t1.index, Direction::Down);
                    for t2 in group.iter() {
                        let from = TileSelection::new(a, t1.index);
                        let to = TileSelection::new(b, t2.index);
                        if right == table.border(second, t2.index, Direction::Left) {
                            self.right_successors.entry(from).or_default().insert(to);
                        }
                        if down == table.border(second, t2.index, Direction::Up) {
                            self.down_successors.entry(from).or_default().insert(to);
                        }
                    }
                }
            }
        }
    }

    /// Tile ids in ascending order.
    pub fn ids(&self) -> &[TileId] {
        &self.ids
    }

    /// Number of distinct tiles that could sit next to `id` in some orientation.
    pub fn degree(&self, id: TileId) -> Option<usize> {
        self.degrees.get(&id).copied()
    }

    /// `(id, degree)` pairs sorted by degree, then id.
    pub fn degrees(&self) -> Vec<(TileId, usize)> {
        let mut listing: Vec<(TileId, usize)> =
            self.degrees.iter().map(|(&id, &d)| (id, d)).collect();
        listing.sort_by_key(|&(id, degree)| (degree, id));
        listing
    }

    /// Ids whose degree matches a cell role, ascending.
    pub fn bucket(&self, role: CellRole) -> Vec<TileId> {
        self.degrees
            .iter()
            .filter(|(_, &degree)| CellRole::for_degree(degree) == role)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Selections that fit immediately right of `selection`.
    pub fn right_of(&self, selection: &TileSelection) -> Option<&Successors> {
        self.right_successors.get(selection)
    }

    /// Selections that fit immediately below `selection`.
    pub fn below(&self, selection: &TileSelection) -> Option<&Successors> {
        self.down_successors.get(selection)
    }
}
