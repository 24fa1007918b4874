//! Backtracking tile placer.
//!
//! Fills the grid in row-major order. A cell's candidates are the selections
//! compatible with its left neighbour (right successors) and its upper
//! neighbour (down successors), restricted to unused tiles and, when degree
//! pruning is on, to the tiles whose degree matches the cell's role.
//!
//! The search is iterative: one frame per filled cell holds that cell's
//! ordered candidates and a cursor, and every step follows
//! try -> descend -> undo, so the placed prefix and the used-id set always
//! mirror the frame stack.

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use crate::geometry::TransformationGroup;
use crate::grid::{idx_to_coord, CellRole, Placement};
use crate::neighbourhood::NeighbourhoodIndex;
use crate::tiles::{Puzzle, TileId, TileSelection};

/// How the candidate tile ids of a cell are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    /// Every unused tile may go anywhere.
    None,
    /// Only tiles whose degree matches the cell role; no second attempt.
    DegreeBuckets,
    /// Degree buckets first, then an unrestricted search if that fails.
    #[default]
    WithFallback,
}

/// Solver settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverConfig {
    pub pruning: Pruning,
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Selections tentatively placed.
    pub placements_tried: u64,
    /// Selections removed again after their subtree failed.
    pub backtracks: u64,
    /// Whether the unrestricted fallback search ran.
    pub fallback_used: bool,
}

/// One filled (or about to be filled) cell of the search.
struct Frame {
    candidates: Vec<TileSelection>,
    next: usize,
}

impl Frame {
    fn new(candidates: Vec<TileSelection>) -> Self {
        Self {
            candidates,
            next: 0,
        }
    }

    fn advance(&mut self) -> Option<TileSelection> {
        let candidate = self.candidates.get(self.next).copied();
        self.next += 1;
        candidate
    }
}

/// Candidate tile ids per cell role.
struct Buckets {
    corner: Vec<TileId>,
    border: Vec<TileId>,
    interior: Vec<TileId>,
}

impl Buckets {
    fn from_index(index: &NeighbourhoodIndex) -> Self {
        Self {
            corner: index.bucket(CellRole::Corner),
            border: index.bucket(CellRole::Border),
            interior: index.bucket(CellRole::Interior),
        }
    }

    fn get(&self, role: CellRole) -> &[TileId] {
        match role {
            CellRole::Corner => &self.corner,
            CellRole::Border => &self.border,
            CellRole::Interior => &self.interior,
        }
    }
}

/// Backtracking search over a prebuilt neighbourhood index.
pub struct Placer<'a> {
    index: &'a NeighbourhoodIndex,
    width: usize,
    height: usize,
    transforms: usize,
    buckets: Option<Buckets>,
    stats: SearchStats,
}

impl<'a> Placer<'a> {
    /// Creates a placer for a `width x height` grid.
    ///
    /// With `degree_pruning`, each cell only considers tiles from the degree
    /// bucket matching its role.
    pub fn new(
        index: &'a NeighbourhoodIndex,
        group: &TransformationGroup,
        width: usize,
        height: usize,
        degree_pruning: bool,
    ) -> Self {
        Self {
            index,
            width,
            height,
            transforms: group.len(),
            buckets: degree_pruning.then(|| Buckets::from_index(index)),
            stats: SearchStats::default(),
        }
    }

    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Runs the search; `None` means the grid cannot be completed.
    pub fn solve(&mut self) -> Option<Placement> {
        let cells = self.width * self.height;
        if cells == 0 || cells > self.index.ids().len() {
            return None;
        }

        let mut placed: Vec<TileSelection> = Vec::with_capacity(cells);
        let mut used: FxHashSet<TileId> = FxHashSet::default();
        let mut stack = vec![Frame::new(self.candidates(&placed, &used))];

        loop {
            let depth = stack.len();
            let Some(frame) = stack.last_mut() else {
                return None;
            };
            // undo this frame's previous attempt before trying its next candidate
            if placed.len() == depth {
                if let Some(undone) = placed.pop() {
                    used.remove(&undone.tile);
                    self.stats.backtracks += 1;
                }
            }

            let Some(selection) = frame.advance() else {
                stack.pop();
                continue;
            };

            placed.push(selection);
            used.insert(selection.tile);
            self.stats.placements_tried += 1;

            if placed.len() == cells {
                return Some(Placement::new(self.width, self.height, placed));
            }
            let candidates = self.candidates(&placed, &used);
            stack.push(Frame::new(candidates));
        }
    }

    /// Ordered candidates for the cell after the placed prefix.
    fn candidates(&self, placed: &[TileSelection], used: &FxHashSet<TileId>) -> Vec<TileSelection> {
        let cell = placed.len();
        let (x, y) = idx_to_coord(cell, self.width);
        let left = (x > 0).then(|| placed[cell - 1]);
        let up = (y > 0).then(|| placed[cell - self.width]);

        let allowed = |selection: &TileSelection| {
            !used.contains(&selection.tile) && self.in_bucket(selection.tile, x, y)
        };

        match (left, up) {
            (Some(left), Some(up)) => {
                let (Some(right_of_left), Some(below_up)) =
                    (self.index.right_of(&left), self.index.below(&up))
                else {
                    return Vec::new();
                };
                right_of_left
                    .intersection(below_up)
                    .filter(|&s| allowed(s))
                    .copied()
                    .collect()
            }
            (Some(neighbour), None) => self
                .index
                .right_of(&neighbour)
                .into_iter()
                .flatten()
                .filter(|&s| allowed(s))
                .copied()
                .collect(),
            (None, Some(neighbour)) => self
                .index
                .below(&neighbour)
                .into_iter()
                .flatten()
                .filter(|&s| allowed(s))
                .copied()
                .collect(),
            (None, None) => {
                let ids: &[TileId] = match &self.buckets {
                    Some(buckets) => buckets.get(CellRole::of(x, y, self.width, self.height)),
                    None => self.index.ids(),
                };
                ids.iter()
                    .filter(|id| !used.contains(*id))
                    .flat_map(|&id| (0..self.transforms).map(move |t| TileSelection::new(id, t)))
                    .collect()
            }
        }
    }

    #[inline]
    fn in_bucket(&self, id: TileId, x: usize, y: usize) -> bool {
        match &self.buckets {
            Some(buckets) => buckets
                .get(CellRole::of(x, y, self.width, self.height))
                .binary_search(&id)
                .is_ok(),
            None => true,
        }
    }
}

impl Puzzle {
    /// Places every tile on the square grid.
    ///
    /// Returns the placement and search counters, or `None` with the counters
    /// if no tiling exists (under the configured pruning).
    pub fn solve(
        &self,
        group: &TransformationGroup,
        config: &SolverConfig,
    ) -> (Option<Placement>, SearchStats) {
        let index = NeighbourhoodIndex::build(self, group);
        solve_with_index(&index, group, self.grid_size(), config)
    }
}

/// Runs the placer over an existing index, applying the configured pruning.
pub fn solve_with_index(
    index: &NeighbourhoodIndex,
    group: &TransformationGroup,
    grid_size: usize,
    config: &SolverConfig,
) -> (Option<Placement>, SearchStats) {
    info!(tiles = index.ids().len(), pruning = ?config.pruning, "solving by backtracking");

    let pruned = !matches!(config.pruning, Pruning::None);
    let mut placer = Placer::new(index, group, grid_size, grid_size, pruned);
    let placement = placer.solve();
    let mut stats = placer.stats();
    debug!(?stats, found = placement.is_some(), "first search finished");

    if placement.is_some() || config.pruning != Pruning::WithFallback {
        return (placement, stats);
    }

    warn!("degree-bucket search found no tiling, retrying without degree pruning");
    let mut placer = Placer::new(index, group, grid_size, grid_size, false);
    let placement = placer.solve();
    let fallback = placer.stats();
    stats.placements_tried += fallback.placements_tried;
    stats.backtracks += fallback.backtracks;
    stats.fallback_used = true;
    (placement, stats)
}
