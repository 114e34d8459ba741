#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! A*-family shortest path search over the world grid.
//!
//! Movement is 8-directional and every traversable step costs exactly one.
//! The default heuristic is the Manhattan distance to the goal. It
//! overestimates diagonal routes, so on cluttered grids the search may settle
//! for a route one or two steps longer than the shortest one; expansion order
//! (and therefore which of several routes is returned) depends on it and on the
//! open-set scan order, so both are fixed parts of the search's observable
//! behavior. [`Heuristic::Chebyshev`] never overestimates and always yields a
//! route with the minimum number of steps.

use std::collections::HashMap;

use grid_pursuit_core::Cell;
use grid_pursuit_world::Grid;
use thiserror::Error;
use tracing::trace;

/// Score read for cells the search has not reached yet.
const UNVISITED_SCORE: u32 = 1_000_000;

/// Cost of moving onto any traversable neighbor, diagonal or not.
const STEP_COST: u32 = 1;

/// Estimate of the remaining cost from a cell to the goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Sum of the axis distances.
    #[default]
    Manhattan,
    /// Larger of the axis distances; exact on an open grid.
    Chebyshev,
}

impl Heuristic {
    /// Estimated cost of travelling from `from` to `to`.
    #[must_use]
    pub fn estimate(self, from: Cell, to: Cell) -> u32 {
        match self {
            Self::Manhattan => from.manhattan_distance(to),
            Self::Chebyshev => from.chebyshev_distance(to),
        }
    }
}

/// Reported when the goal cannot be reached from the start.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("no path from {start} to {goal}")]
pub struct NoPath {
    /// Cell the search started from.
    pub start: Cell,
    /// Cell the search tried to reach.
    pub goal: Cell,
}

/// Ordered route from a start cell to a goal cell, both inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// Cells along the route, starting with the start cell.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell the route starts from.
    #[must_use]
    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    /// Cell the route ends on.
    #[must_use]
    pub fn goal(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of single-tile steps along the route.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.cells.len() - 1
    }

    /// Cell reached by the first step, or `None` for a route to oneself.
    #[must_use]
    pub fn first_step(&self) -> Option<Cell> {
        self.cells.get(1).copied()
    }

    /// Consumes the route, yielding its cells.
    #[must_use]
    pub fn into_vec(self) -> Vec<Cell> {
        self.cells
    }
}

/// Computes a route from `start` to `goal` using the Manhattan heuristic.
///
/// See [`find_path_with`].
///
/// # Panics
///
/// Panics when `start` lies outside the grid.
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Result<Path, NoPath> {
    find_path_with(grid, start, goal, Heuristic::Manhattan)
}

/// Computes a route from `start` to `goal` guided by `heuristic`.
///
/// Blocking and out-of-bounds cells are never expanded, so a blocking or
/// off-grid goal is reported as [`NoPath`]. A route to the start cell itself
/// is the singleton path.
///
/// # Panics
///
/// Panics when `start` lies outside the grid.
pub fn find_path_with(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    heuristic: Heuristic,
) -> Result<Path, NoPath> {
    assert!(
        grid.contains(start),
        "path search started outside the grid at {start}"
    );

    let mut search = Search::new(grid, start, goal, heuristic);
    let result = search.run();
    trace!(
        %start,
        %goal,
        expanded = search.expanded,
        found = result.is_some(),
        "path search finished"
    );
    result.ok_or(NoPath { start, goal })
}

/// Scratch state owned by a single search invocation.
#[derive(Debug)]
struct Search<'a> {
    grid: &'a Grid,
    start: Cell,
    goal: Cell,
    heuristic: Heuristic,
    open: Vec<Cell>,
    came_from: HashMap<Cell, Cell>,
    g_scores: HashMap<Cell, u32>,
    f_scores: HashMap<Cell, u32>,
    expanded: usize,
}

impl<'a> Search<'a> {
    fn new(grid: &'a Grid, start: Cell, goal: Cell, heuristic: Heuristic) -> Self {
        let mut g_scores = HashMap::new();
        let mut f_scores = HashMap::new();
        let _ = g_scores.insert(start, 0);
        let _ = f_scores.insert(start, heuristic.estimate(start, goal));

        Self {
            grid,
            start,
            goal,
            heuristic,
            open: vec![start],
            came_from: HashMap::new(),
            g_scores,
            f_scores,
            expanded: 0,
        }
    }

    fn run(&mut self) -> Option<Path> {
        while !self.open.is_empty() {
            let index = self.lowest_f_index();
            let current = self.open[index];
            if current == self.goal {
                return Some(self.reconstruct(current));
            }

            let _ = self.open.swap_remove(index);
            self.expanded += 1;

            let tentative = self.g_score(current) + STEP_COST;
            for neighbor in neighbors(current, self.grid) {
                if tentative >= self.g_score(neighbor) {
                    continue;
                }

                let _ = self.came_from.insert(neighbor, current);
                let _ = self.g_scores.insert(neighbor, tentative);
                let _ = self
                    .f_scores
                    .insert(neighbor, tentative + self.heuristic.estimate(neighbor, self.goal));
                if !self.open.contains(&neighbor) {
                    self.open.push(neighbor);
                }
            }
        }

        None
    }

    /// Index of the first open cell holding the lowest f-score.
    fn lowest_f_index(&self) -> usize {
        let mut best = 0;
        let mut best_score = self.f_score(self.open[0]);
        for (index, &cell) in self.open.iter().enumerate().skip(1) {
            let score = self.f_score(cell);
            if score < best_score {
                best = index;
                best_score = score;
            }
        }
        best
    }

    fn g_score(&self, cell: Cell) -> u32 {
        self.g_scores.get(&cell).copied().unwrap_or(UNVISITED_SCORE)
    }

    fn f_score(&self, cell: Cell) -> u32 {
        self.f_scores.get(&cell).copied().unwrap_or(UNVISITED_SCORE)
    }

    fn reconstruct(&self, goal: Cell) -> Path {
        let mut cells = vec![goal];
        let mut current = goal;
        while let Some(&previous) = self.came_from.get(&current) {
            cells.push(previous);
            current = previous;
        }
        cells.reverse();
        debug_assert_eq!(cells.first(), Some(&self.start));
        Path { cells }
    }
}

/// Traversable 8-neighbors in row-major order of the surrounding block.
fn neighbors(cell: Cell, grid: &Grid) -> NeighborIter {
    let mut neighbors = NeighborIter::default();

    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }

            let neighbor = Cell::new(cell.x() + dx, cell.y() + dy);
            if !grid.contains(neighbor) || grid.is_blocking(neighbor) {
                continue;
            }
            neighbors.push(neighbor);
        }
    }

    neighbors
}

#[derive(Clone, Debug, Default)]
struct NeighborIter {
    buffer: [Option<Cell>; 8],
    len: usize,
    cursor: usize,
}

impl NeighborIter {
    fn push(&mut self, cell: Cell) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}
