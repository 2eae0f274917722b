//! Match detection - maximal same-symbol runs along rows and columns
//!
//! Rows are scanned first (top to bottom, left to right), then columns (left to
//! right, top to bottom). Row-runs and column-runs that share a cell are both
//! kept; the scorer uses the overlap for the intersection bonus.

use crate::grid::Grid;
use crate::types::{Cell, Coord, Direction, MIN_MATCH_LEN};

/// A single maximal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchGroup {
    pub origin: Coord,
    pub direction: Direction,
    pub length: usize,
}

impl MatchGroup {
    pub fn new(origin: Coord, direction: Direction, length: usize) -> Self {
        Self {
            origin,
            direction,
            length,
        }
    }

    /// Covered cells, from the origin outward
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.length).map(move |i| self.direction.step(self.origin, i))
    }

    pub fn contains(&self, coord: Coord) -> bool {
        match self.direction {
            Direction::Row => {
                coord.row == self.origin.row
                    && coord.col >= self.origin.col
                    && coord.col < self.origin.col + self.length
            }
            Direction::Column => {
                coord.col == self.origin.col
                    && coord.row >= self.origin.row
                    && coord.row < self.origin.row + self.length
            }
        }
    }
}

/// Result of one detection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    groups: Vec<MatchGroup>,
}

impl MatchSet {
    pub fn from_groups(groups: Vec<MatchGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[MatchGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Every covered cell exactly once, row-major
    pub fn matched_cells(&self) -> Vec<Coord> {
        let mut cells: Vec<Coord> = self.groups.iter().flat_map(|g| g.cells()).collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }

    /// Cells covered by both a row-run and a column-run of length ≥ 3,
    /// deduplicated, row-major.
    pub fn intersections(&self) -> Vec<Coord> {
        let mut out = Vec::new();
        for row_run in self
            .groups
            .iter()
            .filter(|g| g.direction == Direction::Row && g.length >= MIN_MATCH_LEN)
        {
            for cell in row_run.cells() {
                let crossed = self.groups.iter().any(|g| {
                    g.direction == Direction::Column && g.length >= MIN_MATCH_LEN && g.contains(cell)
                });
                if crossed {
                    out.push(cell);
                }
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }
}

/// Detect all maximal runs of length ≥ `min_len`.
///
/// Empty cells never start or continue a run; runs stop at the grid edge.
pub fn detect_matches(grid: &Grid, min_len: usize) -> MatchSet {
    let size = grid.size();
    let min_len = min_len.max(1);
    let mut groups = Vec::new();

    for row in 0..size {
        scan_line(
            size,
            |i| grid.at(Coord::new(row, i)),
            Coord::new(row, 0),
            Direction::Row,
            min_len,
            &mut groups,
        );
    }

    for col in 0..size {
        scan_line(
            size,
            |i| grid.at(Coord::new(i, col)),
            Coord::new(0, col),
            Direction::Column,
            min_len,
            &mut groups,
        );
    }

    MatchSet { groups }
}

/// Whether any run of length ≥ `min_len` exists (stops at the first one).
pub fn has_match(grid: &Grid, min_len: usize) -> bool {
    let size = grid.size();
    let min_len = min_len.max(1);
    (0..size).any(|line| {
        longest_run(size, |i| grid.at(Coord::new(line, i))) >= min_len
            || longest_run(size, |i| grid.at(Coord::new(i, line))) >= min_len
    })
}

fn scan_line(
    len: usize,
    cell_at: impl Fn(usize) -> Cell,
    start: Coord,
    direction: Direction,
    min_len: usize,
    out: &mut Vec<MatchGroup>,
) {
    let mut i = 0;
    while i < len {
        let Some(symbol) = cell_at(i) else {
            i += 1;
            continue;
        };
        let mut end = i + 1;
        while end < len && cell_at(end) == Some(symbol) {
            end += 1;
        }
        let run = end - i;
        if run >= min_len {
            out.push(MatchGroup::new(direction.step(start, i), direction, run));
        }
        i = end;
    }
}

fn longest_run(len: usize, cell_at: impl Fn(usize) -> Cell) -> usize {
    let mut best = 0;
    let mut current = 0;
    let mut prev: Cell = None;
    for i in 0..len {
        let cell = cell_at(i);
        current = match cell {
            Some(_) if cell == prev => current + 1,
            Some(_) => 1,
            None => 0,
        };
        prev = cell;
        best = best.max(current);
    }
    best
}
