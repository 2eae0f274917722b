use crate::grid::Grid;
use crate::types::{Cell, Coord};

/// Lifecycle phase exported to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for a swap
    Idle,
    /// A cascade is in flight; further swaps are refused with `Busy`
    Resolving,
    /// Terminal: the settled board has no productive swap
    NoMovesLeft,
    /// Terminal: a cascade reached the configured combo goal
    ComboGoalReached,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::NoMovesLeft | Phase::ComboGoalReached)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Resolving => "resolving",
            Phase::NoMovesLeft => "no_moves_left",
            Phase::ComboGoalReached => "combo_goal",
        }
    }
}

/// Read-only copy of the grid for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GridSnapshot {
    pub size: usize,
    /// Row-major cells
    pub cells: Vec<Cell>,
    /// FNV-1a over the cell codes (0 = empty, symbol index + 1 otherwise)
    pub grid_hash: u64,
}

impl GridSnapshot {
    pub fn capture(grid: &Grid) -> Self {
        let mut s = Self::default();
        s.capture_into(grid);
        s
    }

    /// Refresh from `grid`, reusing the cell buffer.
    pub fn capture_into(&mut self, grid: &Grid) {
        self.size = grid.size();
        self.cells.clear();
        self.cells.extend_from_slice(grid.cells());
        self.grid_hash = fnv1a64(self.cells.iter().map(|c| cell_code(*c)));
    }

    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if coord.in_bounds(self.size) {
            Some(self.cells[coord.row * self.size + coord.col])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }
}

/// Full session state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub grid: GridSnapshot,
    pub phase: Phase,
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub best_combo: u32,
    pub relaxed_combos_left: u32,
    pub loops: u32,
    pub episode_id: u32,
    /// Source state the current game was dealt from; replays the deal
    pub seed: u32,
    /// Source state now
    pub rng_state: u32,
    pub moves: u32,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Idle
    }
}

/// Wire code of a cell: 0 for empty, symbol index + 1 otherwise.
pub fn cell_code(cell: Cell) -> u8 {
    cell.map_or(0, |s| s.index() + 1)
}

/// Stable 64-bit FNV-1a, so hashes match across platforms and Rust versions.
pub fn fnv1a64(bytes: impl Iterator<Item = u8>) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut h = OFFSET_BASIS;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(PRIME);
    }
    h
}
