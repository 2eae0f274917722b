//! Move-availability oracle - is the board stuck?
//!
//! Tries every right-neighbour and down-neighbour swap on a private copy of
//! the grid and asks the detector whether it produces a run of at least the
//! standard minimum length (3 unless configured otherwise).

use arrayvec::ArrayVec;

use crate::detector::has_match;
use crate::grid::Grid;
use crate::types::{Coord, Move};

/// Right and down neighbours of `coord` that lie on the grid.
fn forward_neighbours(coord: Coord, size: usize) -> ArrayVec<Coord, 2> {
    let mut out = ArrayVec::new();
    if coord.col + 1 < size {
        out.push(Coord::new(coord.row, coord.col + 1));
    }
    if coord.row + 1 < size {
        out.push(Coord::new(coord.row + 1, coord.col));
    }
    out
}

/// Visit every productive swap in row-major order, stopping when `visit`
/// returns false.
fn scan_moves(grid: &Grid, min_len: usize, mut visit: impl FnMut(Move) -> bool) {
    let mut scratch = grid.clone();
    let size = scratch.size();

    for from in grid.coords() {
        for to in forward_neighbours(from, size) {
            if scratch.at(from) == scratch.at(to) {
                continue;
            }
            let a = scratch.at(from);
            let b = scratch.at(to);
            scratch.put(from, b);
            scratch.put(to, a);
            let productive = has_match(&scratch, min_len);
            scratch.put(from, a);
            scratch.put(to, b);

            if productive && !visit(Move::new(from, to)) {
                return;
            }
        }
    }
}

/// First productive swap in row-major order, if any.
pub fn find_move(grid: &Grid, min_len: usize) -> Option<Move> {
    let mut found = None;
    scan_moves(grid, min_len, |mv| {
        found = Some(mv);
        false
    });
    found
}

/// Whether at least one adjacent swap would produce a match.
pub fn has_available_move(grid: &Grid, min_len: usize) -> bool {
    find_move(grid, min_len).is_some()
}

/// Every productive swap in row-major order.
pub fn available_moves(grid: &Grid, min_len: usize) -> Vec<Move> {
    let mut moves = Vec::new();
    scan_moves(grid, min_len, |mv| {
        moves.push(mv);
        true
    });
    moves
}
