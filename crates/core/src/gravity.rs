//! Gravity and refill
//!
//! Gravity compacts each column toward the bottom (highest row index) while
//! preserving vertical order. Refill then draws a fresh symbol for every cell
//! left empty, which after gravity is always the top of a column.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::rng::SymbolSource;
use crate::types::{Coord, MAX_SYMBOLS};

/// Shift non-empty cells down within each column.
///
/// Walks every column bottom to top counting empty cells; each symbol found
/// moves down by that count and its source becomes empty. Returns the number
/// of cells moved.
pub fn apply_gravity(grid: &mut Grid) -> usize {
    let size = grid.size();
    let mut moved = 0;

    for col in 0..size {
        let mut empty_below = 0usize;
        for row in (0..size).rev() {
            let here = Coord::new(row, col);
            match grid.at(here) {
                None => empty_below += 1,
                Some(symbol) if empty_below > 0 => {
                    grid.put(Coord::new(row + empty_below, col), Some(symbol));
                    grid.put(here, None);
                    moved += 1;
                }
                Some(_) => {}
            }
        }
    }

    moved
}

/// Fill every empty cell with a symbol from `source`, column by column,
/// top to bottom. Returns the filled coordinates in that order.
pub fn refill<S: SymbolSource + ?Sized>(
    grid: &mut Grid,
    source: &mut S,
    symbol_count: u8,
) -> Vec<Coord> {
    let size = grid.size();
    let mut filled = Vec::new();

    for col in 0..size {
        for row in 0..size {
            let here = Coord::new(row, col);
            if grid.at(here).is_none() {
                grid.put(here, Some(source.next_symbol(symbol_count)));
                filled.push(here);
            }
        }
    }

    filled
}

/// Symbols that may be placed at `coord` without completing a run of
/// `min_len` with the already-filled cells above and to the left.
///
/// Used to seed boards that start without matches.
pub(crate) fn safe_symbols(
    grid: &Grid,
    coord: Coord,
    symbol_count: u8,
    min_len: usize,
) -> ArrayVec<u8, { MAX_SYMBOLS as usize }> {
    let mut out = ArrayVec::new();
    let back = min_len.saturating_sub(1);
    for index in 0..symbol_count {
        let candidate = Some(crate::types::Symbol::new(index));
        let row_run = back > 0
            && coord.col >= back
            && (1..=back).all(|d| grid.at(Coord::new(coord.row, coord.col - d)) == candidate);
        let col_run = back > 0
            && coord.row >= back
            && (1..=back).all(|d| grid.at(Coord::new(coord.row - d, coord.col)) == candidate);
        if !row_run && !col_run {
            out.push(index);
        }
    }
    out
}
