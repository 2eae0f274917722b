//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core rules, adapters, presentation layers).
//!
//! # Grid Geometry
//!
//! - **Size**: 8x8 by default (configurable N×N)
//! - **Coordinates**: `(row, col)`, zero-indexed, row 0 is the top
//! - **Adjacency**: Manhattan distance exactly 1 (no diagonals)
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_SCORE` | 10 | Points per matched cell |
//! | `CROSS_BONUS_FACTOR` | 3 | Intersection bonus, in base units |
//! | `COMBO_STEP_FIFTHS` | 1 | Combo multiplier step (`1 + depth × 0.2`) |
//! | `RELAXED_UNLOCK_SCORE` | 10000 | Score needed to unlock relaxed mode |
//! | `RELAXED_COMBO_BUDGET` | 100 | Relaxed cascades granted per activation |
//!
//! # Examples
//!
//! ```
//! use match_cascade_types::{Coord, Symbol, GRID_SIZE};
//!
//! let a = Coord::new(0, 0);
//! let b = Coord::new(0, 1);
//! assert!(a.is_adjacent(b));
//! assert!(!a.is_adjacent(Coord::new(1, 1)));
//!
//! let apple = Symbol::new(0);
//! assert_eq!(apple.label(), 'A');
//! assert_eq!(Symbol::from_label('b'), Some(Symbol::new(1)));
//!
//! assert_eq!(GRID_SIZE, 8);
//! ```

use std::fmt;

/// Default grid size (8x8)
pub const GRID_SIZE: usize = 8;

/// Default alphabet size (4 distinct symbols)
pub const SYMBOL_COUNT: u8 = 4;

/// Largest supported alphabet
pub const MAX_SYMBOLS: u8 = 8;

/// Points per matched cell
pub const BASE_SCORE: u32 = 10;

/// Standard minimum run length
pub const MIN_MATCH_LEN: usize = 3;

/// Minimum run length for the first pass of a relaxed cascade
pub const RELAXED_MATCH_LEN: usize = 2;

/// Intersection bonus in base units (3 × base)
pub const CROSS_BONUS_FACTOR: u32 = 3;

/// Combo multiplier step in fifths: `1 + depth × 0.2 == (5 + depth) / 5`
pub const COMBO_STEP_FIFTHS: u32 = 1;

/// Score needed before relaxed mode can be activated
pub const RELAXED_UNLOCK_SCORE: u32 = 10_000;

/// Relaxed cascades granted per activation
pub const RELAXED_COMBO_BUDGET: u32 = 100;

/// Display glyphs for the default alphabet.
pub const GLYPHS: [&str; MAX_SYMBOLS as usize] = ["🍎", "🍌", "🍇", "🍓", "🍊", "🍒", "🍋", "🍉"];

/// A tile symbol, identified by its index in the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
    /// Create a symbol from its alphabet index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_SYMBOLS`.
    pub const fn new(index: u8) -> Self {
        assert!(index < MAX_SYMBOLS, "symbol index out of range");
        Self(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Single-letter label (`'A'` for index 0).
    ///
    /// # Examples
    ///
    /// ```
    /// use match_cascade_types::Symbol;
    ///
    /// assert_eq!(Symbol::new(2).label(), 'C');
    /// ```
    pub fn label(self) -> char {
        (b'A' + self.0) as char
    }

    /// Parse a label (case-insensitive).
    pub fn from_label(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return None;
        }
        let index = upper as u8 - b'A';
        if index < MAX_SYMBOLS {
            Some(Self(index))
        } else {
            None
        }
    }

    pub fn glyph(self) -> &'static str {
        GLYPHS[self.0 as usize]
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Cell on the grid (None = empty, Some = symbol)
pub type Cell = Option<Symbol>;

/// Grid coordinate, zero-indexed with row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance exactly 1.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Scan axis of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Left to right along a row
    Row,
    /// Top to bottom along a column
    Column,
}

impl Direction {
    /// Offset of the `i`-th cell from a run origin.
    pub fn step(self, origin: Coord, i: usize) -> Coord {
        match self {
            Direction::Row => Coord::new(origin.row, origin.col + i),
            Direction::Column => Coord::new(origin.row + i, origin.col),
        }
    }
}

/// A requested swap of two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} {},{}",
            self.from.row, self.from.col, self.to.row, self.to.col
        )
    }
}

/// Errors surfaced by the engine.
///
/// `OutOfBounds` and `InvalidConfig` indicate caller bugs; the rest are
/// recoverable rejections with no state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate outside `[0, N)`
    OutOfBounds { row: usize, col: usize },
    /// Non-adjacent or self swap
    InvalidMove,
    /// A cascade is already in flight
    Busy,
    /// The session reached a terminal state; call `new_game`
    GameOver,
    /// Relaxed mode requested below the unlock score
    RelaxedLocked,
    /// Rejected configuration value
    InvalidConfig(&'static str),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::OutOfBounds { row, col } => {
                write!(f, "coordinate ({}, {}) is out of bounds", row, col)
            }
            EngineError::InvalidMove => write!(f, "swap must target two adjacent cells"),
            EngineError::Busy => write!(f, "a cascade is already in progress"),
            EngineError::GameOver => write!(f, "no moves left; start a new game"),
            EngineError::RelaxedLocked => write!(f, "score too low to unlock relaxed mode"),
            EngineError::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
