//! Grid module - the N×N tile container
//!
//! Each cell holds a symbol or is empty. Storage is a flat row-major vector
//! (`row * size + col`) so whole-grid copies stay a single allocation.
//! Coordinates: (row, col), row 0 is the top.

use crate::types::{Cell, Coord, EngineError, Symbol};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty `size`×`size` grid.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be positive");
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a grid from rows of cells.
    ///
    /// # Panics
    ///
    /// Panics on an empty or non-square input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let size = rows.len();
        assert!(size > 0, "grid size must be positive");
        assert!(
            rows.iter().all(|row| row.len() == size),
            "grid rows must form a square"
        );
        Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    /// Build a grid from letter rows, `.` marking an empty cell.
    ///
    /// ```
    /// use match_cascade_core::Grid;
    ///
    /// let grid = Grid::parse(&["AAB", "CCC", "AAB"]);
    /// assert_eq!(grid.size(), 3);
    /// assert!(grid.is_empty(0, 0).is_ok());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics on unknown letters or a non-square layout.
    pub fn parse(rows: &[&str]) -> Self {
        let rows = rows
            .iter()
            .map(|line| {
                line.chars()
                    .map(|ch| match ch {
                        '.' => None,
                        other => Some(
                            Symbol::from_label(other)
                                .unwrap_or_else(|| panic!("unknown symbol label {:?}", other)),
                        ),
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(rows)
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Result<usize, EngineError> {
        if row >= self.size || col >= self.size {
            return Err(EngineError::OutOfBounds { row, col });
        }
        Ok(row * self.size + col)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.in_bounds(self.size)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, EngineError> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), EngineError> {
        let idx = self.index(row, col)?;
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn is_empty(&self, row: usize, col: usize) -> Result<bool, EngineError> {
        self.get(row, col).map(|cell| cell.is_none())
    }

    /// Exchange two cells. Adjacency is the caller's policy; only
    /// distinctness and bounds are checked here.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<(), EngineError> {
        let ia = self.index(a.row, a.col)?;
        let ib = self.index(b.row, b.col)?;
        if ia == ib {
            return Err(EngineError::InvalidMove);
        }
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Unchecked read for in-bounds coordinates produced by the engine itself.
    #[inline(always)]
    pub(crate) fn at(&self, coord: Coord) -> Cell {
        self.cells[coord.row * self.size + coord.col]
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row * self.size + coord.col] = cell;
    }

    /// Row `row` as a slice
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// Column `col`, top to bottom
    pub fn column(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).map(move |row| self.cells[row * self.size + col])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn has_empty(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// Coordinates of every empty cell in row-major order
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.coords().filter(|&c| self.at(c).is_none()).collect()
    }

    /// All coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// Render as letter rows (`.` for empty)
    pub fn to_strings(&self) -> Vec<String> {
        (0..self.size)
            .map(|row| {
                self.row(row)
                    .iter()
                    .map(|cell| cell.map_or('.', |s| s.label()))
                    .collect()
            })
            .collect()
    }
}
