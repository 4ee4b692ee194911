#![warn(clippy::all, clippy::pedantic)]

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::components::{Cell, Coord, PieceShape};
use crate::config::RulesConfig;
use crate::error::PlacementError;

/// Result of clearing every full row and column after a placement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearResult {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
    /// Unique cells emptied, in row-major order. A cell on both a full row
    /// and a full column appears once.
    pub cells: Vec<Coord>,
    /// Score awarded for the clear, based on `lines()` rather than `cells`.
    pub score_delta: u32,
}

impl ClearResult {
    /// Rows plus columns cleared; an intersection counts towards both.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines() == 0
    }
}

/// Hover feedback for a piece held over an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Covered cells that fall inside the board.
    pub cells: Vec<Coord>,
    pub valid: bool,
}

/// The play field, stored row-major as `cells[row][col]`.
///
/// Width and height are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![None; width]; height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Overwrites one cell. Returns false when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(None);
        }
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells
            .get(row)
            .is_some_and(|r| r.iter().all(Option::is_some))
    }

    #[must_use]
    pub fn is_col_full(&self, col: usize) -> bool {
        col < self.width && self.cells.iter().all(|r| r[col].is_some())
    }

    // Maps a signed coordinate to an index pair when it lies on the board
    fn in_bounds(&self, row: i32, col: i32) -> Option<(usize, usize)> {
        let r = usize::try_from(row).ok()?;
        let c = usize::try_from(col).ok()?;
        (r < self.height && c < self.width).then_some((r, c))
    }

    fn check_placement(
        &self,
        shape: &PieceShape,
        row: i32,
        col: i32,
    ) -> Result<(), PlacementError> {
        if shape.is_empty() {
            return Err(PlacementError::Empty);
        }
        let mut offsets = BTreeSet::new();
        if let Some(&(dr, dc)) = shape.offsets.iter().find(|o| !offsets.insert(**o)) {
            return Err(PlacementError::RepeatedCell { row: dr, col: dc });
        }

        for (target_row, target_col) in shape.cells_at(row, col) {
            let Some((r, c)) = self.in_bounds(target_row, target_col) else {
                return Err(PlacementError::OutOfBounds {
                    row: target_row,
                    col: target_col,
                });
            };
            if self.cells[r][c].is_some() {
                return Err(PlacementError::Occupied { row: r, col: c });
            }
        }

        Ok(())
    }

    /// True when every cell the piece would cover is on the board and empty.
    /// A piece with no cells or a repeated offset never fits.
    #[must_use]
    pub fn is_valid_placement(&self, shape: &PieceShape, row: i32, col: i32) -> bool {
        self.check_placement(shape, row, col).is_ok()
    }

    /// Fills the piece's cells with its colour and returns how many were filled.
    ///
    /// The board is untouched when the placement is invalid.
    pub fn place(
        &mut self,
        shape: &PieceShape,
        row: i32,
        col: i32,
    ) -> Result<usize, PlacementError> {
        self.check_placement(shape, row, col)?;

        let mut filled = 0;
        for (r, c) in shape.cells_at(row, col) {
            if let Some((r, c)) = self.in_bounds(r, c) {
                self.cells[r][c] = Some(shape.color);
                filled += 1;
            }
        }

        debug!("Placed {filled}-cell piece at ({row}, {col})");
        Ok(filled)
    }

    /// Covered in-bounds cells plus whether the piece could be placed there.
    #[must_use]
    pub fn preview(&self, shape: &PieceShape, row: i32, col: i32) -> Preview {
        let cells = shape
            .cells_at(row, col)
            .filter_map(|(r, c)| self.in_bounds(r, c))
            .map(|(r, c)| Coord::new(r, c))
            .collect();

        Preview {
            cells,
            valid: self.is_valid_placement(shape, row, col),
        }
    }

    /// Empties every full row and column in one step and scores the clear.
    ///
    /// Rows and columns are detected against the board as it was before any
    /// cell is emptied, so a cell shared by a full row and a full column is
    /// emptied once but both lines count towards the score.
    pub fn clear_completed_lines(&mut self, rules: &RulesConfig) -> ClearResult {
        let rows: Vec<usize> = (0..self.height).filter(|&r| self.is_row_full(r)).collect();
        let cols: Vec<usize> = (0..self.width).filter(|&c| self.is_col_full(c)).collect();

        let mut cleared = BTreeSet::new();
        for &r in &rows {
            cleared.extend((0..self.width).map(|c| Coord::new(r, c)));
        }
        for &c in &cols {
            cleared.extend((0..self.height).map(|r| Coord::new(r, c)));
        }

        for coord in &cleared {
            self.cells[coord.row][coord.col] = None;
        }

        let result = ClearResult {
            score_delta: rules.clear_score(rows.len() + cols.len()),
            rows,
            cols,
            cells: cleared.into_iter().collect(),
        };

        if !result.is_empty() {
            debug!(
                "Cleared rows {:?} and columns {:?} ({} cells, +{})",
                result.rows,
                result.cols,
                result.cells.len(),
                result.score_delta
            );
        }

        result
    }

    /// True when at least one of `shapes` fits somewhere on the board.
    ///
    /// Tries every anchor of every piece; no pruning, so a `false` here is a
    /// proof that no move exists.
    pub fn any_placement_exists<'a, I>(&self, shapes: I) -> bool
    where
        I: IntoIterator<Item = &'a PieceShape>,
    {
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);

        for shape in shapes {
            if shape.is_empty() {
                continue;
            }
            for row in 0..height {
                for col in 0..width {
                    if self.is_valid_placement(shape, row, col) {
                        trace!("Move found for {}-cell piece at ({row}, {col})", shape.size());
                        return true;
                    }
                }
            }
        }

        trace!("No placement exists for the offered pieces");
        false
    }
}
