#![warn(clippy::all, clippy::pedantic)]

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Colour tag carried by every cell of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    Pink,
    Purple,
}

impl PieceColor {
    #[must_use]
    pub fn get_color(self) -> ratatui::style::Color {
        match self {
            PieceColor::Pink => ratatui::style::Color::Rgb(255, 175, 215),
            PieceColor::Purple => ratatui::style::Color::Rgb(200, 160, 255),
        }
    }
}

/// A board cell: empty, or filled with the colour of the piece that covered it.
pub type Cell = Option<PieceColor>;

/// A (row, col) coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A piece: relative (row, col) offsets from its anchor plus one colour.
///
/// Instances handed out by the catalog are owned values, so mutating one
/// never touches the catalog template or any other drawn piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceShape {
    pub offsets: Vec<(i32, i32)>,
    pub color: PieceColor,
}

impl PieceShape {
    #[must_use]
    pub fn new(offsets: &[(i32, i32)], color: PieceColor) -> Self {
        Self {
            offsets: offsets.to_vec(),
            color,
        }
    }

    /// Number of cells the piece covers.
    #[must_use]
    pub fn size(&self) -> usize {
        self.offsets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// True when the piece has cells, none of them repeated, and every
    /// offset is non-negative.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let mut seen = BTreeSet::new();
        !self.is_empty()
            && self
                .offsets
                .iter()
                .all(|&(dr, dc)| dr >= 0 && dc >= 0 && seen.insert((dr, dc)))
    }

    /// Signed board coordinates covered when anchored at `(row, col)`, in offset order.
    /// Nothing is bounds-checked here.
    pub fn cells_at(&self, row: i32, col: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets
            .iter()
            .map(move |(dr, dc)| (row.saturating_add(*dr), col.saturating_add(*dc)))
    }
}
