#![warn(clippy::all, clippy::pedantic)]

use once_cell::sync::Lazy;

use crate::components::{
    PieceColor::{self, Pink, Purple},
    PieceShape,
};

// Every piece that can be offered, as (offsets, colour)
const STANDARD_PIECES: &[(&[(i32, i32)], PieceColor)] = &[
    (&[(0, 0)], Pink),                                   // 1x1
    (&[(0, 0), (1, 0)], Purple),                         // 2x1 vertical
    (&[(0, 0), (0, 1)], Pink),                           // 1x2 horizontal
    (&[(0, 0), (1, 0), (0, 1)], Purple),                 // L corner, open bottom-right
    (&[(0, 0), (1, 0), (1, 1)], Pink),                   // L corner, open top-right
    (&[(1, 0), (1, 1), (0, 1)], Purple),                 // L corner, open top-left
    (&[(0, 0), (0, 1), (1, 1)], Pink),                   // L corner, open bottom-left
    (&[(0, 0), (0, 1), (0, 2)], Purple),                 // 1x3 horizontal
    (&[(0, 0), (1, 0), (2, 0)], Pink),                   // 3x1 vertical
    (&[(0, 0), (0, 1), (1, 0), (1, 1)], Purple),         // 2x2 square
    (&[(0, 0), (1, 0), (1, 1), (2, 1)], Pink),           // S
    (&[(0, 1), (1, 1), (1, 0), (2, 0)], Purple),         // Z
    (&[(0, 1), (1, 0), (1, 1), (1, 2)], Purple),         // T
    (&[(1, 0), (0, 1), (1, 1), (2, 1)], Pink),           // T, pointing left
    (&[(0, 0), (0, 1), (0, 2), (0, 3)], Pink),           // 1x4 horizontal
    (&[(0, 0), (1, 0), (2, 0), (3, 0)], Purple),         // 4x1 vertical
    (
        &[
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 1),
            (1, 1),
            (2, 1),
            (0, 2),
            (1, 2),
            (2, 2),
        ],
        Pink,
    ), // 3x3 square
];

static STANDARD_CATALOG: Lazy<PieceCatalog> = Lazy::new(|| PieceCatalog {
    templates: STANDARD_PIECES
        .iter()
        .map(|(offsets, color)| PieceShape::new(offsets, *color))
        .collect(),
});

/// Read-only set of piece templates that hands are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCatalog {
    templates: Vec<PieceShape>,
}

impl PieceCatalog {
    /// Builds a catalog from custom templates.
    ///
    /// Returns `None` when the list is empty or any template is malformed:
    /// no cells, a repeated offset, or a negative offset.
    #[must_use]
    pub fn new(templates: Vec<PieceShape>) -> Option<Self> {
        if templates.is_empty() || !templates.iter().all(PieceShape::is_well_formed) {
            return None;
        }
        Some(Self { templates })
    }

    /// The seventeen built-in pieces, from the monomino up to the 3x3 block.
    #[must_use]
    pub fn standard() -> &'static PieceCatalog {
        &STANDARD_CATALOG
    }

    #[must_use]
    pub fn templates(&self) -> &[PieceShape] {
        &self.templates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Draws a uniformly random template as a fresh, independently owned piece.
    #[must_use]
    pub fn draw(&self, rng: &mut fastrand::Rng) -> PieceShape {
        let index = rng.usize(0..self.templates.len());
        self.templates[index].clone()
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::standard().clone()
    }
}
