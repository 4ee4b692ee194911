#![warn(clippy::all, clippy::pedantic)]

use log::debug;

use crate::catalog::PieceCatalog;
use crate::components::PieceShape;
use crate::error::SupplyError;

/// The offered pieces. Each slot holds a piece until it is placed, then
/// stays empty until the whole hand is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supply {
    slots: Vec<Option<PieceShape>>,
}

impl Supply {
    /// A supply of `slot_count` empty slots.
    #[must_use]
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<PieceShape>] {
        &self.slots
    }

    /// The piece waiting in `index`.
    pub fn get(&self, index: usize) -> Result<&PieceShape, SupplyError> {
        match self.slots.get(index) {
            Some(Some(piece)) => Ok(piece),
            Some(None) => Err(SupplyError::Empty(index)),
            None => Err(SupplyError::OutOfRange {
                index,
                slots: self.slots.len(),
            }),
        }
    }

    /// Replaces every slot with a fresh draw, discarding whatever was there.
    pub fn refill_all(&mut self, catalog: &PieceCatalog, rng: &mut fastrand::Rng) {
        for slot in &mut self.slots {
            *slot = Some(catalog.draw(rng));
        }
        debug!("Dealt a fresh hand of {} pieces", self.slots.len());
    }

    /// Draws only into slots that are currently empty.
    pub fn fill_empty(&mut self, catalog: &PieceCatalog, rng: &mut fastrand::Rng) -> usize {
        let mut drawn = 0;
        for slot in self.slots.iter_mut().filter(|s| s.is_none()) {
            *slot = Some(catalog.draw(rng));
            drawn += 1;
        }
        drawn
    }

    /// Empties `index`, handing back the piece that was there.
    pub fn consume(&mut self, index: usize) -> Result<PieceShape, SupplyError> {
        let slots = self.slots.len();
        match self.slots.get_mut(index) {
            Some(slot) => slot.take().ok_or(SupplyError::Empty(index)),
            None => Err(SupplyError::OutOfRange { index, slots }),
        }
    }

    #[must_use]
    pub fn is_fully_consumed(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Pieces still waiting to be placed, in slot order.
    pub fn active_shapes(&self) -> impl Iterator<Item = &PieceShape> {
        self.slots.iter().flatten()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_shapes().count()
    }
}
