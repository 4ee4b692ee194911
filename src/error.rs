#![warn(clippy::all, clippy::pedantic)]

use std::fmt;

use crate::engine::GameState;

// Rejections from Board::place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    Empty,
    RepeatedCell { row: i32, col: i32 },
    OutOfBounds { row: i32, col: i32 },
    Occupied { row: usize, col: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Empty => write!(f, "piece has no cells"),
            PlacementError::RepeatedCell { row, col } => {
                write!(f, "piece covers offset ({row}, {col}) more than once")
            }
            PlacementError::OutOfBounds { row, col } => {
                write!(f, "cell ({row}, {col}) is outside the board")
            }
            PlacementError::Occupied { row, col } => {
                write!(f, "cell ({row}, {col}) is already filled")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

// Rejections from Supply slot access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyError {
    OutOfRange { index: usize, slots: usize },
    Empty(usize),
}

impl fmt::Display for SupplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplyError::OutOfRange { index, slots } => {
                write!(f, "slot {index} is out of range (0..{slots})")
            }
            SupplyError::Empty(index) => write!(f, "slot {index} has already been used"),
        }
    }
}

impl std::error::Error for SupplyError {}

/// Every way a [`GameEngine`](crate::engine::GameEngine) call can be rejected.
///
/// A rejected call never changes engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The piece does not fit at the requested anchor.
    InvalidPlacement {
        slot: usize,
        row: i32,
        col: i32,
        reason: PlacementError,
    },
    /// The slot index is out of range or the slot was already consumed.
    InvalidSlot(SupplyError),
    /// The call is not allowed in the engine's current state.
    IllegalStateTransition {
        operation: &'static str,
        state: GameState,
    },
    /// A manual refresh was requested while a placement is still possible.
    MovesStillAvailable,
}

impl GameError {
    /// True for the state-machine rejections, including a refused refresh.
    #[must_use]
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            GameError::IllegalStateTransition { .. } | GameError::MovesStillAvailable
        )
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPlacement {
                slot,
                row,
                col,
                reason,
            } => write!(f, "piece {slot} cannot go at ({row}, {col}): {reason}"),
            GameError::InvalidSlot(err) => write!(f, "invalid slot: {err}"),
            GameError::IllegalStateTransition { operation, state } => {
                write!(f, "{operation} is not allowed while {state}")
            }
            GameError::MovesStillAvailable => {
                write!(f, "refresh refused: a piece can still be placed")
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::InvalidPlacement { reason, .. } => Some(reason),
            GameError::InvalidSlot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SupplyError> for GameError {
    fn from(err: SupplyError) -> Self {
        GameError::InvalidSlot(err)
    }
}

// Failures reading or writing the stored high score
#[derive(Debug)]
pub enum PersistenceError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Unavailable,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(err) => write!(f, "high score file error: {err}"),
            PersistenceError::Parse(err) => write!(f, "high score file is malformed: {err}"),
            PersistenceError::Serialize(err) => write!(f, "could not encode high score: {err}"),
            PersistenceError::Unavailable => write!(f, "high score storage is unavailable"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(err) => Some(err),
            PersistenceError::Parse(err) => Some(err),
            PersistenceError::Serialize(err) => Some(err),
            PersistenceError::Unavailable => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err)
    }
}

impl From<toml::de::Error> for PersistenceError {
    fn from(err: toml::de::Error) -> Self {
        PersistenceError::Parse(err)
    }
}

impl From<toml::ser::Error> for PersistenceError {
    fn from(err: toml::ser::Error) -> Self {
        PersistenceError::Serialize(err)
    }
}
