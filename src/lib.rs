pub mod app;
pub mod board;
pub mod catalog;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod persistence;
pub mod supply;
pub mod ui;

#[cfg(test)]
mod tests;

pub use board::{Board, ClearResult, Preview};
pub use catalog::PieceCatalog;
pub use components::{Cell, Coord, PieceColor, PieceShape};
pub use engine::{GameEngine, GameState, PlacementOutcome, RefreshOutcome};
pub use error::{GameError, PersistenceError, PlacementError, SupplyError};
pub use persistence::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use supply::Supply;
