#![warn(clippy::all, clippy::pedantic)]

use std::fmt;

use log::{debug, info, warn};

use crate::board::{Board, ClearResult, Preview};
use crate::catalog::PieceCatalog;
use crate::components::Coord;
use crate::config::{ConfigError, RulesConfig};
use crate::error::GameError;
use crate::persistence::HighScoreStore;
use crate::supply::Supply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// No offered piece fits and the one-off reprieve is still unused.
    AwaitingSecondChanceDecision,
    GameOver,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Playing => write!(f, "playing"),
            GameState::AwaitingSecondChanceDecision => {
                write!(f, "awaiting a second-chance decision")
            }
            GameState::GameOver => write!(f, "game over"),
        }
    }
}

/// Everything a successful placement changed, for the caller to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub slot: usize,
    /// Cells the piece now covers, before any clear.
    pub cells: Vec<Coord>,
    pub clear: ClearResult,
    /// Placement points plus clear points.
    pub score_delta: u32,
    /// True when the placement used up the hand and a new one was dealt.
    pub refilled: bool,
    pub state: GameState,
}

impl PlacementOutcome {
    #[must_use]
    pub fn cells_filled(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.clear.lines()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Points actually taken off the score, after clamping at zero.
    pub penalty: u32,
    pub state: GameState,
}

/// The whole game: board, offered pieces, score and the end-of-game flow.
///
/// Every call either commits all of its changes before returning or is
/// rejected with a [`GameError`] and changes nothing.
pub struct GameEngine<S: HighScoreStore> {
    rules: RulesConfig,
    catalog: PieceCatalog,
    rng: fastrand::Rng,
    store: S,
    board: Board,
    supply: Supply,
    state: GameState,
    score: u32,
    high_score: u32,
    second_chance_used: bool,
    final_score: Option<u32>,
}

impl<S: HighScoreStore> GameEngine<S> {
    /// Creates an engine with the standard pieces and starts the first game.
    pub fn new(rules: RulesConfig, store: S) -> Result<Self, ConfigError> {
        Self::with_catalog(rules, PieceCatalog::default(), store)
    }

    pub fn with_catalog(
        rules: RulesConfig,
        catalog: PieceCatalog,
        store: S,
    ) -> Result<Self, ConfigError> {
        rules.validate()?;

        let rng = rules
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        let mut engine = Self {
            board: Board::new(rules.grid_width, rules.grid_height),
            supply: Supply::new(rules.slot_count),
            rules,
            catalog,
            rng,
            store,
            state: GameState::Playing,
            score: 0,
            high_score: 0,
            second_chance_used: false,
            final_score: None,
        };
        engine.start_game();
        Ok(engine)
    }

    /// Resets the board, hand, score and second chance, then checks that the
    /// new hand is playable.
    pub fn start_game(&mut self) -> GameState {
        info!("Starting new game");

        self.score = 0;
        self.second_chance_used = false;
        self.final_score = None;
        self.board = Board::new(self.rules.grid_width, self.rules.grid_height);
        self.supply = Supply::new(self.rules.slot_count);

        match self.store.load_high_score() {
            Ok(stored) => self.high_score = self.high_score.max(stored),
            Err(err) => warn!("Could not load high score, keeping {}: {err}", self.high_score),
        }

        self.supply.refill_all(&self.catalog, &mut self.rng);
        self.state = GameState::Playing;
        self.check_moves()
    }

    /// Discards the current game and starts a new one.
    pub fn restart(&mut self) -> GameState {
        self.start_game()
    }

    /// Places the piece from `slot` with its anchor at `(row, col)`.
    ///
    /// Scores one point per covered cell, clears full lines, deals a new hand
    /// once every slot is used, and re-evaluates whether any move remains.
    pub fn place_piece(
        &mut self,
        slot: usize,
        row: i32,
        col: i32,
    ) -> Result<PlacementOutcome, GameError> {
        self.require(GameState::Playing, "place_piece")?;

        let shape = self.supply.get(slot)?;
        let cells: Vec<Coord> = shape
            .cells_at(row, col)
            .filter_map(|(r, c)| {
                Some(Coord::new(
                    usize::try_from(r).ok()?,
                    usize::try_from(c).ok()?,
                ))
            })
            .collect();
        let filled = match self.board.place(shape, row, col) {
            Ok(filled) => filled,
            Err(reason) => {
                debug!("Rejected piece {slot} at ({row}, {col}): {reason}");
                return Err(GameError::InvalidPlacement {
                    slot,
                    row,
                    col,
                    reason,
                });
            }
        };
        self.supply.consume(slot)?;

        let placement_points = u32::try_from(filled)
            .unwrap_or(u32::MAX)
            .saturating_mul(crate::game::POINTS_PER_CELL);
        self.add_score(placement_points);

        let clear = self.board.clear_completed_lines(&self.rules);
        self.add_score(clear.score_delta);

        let refilled = self.supply.is_fully_consumed();
        if refilled {
            self.supply.refill_all(&self.catalog, &mut self.rng);
        }

        let state = self.check_moves();

        Ok(PlacementOutcome {
            slot,
            cells,
            score_delta: placement_points.saturating_add(clear.score_delta),
            clear,
            refilled,
            state,
        })
    }

    /// Deals a new hand when no offered piece fits, minus the configured
    /// penalty. Refused while any move is still available.
    pub fn request_refresh(&mut self) -> Result<RefreshOutcome, GameError> {
        self.require(GameState::Playing, "request_refresh")?;

        if self.moves_available() {
            debug!("Refresh refused, moves are still available");
            return Err(GameError::MovesStillAvailable);
        }

        let penalty = self.rules.refresh_penalty.min(self.score);
        if penalty > 0 {
            info!("Applying refresh penalty of {penalty}");
            self.score -= penalty;
        }

        self.supply.refill_all(&self.catalog, &mut self.rng);
        let state = self.check_moves();
        Ok(RefreshOutcome { penalty, state })
    }

    /// Uses the second chance: a fresh hand, and back to play if it fits.
    /// An unplayable hand now ends the game without another offer.
    pub fn accept_second_chance(&mut self) -> Result<GameState, GameError> {
        self.require(
            GameState::AwaitingSecondChanceDecision,
            "accept_second_chance",
        )?;

        info!("Second chance accepted");
        self.second_chance_used = true;
        self.supply.refill_all(&self.catalog, &mut self.rng);
        self.state = GameState::Playing;
        Ok(self.check_moves())
    }

    /// Gives up the second chance, which ends the game.
    pub fn decline_second_chance(&mut self) -> Result<GameState, GameError> {
        self.require(
            GameState::AwaitingSecondChanceDecision,
            "decline_second_chance",
        )?;

        info!("Second chance declined");
        self.second_chance_used = true;
        self.finish_game();
        self.state = GameState::GameOver;
        Ok(self.state)
    }

    /// Hover feedback for the piece in `slot` anchored at `(row, col)`.
    pub fn preview(&self, slot: usize, row: i32, col: i32) -> Result<Preview, GameError> {
        let shape = self.supply.get(slot)?;
        Ok(self.board.preview(shape, row, col))
    }

    #[must_use]
    pub fn moves_available(&self) -> bool {
        self.board.any_placement_exists(self.supply.active_shapes())
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn supply(&self) -> &Supply {
        &self.supply
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn second_chance_used(&self) -> bool {
        self.second_chance_used
    }

    /// Score the last game ended with; `None` until the game is over.
    #[must_use]
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    fn require(&self, expected: GameState, operation: &'static str) -> Result<(), GameError> {
        if self.state == expected {
            Ok(())
        } else {
            warn!("Rejected {operation} while {}", self.state);
            Err(GameError::IllegalStateTransition {
                operation,
                state: self.state,
            })
        }
    }

    // Decides between play, the second-chance prompt and game over
    fn check_moves(&mut self) -> GameState {
        self.state = if self.moves_available() {
            GameState::Playing
        } else if !self.second_chance_used {
            info!("No moves left, offering a second chance");
            GameState::AwaitingSecondChanceDecision
        } else {
            self.finish_game();
            GameState::GameOver
        };
        self.state
    }

    fn finish_game(&mut self) {
        info!("Game over with score {}", self.score);
        self.final_score = Some(self.score);
        self.record_high_score();
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.record_high_score();
    }

    // Persists the score when it beats the best so far; storage failures
    // only cost persistence
    fn record_high_score(&mut self) {
        if self.score <= self.high_score {
            return;
        }
        self.high_score = self.score;
        if let Err(err) = self.store.save_high_score(self.high_score) {
            warn!("Could not save high score {}: {err}", self.high_score);
        }
    }
}
