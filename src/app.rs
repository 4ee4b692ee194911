#![warn(clippy::all, clippy::pedantic)]

use log::debug;

use crate::board::Preview;
use crate::components::Coord;
use crate::config::Config;
use crate::engine::{GameEngine, GameState};
use crate::persistence::{FileHighScoreStore, HighScoreStore};

pub type AppResult<T> = anyhow::Result<T>;

// Frames a cleared line stays highlighted
const FLASH_TICKS: u8 = 6;

/// What the player asked for, already decoded from the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveCursor { rows: i32, cols: i32 },
    SelectSlot(usize),
    CycleSlot,
    Place,
    Refresh,
    AcceptSecondChance,
    DeclineSecondChance,
    Restart,
    Quit,
}

pub struct App<S: HighScoreStore = FileHighScoreStore> {
    pub engine: GameEngine<S>,
    pub cursor: Coord,
    pub selected_slot: usize,
    pub status: String,
    pub flash: Vec<Coord>,
    pub flash_ticks: u8,
    pub should_quit: bool,
}

impl App<FileHighScoreStore> {
    /// Builds the app from a loaded configuration, keeping the high score
    /// in the configured file.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let store = FileHighScoreStore::from_config(config.storage.high_score_path.as_deref());
        debug!("High score file: {}", store.path().display());
        let engine = GameEngine::new(config.rules.clone(), store)?;
        Ok(Self::new(engine))
    }
}

impl<S: HighScoreStore> App<S> {
    pub fn new(engine: GameEngine<S>) -> Self {
        let mut app = Self {
            engine,
            cursor: Coord::new(0, 0),
            selected_slot: 0,
            status: String::new(),
            flash: Vec::new(),
            flash_ticks: 0,
            should_quit: false,
        };
        app.announce_state();
        app
    }

    pub fn handle(&mut self, intent: Intent) {
        match intent {
            Intent::MoveCursor { rows, cols } => self.move_cursor(rows, cols),
            Intent::SelectSlot(index) => {
                if index < self.engine.supply().slot_count() {
                    self.selected_slot = index;
                }
            }
            Intent::CycleSlot => self.select_next_slot(),
            Intent::Place => self.place(),
            Intent::Refresh => self.refresh(),
            Intent::AcceptSecondChance => {
                if let Ok(state) = self.engine.accept_second_chance() {
                    self.select_first_active();
                    self.status = match state {
                        GameState::Playing => "Fresh pieces dealt. Good luck!".to_string(),
                        _ => "Still no room. Game over.".to_string(),
                    };
                }
            }
            Intent::DeclineSecondChance => {
                if self.engine.decline_second_chance().is_ok() {
                    self.announce_state();
                }
            }
            Intent::Restart => self.restart(),
            Intent::Quit => self.should_quit = true,
        }
    }

    /// Advances one frame; expires the line-clear highlight.
    pub fn on_tick(&mut self) {
        if self.flash_ticks > 0 {
            self.flash_ticks -= 1;
            if self.flash_ticks == 0 {
                self.flash.clear();
            }
        }
    }

    /// Where the selected piece would land at the cursor, if a piece is selected.
    #[must_use]
    pub fn preview(&self) -> Option<Preview> {
        if self.engine.state() != GameState::Playing {
            return None;
        }
        self.engine
            .preview(self.selected_slot, self.cursor_row(), self.cursor_col())
            .ok()
    }

    pub fn restart(&mut self) {
        self.engine.restart();
        self.cursor = Coord::new(0, 0);
        self.selected_slot = 0;
        self.flash.clear();
        self.flash_ticks = 0;
        self.status.clear();
        self.announce_state();
    }

    fn cursor_row(&self) -> i32 {
        i32::try_from(self.cursor.row).unwrap_or(i32::MAX)
    }

    fn cursor_col(&self) -> i32 {
        i32::try_from(self.cursor.col).unwrap_or(i32::MAX)
    }

    fn move_cursor(&mut self, rows: i32, cols: i32) {
        let board = self.engine.board();
        let max_row = board.height().saturating_sub(1);
        let max_col = board.width().saturating_sub(1);
        self.cursor.row = offset_clamped(self.cursor.row, rows, max_row);
        self.cursor.col = offset_clamped(self.cursor.col, cols, max_col);
    }

    fn place(&mut self) {
        if self.engine.state() != GameState::Playing {
            return;
        }

        match self
            .engine
            .place_piece(self.selected_slot, self.cursor_row(), self.cursor_col())
        {
            Ok(outcome) => {
                self.status = if outcome.lines_cleared() > 0 {
                    format!(
                        "{} line{} cleared! +{}",
                        outcome.lines_cleared(),
                        if outcome.lines_cleared() == 1 { "" } else { "s" },
                        outcome.score_delta
                    )
                } else {
                    format!("+{}", outcome.score_delta)
                };
                if !outcome.clear.cells.is_empty() {
                    self.flash = outcome.clear.cells;
                    self.flash_ticks = FLASH_TICKS;
                }
                if outcome.refilled {
                    self.select_first_active();
                } else {
                    self.select_next_slot();
                }
                if outcome.state != GameState::Playing {
                    self.announce_state();
                }
            }
            Err(err) => {
                debug!("Placement rejected: {err}");
                self.status = "That piece doesn't fit there.".to_string();
            }
        }
    }

    fn refresh(&mut self) {
        if self.engine.state() != GameState::Playing {
            return;
        }

        match self.engine.request_refresh() {
            Ok(outcome) => {
                self.select_first_active();
                self.status = if outcome.penalty > 0 {
                    format!("New pieces dealt (-{})", outcome.penalty)
                } else {
                    "New pieces dealt".to_string()
                };
                if outcome.state != GameState::Playing {
                    self.announce_state();
                }
            }
            Err(err) => self.status = format!("Can't refresh: {err}"),
        }
    }

    fn select_first_active(&mut self) {
        self.selected_slot = self
            .engine
            .supply()
            .slots()
            .iter()
            .position(Option::is_some)
            .unwrap_or(0);
    }

    // Moves the selection to the next occupied slot, wrapping around
    fn select_next_slot(&mut self) {
        let slots = self.engine.supply().slots();
        let count = slots.len();
        if count == 0 {
            return;
        }
        for step in 1..=count {
            let index = (self.selected_slot + step) % count;
            if slots[index].is_some() {
                self.selected_slot = index;
                return;
            }
        }
    }

    fn announce_state(&mut self) {
        match self.engine.state() {
            GameState::Playing => {}
            GameState::AwaitingSecondChanceDecision => {
                self.status = "No moves left! Take a second chance? (y/n)".to_string();
            }
            GameState::GameOver => {
                self.status = format!(
                    "Game over! Final score {}. Press r to restart.",
                    self.engine.final_score().unwrap_or(self.engine.score())
                );
            }
        }
    }
}

fn offset_clamped(value: usize, delta: i32, max: usize) -> usize {
    let magnitude = delta.unsigned_abs() as usize;
    if delta < 0 {
        value.saturating_sub(magnitude)
    } else {
        value.saturating_add(magnitude).min(max)
    }
}
