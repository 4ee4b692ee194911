#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::components::Coord;
    use crate::config::{ConfigError, RulesConfig};
    use crate::engine::{GameEngine, GameState};
    use crate::error::{GameError, SupplyError};
    use crate::persistence::MemoryHighScoreStore;
    use crate::tests::test_utils::{
        block3x3, engine_with, fill_diagonal_stripes, fill_row_except, monomino, seeded_rules,
        single_catalog,
    };

    // Engine that only deals 3x3 blocks, sitting on a board they can never fit
    fn stuck_engine() -> GameEngine<MemoryHighScoreStore> {
        let mut engine = engine_with(block3x3());
        fill_diagonal_stripes(engine.board_mut());
        engine
    }

    // Engine already waiting on the second-chance decision
    fn awaiting_engine() -> GameEngine<MemoryHighScoreStore> {
        let mut engine = stuck_engine();
        let outcome = engine.request_refresh().expect("no moves, refresh allowed");
        assert_eq!(outcome.state, GameState::AwaitingSecondChanceDecision);
        engine
    }

    // Empties the 3x3 window whose top-left corner is (top, left)
    fn open_window(board: &mut Board, top: usize, left: usize) {
        for row in top..top + 3 {
            for col in left..left + 3 {
                board.set(row, col, None);
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let engine =
            GameEngine::new(seeded_rules(), MemoryHighScoreStore::default()).expect("valid rules");

        assert_eq!(engine.state(), GameState::Playing);
        assert_eq!(engine.score(), 0);
        assert!(engine.board().is_empty());
        assert_eq!(engine.supply().active_count(), 3);
        assert!(!engine.second_chance_used());
        assert_eq!(engine.final_score(), None);
    }

    #[test]
    fn test_invalid_rules_are_rejected() {
        let rules = RulesConfig {
            grid_width: 0,
            ..RulesConfig::default()
        };
        let result = GameEngine::new(rules, MemoryHighScoreStore::default());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_place_monomino_at_origin() {
        let mut engine = engine_with(monomino());

        let outcome = engine.place_piece(0, 0, 0).expect("fits on empty board");

        assert_eq!(outcome.cells, vec![Coord::new(0, 0)]);
        assert_eq!(outcome.cells_filled(), 1);
        assert_eq!(outcome.lines_cleared(), 0);
        assert_eq!(outcome.score_delta, 1);
        assert!(!outcome.refilled);
        assert_eq!(outcome.state, GameState::Playing);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.supply().active_count(), 2);
    }

    #[test]
    fn test_completing_a_row_scores_placement_and_clear() {
        let mut engine = engine_with(monomino());
        fill_row_except(engine.board_mut(), 0, 4);

        let outcome = engine.place_piece(1, 0, 4).expect("gap is empty");

        assert_eq!(outcome.clear.rows, vec![0]);
        assert_eq!(outcome.lines_cleared(), 1);
        assert_eq!(outcome.clear.cells.len(), 9);
        assert_eq!(outcome.score_delta, 91);
        assert_eq!(engine.score(), 91);
        assert!(engine.board().is_empty());
    }

    #[test]
    fn test_row_filled_over_several_placements() {
        let mut engine = engine_with(monomino());
        let mut last = None;

        for col in 0..9 {
            let slot = engine
                .supply()
                .slots()
                .iter()
                .position(Option::is_some)
                .expect("a piece is always on offer");
            last = Some(engine.place_piece(slot, 0, col).expect("cell is empty"));
        }

        let last = last.expect("nine placements made");
        assert_eq!(last.lines_cleared(), 1);
        assert!(last.refilled);
        assert_eq!(engine.score(), 9 + 90);
        assert!(engine.board().is_empty());
    }

    #[test]
    fn test_invalid_placement_changes_nothing() {
        let mut engine = engine_with(monomino());
        engine.place_piece(0, 4, 4).expect("fits");
        let board = engine.board().clone();
        let supply = engine.supply().clone();

        let err = engine.place_piece(1, 4, 4).expect_err("cell is taken");
        assert!(matches!(
            err,
            GameError::InvalidPlacement {
                slot: 1,
                row: 4,
                col: 4,
                ..
            }
        ));

        let err = engine.place_piece(1, 9, 0).expect_err("off the board");
        assert!(matches!(err, GameError::InvalidPlacement { .. }));

        assert_eq!(engine.board(), &board);
        assert_eq!(engine.supply(), &supply);
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn test_invalid_slot() {
        let mut engine = engine_with(monomino());
        engine.place_piece(0, 0, 0).expect("fits");

        assert_eq!(
            engine.place_piece(0, 1, 1),
            Err(GameError::InvalidSlot(SupplyError::Empty(0)))
        );
        assert_eq!(
            engine.place_piece(7, 1, 1),
            Err(GameError::InvalidSlot(SupplyError::OutOfRange {
                index: 7,
                slots: 3
            }))
        );
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn test_hand_refills_after_last_slot() {
        let mut engine = engine_with(monomino());

        assert!(!engine.place_piece(0, 0, 0).expect("fits").refilled);
        assert!(!engine.place_piece(1, 0, 1).expect("fits").refilled);
        assert!(engine.place_piece(2, 0, 2).expect("fits").refilled);
        assert_eq!(engine.supply().active_count(), 3);
    }

    #[test]
    fn test_refresh_refused_while_moves_exist() {
        let mut engine =
            GameEngine::new(seeded_rules(), MemoryHighScoreStore::default()).expect("valid rules");
        let board = engine.board().clone();
        let supply = engine.supply().clone();

        for _ in 0..3 {
            assert_eq!(engine.request_refresh(), Err(GameError::MovesStillAvailable));
        }

        assert!(GameError::MovesStillAvailable.is_state_error());
        assert_eq!(engine.board(), &board);
        assert_eq!(engine.supply(), &supply);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.state(), GameState::Playing);
    }

    #[test]
    fn test_refresh_when_stuck_applies_clamped_penalty() {
        let rules = RulesConfig {
            refresh_penalty: 50,
            ..seeded_rules()
        };
        let mut engine = GameEngine::with_catalog(
            rules,
            single_catalog(block3x3()),
            MemoryHighScoreStore::default(),
        )
        .expect("valid rules");
        fill_diagonal_stripes(engine.board_mut());
        engine.set_score(30);

        let outcome = engine.request_refresh().expect("no moves, refresh allowed");

        assert_eq!(outcome.penalty, 30);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.supply().active_count(), 3);
        // The new hand is no better, and the second chance was not spent
        assert_eq!(outcome.state, GameState::AwaitingSecondChanceDecision);
        assert!(!engine.second_chance_used());
    }

    #[test]
    fn test_unplayable_first_hand_prompts_second_chance() {
        let rules = RulesConfig {
            grid_width: 2,
            grid_height: 2,
            ..seeded_rules()
        };
        let engine = GameEngine::with_catalog(
            rules,
            single_catalog(block3x3()),
            MemoryHighScoreStore::default(),
        )
        .expect("valid rules");

        assert_eq!(engine.state(), GameState::AwaitingSecondChanceDecision);
    }

    #[test]
    fn test_accept_second_chance_with_unlucky_hand_ends_game() {
        let mut engine = awaiting_engine();

        let state = engine.accept_second_chance().expect("prompt is up");

        assert_eq!(state, GameState::GameOver);
        assert!(engine.second_chance_used());
        assert_eq!(engine.final_score(), Some(0));
    }

    #[test]
    fn test_accept_second_chance_resumes_play() {
        let mut engine = awaiting_engine();
        // Room opens up before the new hand is dealt
        engine.board_mut().clear();

        let state = engine.accept_second_chance().expect("prompt is up");

        assert_eq!(state, GameState::Playing);
        assert!(engine.second_chance_used());
        assert_eq!(engine.supply().active_count(), 3);
        assert_eq!(engine.final_score(), None);
    }

    #[test]
    fn test_decline_second_chance_ends_game() {
        let mut engine = awaiting_engine();
        engine.set_score(120);

        let state = engine.decline_second_chance().expect("prompt is up");

        assert_eq!(state, GameState::GameOver);
        assert_eq!(engine.state(), GameState::GameOver);
        assert_eq!(engine.final_score(), Some(120));
    }

    #[test]
    fn test_second_chance_offered_at_most_once() {
        let mut engine = awaiting_engine();
        engine.accept_second_chance().expect("prompt is up");
        assert_eq!(engine.state(), GameState::GameOver);

        assert!(matches!(
            engine.accept_second_chance(),
            Err(GameError::IllegalStateTransition { .. })
        ));
        assert!(matches!(
            engine.decline_second_chance(),
            Err(GameError::IllegalStateTransition { .. })
        ));
        assert_eq!(engine.state(), GameState::GameOver);
    }

    #[test]
    fn test_calls_rejected_outside_required_state() {
        let mut engine = awaiting_engine();
        let board = engine.board().clone();

        let err = engine.place_piece(0, 0, 1).expect_err("prompt is up");
        assert_eq!(
            err,
            GameError::IllegalStateTransition {
                operation: "place_piece",
                state: GameState::AwaitingSecondChanceDecision,
            }
        );
        assert!(err.is_state_error());
        assert!(matches!(
            engine.request_refresh(),
            Err(GameError::IllegalStateTransition { .. })
        ));
        assert_eq!(engine.board(), &board);

        let mut playing = engine_with(monomino());
        assert!(matches!(
            playing.accept_second_chance(),
            Err(GameError::IllegalStateTransition { .. })
        ));
        assert!(matches!(
            playing.decline_second_chance(),
            Err(GameError::IllegalStateTransition { .. })
        ));
        assert!(!playing.second_chance_used());
    }

    #[test]
    fn test_high_score_saved_when_beaten() {
        let mut engine = GameEngine::with_catalog(
            seeded_rules(),
            single_catalog(monomino()),
            MemoryHighScoreStore::with_score(1),
        )
        .expect("valid rules");
        assert_eq!(engine.high_score(), 1);

        engine.place_piece(0, 0, 0).expect("fits");
        assert_eq!(engine.store().saves, 0);

        engine.place_piece(1, 0, 1).expect("fits");
        assert_eq!(engine.high_score(), 2);
        assert_eq!(engine.store().stored(), 2);
        assert!(engine.store().saves >= 1);
    }

    #[test]
    fn test_high_score_survives_restart() {
        let mut engine = engine_with(monomino());
        engine.place_piece(0, 0, 0).expect("fits");
        engine.place_piece(1, 0, 1).expect("fits");

        let state = engine.restart();

        assert_eq!(state, GameState::Playing);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.high_score(), 2);
        assert!(engine.board().is_empty());
    }

    #[test]
    fn test_failing_store_does_not_stop_play() {
        let mut engine = GameEngine::with_catalog(
            seeded_rules(),
            single_catalog(monomino()),
            MemoryHighScoreStore::failing(),
        )
        .expect("valid rules");

        let outcome = engine.place_piece(0, 0, 0).expect("fits");

        assert_eq!(outcome.state, GameState::Playing);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.high_score(), 1);
        assert_eq!(engine.store().stored(), 0);
    }

    #[test]
    fn test_preview_through_engine() {
        let engine = engine_with(monomino());

        assert!(engine.preview(0, 3, 3).expect("slot dealt").valid);
        assert!(!engine.preview(0, -1, 3).expect("slot dealt").valid);
        assert!(matches!(
            engine.preview(5, 0, 0),
            Err(GameError::InvalidSlot(_))
        ));
    }

    #[test]
    fn test_placement_that_leaves_no_room_prompts_second_chance() {
        let mut engine = stuck_engine();
        open_window(engine.board_mut(), 0, 0);
        assert!(engine.moves_available());

        let outcome = engine.place_piece(0, 0, 0).expect("window is empty");

        assert_eq!(outcome.cells_filled(), 9);
        assert_eq!(outcome.lines_cleared(), 0);
        assert_eq!(outcome.state, GameState::AwaitingSecondChanceDecision);
        assert_eq!(engine.state(), GameState::AwaitingSecondChanceDecision);
        assert_eq!(engine.score(), 9);
        assert!(!engine.second_chance_used());
        assert_eq!(engine.final_score(), None);
    }

    #[test]
    fn test_stuck_again_after_second_chance_ends_game() {
        let mut engine = stuck_engine();
        open_window(engine.board_mut(), 0, 0);
        engine.place_piece(0, 0, 0).expect("window is empty");
        assert_eq!(engine.state(), GameState::AwaitingSecondChanceDecision);

        open_window(engine.board_mut(), 3, 3);
        assert_eq!(
            engine.accept_second_chance().expect("prompt is up"),
            GameState::Playing
        );

        let outcome = engine.place_piece(0, 3, 3).expect("window is empty");

        // No repeat prompt once the second chance is spent
        assert_eq!(outcome.state, GameState::GameOver);
        assert_eq!(engine.state(), GameState::GameOver);
        assert_eq!(engine.final_score(), Some(18));
        assert_eq!(engine.high_score(), 18);
        assert_eq!(engine.store().stored(), 18);
    }
}
