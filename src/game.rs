#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Scores stay far below 2^52 so the float round trip is exact
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

// Grid dimensions
pub const GRID_WIDTH: usize = 9;
pub const GRID_HEIGHT: usize = 9;

// Number of offered pieces per hand
pub const NUM_PIECE_SLOTS: usize = 3;

// Line clear scoring: each line is worth grid width * factor
pub const LINE_CLEAR_FACTOR: u32 = 10;
pub const MULTI_LINE_BONUS_MULTIPLIER: f64 = 1.5;

// Points per cell covered by a placed piece
pub const POINTS_PER_CELL: u32 = 1;

// Score deducted on a manual refresh (0 disables the penalty)
pub const REFRESH_PENALTY: u32 = 0;

/// Base value of a single cleared line on a board `grid_width` cells wide.
#[must_use]
pub fn line_clear_score(grid_width: usize, factor: u32) -> u32 {
    (grid_width as u32).saturating_mul(factor)
}

/// Score awarded for clearing `lines` rows and columns in one placement.
///
/// `base = lines * line_score`; two or more lines add
/// `round(multiplier^(lines - 1) * base)` on top.
#[must_use]
pub fn clear_score(lines: usize, line_score: u32, multiplier: f64) -> u32 {
    if lines == 0 {
        return 0;
    }

    let base = (lines as u32).saturating_mul(line_score);
    let bonus = if lines <= 1 {
        0
    } else {
        let exponent = i32::try_from(lines - 1).unwrap_or(i32::MAX);
        let raw = (multiplier.powi(exponent) * f64::from(base)).round();
        if raw >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            raw as u32
        }
    };

    base.saturating_add(bonus)
}
