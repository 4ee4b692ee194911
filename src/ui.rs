#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Board dimensions are tiny so usize -> u16 never truncates
    clippy::cast_possible_truncation
)]

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::components::{Coord, PieceShape};
use crate::engine::GameState;
use crate::persistence::HighScoreStore;

// Each cell is 2 characters wide and 1 tall
const CELL_WIDTH: u16 = 2;
const CELL_HEIGHT: u16 = 1;
const MIN_INFO_WIDTH: u16 = 24;

/// Terminal size needed to draw a `width` x `height` board plus the side panel.
#[must_use]
pub fn minimum_size(width: usize, height: usize) -> (u16, u16) {
    let board_width = width as u16 * CELL_WIDTH + 2;
    let board_height = height as u16 * CELL_HEIGHT + 2;
    (board_width + MIN_INFO_WIDTH, board_height + 2)
}

pub fn render<S: HighScoreStore>(f: &mut Frame, app: &App<S>) {
    let board = app.engine.board();
    let (min_width, min_height) = minimum_size(board.width(), board.height());

    if f.area().width < min_width || f.area().height < min_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Pastel Pop"));

        let warning_area = centered_rect(50, 30, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let board_width = board.width() as u16 * CELL_WIDTH + 2;
    let board_height = board.height() as u16 * CELL_HEIGHT + 2;

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(MIN_INFO_WIDTH)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(board_height),
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("PASTEL POP")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, app, game_layout[1]);
    render_side_panel(f, app, main_layout[1]);

    match app.engine.state() {
        GameState::Playing => {}
        GameState::AwaitingSecondChanceDecision => render_prompt(
            f,
            game_layout[1],
            "No moves left!",
            "Second chance? (y/n)",
            Color::Yellow,
        ),
        GameState::GameOver => {
            let final_score = app.engine.final_score().unwrap_or(app.engine.score());
            render_prompt(
                f,
                game_layout[1],
                "GAME OVER",
                &format!("Score {final_score}, r to restart"),
                Color::Red,
            );
        }
    }
}

fn render_game_board<S: HighScoreStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let preview = app.preview();
    let board = app.engine.board();

    for (row, cells) in board.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let coord = Coord::new(row, col);
            let (symbol, fg) = if app.flash.contains(&coord) {
                ("▓", Color::White)
            } else if let Some(color) = cell {
                ("█", color.get_color())
            } else if let Some(p) = preview.as_ref().filter(|p| p.cells.contains(&coord)) {
                ("▒", if p.valid { Color::LightGreen } else { Color::LightRed })
            } else if coord == app.cursor {
                ("·", Color::White)
            } else {
                ("·", Color::DarkGray)
            };

            let x = inner_area.left() + col as u16 * CELL_WIDTH;
            let y = inner_area.top() + row as u16 * CELL_HEIGHT;
            draw_cell(f, x, y, inner_area, symbol, fg);
        }
    }
}

fn draw_cell(f: &mut Frame, x: u16, y: u16, area: Rect, symbol: &str, fg: Color) {
    for dx in 0..CELL_WIDTH {
        if x + dx < area.right() && y < area.bottom() {
            if let Some(cell) = f.buffer_mut().cell_mut((x + dx, y)) {
                cell.set_symbol(symbol);
                cell.set_fg(fg);
            }
        }
    }
}

fn render_side_panel<S: HighScoreStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Score
            Constraint::Length(7), // Pieces
            Constraint::Length(3), // Status
            Constraint::Min(5),    // Controls
        ])
        .split(area);

    let stats = Paragraph::new(format!(
        "Score: {}\nBest:  {}",
        app.engine.score(),
        app.engine.high_score()
    ))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(stats, layout[0]);

    render_pieces(f, app, layout[1]);

    let status = Paragraph::new(app.status.as_str())
        .style(Style::default().fg(Color::LightMagenta))
        .wrap(Wrap { trim: true });
    f.render_widget(status, layout[2]);

    let controls = Paragraph::new(
        "Controls:\n\
        Arrows/WASD: Move cursor\n\
        1-3 / Tab: Pick piece\n\
        Enter/Space: Place\n\
        F: Refresh when stuck\n\
        R: Restart  Q: Quit",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, layout[3]);
}

fn render_pieces<S: HighScoreStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let slots = app.engine.supply().slots();
    if slots.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = slots
        .iter()
        .map(|_| Constraint::Ratio(1, slots.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (index, (slot, column)) in slots.iter().zip(columns.iter()).enumerate() {
        let selected = index == app.selected_slot;
        let title = if selected {
            format!("[{}]", index + 1)
        } else {
            format!(" {} ", index + 1)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if selected {
                Style::default().fg(Color::LightMagenta)
            } else {
                Style::default()
            });
        let inner = block.inner(*column);
        f.render_widget(block, *column);

        if let Some(shape) = slot {
            draw_piece(f, shape, inner);
        }
    }
}

// Pieces in the side panel use one character per cell
fn draw_piece(f: &mut Frame, shape: &PieceShape, area: Rect) {
    let color = shape.color.get_color();
    for (dr, dc) in &shape.offsets {
        let (Ok(dr), Ok(dc)) = (u16::try_from(*dr), u16::try_from(*dc)) else {
            continue;
        };
        let x = area.left() + dc;
        let y = area.top() + dr;
        if x < area.right() && y < area.bottom() {
            if let Some(cell) = f.buffer_mut().cell_mut((x, y)) {
                cell.set_symbol("█");
                cell.set_fg(color);
            }
        }
    }
}

fn render_prompt(f: &mut Frame, board_area: Rect, title: &str, body: &str, color: Color) {
    let area = centered_rect(90, 40, board_area);
    let prompt = Paragraph::new(format!("{title}\n{body}"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
