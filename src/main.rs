#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use pastelpop::app::{App, AppResult, Intent};
use pastelpop::config::{Config, loader};
use pastelpop::engine::GameState;
use pastelpop::persistence::HighScoreStore;
use pastelpop::ui;
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it
    let log_path = "pastelpop.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file.as_raw_fd(), io::stderr().as_raw_fd());
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Pastel Pop");

    let config = match loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration, using defaults: {e}");
            Config::default()
        }
    };

    let app = App::from_config(&config)?;

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(50);
    let res = run_app(&mut terminal, app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

fn run_app<B: Backend, S: HighScoreStore>(
    terminal: &mut Terminal<B>,
    mut app: App<S>,
    tick_rate: Duration,
) -> AppResult<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    debug!("Key event: {key:?}");
                    if let Some(intent) = key_to_intent(key.code, app.engine.state()) {
                        app.handle(intent);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// Keys mean different things while the second-chance prompt is up
fn key_to_intent(code: KeyCode, state: GameState) -> Option<Intent> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Intent::Quit),
        KeyCode::Char('r') => return Some(Intent::Restart),
        _ => {}
    }

    match state {
        GameState::AwaitingSecondChanceDecision => match code {
            KeyCode::Char('y') | KeyCode::Enter => Some(Intent::AcceptSecondChance),
            KeyCode::Char('n') => Some(Intent::DeclineSecondChance),
            _ => None,
        },
        GameState::GameOver => None,
        GameState::Playing => match code {
            KeyCode::Up | KeyCode::Char('w') => Some(Intent::MoveCursor { rows: -1, cols: 0 }),
            KeyCode::Down | KeyCode::Char('s') => Some(Intent::MoveCursor { rows: 1, cols: 0 }),
            KeyCode::Left | KeyCode::Char('a') => Some(Intent::MoveCursor { rows: 0, cols: -1 }),
            KeyCode::Right | KeyCode::Char('d') => Some(Intent::MoveCursor { rows: 0, cols: 1 }),
            KeyCode::Char(c @ '1'..='9') => {
                c.to_digit(10).map(|d| Intent::SelectSlot(d as usize - 1))
            }
            KeyCode::Tab => Some(Intent::CycleSlot),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::Place),
            KeyCode::Char('f') => Some(Intent::Refresh),
            _ => None,
        },
    }
}
