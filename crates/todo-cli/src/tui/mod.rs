//! Terminal user interface for the to-do screen.
//!
//! ## Entry points
//!
//! - [`run`]: take over the terminal, drive [`app::App`] until the user quits.

pub mod app;
pub mod input;
pub mod prompt;
pub mod row;

use anyhow::{Context, Result, anyhow};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
};
use ratatui::DefaultTerminal;
use std::io::{self, IsTerminal};
use std::time::Duration;
use todo_core::config::Config;
use todo_core::{ErrorCode, ScreenController};
use tracing::info;

use app::App;

/// `[E5001] Terminal I/O failed` plus the remediation hint.
fn terminal_failure() -> String {
    let code = ErrorCode::TerminalIo;
    match code.hint() {
        Some(hint) => format!("[{code}] {}\n  hint: {hint}", code.message()),
        None => format!("[{code}] {}", code.message()),
    }
}

/// Open the screen and block until the user quits.
///
/// The terminal is restored on every exit path, including errors.
///
/// # Errors
///
/// Fails with an E5001 error when stdin/stdout are not a terminal, when the
/// terminal cannot be switched to raw mode, or when drawing or reading input
/// fails.
pub fn run(config: &Config) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(anyhow!("stdin and stdout must be attached to a terminal"))
            .with_context(terminal_failure);
    }

    let screen = ScreenController::with_strategy(config.ids.strategy);
    let mut app = App::new(screen, &config.ui);
    let tick = Duration::from_millis(config.ui.tick_ms.max(1));

    let mut terminal = match ratatui::try_init() {
        Ok(terminal) => terminal,
        Err(err) => {
            // Raw mode may already be on when the alternate screen fails.
            ratatui::restore();
            return Err(err).with_context(terminal_failure);
        }
    };

    let result = drive(&mut terminal, &mut app, config, tick);

    if config.ui.mouse {
        let _ = execute!(io::stdout(), DisableMouseCapture);
    }
    ratatui::restore();
    info!(tasks = app.screen().count(), "screen closed");

    result.with_context(terminal_failure)
}

/// Everything that runs while the terminal is in raw mode.
fn drive(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    config: &Config,
    tick: Duration,
) -> io::Result<()> {
    if config.ui.mouse {
        execute!(io::stdout(), EnableMouseCapture)?;
    }
    info!(strategy = config.ids.strategy.as_str(), "screen opened");
    run_loop(terminal, app, tick)
}

fn run_loop(terminal: &mut DefaultTerminal, app: &mut App, tick: Duration) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame, frame.area()))?;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
