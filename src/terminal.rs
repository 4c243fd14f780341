// ============================================================================
// TERMINAL LIFECYCLE - raw mode, alternate screen, guaranteed restore
// ============================================================================

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    cursor, event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Run `session` on a full-screen terminal. Once raw mode is on, the
/// terminal is restored whether setup, the session, or neither fails.
pub fn with_terminal<F>(session: F) -> Result<()>
where
    F: FnOnce(&mut Tui) -> Result<()>,
{
    enable_raw_mode().context("enabling raw mode")?;
    run_then_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, event::EnableMouseCapture)
                .context("entering alternate screen")?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            session(&mut terminal)
        },
        restore,
    )
}

fn restore() {
    disable_raw_mode().ok();
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        event::DisableMouseCapture,
        cursor::Show
    )
    .ok();
}

/// `run`, then `restore` unconditionally; `run`'s result is returned.
fn run_then_restore<T, R, C>(run: R, restore: C) -> Result<T>
where
    R: FnOnce() -> Result<T>,
    C: FnOnce(),
{
    let res = run();
    restore();
    res
}
