//! Terminal setup and teardown for the dashboard window.

use std::io::{self, Stdout};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::canvas::{PIXELS_PER_COLUMN, PIXELS_PER_ROW};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switch to raw mode on the alternate screen.
///
/// Also installs a panic hook that restores the terminal before the panic
/// message is printed.
pub fn enter() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = restore();
        original_hook(panic);
    }));

    Terminal::new(CrosstermBackend::new(stdout))
}

/// Leave the alternate screen and give the cursor back.
pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Size of the current terminal in pixels.
pub fn pixel_size() -> io::Result<(i32, i32)> {
    let (cols, rows) = crossterm::terminal::size()?;
    Ok((
        cols as i32 * PIXELS_PER_COLUMN,
        rows as i32 * PIXELS_PER_ROW,
    ))
}
