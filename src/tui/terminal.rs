/*
* Clockwise TUI Terminal Module
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This module puts the terminal into raw mode on the alternate screen
* and restores it when the guard is dropped, including on error or panic.
*/

use crossterm::{
    cursor::Show,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Restores the terminal on drop
pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

/// Setup terminal
pub fn setup_terminal() -> io::Result<(Tui, TerminalGuard)> {
    install_panic_hook();

    enable_raw_mode()?;
    let guard = TerminalGuard;

    let mut stdout = stdout();
    stdout.execute(EnterAlternateScreen)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}

fn restore() {
    let _ = disable_raw_mode();
    let mut stdout = stdout();
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = stdout.execute(Show);
}

/// Leave the alternate screen before the panic message is printed
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        default_hook(info);
    }));
}
