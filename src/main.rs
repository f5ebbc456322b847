/*
* Clockwise - A minimalist terminal timer and stopwatch
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This application shows a countdown timer and a stopwatch side by side.
* Timers can be loaded from named presets or typed in, and the stopwatch records laps.
*/

mod config;
mod format;
mod logging;
mod models;
mod state;
mod tui;

use clap::{Parser, Subcommand};
use color_eyre::{
    eyre::{bail, Context},
    Result,
};
use crossterm::{
    event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use spinners::{Spinner, Spinners};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{debug, info, warn};

use crate::{
    config::{get_data_dir, Config},
    format::{format_time, format_time_natural, parse_time_input},
    models::Timer,
    state::{StatePersistence, STATE_FILE},
    tui::{
        event::{self as tui_event, EventHandler, TICK_RATE},
        App,
    },
};

/// Clockwise: a minimalist terminal timer and stopwatch with presets and lap tracking.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The command to execute (defaults to the TUI)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to an alternative configuration file
    #[arg(long = "config", short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Start with a fresh timer and stopwatch instead of the saved session
    #[arg(long = "no-restore", global = true)]
    no_restore: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI (text user interface)
    Tui,

    /// List the configured timer presets
    Presets,

    /// Count down in the terminal without the TUI
    Run {
        /// Duration (e.g., 25m, 1h30m, 05:30, 90)
        duration: String,

        /// Timer name
        #[arg(long = "name", short = 'n', default_value = "Timer")]
        name: String,
    },

    /// Delete the saved timer and stopwatch state
    ClearState,
}

/// Locate the snapshot file; failures here only disable persistence
fn state_persistence() -> Option<StatePersistence> {
    match get_data_dir() {
        Ok(data_dir) => Some(StatePersistence::new(data_dir.join(STATE_FILE))),
        Err(err) => {
            warn!("state persistence unavailable: {:#}", err);
            None
        }
    }
}

/// Run the TUI application
fn run_tui(config: &Config, restore: bool) -> Result<()> {
    let persistence = if config.settings.state_persistence {
        state_persistence()
    } else {
        None
    };

    let mut app = App::new(config);

    if restore {
        if let Some(persistence) = &persistence {
            let (timer, stopwatch) = (persistence.timer_state(), persistence.stopwatch_state());
            if timer.is_some() || stopwatch.is_some() {
                app.restore(timer, stopwatch);
            }
        }
    }

    let (mut terminal, _guard) =
        tui::terminal::setup_terminal().wrap_err("Could not set up the terminal")?;

    let event_handler = EventHandler::new(TICK_RATE);

    info!("tui started");
    while app.running {
        terminal.draw(|frame| tui::ui::render(&mut app, frame))?;

        match event_handler.receiver.recv() {
            Ok(tui_event::Event::Key(key_event)) => tui::keys::handle_key_event(&mut app, key_event),
            Ok(tui_event::Event::Tick) => app.tick(),
            Ok(tui_event::Event::Resize(width, height)) => {
                debug!(width, height, "terminal resized");
            }
            Err(_) => {
                warn!("event thread stopped");
                app.running = false;
            }
        }
    }

    if let Some(persistence) = persistence {
        persistence.save_state(app.timer.state(), app.stopwatch.state());
    }
    info!("tui stopped");

    Ok(())
}

/// Count down in the terminal with a spinner, ending early on Esc, q or Ctrl-C
fn run_countdown(duration_text: &str, name: &str) -> Result<()> {
    let duration = parse_time_input(duration_text)
        .wrap_err_with(|| format!("Invalid duration: {}", duration_text))?;
    if duration == 0 {
        bail!("Duration must be greater than 0");
    }

    let mut timer = Timer::new(duration, name);
    timer.start();
    info!(timer = %name, duration, "countdown started");

    enable_raw_mode()?;
    let outcome = count_down(&mut timer);
    disable_raw_mode()?;

    if outcome? {
        println!("\n{} finished! \x07", timer.name);
    } else {
        println!(
            "\n{} stopped with {} left.",
            timer.name,
            format_time_natural(timer.remaining)
        );
    }

    Ok(())
}

/// Drive the timer once per second until it completes (true) or is aborted (false)
fn count_down(timer: &mut Timer) -> Result<bool> {
    let message = |timer: &Timer| format!("{}: {} remaining", timer.name, format_time(timer.remaining, true));

    let mut spinner = Spinner::new(Spinners::Dots12, message(timer));
    let mut last_tick = Instant::now();

    while !timer.completed {
        if crossterm::event::poll(Duration::from_millis(100))? {
            let event = crossterm::event::read()?;
            if let Event::Key(key) = event {
                if is_abort_key(&key) {
                    spinner.stop();
                    return Ok(false);
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            last_tick = Instant::now();
            timer.tick();

            // The Spinner library doesn't support message changes, so it is recreated
            spinner.stop();
            spinner = Spinner::new(Spinners::Dots12, message(timer));
        }
    }

    spinner.stop();
    Ok(true)
}

/// Esc, q, or Ctrl-C (raw mode delivers it as a key, not a signal)
fn is_abort_key(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && (matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')))
}

/// Print the configured presets
fn print_presets(config: &Config) {
    if config.presets.is_empty() {
        println!("No presets configured.");
        return;
    }

    println!("Timer presets:");
    for (id, preset) in &config.presets {
        println!(
            "  {:<14} {:<16} {}",
            id,
            preset.name,
            format_time_natural(preset.duration)
        );
    }
}

/// Application entry point
fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;
    logging::init_tracing();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load_or_init(&config_path)?;
    debug!(path = ?config_path, presets = config.presets.len(), "configuration loaded");

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(&config, !cli.no_restore)?,
        Commands::Presets => print_presets(&config),
        Commands::Run { duration, name } => run_countdown(&duration, &name)?,
        Commands::ClearState => {
            if let Some(persistence) = state_persistence() {
                persistence.clear_state();
                println!("Saved state cleared ({:?}).", persistence.path());
            }
        }
    }

    Ok(())
}
