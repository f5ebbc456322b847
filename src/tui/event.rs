/*
* Clockwise TUI Event Module
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This module handles events for the TUI, including keyboard input and the one-second tick.
* It uses a multi-producer, single-consumer channel to handle events asynchronously.
*/

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::{
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};
use tracing::{debug, warn};

/// Interval between ticks delivered to the timer and stopwatch
pub const TICK_RATE: Duration = Duration::from_secs(1);

/// Terminal events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Key event from keyboard
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// One tick of the clock
    Tick,
}

/// Event handler for processing terminal events
///
/// The polling thread only forwards events; the models are never touched off the main thread.
pub struct EventHandler {
    /// Event receiver channel
    pub receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let mut last_tick = Instant::now();

            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::from_secs(0));

                match event::poll(timeout) {
                    Ok(true) => {
                        let forwarded = match event::read() {
                            Ok(CrosstermEvent::Key(key)) => Some(Event::Key(key)),
                            Ok(CrosstermEvent::Resize(width, height)) => {
                                Some(Event::Resize(width, height))
                            }
                            // Ignoring mouse, paste and focus events
                            Ok(_) => None,
                            Err(err) => {
                                warn!("could not read terminal event: {}", err);
                                return;
                            }
                        };

                        if let Some(forwarded) = forwarded {
                            if sender.send(forwarded).is_err() {
                                debug!("event channel closed");
                                return;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        warn!("could not poll terminal events: {}", err);
                        return;
                    }
                }

                // Late ticks are not made up for; missed time is simply lost
                if last_tick.elapsed() >= tick_rate {
                    last_tick = Instant::now();

                    if sender.send(Event::Tick).is_err() {
                        debug!("event channel closed");
                        return;
                    }
                }
            }
        });

        Self { receiver }
    }
}
