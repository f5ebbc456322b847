/*
* Clockwise Timer Model
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This module contains the countdown timer state machine.
* It is driven by one external tick per second and never touches the clock itself.
*/

use serde::{Deserialize, Serialize};

/// Default label for timers created without a name
pub const DEFAULT_TIMER_NAME: &str = "Timer";

/// Countdown timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    /// Configured total seconds
    pub duration: u64,

    /// Seconds left to count down
    pub remaining: u64,

    /// Display label
    pub name: String,

    /// Whether the timer is actively counting down
    pub running: bool,

    /// Whether the timer reached zero by counting down
    pub completed: bool,
}

/// Serializable snapshot of a timer
///
/// Every field is optional on the way in so partial or older snapshots still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(0, DEFAULT_TIMER_NAME)
    }
}

impl Timer {
    /// Create an idle timer for the given number of seconds
    pub fn new(duration: u64, name: impl Into<String>) -> Self {
        Self {
            duration,
            remaining: duration,
            name: name.into(),
            running: false,
            completed: false,
        }
    }

    /// Start counting down. Does nothing when there is no time left.
    pub fn start(&mut self) {
        if self.remaining > 0 {
            self.running = true;
            self.completed = false;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Return to the configured duration, stopped and not completed
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.running = false;
        self.completed = false;
    }

    /// Advance the countdown by one second
    ///
    /// Completion is only ever flagged here, on the tick that brings `remaining` to zero.
    pub fn tick(&mut self) {
        if !self.running || self.remaining == 0 {
            return;
        }

        self.remaining -= 1;
        if self.remaining == 0 {
            self.running = false;
            self.completed = true;
        }
    }

    /// Replace duration and name, then reset
    pub fn set_duration(&mut self, duration: u64, name: impl Into<String>) {
        self.duration = duration;
        self.name = name.into();
        self.reset();
    }

    /// Fraction of the duration already counted down, in `[0.0, 1.0]`
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        (self.duration - self.remaining) as f64 / self.duration as f64
    }

    /// Whether the timer sits at its configured duration and is not running
    pub fn is_idle(&self) -> bool {
        !self.running && !self.completed && self.remaining == self.duration
    }

    /// Take a snapshot for persistence
    pub fn state(&self) -> TimerState {
        TimerState {
            duration: Some(self.duration),
            name: Some(self.name.clone()),
            remaining: Some(self.remaining),
            running: Some(self.running),
            completed: Some(self.completed),
        }
    }

    /// Restore from a snapshot, filling missing fields with defaults
    pub fn set_state(&mut self, state: TimerState) {
        let duration = state.duration.unwrap_or(0);

        self.duration = duration;
        self.name = state.name.unwrap_or_else(|| DEFAULT_TIMER_NAME.to_string());
        self.remaining = state.remaining.unwrap_or(duration).min(duration);
        self.completed = state.completed.unwrap_or(false) && self.remaining == 0;
        self.running = state.running.unwrap_or(false) && !self.completed && self.remaining > 0;
    }
}
