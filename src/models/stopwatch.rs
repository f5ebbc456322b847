/*
* Clockwise Stopwatch Model
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This module contains the stopwatch state and its lap log.
*/

use serde::{Deserialize, Serialize};

/// Count-up stopwatch with lap checkpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwatch {
    /// Cumulative running seconds
    pub elapsed: u64,

    /// Whether the stopwatch is counting
    pub running: bool,

    /// Cumulative elapsed value at each recorded lap, non-decreasing
    pub laps: Vec<u64>,
}

/// Serializable snapshot of a stopwatch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchState {
    #[serde(default)]
    pub elapsed: u64,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub laps: Vec<u64>,
}

/// One row of the lap table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapSplit {
    /// 1-based lap number
    pub number: usize,
    /// Length of this lap segment
    pub split: u64,
    /// Elapsed time when the lap was recorded
    pub cumulative: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
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

    /// Zero the stopwatch and drop all laps
    pub fn reset(&mut self) {
        self.elapsed = 0;
        self.running = false;
        self.laps.clear();
    }

    /// Advance by one second if running
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed += 1;
        }
    }

    /// Record the current elapsed time as a lap
    ///
    /// Works while paused. Nothing is recorded before the first second.
    pub fn add_lap(&mut self) {
        if self.elapsed > 0 {
            self.laps.push(self.elapsed);
        }
    }

    /// Length of the most recently completed lap
    pub fn last_lap_time(&self) -> u64 {
        match self.laps.as_slice() {
            [] => 0,
            [only] => *only,
            [.., previous, last] => last - previous,
        }
    }

    /// Time accumulated since the last recorded lap
    pub fn current_lap_time(&self) -> u64 {
        match self.laps.last() {
            Some(last) => self.elapsed - last,
            None => self.elapsed,
        }
    }

    /// Lap table rows in recording order
    pub fn lap_splits(&self) -> impl DoubleEndedIterator<Item = LapSplit> + '_ {
        self.laps.iter().enumerate().map(|(index, &cumulative)| {
            let before = if index == 0 { 0 } else { self.laps[index - 1] };
            LapSplit {
                number: index + 1,
                split: cumulative - before,
                cumulative,
            }
        })
    }

    /// Take a snapshot for persistence
    pub fn state(&self) -> StopwatchState {
        StopwatchState {
            elapsed: self.elapsed,
            running: self.running,
            laps: self.laps.clone(),
        }
    }

    /// Restore from a snapshot
    ///
    /// Laps are kept up to the first entry that would break ordering or exceed `elapsed`.
    pub fn set_state(&mut self, state: StopwatchState) {
        self.elapsed = state.elapsed;
        self.running = state.running;

        let mut previous = 0;
        self.laps = state
            .laps
            .into_iter()
            .take_while(|&lap| {
                let valid = lap > 0 && lap >= previous && lap <= state.elapsed;
                previous = lap;
                valid
            })
            .collect();
    }
}
