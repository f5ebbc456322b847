/*
* Clockwise State Persistence Module
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This module saves timer and stopwatch snapshots to a JSON file between sessions.
* Persistence is best effort: every failure is logged and treated as "no saved state".
*/

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::models::{StopwatchState, TimerState};

/// File name of the snapshot inside the data directory
pub const STATE_FILE: &str = "state.json";

/// Everything written to the snapshot file
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SavedState {
    #[serde(default)]
    pub timer: Option<TimerState>,
    #[serde(default)]
    pub stopwatch: Option<StopwatchState>,
    /// Unreadable timestamps load as `None` so they never cost the saved models
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Local>>,
}

/// Accept RFC 3339, offset-less ISO 8601 (treated as local time), or anything else as `None`
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(timestamp) = serde_json::from_value::<DateTime<Local>>(value.clone()) {
        return Ok(Some(timestamp));
    }

    let timestamp = serde_json::from_value::<NaiveDateTime>(value)
        .ok()
        .and_then(|naive| naive.and_local_timezone(Local).earliest());
    if timestamp.is_none() {
        debug!("ignoring unreadable state timestamp");
    }
    Ok(timestamp)
}

/// Reads and writes the snapshot file
pub struct StatePersistence {
    state_file: PathBuf,
}

impl StatePersistence {
    pub fn new(state_file: PathBuf) -> Self {
        Self { state_file }
    }

    pub fn path(&self) -> &Path {
        &self.state_file
    }

    /// Save current application state
    pub fn save_state(&self, timer: TimerState, stopwatch: StopwatchState) {
        let state = SavedState {
            timer: Some(timer),
            stopwatch: Some(stopwatch),
            timestamp: Some(Local::now()),
        };

        let json = match serde_json::to_string_pretty(&state) {
            Ok(json) => json,
            Err(err) => {
                warn!("could not serialize state: {}", err);
                return;
            }
        };

        if let Some(parent) = self.state_file.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!(path = ?parent, "could not create state directory: {}", err);
                return;
            }
        }

        match fs::write(&self.state_file, json) {
            Ok(()) => info!(path = ?self.state_file, "state saved"),
            Err(err) => warn!(path = ?self.state_file, "could not save state: {}", err),
        }
    }

    /// Load saved application state, `None` when missing or unreadable
    pub fn load_state(&self) -> Option<SavedState> {
        if !self.state_file.exists() {
            debug!(path = ?self.state_file, "no saved state");
            return None;
        }

        let content = match fs::read_to_string(&self.state_file) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = ?self.state_file, "could not read state: {}", err);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(path = ?self.state_file, "ignoring corrupt state: {}", err);
                None
            }
        }
    }

    /// Remove the snapshot file
    pub fn clear_state(&self) {
        if !self.state_file.exists() {
            return;
        }
        match fs::remove_file(&self.state_file) {
            Ok(()) => info!(path = ?self.state_file, "state cleared"),
            Err(err) => warn!(path = ?self.state_file, "could not clear state: {}", err),
        }
    }

    pub fn timer_state(&self) -> Option<TimerState> {
        self.load_state().and_then(|state| state.timer)
    }

    pub fn stopwatch_state(&self) -> Option<StopwatchState> {
        self.load_state().and_then(|state| state.stopwatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Stopwatch, Timer};
    use tempfile::TempDir;

    fn persistence(dir: &TempDir) -> StatePersistence {
        StatePersistence::new(dir.path().join(STATE_FILE))
    }

    #[test]
    fn test_missing_file_is_no_state() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = persistence(&temp_dir);
        assert!(persistence.load_state().is_none());
        assert!(persistence.timer_state().is_none());
        assert!(persistence.stopwatch_state().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = persistence(&temp_dir);

        let mut timer = Timer::new(60, "Tea");
        timer.start();
        timer.tick();
        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        stopwatch.tick();
        stopwatch.add_lap();

        persistence.save_state(timer.state(), stopwatch.state());

        let saved = persistence.load_state().unwrap();
        assert!(saved.timestamp.is_some());
        assert_eq!(saved.timer, Some(timer.state()));
        assert_eq!(persistence.stopwatch_state(), Some(stopwatch.state()));
    }

    #[test]
    fn test_corrupt_file_is_no_state() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = persistence(&temp_dir);
        fs::write(persistence.path(), "{ not json").unwrap();
        assert!(persistence.load_state().is_none());
    }

    #[test]
    fn test_legacy_file_without_stopwatch() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = persistence(&temp_dir);
        fs::write(
            persistence.path(),
            r#"{"timer": {"duration": 120, "remaining": 30}}"#,
        )
        .unwrap();

        let timer_state = persistence.timer_state().unwrap();
        assert_eq!(timer_state.remaining, Some(30));
        assert!(persistence.stopwatch_state().is_none());
    }

    #[test]
    fn test_offsetless_timestamp_keeps_models() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = persistence(&temp_dir);
        fs::write(
            persistence.path(),
            r#"{"timer":{"duration":120,"remaining":30,"name":"Tea"},"stopwatch":{"elapsed":5},"timestamp":"2024-01-01T12:00:00.123456"}"#,
        )
        .unwrap();

        let saved = persistence.load_state().unwrap();
        assert!(saved.timestamp.is_some());

        let timer_state = persistence.timer_state().unwrap();
        assert_eq!(timer_state.name.as_deref(), Some("Tea"));
        assert_eq!(timer_state.remaining, Some(30));
        assert_eq!(persistence.stopwatch_state().map(|state| state.elapsed), Some(5));
    }

    #[test]
    fn test_unreadable_timestamp_keeps_models() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = persistence(&temp_dir);
        fs::write(
            persistence.path(),
            r#"{"timer":{"duration":60},"timestamp":"yesterday"}"#,
        )
        .unwrap();

        let saved = persistence.load_state().unwrap();
        assert!(saved.timestamp.is_none());
        assert_eq!(saved.timer.and_then(|timer| timer.duration), Some(60));
    }

    #[test]
    fn test_clear_state() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = persistence(&temp_dir);
        persistence.save_state(Timer::default().state(), Stopwatch::new().state());
        assert!(persistence.path().exists());

        persistence.clear_state();
        assert!(!persistence.path().exists());
        persistence.clear_state();
    }

    #[test]
    fn test_save_to_unwritable_location_does_not_panic() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let persistence = StatePersistence::new(blocker.join(STATE_FILE));
        persistence.save_state(Timer::default().state(), Stopwatch::new().state());
        assert!(persistence.load_state().is_none());
    }
}
