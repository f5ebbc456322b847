/*
* Clockwise Configuration Module
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This module loads and saves the user configuration (settings and timer presets)
* from a TOML file in the per-user configuration directory.
*/

use color_eyre::{eyre::Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// Directory name used under the platform config and data directories
pub const APP_NAME: &str = "clockwise";

const CONFIG_FILE: &str = "config.toml";

/// How a completed timer draws attention
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertStyle {
    /// Alternate highlight colours every tick
    #[default]
    Flash,
    /// Colour the panel border
    Border,
    /// Tint the time display
    Color,
}

/// How remaining time and preset durations are rendered
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// `HH:MM:SS`
    #[default]
    Digital,
    /// `1h 5m 30s`
    Natural,
}

/// General application settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub state_persistence: bool,
    pub alert_style: AlertStyle,
    pub time_format: TimeFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_persistence: true,
            alert_style: AlertStyle::Flash,
            time_format: TimeFormat::Digital,
        }
    }
}

/// A named timer duration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    /// Duration in seconds
    pub duration: u64,
}

impl Preset {
    fn new(name: &str, duration: u64) -> Self {
        Self {
            name: name.to_string(),
            duration,
        }
    }
}

/// Application configuration structure
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub settings: Settings,
    /// Presets keyed by identifier; iteration order is the menu order
    pub presets: BTreeMap<String, Preset>,
}

impl Default for Config {
    fn default() -> Self {
        let presets = [
            ("pomodoro", Preset::new("Pomodoro", 25 * 60)),
            ("short_break", Preset::new("Short Break", 5 * 60)),
            ("long_break", Preset::new("Long Break", 15 * 60)),
            ("quick_timer", Preset::new("Quick Timer", 60)),
        ]
        .into_iter()
        .map(|(id, preset)| (id.to_string(), preset))
        .collect();

        Self {
            settings: Settings::default(),
            presets,
        }
    }
}

/// Find or create the application's configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    app_dir(|base_dirs| base_dirs.config_dir().to_path_buf(), ".config")
}

/// Find or create the application's data directory (saved state lives here)
pub fn get_data_dir() -> Result<PathBuf> {
    app_dir(|base_dirs| base_dirs.data_dir().to_path_buf(), ".local/share")
}

fn app_dir(base: impl Fn(&BaseDirs) -> PathBuf, fallback: &str) -> Result<PathBuf> {
    let dir = match BaseDirs::new() {
        Some(base_dirs) => base(&base_dirs).join(APP_NAME),
        None => env::current_dir()?.join(fallback).join(APP_NAME),
    };

    if !dir.exists() {
        fs::create_dir_all(&dir)
            .wrap_err_with(|| format!("Could not create directory: {:?}", dir))?;
    }
    Ok(dir)
}

impl Config {
    /// Default location of `config.toml`
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join(CONFIG_FILE))
    }

    /// Load configuration, or return the defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(?path, "no configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Could not read configuration file: {:?}", path))?;

        let config: Config = toml::from_str(&content)
            .wrap_err_with(|| format!("Could not parse configuration file: {:?}", path))?;

        Ok(config.without_empty_presets())
    }

    /// Load configuration and write the defaults out on first run
    pub fn load_or_init(path: &Path) -> Result<Self> {
        let existed = path.exists();
        let config = Self::load_from(path)?;

        if !existed {
            if let Err(err) = config.save_to(path) {
                warn!(?path, "could not write default configuration: {:#}", err);
            }
        }
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Could not create directory: {:?}", parent))?;
        }

        let toml_string =
            toml::to_string_pretty(self).wrap_err("Could not serialize configuration")?;

        fs::write(path, toml_string)
            .wrap_err_with(|| format!("Could not save configuration: {:?}", path))?;

        Ok(())
    }

    /// Presets in menu order
    pub fn preset_list(&self) -> Vec<Preset> {
        self.presets.values().cloned().collect()
    }

    /// Drop presets a timer could never count down from
    fn without_empty_presets(mut self) -> Self {
        self.presets.retain(|id, preset| {
            if preset.duration == 0 {
                warn!(preset = %id, "ignoring preset with zero duration");
            }
            preset.duration > 0
        });
        self
    }
}
