use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::playback::PlaybackMode;
use crate::reveal::DEFAULT_REVEAL_FRACTION;

/// Application configuration module
/// This module handles loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Playback configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaybackConfig {
    // @field: Instant or character-by-character display
    #[serde(default)]
    pub mode: PlaybackMode,

    // @field: Share of a cue's duration spent revealing text
    #[serde(default = "default_reveal_fraction")]
    pub reveal_fraction: f64,

    // @field: Realtime tick period in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    // @field: Playback speed multiplier
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            mode: PlaybackMode::default(),
            reveal_fraction: default_reveal_fraction(),
            tick_interval_ms: default_tick_interval_ms(),
            speed: default_speed(),
        }
    }
}

impl PlaybackConfig {
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_reveal_fraction() -> f64 {
    DEFAULT_REVEAL_FRACTION
}

fn default_tick_interval_ms() -> u64 {
    50
}

fn default_speed() -> f64 {
    1.0
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let playback = &self.playback;

        if !(playback.reveal_fraction > 0.0 && playback.reveal_fraction <= 1.0) {
            return Err(anyhow!(
                "reveal_fraction must be in (0, 1], got {}",
                playback.reveal_fraction
            ));
        }

        if playback.tick_interval_ms == 0 {
            return Err(anyhow!("tick_interval_ms must be greater than zero"));
        }

        if !(playback.speed > 0.0 && playback.speed.is_finite()) {
            return Err(anyhow!("speed must be a positive number, got {}", playback.speed));
        }

        Ok(())
    }

    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Load the configuration, writing the default one first if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            playback: PlaybackConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
