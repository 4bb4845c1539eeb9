//! Session configuration for vmdash.
//!
//! Settings are read from `~/.vmdash/config.toml`; every key is optional:
//!
//! ```toml
//! # Wait for Enter before each step (false = run on a timer)
//! interactive = true
//!
//! # Steps per minute in timed mode
//! step_rate = 60
//!
//! # Force the frame width instead of asking the terminal
//! width = 160
//!
//! # Color for dimmed text (default: terminal dark grey)
//! dim_color = { r = 110, g = 110, b = 110 }
//!
//! # Log destination (default: ~/.vmdash/vmdash.log)
//! log_file = "/tmp/vmdash.log"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame width used when there is no terminal to ask
pub const DEFAULT_FRAME_WIDTH: u16 = 160;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("step_rate must be greater than zero")]
    ZeroStepRate,
}

/// Run parameters, fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Wait for operator input before each step
    pub interactive: bool,
    /// Steps per minute when not interactive
    pub step_rate: u32,
    /// Fixed frame width
    pub width: Option<u16>,
    /// Dimmed text color override
    pub dim_color: Option<Color>,
    /// Log file override
    pub log_file: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            interactive: true,
            step_rate: 60,
            width: None,
            dim_color: None,
            log_file: None,
        }
    }
}

impl SessionConfig {
    /// Load from `~/.vmdash/config.toml`, or defaults if there is none
    pub fn load() -> Result<Self, ConfigError> {
        match Self::get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_rate == 0 {
            return Err(ConfigError::ZeroStepRate);
        }
        Ok(())
    }

    /// Delay between steps in timed mode: `floor((60 / step_rate) * 1000)` ms
    pub fn wait(&self) -> Duration {
        let rate = self.step_rate.max(1) as f32;
        Duration::from_millis(((60.0 / rate) * 1000.0) as u64)
    }

    /// Color used for dimmed text
    pub fn dim_color(&self) -> crossterm::style::Color {
        self.dim_color
            .map(|c| c.to_crossterm())
            .unwrap_or(crossterm::style::Color::DarkGrey)
    }

    /// Default log path, `~/.vmdash/vmdash.log`
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            vmdash_dir()
                .map(|d| d.join("vmdash.log"))
                .unwrap_or_else(|| PathBuf::from("vmdash.log"))
        })
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        vmdash_dir().map(|d| d.join("config.toml"))
    }
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

fn vmdash_dir() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".vmdash"))
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
