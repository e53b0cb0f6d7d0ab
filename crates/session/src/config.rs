//! Session configuration
//!
//! Defaults can be overridden through environment variables:
//!
//! - `BLOCKFALL_FALL_INTERVAL`: seconds per gravity step (default: 0.5)
//! - `BLOCKFALL_SAVE_PATH`: quick-save file (default: `$HOME/.blockfall/saves/quick`)

use std::path::PathBuf;

/// Default seconds between two gravity steps
pub const DEFAULT_FALL_INTERVAL: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Seconds between two gravity steps; smaller is faster
    pub fall_interval: f32,
    /// Quick-save file location
    pub save_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fall_interval: DEFAULT_FALL_INTERVAL,
            save_path: default_save_path(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let fall_interval = env::var("BLOCKFALL_FALL_INTERVAL")
            .ok()
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_FALL_INTERVAL);

        let save_path = env::var("BLOCKFALL_SAVE_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
            .unwrap_or_else(default_save_path);

        Self {
            fall_interval,
            save_path,
        }
    }
}

/// `$HOME/.blockfall/saves/quick`, relative to the working directory without `HOME`
pub fn default_save_path() -> PathBuf {
    let base = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(".blockfall").join("saves").join("quick")
}
