//! Configuration for buffer construction.
//!
//! Provides the window geometry used by root buffers, with sensible defaults
//! and JSON loading for hosts that keep settings on disk.

use serde::{Deserialize, Serialize};

use crate::error::{BufferError, Result};

/// Default window size in bytes (32KB).
pub const DEFAULT_WINDOW_SIZE: usize = 32768;

/// Windowing configuration for root buffers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Size of the cached window (default: 32768). Must be a power of two.
    pub window_size: usize,
    /// Serve in-memory sources through the window too (default: false).
    ///
    /// In-memory sources are otherwise read straight from their slice.
    pub window_in_memory: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            window_in_memory: false,
        }
    }
}

impl BufferConfig {
    /// Configuration with the given window size and defaults otherwise.
    pub fn with_window_size(window_size: usize) -> Self {
        Self {
            window_size,
            ..Self::default()
        }
    }

    /// Checks the window geometry.
    pub fn validate(&self) -> Result<()> {
        if !self.window_size.is_power_of_two() {
            return Err(BufferError::InvalidConfig(format!(
                "window size must be a non-zero power of two, got {}",
                self.window_size
            )));
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BufferConfig =
            serde_json::from_str(json).map_err(|e| BufferError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| BufferError::InvalidConfig(e.to_string()))
    }
}
