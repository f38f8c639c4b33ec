//! User settings.
//!
//! Read from an optional JSON file; any missing field takes its default.
//! Command-line flags are applied on top by the binary.

use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// RNG seed; a random one is drawn (and logged) when absent.
    pub seed: Option<u64>,
    /// Plain ASCII glyphs for terminals without block characters.
    pub ascii: bool,
    /// A key counts as held for this long after its last press/repeat event.
    pub hold_window_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            seed: None,
            ascii: false,
            hold_window_ms: 135,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).context("invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("loading settings from {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=240).contains(&self.tick_rate),
            "tick_rate must be between 1 and 240, got {}",
            self.tick_rate
        );
        ensure!(self.hold_window_ms > 0, "hold_window_ms must be positive");
        Ok(())
    }

    /// Wall-clock length of one tick.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }

    /// Hold window expressed in ticks, never less than one.
    pub fn hold_window_frames(&self) -> u64 {
        let frames = self.hold_window_ms as f64 * self.tick_rate as f64 / 1000.0;
        (frames.ceil() as u64).max(1)
    }
}
