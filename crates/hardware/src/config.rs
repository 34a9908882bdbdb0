//! Configuration for simulation runs.
//!
//! This module parameterizes the simulation around the controller, never the
//! controller itself: the phase table, address bit-slicing, and refresh
//! budget are hardware-compatibility constants and live in
//! [`crate::common::constants`]. It provides:
//! 1. **Defaults:** Baseline run length and traffic shape.
//! 2. **Structures:** Hierarchical config for general and per-port traffic
//!    settings, deserializable from JSON.
//! 3. **Loading:** `Config::from_file` with typed errors.

use serde::Deserialize;
use thiserror::Error;

mod defaults {
    /// Default run length in ticks.
    pub const TICKS: u64 = 100_000;

    /// Default number of distinct addresses each traffic stream touches.
    pub const REGION: u32 = 256;

    /// Default request period for the program store (busiest requester).
    pub const PROGRAM_PERIOD: u64 = 12;

    /// Default request period for the work store.
    pub const WORK_PERIOD: u64 = 40;

    /// Default request period for the battery store.
    pub const BATTERY_PERIOD: u64 = 640;

    /// Default request period for the audio store.
    pub const AUDIO_PERIOD: u64 = 24;

    /// Default request period for the video stores (both ports in lockstep,
    /// exercising the merge path).
    pub const VIDEO_PERIOD: u64 = 16;
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON for [`Config`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Root configuration; use [`Config::default`] or deserialize from JSON.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// High-level run settings.
    pub general: GeneralConfig,
    /// Traffic generator settings.
    pub traffic: TrafficConfig,
}

impl Config {
    /// Loads configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// High-level simulation settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Number of ticks to run after bring-up.
    pub ticks: u64,
    /// Emit a trace event for every command on the bus.
    pub trace_commands: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            ticks: defaults::TICKS,
            trace_commands: false,
        }
    }
}

/// One requester's traffic stream settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PortTraffic {
    /// Whether this stream posts requests at all.
    pub enabled: bool,
    /// Ticks between request attempts (0 disables the stream).
    pub period: u64,
    /// Number of distinct addresses the stream cycles through.
    pub region: u32,
}

impl PortTraffic {
    const fn with_period(period: u64) -> Self {
        Self {
            enabled: true,
            period,
            region: defaults::REGION,
        }
    }
}

impl Default for PortTraffic {
    fn default() -> Self {
        Self::with_period(defaults::WORK_PERIOD)
    }
}

/// Per-port traffic generator settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Program-store stream.
    pub program: PortTraffic,
    /// Work-store stream.
    pub work: PortTraffic,
    /// Battery-store stream.
    pub battery: PortTraffic,
    /// Audio-store stream.
    pub audio: PortTraffic,
    /// Video stream; applied to both video ports in lockstep so the merge
    /// path is exercised.
    pub video: PortTraffic,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            program: PortTraffic::with_period(defaults::PROGRAM_PERIOD),
            work: PortTraffic::with_period(defaults::WORK_PERIOD),
            battery: PortTraffic::with_period(defaults::BATTERY_PERIOD),
            audio: PortTraffic::with_period(defaults::AUDIO_PERIOD),
            video: PortTraffic::with_period(defaults::VIDEO_PERIOD),
        }
    }
}
