//! Decoder configuration
//!
//! All settings have built-in defaults so a zero-config decode works out of
//! the box. Range checks run once, before any decode attempt; a `Decoder`
//! can only be constructed from a validated configuration.
//!
//! # Settings Sources Priority
//!
//! The library only defines the struct and defaults. Front ends (see
//! `cardswipe-cli`) layer sources on top:
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Built-in defaults (code constants)

use crate::error::{Error, Result};
use serde::Deserialize;

/// Tunable parameters for the swipe decode pipeline
///
/// The defaults match typical headset-jack swipe readers and rarely need
/// changing. `silence_level` is in raw 16-bit PCM amplitude units.
#[derive(Debug, Clone, Deserialize)]
pub struct DecoderConfig {
    /// Amplitude floor below which a sample is treated as silence
    ///
    /// Default: 500
    #[serde(default = "default_silence_level")]
    pub silence_level: i32,

    /// Fraction of the average peak used as the adaptive decode threshold
    ///
    /// Between zero crossings the signal must rise above
    /// `avg_peak * min_level_coeff` to count as a transition. Valid range
    /// [0, 1]. Default: 0.5
    #[serde(default = "default_min_level_coeff")]
    pub min_level_coeff: f64,

    /// Single-pole low-pass filter coefficient
    ///
    /// Each conditioned sample is `prev * smoothing + cur * (1 - smoothing)`.
    /// Valid range [0, 1]. Default: 0.1
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,

    /// Stretch the recentered waveform to full 16-bit range before smoothing
    ///
    /// Off by default: the adaptive threshold already compensates for weak
    /// signals, so rescaling only helps captures with severe attenuation.
    #[serde(default)]
    pub rescale: bool,
}

fn default_silence_level() -> i32 {
    500
}

fn default_min_level_coeff() -> f64 {
    0.5
}

fn default_smoothing() -> f64 {
    0.1
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            silence_level: default_silence_level(),
            min_level_coeff: default_min_level_coeff(),
            smoothing: default_smoothing(),
            rescale: false,
        }
    }
}

impl DecoderConfig {
    /// Check all values against their documented ranges
    ///
    /// Returns [`Error::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_level_coeff) {
            return Err(Error::InvalidConfig(format!(
                "min_level_coeff must be within 0 to 1, got {}",
                self.min_level_coeff
            )));
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(Error::InvalidConfig(format!(
                "smoothing must be within 0 to 1, got {}",
                self.smoothing
            )));
        }
        if self.silence_level < 0 {
            return Err(Error::InvalidConfig(format!(
                "silence_level must be non-negative, got {}",
                self.silence_level
            )));
        }
        Ok(())
    }
}
