//! Simulation configuration
//!
//! `FireSimConfig` collects every tunable the engine reads: board size, heat
//! transfer, classification thresholds, flicker and ignition seeding. It
//! deserializes with per-field defaults, so a partial document only overrides
//! what it names.

use crate::error::ConfigError;
use crate::solver::{ClassificationThresholds, PropagationParams};
use serde::{Deserialize, Serialize};

/// Tunables for a [`FireSimulation`](crate::simulation::FireSimulation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireSimConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Fraction of summed neighbour heat gained per unit time
    pub heat_transfer_rate: f32,
    /// Heat above which a cell shows low fire
    pub fire_threshold: f32,
    /// Heat above which a cell shows banded high fire
    pub flash_point: f32,
    /// Cells hotter than this flicker
    pub flicker_threshold: f32,
    /// Exclusive upper bound of the flicker
    pub flicker_amplitude: f32,
    /// Random ignition draws at start-up
    pub num_fire_starters: usize,
    /// Seed for ignition placement and per-tick flicker
    pub seed: u64,
}

impl Default for FireSimConfig {
    fn default() -> Self {
        let thresholds = ClassificationThresholds::default();
        let propagation = PropagationParams::default();
        Self {
            width: 50,
            height: 50,
            heat_transfer_rate: propagation.heat_transfer_rate,
            fire_threshold: thresholds.fire_threshold,
            flash_point: thresholds.flash_point,
            flicker_threshold: propagation.flicker_threshold,
            flicker_amplitude: propagation.flicker_amplitude,
            num_fire_starters: 3,
            seed: 42,
        }
    }
}

impl FireSimConfig {
    /// Check that every value is usable
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidDimensions`] for a zero width or height
    /// - [`ConfigError::InvalidRate`] for a negative or non-finite transfer
    ///   rate or flicker amplitude
    /// - [`ConfigError::NonFiniteThreshold`] for a non-finite threshold
    /// - [`ConfigError::ThresholdOrder`] if `fire_threshold > flash_point`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        for (name, value) in [
            ("heat_transfer_rate", self.heat_transfer_rate),
            ("flicker_amplitude", self.flicker_amplitude),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }

        for (name, value) in [
            ("fire_threshold", self.fire_threshold),
            ("flash_point", self.flash_point),
            ("flicker_threshold", self.flicker_threshold),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteThreshold { name, value });
            }
        }

        if self.fire_threshold > self.flash_point {
            return Err(ConfigError::ThresholdOrder {
                fire_threshold: self.fire_threshold,
                flash_point: self.flash_point,
            });
        }

        Ok(())
    }

    /// Classification thresholds from this config
    #[must_use]
    pub fn thresholds(&self) -> ClassificationThresholds {
        ClassificationThresholds {
            fire_threshold: self.fire_threshold,
            flash_point: self.flash_point,
        }
    }

    /// Propagation parameters for a tick of length `delta_time`
    #[must_use]
    pub fn propagation(&self, delta_time: f32) -> PropagationParams {
        PropagationParams {
            heat_transfer_rate: self.heat_transfer_rate,
            delta_time,
            flicker_threshold: self.flicker_threshold,
            flicker_amplitude: self.flicker_amplitude,
        }
    }
}
