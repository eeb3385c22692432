//! Cell classification for render hints
//!
//! Classification is derived on demand from a heat value and two thresholds.
//! The engine never stores it; renderers and agents call [`classify`] for the
//! cells they care about, or [`classify_grid`] for a whole snapshot.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Heat below which a cell reads as a water source
pub const WATER_THRESHOLD: f32 = -0.1;

/// Lower edges of tiers 1..=5; each band runs up to the next edge
const HIGH_FIRE_BAND_EDGES: [f32; 5] = [0.5, 0.6, 0.7, 0.8, 0.9];

/// Intensity tier of a cell above the flash point
///
/// Tiers follow 0.1-wide bands of `[0.5, 1.0)`; `Tier5` is the hottest.
/// Heat above a flash point lower than 0.5 sits outside every band and shows
/// as the hottest tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FireTier {
    /// `[0.5, 0.6)`
    Tier1 = 1,
    /// `[0.6, 0.7)`
    Tier2 = 2,
    /// `[0.7, 0.8)`
    Tier3 = 3,
    /// `[0.8, 0.9)`
    Tier4 = 4,
    /// `[0.9, 1.0]`, and anything below 0.5
    Tier5 = 5,
}

impl FireTier {
    /// Hottest-looking tier
    pub const HOTTEST: Self = Self::Tier5;

    /// Coolest-looking tier
    pub const COOLEST: Self = Self::Tier1;

    /// Select the tier for a heat value already known to be above the flash point
    #[must_use]
    pub fn from_heat(heat: f32) -> Self {
        let [t1, t2, t3, t4, t5] = HIGH_FIRE_BAND_EDGES;
        if (t1..t2).contains(&heat) {
            Self::Tier1
        } else if (t2..t3).contains(&heat) {
            Self::Tier2
        } else if (t3..t4).contains(&heat) {
            Self::Tier3
        } else if (t4..t5).contains(&heat) {
            Self::Tier4
        } else {
            Self::Tier5
        }
    }

    /// Numeric level, 1 (coolest) to 5 (hottest)
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }
}

/// Visual/semantic category of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Neither burning nor water
    Ground,
    /// Above the fire threshold, at or below the flash point
    LowFire,
    /// Above the flash point
    HighFire(FireTier),
    /// Heat below [`WATER_THRESHOLD`]
    WaterSource,
}

impl Classification {
    /// `true` for `LowFire` and every `HighFire` tier
    #[must_use]
    pub const fn is_burning(self) -> bool {
        matches!(self, Self::LowFire | Self::HighFire(_))
    }

    /// Cells an agent can walk onto without stepping into flames
    #[must_use]
    pub const fn is_safe(self) -> bool {
        !self.is_burning()
    }
}

/// Threshold pair used by [`classify`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Heat above which a cell shows low fire
    pub fire_threshold: f32,
    /// Heat above which a cell shows banded high fire
    pub flash_point: f32,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            fire_threshold: 0.2,
            flash_point: 0.5,
        }
    }
}

impl ClassificationThresholds {
    /// Classify a heat value with these thresholds
    #[must_use]
    pub fn classify(&self, heat: f32) -> Classification {
        classify(heat, self.fire_threshold, self.flash_point)
    }
}

/// Classify a single heat value.
///
/// Checks run hottest first: above `flash_point` yields a banded
/// [`Classification::HighFire`], above `fire_threshold` yields
/// [`Classification::LowFire`], below [`WATER_THRESHOLD`] yields
/// [`Classification::WaterSource`], anything else is [`Classification::Ground`].
/// NaN compares false everywhere and falls through to `Ground`.
#[must_use]
pub fn classify(heat: f32, fire_threshold: f32, flash_point: f32) -> Classification {
    if heat > flash_point {
        Classification::HighFire(FireTier::from_heat(heat))
    } else if heat > fire_threshold {
        Classification::LowFire
    } else if heat < WATER_THRESHOLD {
        Classification::WaterSource
    } else {
        Classification::Ground
    }
}

/// Classify every cell of a heat snapshot, in index order
#[must_use]
pub fn classify_grid(heat: &[f32], fire_threshold: f32, flash_point: f32) -> Vec<Classification> {
    heat.par_iter()
        .map(|&h| classify(h, fire_threshold, flash_point))
        .collect()
}
