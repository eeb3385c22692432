//! Per-tick summary of a heat snapshot

use super::classify::{Classification, ClassificationThresholds};
use serde::{Deserialize, Serialize};

/// Aggregate counts and extremes for one heat snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatStats {
    /// Cells classified `LowFire` or `HighFire`
    pub burning_cells: usize,
    /// Cells classified `HighFire`
    pub high_fire_cells: usize,
    /// Cells classified `WaterSource`
    pub water_cells: usize,
    /// Cells classified `Ground`
    pub ground_cells: usize,
    /// Hottest cell
    pub max_heat: f32,
    /// Mean heat over all cells
    pub mean_heat: f32,
}

impl HeatStats {
    /// Summarise a snapshot under the given thresholds
    #[must_use]
    pub fn from_heat(heat: &[f32], thresholds: &ClassificationThresholds) -> Self {
        let mut stats = Self {
            max_heat: f32::NEG_INFINITY,
            ..Self::default()
        };
        let mut total = 0.0_f64;

        for &h in heat {
            match thresholds.classify(h) {
                Classification::Ground => stats.ground_cells += 1,
                Classification::LowFire => stats.burning_cells += 1,
                Classification::HighFire(_) => {
                    stats.burning_cells += 1;
                    stats.high_fire_cells += 1;
                }
                Classification::WaterSource => stats.water_cells += 1,
            }
            stats.max_heat = stats.max_heat.max(h);
            total += f64::from(h);
        }

        if heat.is_empty() {
            stats.max_heat = 0.0;
        } else {
            stats.mean_heat = (total / heat.len() as f64) as f32;
        }
        stats
    }
}
