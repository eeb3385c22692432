//! Per-tick propagation and classification
//!
//! The propagation step is a pure function of the current snapshot, the
//! transfer rate, the timestep and a tick seed. Classification is derived on
//! demand and never stored.
//!
//! # Example
//!
//! ```rust
//! use fire_grid_core::solver::{classify, Classification, FireTier};
//!
//! assert_eq!(classify(0.95, 0.3, 0.5), Classification::HighFire(FireTier::HOTTEST));
//! assert_eq!(classify(-0.5, 0.3, 0.5), Classification::WaterSource);
//! ```

pub mod classify;
pub mod propagation;
pub mod rng;
mod stats;

// Re-exports
pub use classify::{
    classify, classify_grid, Classification, ClassificationThresholds, FireTier, WATER_THRESHOLD,
};
pub use propagation::{neighbor_sum, next_cell_heat, step_heat_cpu, PropagationParams, MAX_HEAT};
pub use rng::{cell_rng, derive_seed};
pub use stats::HeatStats;
