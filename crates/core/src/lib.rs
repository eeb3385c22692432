//! Fire Grid Core Library
//!
//! A grid-based heat propagation engine for fire simulations. Each cell holds a
//! scalar heat value; every tick a cell gains the scaled heat of its eight
//! neighbours, clamps at 1.0, and flickers randomly once it burns hot. Cells
//! can be classified into ground, low fire, banded high fire and water for
//! render hints and agent decisions.
//!
//! ## Determinism
//!
//! Ticks read a frozen snapshot and write a separate back buffer, and every
//! cell draws its flicker from its own seeded stream. Results are identical
//! regardless of how rayon partitions the work.
//!
//! ## Example
//!
//! ```rust
//! use fire_grid_core::{FireSimConfig, FireSimulation};
//!
//! let mut sim = FireSimulation::new(FireSimConfig::default()).unwrap();
//! let stats = sim.update(1.0).unwrap();
//! assert!(stats.max_heat <= 1.0);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod simulation;
pub mod solver;

// Re-export core types
pub use config::FireSimConfig;
pub use error::{ConfigError, GridError};
pub use grid::{HeatGrid, NEIGHBOR_OFFSETS};
pub use simulation::FireSimulation;
pub use solver::{classify, Classification, FireTier, HeatStats, PropagationParams};
