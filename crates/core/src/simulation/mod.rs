//! Simulation driver
//!
//! `FireSimulation` owns a heat grid and its configuration, and advances them
//! tick by tick with reproducible per-tick seeds.

mod fire_simulation;

pub use fire_simulation::FireSimulation;
