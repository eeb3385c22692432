//! Fire simulation driver
//!
//! `FireSimulation` ties a [`HeatGrid`] to a [`FireSimConfig`]: it seeds the
//! initial fires, derives a fresh flicker seed for every tick from the
//! configured seed and the tick index, and tracks elapsed time.

use crate::config::FireSimConfig;
use crate::error::{ConfigError, GridError};
use crate::grid::HeatGrid;
use crate::solver::{classify_grid, derive_seed, Classification, HeatStats};
use tracing::{debug, info};

/// Grid-based fire simulation
#[derive(Debug, Clone)]
pub struct FireSimulation {
    config: FireSimConfig,
    grid: HeatGrid,
    tick_count: u64,
    simulation_time: f32,
}

impl FireSimulation {
    /// Create a simulation and light the configured number of starting fires
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`FireSimConfig::validate`].
    pub fn new(config: FireSimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = HeatGrid::new(
            config.width,
            config.height,
            config.num_fire_starters,
            config.seed,
        );

        info!(
            "Fire simulation initialized: {}x{} grid, rate={:.3}, starters={}, seed={}",
            config.width,
            config.height,
            config.heat_transfer_rate,
            config.num_fire_starters,
            config.seed
        );

        Ok(Self {
            config,
            grid,
            tick_count: 0,
            simulation_time: 0.0,
        })
    }

    /// Advance one tick of length `dt` and summarise the new snapshot
    ///
    /// The tick seed depends only on the configured seed and the tick index,
    /// so two simulations built from the same config produce identical grids
    /// for the same sequence of `dt`.
    ///
    /// # Errors
    ///
    /// Propagates [`GridError::DimensionMismatch`] from the grid commit; the
    /// grid, tick count and clock are unchanged in that case.
    pub fn update(&mut self, dt: f32) -> Result<HeatStats, GridError> {
        let tick_seed = derive_seed(self.config.seed, self.tick_count);
        self.grid
            .tick_with(&self.config.propagation(dt), tick_seed)?;

        self.tick_count += 1;
        self.simulation_time += dt;

        let stats = self.stats();
        debug!(
            "Tick {}: t={:.2}, burning={}, water={}, max_heat={:.3}",
            self.tick_count,
            self.simulation_time,
            stats.burning_cells,
            stats.water_cells,
            stats.max_heat
        );
        Ok(stats)
    }

    /// Set the cell at `(x, y)` burning
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a coordinate outside the grid.
    pub fn ignite_cell(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        info!("Igniting cell ({}, {})", x, y);
        self.grid.ignite_cell(x, y)
    }

    /// Turn the cell at `(x, y)` into a water source
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a coordinate outside the grid.
    pub fn place_water_source(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        info!("Placing water source at ({}, {})", x, y);
        self.grid.place_water_source(x, y)
    }

    /// Classification of the cell at `(x, y)` under the configured thresholds
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a coordinate outside the grid.
    pub fn classification_at(&self, x: usize, y: usize) -> Result<Classification, GridError> {
        self.grid
            .heat_at(x, y)
            .map(|heat| self.config.thresholds().classify(heat))
    }

    /// Classification of every cell, in row-major order
    pub fn classifications(&self) -> Vec<Classification> {
        classify_grid(
            self.grid.heat(),
            self.config.fire_threshold,
            self.config.flash_point,
        )
    }

    /// Summary of the committed snapshot
    pub fn stats(&self) -> HeatStats {
        HeatStats::from_heat(self.grid.heat(), &self.config.thresholds())
    }

    pub fn grid(&self) -> &HeatGrid {
        &self.grid
    }

    pub fn config(&self) -> &FireSimConfig {
        &self.config
    }

    /// Ticks completed so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Sum of every `dt` passed to [`FireSimulation::update`]
    pub fn simulation_time(&self) -> f32 {
        self.simulation_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn small_config() -> FireSimConfig {
        FireSimConfig {
            width: 12,
            height: 8,
            num_fire_starters: 2,
            seed: 5,
            ..FireSimConfig::default()
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = FireSimConfig {
            width: 0,
            ..FireSimConfig::default()
        };
        assert!(FireSimulation::new(config).is_err());
    }

    #[test]
    fn test_update_advances_clock() {
        let mut sim = FireSimulation::new(small_config()).unwrap();
        sim.update(0.5).unwrap();
        sim.update(0.25).unwrap();
        assert_eq!(sim.tick_count(), 2);
        assert_eq!(sim.simulation_time(), 0.75);
    }

    #[test]
    fn test_same_config_same_run() {
        let mut a = FireSimulation::new(small_config()).unwrap();
        let mut b = FireSimulation::new(small_config()).unwrap();
        for _ in 0..20 {
            a.update(1.0).unwrap();
            b.update(1.0).unwrap();
        }
        assert_eq!(a.grid().heat(), b.grid().heat());
    }

    #[test]
    fn test_fire_spreads_from_ignition() {
        let config = FireSimConfig {
            num_fire_starters: 0,
            heat_transfer_rate: 0.2,
            ..small_config()
        };
        let mut sim = FireSimulation::new(config).unwrap();
        assert_eq!(sim.stats().burning_cells, 0);

        sim.ignite_cell(6, 4).unwrap();
        let before = sim.stats().burning_cells;
        for _ in 0..5 {
            sim.update(1.0).unwrap();
        }
        assert!(sim.stats().burning_cells > before);
    }

    #[test]
    fn test_classification_queries() {
        let mut sim = FireSimulation::new(FireSimConfig {
            num_fire_starters: 0,
            ..small_config()
        })
        .unwrap();
        sim.place_water_source(0, 0).unwrap();
        sim.ignite_cell(11, 7).unwrap();

        assert_eq!(
            sim.classification_at(0, 0),
            Ok(Classification::WaterSource)
        );
        assert!(sim.classification_at(11, 7).unwrap().is_burning());
        assert_eq!(sim.classification_at(5, 5), Ok(Classification::Ground));
        assert!(sim.classification_at(12, 0).is_err());

        let all = sim.classifications();
        assert_eq!(all.len(), 96);
        assert_eq!(all[0], Classification::WaterSource);
    }

    #[test]
    fn test_cell_edits_are_logged() {
        let log = CapturedLog::default();
        let sink = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut sim = FireSimulation::new(FireSimConfig {
                num_fire_starters: 0,
                ..small_config()
            })
            .unwrap();
            sim.ignite_cell(1, 2).unwrap();
            sim.place_water_source(3, 4).unwrap();
        });

        let text = log.contents();
        assert!(text.contains("Igniting cell (1, 2)"), "log was: {text}");
        assert!(text.contains("Placing water source at (3, 4)"), "log was: {text}");
    }
}
