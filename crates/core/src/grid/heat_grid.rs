//! Authoritative heat storage for the fire grid
//!
//! `HeatGrid` owns two `Vec<f32>` buffers in row-major order (`y * width + x`):
//! the committed snapshot every reader sees, and a back buffer the next tick
//! is written into. Committing swaps them, so no tick allocates.

use crate::error::GridError;
use crate::solver::propagation::{step_heat_cpu, PropagationParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Moore neighbourhood offsets `(dx, dy)`: N, NE, E, SE, S, SW, W, NW
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Heat of a freshly ignited cell
pub const IGNITION_HEAT: f32 = 1.0;

/// Heat written by [`HeatGrid::place_water_source`]; classifies as water
pub const WATER_SOURCE_HEAT: f32 = -1.0;

/// Dense 2D grid of cell heat values
///
/// Exclusive access through `&mut self` makes every commit indivisible: a
/// reader holding `&HeatGrid` cannot overlap a tick. Share a grid across
/// threads behind a lock.
#[derive(Debug, Clone)]
pub struct HeatGrid {
    heat: Vec<f32>,
    back: Vec<f32>,
    width: usize,
    height: usize,
}

impl HeatGrid {
    /// Create a grid with randomly placed ignition points
    ///
    /// Every cell starts at 0.0, then `ignition_count` indices are drawn
    /// uniformly (with replacement) from a `StdRng` seeded with `seed` and set
    /// to [`IGNITION_HEAT`]. Duplicate picks simply re-ignite the same cell.
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    /// * `ignition_count` - Number of random ignition draws (0 gives an inert grid)
    /// * `seed` - Seed for the ignition draws
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero, or if `width * height` overflows.
    #[must_use]
    pub fn new(width: usize, height: usize, ignition_count: usize, seed: u64) -> Self {
        let len = cell_count(width, height);
        let mut heat = vec![0.0; len];
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..ignition_count {
            let idx = rng.random_range(0..len);
            heat[idx] = IGNITION_HEAT;
            trace!("Initial ignition at index {}", idx);
        }

        debug!(
            "Created {}x{} heat grid with {} ignition draws (seed={})",
            width, height, ignition_count, seed
        );

        Self {
            heat,
            back: vec![0.0; len],
            width,
            height,
        }
    }

    /// Create a grid from an explicit heat array
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if `heat.len() != width * height`.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero, or if `width * height` overflows.
    pub fn from_heat(width: usize, height: usize, heat: Vec<f32>) -> Result<Self, GridError> {
        let expected = cell_count(width, height);
        if heat.len() != expected {
            return Err(GridError::DimensionMismatch {
                expected,
                actual: heat.len(),
            });
        }
        Ok(Self {
            heat,
            back: vec![0.0; expected],
            width,
            height,
        })
    }

    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (`width * height`)
    #[must_use]
    pub fn len(&self) -> usize {
        self.heat.len()
    }

    /// Always `false`; grids are at least 1x1
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heat.is_empty()
    }

    /// Read-only view of the committed snapshot in row-major order
    #[must_use]
    pub fn heat(&self) -> &[f32] {
        &self.heat
    }

    /// Linear index of `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `x >= width` or `y >= height`.
    pub fn index_of(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Heat of the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `x >= width` or `y >= height`.
    pub fn heat_at(&self, x: usize, y: usize) -> Result<f32, GridError> {
        self.index_of(x, y).map(|idx| self.heat[idx])
    }

    /// Number of Moore neighbours of `(x, y)` that lie inside the grid
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `(x, y)` itself is outside the grid.
    pub fn neighbor_count(&self, x: usize, y: usize) -> Result<usize, GridError> {
        self.index_of(x, y)?;
        let count = NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| {
                let nx = x as i64 + i64::from(dx);
                let ny = y as i64 + i64::from(dy);
                nx >= 0 && ny >= 0 && nx < self.width as i64 && ny < self.height as i64
            })
            .count();
        Ok(count)
    }

    /// Commit a new heat array, returning the displaced one
    ///
    /// The length is checked before anything is touched, so on error the
    /// committed snapshot is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if `new_heat.len() != width * height`.
    pub fn replace(&mut self, new_heat: Vec<f32>) -> Result<Vec<f32>, GridError> {
        self.try_replace(new_heat).map_err(|(err, _rejected)| err)
    }

    /// `replace` that hands a rejected array back to the caller
    fn try_replace(&mut self, new_heat: Vec<f32>) -> Result<Vec<f32>, (GridError, Vec<f32>)> {
        if new_heat.len() != self.heat.len() {
            let err = GridError::DimensionMismatch {
                expected: self.heat.len(),
                actual: new_heat.len(),
            };
            return Err((err, new_heat));
        }
        Ok(std::mem::replace(&mut self.heat, new_heat))
    }

    /// Commit a computed back buffer; on failure it stays the back buffer
    fn commit_back(&mut self, next: Vec<f32>) -> Result<(), GridError> {
        match self.try_replace(next) {
            Ok(previous) => {
                self.back = previous;
                Ok(())
            }
            Err((err, rejected)) => {
                self.back = rejected;
                Err(err)
            }
        }
    }

    /// Set the cell at `(x, y)` burning
    ///
    /// Idempotent on a cell that is already at [`IGNITION_HEAT`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `x >= width` or `y >= height`.
    pub fn ignite_cell(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        let idx = self.index_of(x, y)?;
        self.heat[idx] = IGNITION_HEAT;
        trace!("Ignited cell ({}, {})", x, y);
        Ok(())
    }

    /// Turn the cell at `(x, y)` into a water source
    ///
    /// Water is encoded as negative heat; the cell still takes part in the
    /// stencil, pulling its neighbours down and warming over time.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `x >= width` or `y >= height`.
    pub fn place_water_source(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        let idx = self.index_of(x, y)?;
        self.heat[idx] = WATER_SOURCE_HEAT;
        trace!("Placed water source at ({}, {})", x, y);
        Ok(())
    }

    /// Advance one tick with default flicker
    ///
    /// # Arguments
    ///
    /// * `heat_transfer_rate` - Fraction of neighbour heat gained per unit time
    /// * `delta_time` - Timestep
    /// * `tick_seed` - Seed for this tick's per-cell random streams
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the internal buffers have
    /// drifted out of size; the committed snapshot is left intact.
    pub fn tick(
        &mut self,
        heat_transfer_rate: f32,
        delta_time: f32,
        tick_seed: u64,
    ) -> Result<(), GridError> {
        self.tick_with(
            &PropagationParams::new(heat_transfer_rate, delta_time),
            tick_seed,
        )
    }

    /// Advance one tick with explicit propagation parameters
    ///
    /// Computes into the back buffer from the frozen snapshot, then commits
    /// through [`HeatGrid::replace`] and keeps the displaced array as the next
    /// back buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the internal buffers have
    /// drifted out of size; the committed snapshot is left intact.
    pub fn tick_with(
        &mut self,
        params: &PropagationParams,
        tick_seed: u64,
    ) -> Result<(), GridError> {
        let mut next = std::mem::take(&mut self.back);
        if next.len() != self.heat.len() {
            next.resize(self.heat.len(), 0.0);
        }

        step_heat_cpu(
            &self.heat,
            &mut next,
            self.width,
            self.height,
            params,
            tick_seed,
        );

        self.commit_back(next)
    }
}

/// Cell count of a `width` x `height` grid
fn cell_count(width: usize, height: usize) -> usize {
    assert!(
        width > 0 && height > 0,
        "Grid dimensions must be at least 1x1"
    );
    match width.checked_mul(height) {
        Some(len) => len,
        None => panic!("Grid dimensions {width}x{height} overflow the cell count"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = HeatGrid::new(10, 20, 0, 1);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.len(), 200);
        assert!(!grid.is_empty());
        assert!(grid.heat().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_ignition_points_are_seeded() {
        let a = HeatGrid::new(16, 16, 5, 42);
        let b = HeatGrid::new(16, 16, 5, 42);
        assert_eq!(a.heat(), b.heat());

        let burning = a.heat().iter().filter(|&&h| h == IGNITION_HEAT).count();
        assert!((1..=5).contains(&burning));
        assert!(a.heat().iter().all(|&h| h == 0.0 || h == IGNITION_HEAT));
    }

    #[test]
    fn test_duplicate_ignitions_on_single_cell() {
        let grid = HeatGrid::new(1, 1, 10, 3);
        assert_eq!(grid.heat(), &[IGNITION_HEAT]);
    }

    #[test]
    fn test_row_major_indexing() {
        let mut grid = HeatGrid::new(10, 10, 0, 0);
        grid.ignite_cell(3, 4).unwrap();
        assert_eq!(grid.heat()[4 * 10 + 3], IGNITION_HEAT);
        assert_eq!(grid.index_of(3, 4), Ok(43));
    }

    #[test]
    fn test_heat_at_bounds() {
        let grid = HeatGrid::new(4, 3, 0, 0);
        assert_eq!(grid.heat_at(3, 2), Ok(0.0));
        assert_eq!(
            grid.heat_at(4, 0),
            Err(GridError::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        );
        assert!(matches!(
            grid.heat_at(0, 3),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_ignite_is_idempotent() {
        let mut grid = HeatGrid::new(3, 3, 0, 0);
        grid.ignite_cell(1, 1).unwrap();
        let once = grid.heat().to_vec();
        grid.ignite_cell(1, 1).unwrap();
        assert_eq!(grid.heat(), once.as_slice());
    }

    #[test]
    fn test_ignite_out_of_bounds_leaves_grid() {
        let mut grid = HeatGrid::new(3, 3, 0, 0);
        assert!(grid.ignite_cell(3, 0).is_err());
        assert!(grid.heat().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_water_source() {
        let mut grid = HeatGrid::new(3, 3, 0, 0);
        grid.place_water_source(0, 2).unwrap();
        assert_eq!(grid.heat_at(0, 2), Ok(WATER_SOURCE_HEAT));
    }

    #[test]
    fn test_neighbor_counts() {
        let grid = HeatGrid::new(4, 4, 0, 0);
        assert_eq!(grid.neighbor_count(0, 0), Ok(3));
        assert_eq!(grid.neighbor_count(3, 3), Ok(3));
        assert_eq!(grid.neighbor_count(1, 0), Ok(5));
        assert_eq!(grid.neighbor_count(0, 2), Ok(5));
        assert_eq!(grid.neighbor_count(1, 1), Ok(8));
        assert!(grid.neighbor_count(4, 0).is_err());

        let single = HeatGrid::new(1, 1, 0, 0);
        assert_eq!(single.neighbor_count(0, 0), Ok(0));
    }

    #[test]
    fn test_replace_swaps_snapshot() {
        let mut grid = HeatGrid::new(2, 2, 0, 0);
        let old = grid.replace(vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(old, vec![0.0; 4]);
        assert_eq!(grid.heat_at(1, 1), Ok(0.4));
    }

    #[test]
    fn test_replace_rejects_wrong_length() {
        let mut grid = HeatGrid::new(2, 2, 0, 0);
        grid.ignite_cell(0, 0).unwrap();
        let before = grid.heat().to_vec();

        let err = grid.replace(vec![0.5; 3]).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(grid.heat(), before.as_slice());
    }

    #[test]
    fn test_from_heat_validates_length() {
        assert!(HeatGrid::from_heat(2, 2, vec![0.0; 4]).is_ok());
        assert!(matches!(
            HeatGrid::from_heat(2, 2, vec![0.0; 5]),
            Err(GridError::DimensionMismatch {
                expected: 4,
                actual: 5
            })
        ));
    }

    #[test]
    #[should_panic(expected = "Grid dimensions must be at least 1x1")]
    fn test_zero_width_panics() {
        let _ = HeatGrid::new(0, 5, 0, 0);
    }

    #[test]
    #[should_panic(expected = "overflow the cell count")]
    fn test_overflowing_dimensions_panic() {
        let _ = HeatGrid::new(usize::MAX, 2, 0, 0);
    }

    #[test]
    #[should_panic(expected = "overflow the cell count")]
    fn test_from_heat_overflowing_dimensions_panic() {
        let _ = HeatGrid::from_heat(2, usize::MAX, Vec::new());
    }

    #[test]
    fn test_rejected_commit_keeps_back_buffer() {
        let mut grid = HeatGrid::new(3, 3, 1, 4);
        let before = grid.heat().to_vec();

        let err = grid.commit_back(vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                expected: 9,
                actual: 5
            }
        );
        assert_eq!(grid.heat(), before.as_slice());
        assert_eq!(grid.back.len(), 5, "rejected buffer is kept for reuse");

        // The next tick resizes the kept buffer and commits normally
        grid.tick(0.1, 1.0, 0).unwrap();
        assert_eq!(grid.back.len(), 9);
        assert_eq!(grid.heat().len(), 9);
    }

    #[test]
    fn test_tick_reuses_back_buffer() {
        let mut grid = HeatGrid::new(8, 8, 3, 11);
        let back_ptr = grid.back.as_ptr();
        grid.tick(0.1, 1.0, 0).unwrap();
        // The old front becomes the new back; the old back becomes the front
        assert_eq!(grid.heat.as_ptr(), back_ptr);
        grid.tick(0.1, 1.0, 1).unwrap();
        assert_eq!(grid.back.as_ptr(), back_ptr);
    }

    #[test]
    fn test_tick_spreads_heat() {
        let mut grid = HeatGrid::new(5, 5, 0, 0);
        grid.ignite_cell(2, 2).unwrap();
        grid.tick_with(&PropagationParams::new(0.1, 1.0).without_flicker(), 0)
            .unwrap();
        assert!(grid.heat_at(1, 1).unwrap() > 0.0);
        assert_eq!(grid.heat_at(0, 0), Ok(0.0));
    }
}
