//! Heat propagation stencil
//!
//! One explicit-Euler step of neighbour-driven heating over the Moore
//! neighbourhood:
//! ```text
//! H'(i) = min(H(i) + rate · Σ H(n) · dt, 1.0) − flicker(i)
//! ```
//!
//! Where:
//! - `Σ H(n)`: sum over the in-bounds Moore neighbours of cell `i` (absorbing edge)
//! - `flicker(i)`: `U[0, amplitude)` drawn from the cell's own stream, applied
//!   only when the clamped value exceeds the flicker threshold
//!
//! Neighbour heat only ever adds; the source cell keeps its own value. There is
//! no lower clamp, so seeded negative (water) cells stay negative until their
//! neighbours warm them.

use super::rng::cell_rng;
use crate::grid::NEIGHBOR_OFFSETS;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Upper clamp on cell heat
pub const MAX_HEAT: f32 = 1.0;

/// Parameters for one propagation step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropagationParams {
    /// Fraction of summed neighbour heat transferred per unit time
    pub heat_transfer_rate: f32,
    /// Timestep
    pub delta_time: f32,
    /// Cells hotter than this receive random flicker
    pub flicker_threshold: f32,
    /// Upper bound (exclusive) of the flicker subtracted from a hot cell
    pub flicker_amplitude: f32,
}

impl Default for PropagationParams {
    fn default() -> Self {
        Self {
            heat_transfer_rate: 0.05,
            delta_time: 1.0,
            flicker_threshold: 0.8,
            flicker_amplitude: 0.15,
        }
    }
}

impl PropagationParams {
    /// Default flicker with the given transfer rate and timestep
    #[must_use]
    pub fn new(heat_transfer_rate: f32, delta_time: f32) -> Self {
        Self {
            heat_transfer_rate,
            delta_time,
            ..Self::default()
        }
    }

    /// Same parameters with flicker disabled
    pub fn without_flicker(mut self) -> Self {
        self.flicker_amplitude = 0.0;
        self
    }
}

/// Sum of the in-bounds Moore neighbours of `(x, y)`.
///
/// Out-of-bounds neighbours contribute nothing.
#[inline]
#[must_use]
pub fn neighbor_sum(heat: &[f32], width: usize, height: usize, x: usize, y: usize) -> f32 {
    let mut sum = 0.0_f32;
    for &(dx, dy) in &NEIGHBOR_OFFSETS {
        let nx = x as i64 + i64::from(dx);
        let ny = y as i64 + i64::from(dy);
        if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
            continue;
        }
        sum += heat[ny as usize * width + nx as usize];
    }
    sum
}

/// Next heat value for a single cell, reading only the frozen snapshot
#[inline]
#[must_use]
pub fn next_cell_heat(
    current: &[f32],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    params: &PropagationParams,
    tick_seed: u64,
) -> f32 {
    let idx = y * width + x;
    let sum = neighbor_sum(current, width, height, x, y);
    let candidate = current[idx] + params.heat_transfer_rate * sum * params.delta_time;
    let mut heat = candidate.min(MAX_HEAT);

    // rand rejects an empty range, so zero amplitude skips the draw entirely
    if heat > params.flicker_threshold && params.flicker_amplitude > 0.0 {
        heat -= cell_rng(tick_seed, idx).random_range(0.0..params.flicker_amplitude);
    }

    heat
}

/// CPU implementation of the propagation step
///
/// Reads `current` only and writes every cell of `next`. Rows are processed in
/// parallel; since each cell reads the frozen snapshot and draws from its own
/// random stream, the result does not depend on the thread count.
///
/// # Arguments
///
/// * `current` - Heat snapshot from the previous tick
/// * `next` - Output buffer, same length as `current`
/// * `width` - Grid width in cells
/// * `height` - Grid height in cells
/// * `params` - Transfer rate, timestep and flicker settings
/// * `tick_seed` - Seed the per-cell random streams are derived from
///
/// # Panics
///
/// Panics if either buffer is not `width * height` long.
pub fn step_heat_cpu(
    current: &[f32],
    next: &mut [f32],
    width: usize,
    height: usize,
    params: &PropagationParams,
    tick_seed: u64,
) {
    assert_eq!(current.len(), width * height, "current buffer size");
    assert_eq!(next.len(), width * height, "next buffer size");

    next.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = next_cell_heat(current, width, height, x, y, params, tick_seed);
            }
        });
}
