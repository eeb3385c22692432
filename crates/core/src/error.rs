//! Error types for grid access and simulation configuration
//!
//! Both grid errors are caller mistakes, not transient faults: the grid is left
//! untouched whenever one is returned, and retrying the same call fails again.

use thiserror::Error;

/// Errors raised by [`HeatGrid`](crate::grid::HeatGrid) accessors and commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Coordinate outside `[0, width) × [0, height)`
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Commit array length differs from `width * height`
    #[error("heat array has {actual} cells, grid expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Errors raised when validating a [`FireSimConfig`](crate::config::FireSimConfig)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFiniteThreshold { name: &'static str, value: f32 },

    #[error("fire threshold {fire_threshold} exceeds flash point {flash_point}")]
    ThresholdOrder {
        fire_threshold: f32,
        flash_point: f32,
    },
}
