//! Grid storage modules

pub mod heat_grid;

// Re-export main types
pub use heat_grid::*;
