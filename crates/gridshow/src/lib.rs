//! Umbrella crate for the `gridshow` workspace.
//!
//! Re-exports the core types, the conversions, the grid orchestration and
//! the raster backend, so most callers only need this crate.

pub use gs_convert::*;
pub use gs_core::*;
pub use gs_grid::*;
pub use gs_raster::*;
