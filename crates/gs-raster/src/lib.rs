//! Software raster backend for gridshow.
//!
//! [`RasterRenderer`] implements [`gs_grid::Renderer`] without a window
//! system. Cells are composited into an RGBA canvas on capture or show,
//! images are scaled nearest-neighbor to fit their cell, and single-channel
//! planes are colored through a small set of built-in [`Colormap`]s.

mod colormap;
mod raster;

pub use colormap::Colormap;
pub use raster::{RasterCell, RasterFigure, RasterRenderer, canvas_to_image, paint};
