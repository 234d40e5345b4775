//! Grid planning and figure orchestration.
//!
//! [`show`] is the entry point: it validates per-image parameters, normalizes
//! every image, plans the grid, draws through a [`Renderer`] and finally
//! shows or captures the figure.
//!
//! ## Grid Planning
//! Without explicit dimensions, `rows = floor(sqrt(n))` and
//! `columns = ceil(n / rows)`. Cells are filled row-major; cells past the
//! last image stay empty with their frame hidden.
//!
//! ## Figure Ownership
//! The open figure lives in a [`FigureGuard`], which hands it back to the
//! renderer exactly once: shown, closed after capture, or closed on drop
//! when an error unwinds the call.

mod finalize;
mod layout;
mod params;
mod plan;
pub mod recording;
mod renderer;
mod show;

pub use finalize::{FinalizeOptions, finalize};
pub use layout::{
    DEFAULT_PAD, Layout, Padding, PaddingArg, TITLE_RECT_TOP, TITLE_TOP, TightLayout,
};
pub use params::DisplayParams;
pub use plan::GridPlan;
pub use renderer::{FigureGuard, Renderer};
pub use show::{Shown, show, show_bgr, show_row};
