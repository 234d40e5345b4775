use gs_convert::{CapturedImage, encode_capture};
use gs_core::{Error, ReturnEncoding};
use log::debug;

use crate::layout::{Layout, TightLayout};
use crate::renderer::{FigureGuard, Renderer};

/// Figure-level settings applied after all cells are drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinalizeOptions<'a> {
    /// `None` displays the figure.
    pub encoding: Option<ReturnEncoding>,
    pub plot_title: Option<&'a str>,
    pub tight: Option<TightLayout>,
    pub size: Option<(f32, f32)>,
}

/// Applies figure settings, then shows or captures the figure.
///
/// The figure is released on every path, including errors.
pub fn finalize<R: Renderer>(
    mut figure: FigureGuard<'_, R>,
    opts: FinalizeOptions<'_>,
) -> Result<Option<CapturedImage>, Error> {
    if let Some((width, height)) = opts.size {
        figure.with(|r, f| r.apply_figure_size(f, width, height))?;
    }

    if let Some(title) = opts.plot_title {
        figure.with(|r, f| r.set_figure_title(f, title))?;
    }

    let layout = Layout::new(opts.tight, opts.plot_title.is_some());
    if !layout.is_empty() {
        figure.with(|r, f| r.apply_layout(f, &layout))?;
    }

    match opts.encoding {
        None => {
            debug!("showing figure");
            figure.show()?;
            Ok(None)
        }
        Some(encoding) => {
            debug!("capturing figure as {encoding}");
            let raw = figure.capture()?;
            encode_capture(&raw, encoding).map(Some)
        }
    }
}
