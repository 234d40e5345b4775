use gs_convert::RawCapture;
use gs_core::{AnyImage, Error};
use log::debug;

use crate::layout::Layout;

/// Drawing backend driven by [`crate::show`].
///
/// A renderer owns its figures. Every figure obtained from
/// [`Renderer::create_figure`] is handed back exactly once, either to
/// [`Renderer::show`] or to [`Renderer::close`].
pub trait Renderer {
    type Figure;
    type Cell;

    /// `window_title` is best effort; backends without windows may ignore it.
    fn create_figure(&mut self, window_title: Option<&str>) -> Result<Self::Figure, Error>;

    /// Returns `rows * columns` cells in row-major order.
    fn create_grid(
        &mut self,
        figure: &mut Self::Figure,
        rows: usize,
        columns: usize,
    ) -> Result<Vec<Self::Cell>, Error>;

    /// `cmap` is only passed for single-channel planes.
    fn draw_array(
        &mut self,
        figure: &mut Self::Figure,
        cell: &Self::Cell,
        image: &AnyImage,
        cmap: Option<&str>,
    ) -> Result<(), Error>;

    fn set_cell_title(
        &mut self,
        figure: &mut Self::Figure,
        cell: &Self::Cell,
        text: &str,
    ) -> Result<(), Error>;

    fn hide_cell_frame(&mut self, figure: &mut Self::Figure, cell: &Self::Cell)
    -> Result<(), Error>;

    fn apply_figure_size(
        &mut self,
        figure: &mut Self::Figure,
        width: f32,
        height: f32,
    ) -> Result<(), Error>;

    fn apply_layout(&mut self, figure: &mut Self::Figure, layout: &Layout) -> Result<(), Error>;

    fn set_figure_title(&mut self, figure: &mut Self::Figure, text: &str) -> Result<(), Error>;

    /// Displays and releases the figure. May block.
    fn show(&mut self, figure: Self::Figure) -> Result<(), Error>;

    fn capture_raw_pixels(&mut self, figure: &mut Self::Figure) -> Result<RawCapture, Error>;

    fn close(&mut self, figure: Self::Figure);
}

/// Scoped ownership of one open figure.
///
/// The figure is closed on drop unless [`FigureGuard::show`] or
/// [`FigureGuard::capture`] released it first.
pub struct FigureGuard<'r, R: Renderer> {
    renderer: &'r mut R,
    figure: Option<R::Figure>,
}

impl<'r, R: Renderer> FigureGuard<'r, R> {
    pub fn open(renderer: &'r mut R, window_title: Option<&str>) -> Result<Self, Error> {
        let figure = renderer.create_figure(window_title)?;
        Ok(Self {
            renderer,
            figure: Some(figure),
        })
    }

    /// Runs `f` against the renderer and the open figure.
    pub fn with<T>(
        &mut self,
        f: impl FnOnce(&mut R, &mut R::Figure) -> Result<T, Error>,
    ) -> Result<T, Error> {
        match self.figure.as_mut() {
            Some(figure) => f(&mut *self.renderer, figure),
            None => Err(Error::Renderer("figure already released".to_string())),
        }
    }

    pub fn show(mut self) -> Result<(), Error> {
        match self.figure.take() {
            Some(figure) => self.renderer.show(figure),
            None => Ok(()),
        }
    }

    /// Reads the figure back and closes it.
    pub fn capture(mut self) -> Result<RawCapture, Error> {
        let Some(mut figure) = self.figure.take() else {
            return Err(Error::Renderer("figure already released".to_string()));
        };
        let raw = self.renderer.capture_raw_pixels(&mut figure);
        self.renderer.close(figure);
        raw
    }
}

impl<R: Renderer> Drop for FigureGuard<'_, R> {
    fn drop(&mut self) {
        if let Some(figure) = self.figure.take() {
            debug!("closing figure left open");
            self.renderer.close(figure);
        }
    }
}
