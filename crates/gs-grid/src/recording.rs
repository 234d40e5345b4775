//! A renderer that draws nothing and records every call.
//!
//! Useful for dry runs and for asserting how a grid was assembled.

use gs_convert::RawCapture;
use gs_core::{AnyImage, Error};

use crate::layout::Layout;
use crate::renderer::Renderer;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateFigure {
        window_title: Option<String>,
    },
    CreateGrid {
        rows: usize,
        columns: usize,
    },
    DrawArray {
        cell: usize,
        shape: Vec<usize>,
        cmap: Option<String>,
    },
    SetCellTitle {
        cell: usize,
        text: String,
    },
    HideCellFrame {
        cell: usize,
    },
    ApplyFigureSize {
        width: f32,
        height: f32,
    },
    ApplyLayout(Layout),
    SetFigureTitle(String),
    Show,
    Capture,
    Close,
}

#[derive(Debug)]
pub struct RecordedFigure {
    id: usize,
}

#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    pub calls: Vec<Call>,
    /// Images passed to `draw_array`, in call order.
    pub drawn: Vec<AnyImage>,
    /// Size of the RGBA buffer returned by `capture_raw_pixels`.
    pub capture_size: (usize, usize),
    /// Pixel repeated over the captured buffer.
    pub capture_pixel: [u8; 4],
    open: Vec<usize>,
    next_id: usize,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            drawn: Vec::new(),
            capture_size: (4, 3),
            capture_pixel: [255, 255, 255, 255],
            open: Vec::new(),
            next_id: 0,
        }
    }
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Figures created and not yet shown or closed.
    pub fn open_figures(&self) -> usize {
        self.open.len()
    }

    fn release(&mut self, figure: &RecordedFigure) {
        self.open.retain(|&id| id != figure.id);
    }
}

impl Renderer for RecordingRenderer {
    type Figure = RecordedFigure;
    type Cell = usize;

    fn create_figure(&mut self, window_title: Option<&str>) -> Result<RecordedFigure, Error> {
        self.calls.push(Call::CreateFigure {
            window_title: window_title.map(str::to_string),
        });
        let id = self.next_id;
        self.next_id += 1;
        self.open.push(id);
        Ok(RecordedFigure { id })
    }

    fn create_grid(
        &mut self,
        _figure: &mut RecordedFigure,
        rows: usize,
        columns: usize,
    ) -> Result<Vec<usize>, Error> {
        self.calls.push(Call::CreateGrid { rows, columns });
        let count = rows
            .checked_mul(columns)
            .ok_or(Error::GridTooLarge { rows, columns })?;
        Ok((0..count).collect())
    }

    fn draw_array(
        &mut self,
        _figure: &mut RecordedFigure,
        cell: &usize,
        image: &AnyImage,
        cmap: Option<&str>,
    ) -> Result<(), Error> {
        self.calls.push(Call::DrawArray {
            cell: *cell,
            shape: image.shape(),
            cmap: cmap.map(str::to_string),
        });
        self.drawn.push(image.clone());
        Ok(())
    }

    fn set_cell_title(
        &mut self,
        _figure: &mut RecordedFigure,
        cell: &usize,
        text: &str,
    ) -> Result<(), Error> {
        self.calls.push(Call::SetCellTitle {
            cell: *cell,
            text: text.to_string(),
        });
        Ok(())
    }

    fn hide_cell_frame(&mut self, _figure: &mut RecordedFigure, cell: &usize) -> Result<(), Error> {
        self.calls.push(Call::HideCellFrame { cell: *cell });
        Ok(())
    }

    fn apply_figure_size(
        &mut self,
        _figure: &mut RecordedFigure,
        width: f32,
        height: f32,
    ) -> Result<(), Error> {
        self.calls.push(Call::ApplyFigureSize { width, height });
        Ok(())
    }

    fn apply_layout(&mut self, _figure: &mut RecordedFigure, layout: &Layout) -> Result<(), Error> {
        self.calls.push(Call::ApplyLayout(*layout));
        Ok(())
    }

    fn set_figure_title(&mut self, _figure: &mut RecordedFigure, text: &str) -> Result<(), Error> {
        self.calls.push(Call::SetFigureTitle(text.to_string()));
        Ok(())
    }

    fn show(&mut self, figure: RecordedFigure) -> Result<(), Error> {
        self.calls.push(Call::Show);
        self.release(&figure);
        Ok(())
    }

    fn capture_raw_pixels(&mut self, _figure: &mut RecordedFigure) -> Result<RawCapture, Error> {
        self.calls.push(Call::Capture);
        let (width, height) = self.capture_size;
        Ok(RawCapture {
            width,
            height,
            rgba: self.capture_pixel.repeat(width * height),
        })
    }

    fn close(&mut self, figure: RecordedFigure) {
        self.calls.push(Call::Close);
        self.release(&figure);
    }
}
