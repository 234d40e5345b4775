use std::path::{Path, PathBuf};

use gs_convert::RawCapture;
use gs_core::{AnyImage, Error, Image};
use gs_grid::{GridPlan, Layout, Renderer};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::{debug, info};

use crate::colormap::Colormap;

/// Pixels per unit of layout padding.
const PAD_PX: f32 = 8.0;

/// Subplot area without any layout adjustment: `[left, bottom, right, top]`.
const DEFAULT_AREA: [f32; 4] = [0.125, 0.11, 0.9, 0.88];

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FRAME: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Software renderer compositing figures into an RGBA canvas.
///
/// There is no window system: `show` writes a PNG when an output path is
/// configured and drops the figure otherwise. Titles are kept on the figure
/// but not drawn.
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    output: Option<PathBuf>,
    default_size: (u32, u32),
    shown: usize,
}

impl Default for RasterRenderer {
    fn default() -> Self {
        Self {
            output: None,
            default_size: (640, 480),
            shown: 0,
        }
    }
}

impl RasterRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// `show` writes figures to `path`.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn with_default_size(mut self, width: u32, height: u32) -> Self {
        self.default_size = (width, height);
        self
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Number of figures handed to `show` so far.
    pub fn shown(&self) -> usize {
        self.shown
    }
}

#[derive(Debug, Clone)]
pub struct RasterCell {
    index: usize,
}

#[derive(Debug, Clone, Default)]
struct CellState {
    content: Option<RgbaImage>,
    title: Option<String>,
    frame: bool,
}

#[derive(Debug, Clone)]
pub struct RasterFigure {
    width: u32,
    height: u32,
    rows: usize,
    columns: usize,
    cells: Vec<CellState>,
    layout: Layout,
    window_title: Option<String>,
    title: Option<String>,
}

impl RasterFigure {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn window_title(&self) -> Option<&str> {
        self.window_title.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn cell_title(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.title.as_deref())
    }

    /// Composites all cells onto a fresh canvas.
    pub fn compose(&self) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(self.width, self.height, BACKGROUND);
        if self.rows == 0 || self.columns == 0 {
            return canvas;
        }

        let (x0, y0, area_w, area_h, gap_x, gap_y) = self.subplot_area();
        let cell_w = ((area_w - gap_x * (self.columns - 1) as f32) / self.columns as f32).max(1.0);
        let cell_h = ((area_h - gap_y * (self.rows - 1) as f32) / self.rows as f32).max(1.0);

        let plan = GridPlan {
            rows: self.rows,
            columns: self.columns,
        };
        for (index, cell) in self.cells.iter().enumerate() {
            let (row, col) = plan.position(index);
            let cx = x0 + col as f32 * (cell_w + gap_x);
            let cy = y0 + row as f32 * (cell_h + gap_y);

            if let Some(content) = &cell.content {
                let (w, h) = fit(content.width(), content.height(), cell_w, cell_h);
                let scaled = imageops::resize(content, w, h, FilterType::Nearest);
                let ox = cx + (cell_w - w as f32) / 2.0;
                let oy = cy + (cell_h - h as f32) / 2.0;
                imageops::overlay(&mut canvas, &scaled, ox.round() as i64, oy.round() as i64);
            }
            if cell.frame {
                draw_frame(&mut canvas, cx, cy, cell_w, cell_h);
            }
        }
        canvas
    }

    /// `(x, y, width, height, gap_x, gap_y)` of the subplot area in pixels.
    fn subplot_area(&self) -> (f32, f32, f32, f32, f32, f32) {
        let w = self.width as f32;
        let h = self.height as f32;

        let (left, bottom, right, top, gap_x, gap_y) = match self.layout.tight {
            Some(tight) => {
                let [l, b, r, t] = tight.rect.unwrap_or([0.0, 0.0, 1.0, 1.0]);
                let margin = tight.pad * PAD_PX;
                let gap_x = tight.w_pad.unwrap_or(tight.pad) * PAD_PX;
                let gap_y = tight.h_pad.unwrap_or(tight.pad) * PAD_PX;
                (
                    l * w + margin,
                    b * h + margin,
                    r * w - margin,
                    t * h - margin,
                    gap_x,
                    gap_y,
                )
            }
            None => {
                let [l, b, r, t] = DEFAULT_AREA;
                let t = self.layout.top.unwrap_or(t);
                (l * w, b * h, r * w, t * h, 0.02 * w, 0.02 * h)
            }
        };

        let area_w = (right - left).max(1.0);
        let area_h = (top - bottom).max(1.0);
        // Figure fractions grow upwards, pixel rows grow downwards.
        (left, h - top, area_w, area_h, gap_x, gap_y)
    }
}

fn fit(src_w: u32, src_h: u32, box_w: f32, box_h: f32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (1, 1);
    }
    let scale = (box_w / src_w as f32).min(box_h / src_h as f32);
    let w = (src_w as f32 * scale).floor().max(1.0) as u32;
    let h = (src_h as f32 * scale).floor().max(1.0) as u32;
    (w, h)
}

fn draw_frame(canvas: &mut RgbaImage, x: f32, y: f32, w: f32, h: f32) {
    let x0 = x.round().max(0.0) as u32;
    let y0 = y.round().max(0.0) as u32;
    let x1 = ((x + w).round() as u32).min(canvas.width().saturating_sub(1));
    let y1 = ((y + h).round() as u32).min(canvas.height().saturating_sub(1));

    for px in x0..=x1 {
        for py in [y0, y1] {
            if py < canvas.height() && px < canvas.width() {
                canvas.put_pixel(px, py, FRAME);
            }
        }
    }
    for py in y0..=y1 {
        for px in [x0, x1] {
            if py < canvas.height() && px < canvas.width() {
                canvas.put_pixel(px, py, FRAME);
            }
        }
    }
}

/// Converts a normalized image into RGBA pixels.
///
/// Single-channel planes go through `cmap` (gray when absent) after min-max
/// scaling. Float color samples are read in `[0, 1]`. Two channels are read
/// as gray plus alpha.
pub fn paint(image: &AnyImage, cmap: Option<&str>) -> Result<RgbaImage, Error> {
    let samples: Vec<f32> = match image {
        AnyImage::U8(img) => img.data().iter().map(|&v| v as f32 / 255.0).collect(),
        AnyImage::F32(img) => img.data().to_vec(),
    };
    let width = image.width();
    let height = image.height();
    let channels = image.channels();

    let mut out = Vec::with_capacity(width * height * 4);
    match channels {
        1 => {
            let cmap = Colormap::by_name(cmap.unwrap_or("gray"))?;
            let (lo, hi) = min_max(&samples);
            let span = hi - lo;
            for &v in &samples {
                let t = if span.abs() < 1e-12 { 0.0 } else { (v - lo) / span };
                let [r, g, b] = cmap.map(t);
                out.extend_from_slice(&[r, g, b, 255]);
            }
        }
        2 => {
            for px in samples.chunks_exact(2) {
                let l = to_u8(px[0]);
                out.extend_from_slice(&[l, l, l, to_u8(px[1])]);
            }
        }
        3 => {
            for px in samples.chunks_exact(3) {
                out.extend_from_slice(&[to_u8(px[0]), to_u8(px[1]), to_u8(px[2]), 255]);
            }
        }
        4 => out.extend(samples.iter().map(|&v| to_u8(v))),
        other => {
            return Err(Error::Renderer(format!(
                "cannot draw an image with {other} channels"
            )));
        }
    }

    RgbaImage::from_raw(width as u32, height as u32, out)
        .ok_or_else(|| Error::Renderer("pixel buffer does not match image size".to_string()))
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn min_max(samples: &[f32]) -> (f32, f32) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for &v in samples {
        if v.is_nan() {
            continue;
        }
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi { (0.0, 0.0) } else { (lo, hi) }
}

/// Reads a composed canvas back as an image.
pub fn canvas_to_image(canvas: &RgbaImage) -> Result<Image<u8>, Error> {
    Image::from_vec_channels(
        canvas.width() as usize,
        canvas.height() as usize,
        4,
        canvas.as_raw().clone(),
    )
}

impl RasterRenderer {
    fn cell_mut<'f>(
        figure: &'f mut RasterFigure,
        cell: &RasterCell,
    ) -> Result<&'f mut CellState, Error> {
        figure
            .cells
            .get_mut(cell.index)
            .ok_or_else(|| Error::Renderer(format!("no cell {}", cell.index)))
    }
}

impl Renderer for RasterRenderer {
    type Figure = RasterFigure;
    type Cell = RasterCell;

    fn create_figure(&mut self, window_title: Option<&str>) -> Result<RasterFigure, Error> {
        let (width, height) = self.default_size;
        Ok(RasterFigure {
            width,
            height,
            rows: 0,
            columns: 0,
            cells: Vec::new(),
            layout: Layout::default(),
            window_title: window_title.map(str::to_string),
            title: None,
        })
    }

    fn create_grid(
        &mut self,
        figure: &mut RasterFigure,
        rows: usize,
        columns: usize,
    ) -> Result<Vec<RasterCell>, Error> {
        let count = rows
            .checked_mul(columns)
            .ok_or(Error::GridTooLarge { rows, columns })?;
        figure.rows = rows;
        figure.columns = columns;
        figure.cells = vec![
            CellState {
                frame: true,
                ..CellState::default()
            };
            count
        ];
        Ok((0..count).map(|index| RasterCell { index }).collect())
    }

    fn draw_array(
        &mut self,
        figure: &mut RasterFigure,
        cell: &RasterCell,
        image: &AnyImage,
        cmap: Option<&str>,
    ) -> Result<(), Error> {
        let content = paint(image, cmap)?;
        Self::cell_mut(figure, cell)?.content = Some(content);
        Ok(())
    }

    fn set_cell_title(
        &mut self,
        figure: &mut RasterFigure,
        cell: &RasterCell,
        text: &str,
    ) -> Result<(), Error> {
        Self::cell_mut(figure, cell)?.title = Some(text.to_string());
        Ok(())
    }

    fn hide_cell_frame(&mut self, figure: &mut RasterFigure, cell: &RasterCell) -> Result<(), Error> {
        Self::cell_mut(figure, cell)?.frame = false;
        Ok(())
    }

    fn apply_figure_size(
        &mut self,
        figure: &mut RasterFigure,
        width: f32,
        height: f32,
    ) -> Result<(), Error> {
        if !(width >= 1.0 && height >= 1.0) {
            return Err(Error::Renderer(format!(
                "figure size must be at least 1x1, got {width}x{height}"
            )));
        }
        figure.width = width.round() as u32;
        figure.height = height.round() as u32;
        Ok(())
    }

    fn apply_layout(&mut self, figure: &mut RasterFigure, layout: &Layout) -> Result<(), Error> {
        figure.layout = *layout;
        Ok(())
    }

    fn set_figure_title(&mut self, figure: &mut RasterFigure, text: &str) -> Result<(), Error> {
        figure.title = Some(text.to_string());
        Ok(())
    }

    fn show(&mut self, figure: RasterFigure) -> Result<(), Error> {
        self.shown += 1;
        match &self.output {
            Some(path) => {
                debug!("writing figure to {}", path.display());
                figure
                    .compose()
                    .save(path)
                    .map_err(|e| Error::Renderer(format!("saving {}: {e}", path.display())))
            }
            None => {
                info!(
                    "no display attached, dropping figure '{}'",
                    figure.window_title().unwrap_or("untitled")
                );
                Ok(())
            }
        }
    }

    fn capture_raw_pixels(&mut self, figure: &mut RasterFigure) -> Result<RawCapture, Error> {
        let canvas = figure.compose();
        Ok(RawCapture {
            width: canvas.width() as usize,
            height: canvas.height() as usize,
            rgba: canvas.into_raw(),
        })
    }

    fn close(&mut self, figure: RasterFigure) {
        debug!("closing {}x{} figure", figure.width, figure.height);
    }
}
