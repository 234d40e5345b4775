use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use gridshow::{
    AnyImage, CapturedImage, DisplayParams, Image, Padding, PaddingArg, ParamValue, RasterRenderer,
    show, show_bgr, show_row,
};
use image::{ColorType, DynamicImage};
use log::info;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "gridshow")]
#[command(about = "Arrange images in a grid and write the figure as PNG")]
struct Cli {
    /// Input images, drawn in order.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// JSON file with display parameters. Flags below override it.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Channel order of the inputs. Repeat once per image for a per-image list.
    #[arg(long)]
    mode: Vec<String>,
    /// Colormap for single-channel images. Repeatable like `--mode`.
    #[arg(long)]
    cmap: Vec<String>,
    /// Cell title. Repeatable like `--mode`.
    #[arg(long)]
    title: Vec<String>,

    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    columns: Option<usize>,
    /// Put every image on a single row.
    #[arg(long, conflicts_with_all = ["rows", "columns"])]
    row: bool,
    /// Read all inputs as BGR.
    #[arg(long, conflicts_with = "mode")]
    bgr: bool,

    #[arg(long)]
    window_title: Option<String>,
    #[arg(long)]
    plot_title: Option<String>,
    /// Figure size in pixels, e.g. `1280x720`.
    #[arg(long, value_parser = parse_size)]
    size: Option<(f32, f32)>,
    /// Tight layout padding: `pad [h_pad [w_pad]]`.
    #[arg(long, num_args = 1..=3)]
    padding: Option<Vec<f32>>,
    /// Capture the figure in this encoding instead of displaying it.
    #[arg(long)]
    return_image: Option<String>,

    /// Output PNG.
    #[arg(long, default_value = "grid.png")]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let params = build_params(&cli)?;
    let images = cli
        .images
        .iter()
        .map(|path| load_input(path))
        .collect::<Result<Vec<_>>>()?;

    let capturing = !matches!(params.return_image, ParamValue::Null | ParamValue::Bool(false));
    let mut renderer = if capturing {
        RasterRenderer::new()
    } else {
        RasterRenderer::new().with_output(&cli.out)
    };

    let shown = if cli.bgr {
        show_bgr(&mut renderer, &images, &params)
    } else if cli.row {
        show_row(&mut renderer, &images, &params)
    } else {
        show(&mut renderer, &images, &params)
    }
    .context("showing images")?;

    if let Some(plan) = shown.plan {
        info!(
            "{} images in a {}x{} grid, {} warnings",
            images.len(),
            plan.rows,
            plan.columns,
            shown.warnings.len()
        );
    }

    match shown.capture {
        Some(capture) => save_capture(&cli.out, &capture)?,
        None if renderer.shown() > 0 => info!("wrote {}", cli.out.display()),
        None => {}
    }
    Ok(())
}

fn build_params(cli: &Cli) -> Result<DisplayParams> {
    let mut params = match &cli.manifest {
        Some(path) => {
            ensure_file_exists(path, "manifest")?;
            read_json(path)?
        }
        None => DisplayParams::new(),
    };

    if let Some(mode) = repeated(&cli.mode) {
        params.mode = mode;
    }
    if let Some(cmap) = repeated(&cli.cmap) {
        params.cmap = cmap;
    }
    if let Some(title) = repeated(&cli.title) {
        params.title = title;
    }
    if cli.rows.is_some() {
        params.rows = cli.rows;
    }
    if cli.columns.is_some() {
        params.columns = cli.columns;
    }
    if let Some(title) = &cli.window_title {
        params.window_title = Some(title.clone());
    }
    if let Some(title) = &cli.plot_title {
        params.plot_title = Some(title.clone());
    }
    if cli.size.is_some() {
        params.size = cli.size;
    }
    if let Some(values) = &cli.padding {
        params.padding = Some(Padding::Positional(
            values.iter().copied().map(PaddingArg::Value).collect(),
        ));
    }
    if let Some(encoding) = &cli.return_image {
        params.return_image = ParamValue::from(encoding.as_str());
    }
    Ok(params)
}

/// One flag value applies to every image, several form a per-image list.
fn repeated(values: &[String]) -> Option<ParamValue> {
    match values {
        [] => None,
        [one] => Some(ParamValue::from(one.as_str())),
        many => Some(ParamValue::from(many.to_vec())),
    }
}

fn parse_size(s: &str) -> std::result::Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f32 = w.trim().parse().map_err(|e| format!("width '{w}': {e}"))?;
    let h: f32 = h.trim().parse().map_err(|e| format!("height '{h}': {e}"))?;
    Ok((w, h))
}

fn load_input(path: &Path) -> Result<AnyImage> {
    ensure_file_exists(path, "input image")?;
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let (w, h) = (dyn_img.width() as usize, dyn_img.height() as usize);

    let image: AnyImage = match dyn_img {
        DynamicImage::ImageLuma8(img) => Image::from_vec(w, h, img.into_raw())?.into(),
        DynamicImage::ImageLumaA8(img) => Image::from_vec_channels(w, h, 2, img.into_raw())?.into(),
        DynamicImage::ImageRgb8(img) => Image::from_vec_channels(w, h, 3, img.into_raw())?.into(),
        DynamicImage::ImageRgba8(img) => Image::from_vec_channels(w, h, 4, img.into_raw())?.into(),
        other => Image::from_vec_channels(w, h, 4, other.to_rgba32f().into_raw())?.into(),
    };
    Ok(image)
}

/// Writes the capture with its channels in the order they were encoded.
fn save_capture(path: &Path, capture: &CapturedImage) -> Result<()> {
    let img = &capture.image;
    let color = match img.channels() {
        1 => ColorType::L8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        other => bail!("cannot write a capture with {other} channels"),
    };
    image::save_buffer(
        path,
        img.data(),
        img.width() as u32,
        img.height() as u32,
        color,
    )
    .with_context(|| format!("writing {} capture {}", capture.encoding, path.display()))?;
    info!("wrote {} capture to {}", capture.encoding, path.display());
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use gridshow::ParamValue;

    use super::{parse_size, repeated};

    #[test]
    fn size_flag_parses() {
        assert_eq!(parse_size("1280x720"), Ok((1280.0, 720.0)));
        assert_eq!(parse_size("10X5"), Ok((10.0, 5.0)));
        assert!(parse_size("1280").is_err());
        assert!(parse_size("ax5").is_err());
    }

    #[test]
    fn repeated_flags_become_lists() {
        assert_eq!(repeated(&[]), None);
        assert_eq!(
            repeated(&["BGR".to_string()]),
            Some(ParamValue::from("BGR"))
        );
        assert_eq!(
            repeated(&["BGR".to_string(), "RGB".to_string()]),
            Some(ParamValue::from(["BGR", "RGB"]))
        );
    }
}
