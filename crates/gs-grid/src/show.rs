use gs_convert::{CapturedImage, Normalized, normalize, resolve_return_encoding};
use gs_core::{
    AnyImage, ChannelMode, Error, Param, SUPPORTED_MODES, Warning, resolve_string_list_param,
    resolve_text_param,
};
use log::{debug, warn};

use crate::finalize::{FinalizeOptions, finalize};
use crate::params::DisplayParams;
use crate::plan::GridPlan;
use crate::renderer::{FigureGuard, Renderer};

/// Outcome of a [`show`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shown {
    /// `None` when there was nothing to show.
    pub plan: Option<GridPlan>,
    /// Set when `return_image` asked for a capture.
    pub capture: Option<CapturedImage>,
    pub warnings: Vec<Warning>,
}

/// Shows `images` in a grid.
///
/// Parameters are validated and every image is normalized before the
/// renderer is touched, so a bad parameter or a missing image leaves no
/// partial figure behind. With no images the call only reports
/// [`Warning::NoImagesProvided`].
pub fn show<'a, R, I>(renderer: &mut R, images: I, params: &DisplayParams) -> Result<Shown, Error>
where
    R: Renderer,
    I: IntoIterator,
    I::Item: Into<Option<&'a AnyImage>>,
{
    let images: Vec<Option<&AnyImage>> = images.into_iter().map(Into::into).collect();
    let num_images = images.len();
    if num_images == 0 {
        let warning = Warning::NoImagesProvided;
        warn!("{warning}");
        return Ok(Shown {
            warnings: vec![warning],
            ..Shown::default()
        });
    }

    let modes = resolve_text_param(&params.mode, num_images, "mode", Some(SUPPORTED_MODES))?;
    let cmaps = resolve_text_param(&params.cmap, num_images, "cmap", None)?;
    let titles = resolve_string_list_param(&params.title, num_images, "title")?;
    let tight = match &params.padding {
        Some(padding) => padding.resolve()?,
        None => None,
    };

    let mut warnings = Vec::new();
    let (encoding, encoding_warning) = resolve_return_encoding(&params.return_image);
    warnings.extend(encoding_warning);

    let single = num_images == 1;
    let mut prepared = Vec::with_capacity(num_images);
    for (i, image) in images.iter().enumerate() {
        let index = (!single).then_some(i);
        let normalized = normalize(
            *image,
            modes.get_opt(i).map(String::as_str),
            cmaps.get_opt(i).map(String::as_str),
            index,
        )?;
        warnings.extend(normalized.warning.clone());
        prepared.push(normalized);
    }

    let plan = if single {
        GridPlan::SINGLE
    } else {
        GridPlan::for_count(num_images, params.rows, params.columns)?
    };
    debug!(
        "showing {num_images} images in a {}x{} grid",
        plan.rows, plan.columns
    );

    let mut figure = FigureGuard::open(renderer, params.window_title.as_deref())?;
    draw_cells(&mut figure, plan, &prepared, &cmaps, &titles)?;

    let capture = finalize(
        figure,
        FinalizeOptions {
            encoding,
            plot_title: params.plot_title.as_deref(),
            tight,
            size: params.size,
        },
    )?;

    Ok(Shown {
        plan: Some(plan),
        capture,
        warnings,
    })
}

/// Same as [`show`] with every image read as BGR.
pub fn show_bgr<'a, R, I>(
    renderer: &mut R,
    images: I,
    params: &DisplayParams,
) -> Result<Shown, Error>
where
    R: Renderer,
    I: IntoIterator,
    I::Item: Into<Option<&'a AnyImage>>,
{
    let params = params.clone().with_mode(ChannelMode::Bgr);
    show(renderer, images, &params)
}

/// Same as [`show`] with all images on a single row.
pub fn show_row<'a, R, I>(
    renderer: &mut R,
    images: I,
    params: &DisplayParams,
) -> Result<Shown, Error>
where
    R: Renderer,
    I: IntoIterator,
    I::Item: Into<Option<&'a AnyImage>>,
{
    let mut params = params.clone().with_rows(1);
    params.columns = None;
    show(renderer, images, &params)
}

fn draw_cells<R: Renderer>(
    figure: &mut FigureGuard<'_, R>,
    plan: GridPlan,
    prepared: &[Normalized],
    cmaps: &Param<Option<String>>,
    titles: &Param<Option<String>>,
) -> Result<(), Error> {
    let cells = figure.with(|r, f| r.create_grid(f, plan.rows, plan.columns))?;
    if cells.len() < prepared.len() {
        warn!(
            "grid has {} cells for {} images, skipping the rest",
            cells.len(),
            prepared.len()
        );
    }

    for (i, cell) in cells.iter().enumerate() {
        if let Some(item) = prepared.get(i) {
            let cmap = cmaps
                .get_opt(i)
                .filter(|_| item.image.is_single_channel())
                .map(String::as_str);
            figure.with(|r, f| r.draw_array(f, cell, &item.image, cmap))?;
            if let Some(text) = titles.get_opt(i) {
                figure.with(|r, f| r.set_cell_title(f, cell, text))?;
            }
        }
        figure.with(|r, f| r.hide_cell_frame(f, cell))?;
    }
    Ok(())
}
