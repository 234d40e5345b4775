use gs_core::{AnyImage, ChannelMode, Error, Image, Warning};
use log::warn;

/// A display-ready image.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub image: AnyImage,
    /// Mode actually applied. Always `Rgb` for single-channel input.
    pub mode: ChannelMode,
    pub warning: Option<Warning>,
}

/// Prepares `image` for drawing.
///
/// `mode` defaults to RGB and is parsed case-insensitively. `index` only
/// feeds diagnostics.
pub fn normalize(
    image: Option<&AnyImage>,
    mode: Option<&str>,
    cmap: Option<&str>,
    index: Option<usize>,
) -> Result<Normalized, Error> {
    let image = image.ok_or(Error::NullImage { index })?;
    let requested = match mode {
        Some(m) => m.parse::<ChannelMode>()?,
        None => ChannelMode::Rgb,
    };
    let has_cmap = cmap.is_some();

    let (image, mode, warning) = match image {
        AnyImage::U8(img) => {
            let (out, mode, warning) = normalize_image(img, requested, has_cmap, index)?;
            (AnyImage::U8(out), mode, warning)
        }
        AnyImage::F32(img) => {
            let (out, mode, warning) = normalize_image(img, requested, has_cmap, index)?;
            (AnyImage::F32(out), mode, warning)
        }
    };

    Ok(Normalized {
        image,
        mode,
        warning,
    })
}

fn normalize_image<T: Copy>(
    img: &Image<T>,
    requested: ChannelMode,
    has_cmap: bool,
    index: Option<usize>,
) -> Result<(Image<T>, ChannelMode, Option<Warning>), Error> {
    if img.is_single_channel() {
        let plane = if has_cmap {
            Image::from_vec(img.width(), img.height(), img.data().to_vec())?
        } else {
            replicate3(img)?
        };
        return Ok((plane, ChannelMode::Rgb, None));
    }

    match requested {
        ChannelMode::Rgb => Ok((img.clone(), ChannelMode::Rgb, None)),
        ChannelMode::Bgr => {
            let channels = img.channels();
            let warning = (channels != 3 && channels != 4).then(|| Warning::ChannelCount {
                index,
                channels,
            });
            if let Some(w) = &warning {
                warn!("{w}");
            }
            Ok((reverse_channels(img)?, ChannelMode::Bgr, warning))
        }
    }
}

fn replicate3<T: Copy>(img: &Image<T>) -> Result<Image<T>, Error> {
    let mut out = Vec::with_capacity(img.data().len() * 3);
    for &v in img.data() {
        out.extend_from_slice(&[v, v, v]);
    }
    Image::from_vec_channels(img.width(), img.height(), 3, out)
}

fn reverse_channels<T: Copy>(img: &Image<T>) -> Result<Image<T>, Error> {
    let mut out = Vec::with_capacity(img.data().len());
    for px in img.pixels() {
        out.extend(px.iter().rev().copied());
    }
    Image::from_vec_channels(img.width(), img.height(), img.channels(), out)
}
