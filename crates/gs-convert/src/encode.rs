use gs_core::{Error, Image, ParamValue, ReturnEncoding, Warning};
use log::warn;

/// Raw figure pixels as handed back by a renderer, RGBA row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCapture {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pub encoding: ReturnEncoding,
    pub image: Image<u8>,
}

#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    (0.2989 * r as f32 + 0.5870 * g as f32 + 0.1140 * b as f32) as u8
}

/// Remaps RGBA pixels into `encoding`.
pub fn encode_capture(raw: &RawCapture, encoding: ReturnEncoding) -> Result<CapturedImage, Error> {
    let expected = raw
        .width
        .checked_mul(raw.height)
        .and_then(|v| v.checked_mul(4))
        .ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: raw.rgba.len(),
        })?;
    if raw.rgba.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: raw.rgba.len(),
        });
    }

    let image = match encoding {
        ReturnEncoding::Rgba => Image::from_vec_channels(raw.width, raw.height, 4, raw.rgba.clone())?,
        ReturnEncoding::Grayscale => {
            let gray = raw
                .rgba
                .chunks_exact(4)
                .map(|px| luma_u8(px[0], px[1], px[2]))
                .collect();
            Image::from_vec(raw.width, raw.height, gray)?
        }
        other => {
            let order = other.rgba_order();
            let mut out = Vec::with_capacity(raw.width * raw.height * order.len());
            for px in raw.rgba.chunks_exact(4) {
                out.extend(order.iter().map(|&i| px[i]));
            }
            Image::from_vec_channels(raw.width, raw.height, order.len(), out)?
        }
    };

    Ok(CapturedImage { encoding, image })
}

/// Interprets a `return_image` parameter.
///
/// Absent or `false` means display, `true` means RGB. Unknown strings and
/// other kinds fall back to RGB with a warning.
pub fn resolve_return_encoding(value: &ParamValue) -> (Option<ReturnEncoding>, Option<Warning>) {
    let given = match value {
        ParamValue::Null | ParamValue::Bool(false) => return (None, None),
        ParamValue::Bool(true) => return (Some(ReturnEncoding::Rgb), None),
        ParamValue::Str(s) => match s.parse::<ReturnEncoding>() {
            Ok(enc) => return (Some(enc), None),
            Err(()) => s.clone(),
        },
        other => format!("<{} value>", other.kind()),
    };

    let warning = Warning::InvalidReturnEncoding { given };
    warn!("{warning}");
    (Some(ReturnEncoding::Rgb), Some(warning))
}

#[cfg(test)]
mod tests {
    use gs_core::{Error, ParamValue, ReturnEncoding, Warning};

    use super::{RawCapture, encode_capture, luma_u8, resolve_return_encoding};

    fn constant(width: usize, height: usize, px: [u8; 4]) -> RawCapture {
        RawCapture {
            width,
            height,
            rgba: px.repeat(width * height),
        }
    }

    #[test]
    fn grayscale_of_constant_capture_is_constant() {
        let raw = constant(4, 3, [10, 20, 30, 255]);
        let out = encode_capture(&raw, ReturnEncoding::Grayscale).expect("encoded");

        let expected = (0.2989f64 * 10.0 + 0.5870 * 20.0 + 0.1140 * 30.0).round() as u8;
        assert_eq!(expected, 18);
        assert_eq!(out.image.shape(), vec![3, 4]);
        assert!(out.image.data().iter().all(|&v| v == expected));
    }

    #[test]
    fn luma_truncates() {
        assert_eq!(luma_u8(0, 0, 0), 0);
        assert_eq!(luma_u8(255, 255, 255), 254);
        assert_eq!(luma_u8(100, 0, 0), 29);
    }

    #[test]
    fn channel_orders() {
        let raw = constant(1, 1, [1, 2, 3, 4]);
        let cases: [(ReturnEncoding, &[u8]); 6] = [
            (ReturnEncoding::Rgb, &[1, 2, 3]),
            (ReturnEncoding::Rgba, &[1, 2, 3, 4]),
            (ReturnEncoding::Argb, &[4, 1, 2, 3]),
            (ReturnEncoding::Bgr, &[3, 2, 1]),
            (ReturnEncoding::Bgra, &[3, 2, 1, 4]),
            (ReturnEncoding::Abgr, &[4, 3, 2, 1]),
        ];
        for (enc, expected) in cases {
            let out = encode_capture(&raw, enc).expect("encoded");
            assert_eq!(out.encoding, enc);
            assert_eq!(out.image.data(), expected, "{enc}");
            assert_eq!(out.image.channels(), enc.channels());
        }
    }

    #[test]
    fn short_buffer_is_rejected() {
        let raw = RawCapture {
            width: 2,
            height: 2,
            rgba: vec![0; 15],
        };
        assert_eq!(
            encode_capture(&raw, ReturnEncoding::Rgb),
            Err(Error::SizeMismatch {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn return_requests() {
        assert_eq!(resolve_return_encoding(&ParamValue::Null), (None, None));
        assert_eq!(resolve_return_encoding(&false.into()), (None, None));
        assert_eq!(
            resolve_return_encoding(&true.into()),
            (Some(ReturnEncoding::Rgb), None)
        );
        assert_eq!(
            resolve_return_encoding(&"bgra".into()),
            (Some(ReturnEncoding::Bgra), None)
        );
        assert_eq!(
            resolve_return_encoding(&"CMYK".into()),
            (
                Some(ReturnEncoding::Rgb),
                Some(Warning::InvalidReturnEncoding {
                    given: "CMYK".to_string()
                })
            )
        );
        let (enc, warning) = resolve_return_encoding(&ParamValue::Int(3));
        assert_eq!(enc, Some(ReturnEncoding::Rgb));
        assert!(warning.is_some());
    }
}
