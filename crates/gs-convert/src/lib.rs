//! Pixel conversions around the renderer.
//!
//! [`normalize`] turns one input image into what the renderer should draw:
//! - single-channel images lose their channel axis and, when no colormap is
//!   requested, are replicated into three equal channels;
//! - BGR mode reverses the whole last axis, alpha included, so applying it
//!   twice restores the input.
//!
//! [`encode_capture`] remaps a captured RGBA figure into the requested
//! [`gs_core::ReturnEncoding`]. Grayscale uses
//! `0.2989 R + 0.5870 G + 0.1140 B`, truncated to 8 bits.

mod encode;
mod normalize;

pub use encode::{CapturedImage, RawCapture, encode_capture, luma_u8, resolve_return_encoding};
pub use normalize::{Normalized, normalize};
