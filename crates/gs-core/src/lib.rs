//! Foundational types for gridshow.
//!
//! ## Image Layout
//! Images are row-major with interleaved channels. An image remembers whether
//! it was built with an explicit channel axis, so `[h, w]` and `[h, w, 1]`
//! stay distinguishable even though both carry one sample per pixel.
//!
//! ## Parameters
//! Per-image parameters (mode, colormap, title) arrive as a loosely typed
//! [`ParamValue`]: absent, a scalar, or one value per image. [`validate`]
//! checks the shape against the image count and [`Param`] is the resolved,
//! tagged form consumed by index.
//!
//! ## Errors and Warnings
//! [`Error`] is fatal to a call. [`Warning`] is advisory: processing goes on
//! with a documented fallback.

mod error;
mod image;
mod mode;
mod param;

pub use error::{Error, Warning};
pub use image::{AnyImage, Image};
pub use mode::{ChannelMode, ReturnEncoding, SUPPORTED_MODES};
pub use param::{
    Param, ParamValue, ValueKind, resolve_string_list_param, resolve_text_param, validate,
};
