use core::fmt;
use core::str::FromStr;

use crate::Error;

pub const SUPPORTED_MODES: &[&str] = &["RGB", "BGR"];

/// Channel order of a color image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    #[default]
    Rgb,
    Bgr,
}

impl ChannelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Bgr => "BGR",
        }
    }
}

impl FromStr for ChannelMode {
    type Err = Error;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RGB" => Ok(Self::Rgb),
            "BGR" => Ok(Self::Bgr),
            other => Err(Error::UnsupportedMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel layout of a captured figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnEncoding {
    #[default]
    Rgb,
    Rgba,
    Argb,
    Bgr,
    Bgra,
    Abgr,
    Grayscale,
}

impl ReturnEncoding {
    pub const ALL: [ReturnEncoding; 7] = [
        Self::Rgb,
        Self::Rgba,
        Self::Argb,
        Self::Bgr,
        Self::Bgra,
        Self::Abgr,
        Self::Grayscale,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
            Self::Argb => "ARGB",
            Self::Bgr => "BGR",
            Self::Bgra => "BGRA",
            Self::Abgr => "ABGR",
            Self::Grayscale => "GRAYSCALE",
        }
    }

    pub fn channels(self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::Rgb | Self::Bgr => 3,
            Self::Rgba | Self::Argb | Self::Bgra | Self::Abgr => 4,
        }
    }

    /// Source index into an RGBA pixel for each output channel.
    pub fn rgba_order(self) -> &'static [usize] {
        match self {
            Self::Rgb => &[0, 1, 2],
            Self::Rgba => &[0, 1, 2, 3],
            Self::Argb => &[3, 0, 1, 2],
            Self::Bgr => &[2, 1, 0],
            Self::Bgra => &[2, 1, 0, 3],
            Self::Abgr => &[3, 2, 1, 0],
            Self::Grayscale => &[],
        }
    }
}

impl FromStr for ReturnEncoding {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == upper)
            .ok_or(())
    }
}

impl fmt::Display for ReturnEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
