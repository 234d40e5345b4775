use crate::Error;

/// Row-major image with interleaved channels.
///
/// `channel_axis` records whether the image was built as `[h, w, c]` or as a
/// plain `[h, w]` plane. A plane always has exactly one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    channels: usize,
    channel_axis: bool,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Builds a `[h, w]` plane.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        Self::build(width, height, 1, false, data)
    }

    /// Builds a `[h, w, c]` image with `channels >= 1`.
    pub fn from_vec_channels(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<T>,
    ) -> Result<Self, Error> {
        if channels == 0 {
            return Err(Error::InvalidShape);
        }
        Self::build(width, height, channels, true, data)
    }

    fn build(
        width: usize,
        height: usize,
        channels: usize,
        channel_axis: bool,
        data: Vec<T>,
    ) -> Result<Self, Error> {
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            channel_axis,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// 2 for a plane, 3 when the channel axis is explicit.
    pub fn ndim(&self) -> usize {
        if self.channel_axis { 3 } else { 2 }
    }

    pub fn shape(&self) -> Vec<usize> {
        if self.channel_axis {
            vec![self.height, self.width, self.channels]
        } else {
            vec![self.height, self.width]
        }
    }

    /// A plane, or an explicit channel axis of length 1.
    pub fn is_single_channel(&self) -> bool {
        self.channels == 1
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y * self.width + x) * self.channels;
        self.data.get(start..start + self.channels)
    }

    /// Iterates pixels row-major, each as a `channels`-long slice.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.channels)
    }
}

/// An image in one of the supported sample types.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyImage {
    U8(Image<u8>),
    F32(Image<f32>),
}

impl AnyImage {
    pub fn width(&self) -> usize {
        match self {
            Self::U8(img) => img.width(),
            Self::F32(img) => img.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::U8(img) => img.height(),
            Self::F32(img) => img.height(),
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            Self::U8(img) => img.channels(),
            Self::F32(img) => img.channels(),
        }
    }

    pub fn ndim(&self) -> usize {
        match self {
            Self::U8(img) => img.ndim(),
            Self::F32(img) => img.ndim(),
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::U8(img) => img.shape(),
            Self::F32(img) => img.shape(),
        }
    }

    pub fn is_single_channel(&self) -> bool {
        self.channels() == 1
    }
}

impl From<Image<u8>> for AnyImage {
    fn from(img: Image<u8>) -> Self {
        Self::U8(img)
    }
}

impl From<Image<f32>> for AnyImage {
    fn from(img: Image<f32>) -> Self {
        Self::F32(img)
    }
}
