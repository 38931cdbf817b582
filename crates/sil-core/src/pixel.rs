use crate::Error;

/// Bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

const ALPHA: usize = 3;

/// Borrowed RGBA8 view with a byte stride.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [u8],
    ) -> Result<Self, Error> {
        let row_bytes = width.checked_mul(CHANNELS).ok_or(Error::Overflow)?;
        if stride < row_bytes {
            return Err(Error::InvalidStride {
                stride,
                min: row_bytes,
            });
        }

        let min_len = min_required_len(width, height, stride).ok_or(Error::Overflow)?;
        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// View over tightly packed rows (`stride == 4 * width`).
    pub fn from_contiguous(width: usize, height: usize, data: &'a [u8]) -> Result<Self, Error> {
        let stride = width.checked_mul(CHANNELS).ok_or(Error::Overflow)?;
        Self::from_slice(width, height, stride, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGBA bytes of row `y`, `4 * width` long.
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "row index out of bounds");
        // Zero-width views may carry no bytes at all.
        if self.width == 0 {
            return &[];
        }
        let start = y * self.stride;
        &self.data[start..start + self.width * CHANNELS]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        let px = self.data.get(offset..offset + CHANNELS)?;
        px.try_into().ok()
    }

    /// Alpha byte at `(x, y)`; `None` outside the view or past the data end.
    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> Option<u8> {
        let offset = self.offset(x, y)?;
        self.data.get(offset + ALPHA).copied()
    }

    pub fn subview(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<PixelBuffer<'a>, Error> {
        if x > self.width
            || y > self.height
            || width > (self.width - x)
            || height > (self.height - y)
        {
            return Err(Error::OutOfBounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x * CHANNELS))
            .ok_or(Error::OutOfBounds)?;
        let min_len = min_required_len(width, height, self.stride).ok_or(Error::OutOfBounds)?;
        let tail = self.data.get(start..).ok_or(Error::OutOfBounds)?;
        if tail.len() < min_len {
            return Err(Error::OutOfBounds);
        }

        Ok(PixelBuffer {
            width,
            height,
            stride: self.stride,
            data: tail,
        })
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.width * CHANNELS
    }

    pub fn as_contiguous_slice(&self) -> Option<&'a [u8]> {
        if !self.is_contiguous() {
            return None;
        }
        self.data.get(0..self.width * self.height * CHANNELS)
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.stride + x * CHANNELS)
    }
}

/// Owned, tightly packed RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelImage {
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self, Error> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(Error::Overflow)?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Fully transparent black image.
    pub fn new_transparent(width: usize, height: usize) -> Self {
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .expect("image size overflow");
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// Copies any (possibly strided) view into packed storage.
    pub fn from_buffer(src: &PixelBuffer<'_>) -> Self {
        if let Some(packed) = src.as_contiguous_slice() {
            return Self {
                width: src.width(),
                height: src.height(),
                data: packed.to_vec(),
            };
        }

        let mut data = Vec::with_capacity(src.width() * src.height() * CHANNELS);
        for y in 0..src.height() {
            data.extend_from_slice(src.row(y));
        }
        Self {
            width: src.width(),
            height: src.height(),
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn as_buffer(&self) -> PixelBuffer<'_> {
        PixelBuffer {
            width: self.width,
            height: self.height,
            stride: self.width * CHANNELS,
            data: &self.data,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        self.as_buffer().pixel(x, y)
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * CHANNELS;
        self.data
            .get_mut(offset..offset + CHANNELS)
            .and_then(|px| px.try_into().ok())
    }

    /// Alpha channel as a packed `width * height` plane.
    pub fn alpha_plane(&self) -> Vec<u8> {
        self.data.chunks_exact(CHANNELS).map(|px| px[ALPHA]).collect()
    }

    /// Overwrites the alpha channel from a packed plane; RGB is left untouched.
    pub fn set_alpha_plane(&mut self, alpha: &[u8]) {
        assert_eq!(
            alpha.len(),
            self.width * self.height,
            "alpha plane must be width * height"
        );
        for (px, &a) in self.data.chunks_exact_mut(CHANNELS).zip(alpha) {
            px[ALPHA] = a;
        }
    }
}

fn min_required_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }

    let rows_before_last = height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(width.checked_mul(CHANNELS)?)
}
