use sil_core::{Coordinate, PixelBuffer};

/// Alpha values strictly above this count as part of the shape.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 8;

/// Classifies pixels as border (opaque) or background by alpha alone.
///
/// Everything outside the buffer reads as background, which is what lets the
/// walk probe past the image edge without special cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSampler {
    threshold: u8,
}

impl Default for PixelSampler {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA_THRESHOLD)
    }
}

impl PixelSampler {
    pub const fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    #[inline]
    pub fn is_border_alpha(&self, alpha: u8) -> bool {
        alpha > self.threshold
    }

    pub fn is_border(&self, buf: &PixelBuffer<'_>, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.is_border_at(buf, Coordinate::new(x as usize, y as usize))
    }

    #[inline]
    pub fn is_border_at(&self, buf: &PixelBuffer<'_>, p: Coordinate) -> bool {
        buf.alpha(p.x, p.y)
            .is_some_and(|alpha| self.is_border_alpha(alpha))
    }
}

#[cfg(test)]
mod tests {
    use sil_core::PixelImage;

    use super::PixelSampler;

    #[test]
    fn threshold_is_strict() {
        let mut img = PixelImage::new_transparent(3, 1);
        *img.pixel_mut(0, 0).expect("in bounds") = [255, 255, 255, 8];
        *img.pixel_mut(1, 0).expect("in bounds") = [0, 0, 0, 9];
        *img.pixel_mut(2, 0).expect("in bounds") = [255, 0, 0, 255];
        let buf = img.as_buffer();

        let sampler = PixelSampler::default();
        assert!(!sampler.is_border(&buf, 0, 0));
        assert!(sampler.is_border(&buf, 1, 0));
        assert!(sampler.is_border(&buf, 2, 0));

        let strict = PixelSampler::new(254);
        assert!(!strict.is_border(&buf, 1, 0));
        assert!(strict.is_border(&buf, 2, 0));
    }

    #[test]
    fn out_of_bounds_reads_as_background() {
        let mut img = PixelImage::new_transparent(2, 2);
        for px in img.data_mut().chunks_exact_mut(4) {
            px[3] = 255;
        }
        let buf = img.as_buffer();
        let sampler = PixelSampler::default();

        assert!(sampler.is_border(&buf, 1, 1));
        assert!(!sampler.is_border(&buf, -1, 0));
        assert!(!sampler.is_border(&buf, 0, -1));
        assert!(!sampler.is_border(&buf, 2, 0));
        assert!(!sampler.is_border(&buf, 0, 2));
    }

    #[test]
    fn color_is_ignored() {
        let mut img = PixelImage::new_transparent(2, 1);
        *img.pixel_mut(0, 0).expect("in bounds") = [255, 255, 255, 0];
        *img.pixel_mut(1, 0).expect("in bounds") = [0, 0, 0, 200];
        let buf = img.as_buffer();
        let sampler = PixelSampler::default();

        assert!(!sampler.is_border(&buf, 0, 0));
        assert!(sampler.is_border(&buf, 1, 0));
    }
}
