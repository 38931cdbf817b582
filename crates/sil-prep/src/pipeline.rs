use core::fmt;

use log::debug;
use sil_core::{BorderMode, CHANNELS, Coordinate, PixelBuffer, PixelImage, Point2f};

use crate::blur::blur_alpha;
use crate::downsample::downsample_levels;
use crate::kernel::GaussianKernel1D;
use crate::morph::close_alpha_gaps;

#[derive(Debug, Clone, PartialEq)]
pub struct PrepConfig {
    /// Number of 2x2 halvings; the scale factor is `2^downscale_levels`.
    pub downscale_levels: usize,
    /// Gaussian sigma for the alpha blur, in downscaled pixels.
    pub blur_sigma: Option<f32>,
    /// What the blur reads past the image edge.
    pub blur_border: BorderMode<f32>,
    pub close_gaps: bool,
    /// Transparent border added on every side.
    pub pad: usize,
    /// Mask threshold for gap closing; keep it equal to the tracer's.
    pub alpha_threshold: u8,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            downscale_levels: 0,
            blur_sigma: None,
            blur_border: BorderMode::Constant(0.0),
            close_gaps: false,
            pad: 1,
            alpha_threshold: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrepError {
    InvalidSigma(f32),
    /// The padded image would not fit in memory indexing.
    PadOverflow { width: usize, height: usize, pad: usize },
}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSigma(s) => write!(f, "blur sigma must be finite and > 0, got {s}"),
            Self::PadOverflow { width, height, pad } => {
                write!(f, "padding {width}x{height} by {pad} overflows the image size")
            }
        }
    }
}

impl std::error::Error for PrepError {}

/// Preprocessed image plus what is needed to map traced pixels back.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub image: PixelImage,
    /// Source pixels per prepared pixel along each axis.
    pub scale: usize,
    pub pad: usize,
    pub levels_applied: usize,
}

impl Prepared {
    pub fn buffer(&self) -> PixelBuffer<'_> {
        self.image.as_buffer()
    }

    /// Center of the source-pixel block that prepared pixel `p` summarizes.
    pub fn to_source(&self, p: Coordinate) -> Point2f {
        let s = self.scale as f32;
        let half = (s - 1.0) * 0.5;
        Point2f {
            x: (p.x as f32 - self.pad as f32) * s + half,
            y: (p.y as f32 - self.pad as f32) * s + half,
        }
    }
}

pub fn preprocess(src: &PixelBuffer<'_>, cfg: &PrepConfig) -> Result<Prepared, PrepError> {
    let kernel = match cfg.blur_sigma {
        Some(sigma) => Some(GaussianKernel1D::new(sigma).ok_or(PrepError::InvalidSigma(sigma))?),
        None => None,
    };

    let (mut image, levels_applied) = downsample_levels(src, cfg.downscale_levels);
    if levels_applied < cfg.downscale_levels {
        debug!(
            "downscale stopped after {levels_applied} of {} levels at {}x{}",
            cfg.downscale_levels,
            image.width(),
            image.height()
        );
    }

    if cfg.close_gaps {
        let filled = close_alpha_gaps(&mut image, cfg.alpha_threshold);
        debug!("gap closing filled {filled} pixels");
    }

    if let Some(kernel) = &kernel {
        blur_alpha(&mut image, kernel, cfg.blur_border);
    }

    let image = if cfg.pad > 0 {
        pad_transparent(&image.as_buffer(), cfg.pad)?
    } else {
        image
    };
    debug!(
        "prepared {}x{} -> {}x{} (scale {}, pad {})",
        src.width(),
        src.height(),
        image.width(),
        image.height(),
        1usize << levels_applied,
        cfg.pad
    );

    Ok(Prepared {
        image,
        scale: 1 << levels_applied,
        pad: cfg.pad,
        levels_applied,
    })
}

/// Copies `src` into the middle of a transparent canvas `pad` pixels larger on
/// every side.
pub fn pad_transparent(src: &PixelBuffer<'_>, pad: usize) -> Result<PixelImage, PrepError> {
    let overflow = PrepError::PadOverflow {
        width: src.width(),
        height: src.height(),
        pad,
    };
    let grow = |side: usize| pad.checked_mul(2).and_then(|p| side.checked_add(p));
    let (Some(out_w), Some(out_h)) = (grow(src.width()), grow(src.height())) else {
        return Err(overflow);
    };
    let Some(row_bytes) = out_w.checked_mul(CHANNELS) else {
        return Err(overflow);
    };
    if row_bytes.checked_mul(out_h).is_none() {
        return Err(overflow);
    }

    let mut out = PixelImage::new_transparent(out_w, out_h);
    let start = pad * CHANNELS;
    for y in 0..src.height() {
        let src_row = src.row(y);
        let dst_row = &mut out.data_mut()[(y + pad) * row_bytes..(y + pad + 1) * row_bytes];
        dst_row[start..start + src_row.len()].copy_from_slice(src_row);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use sil_core::{Coordinate, PixelImage};

    use super::{PrepConfig, PrepError, pad_transparent, preprocess};

    fn opaque_square(size: usize, x0: usize, y0: usize, side: usize) -> PixelImage {
        let mut img = PixelImage::new_transparent(size, size);
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                *img.pixel_mut(x, y).expect("in bounds") = [1, 2, 3, 255];
            }
        }
        img
    }

    #[test]
    fn padding_surrounds_with_transparent_pixels() {
        let img = PixelImage::from_vec(1, 1, vec![5, 6, 7, 200]).expect("valid");
        let padded = pad_transparent(&img.as_buffer(), 2).expect("small pad");

        assert_eq!((padded.width(), padded.height()), (5, 5));
        assert_eq!(padded.pixel(2, 2), Some([5, 6, 7, 200]));
        let opaque = padded.alpha_plane().iter().filter(|&&a| a > 0).count();
        assert_eq!(opaque, 1);
    }

    #[test]
    fn default_config_only_pads() {
        let img = opaque_square(4, 0, 0, 4);
        let prepared = preprocess(&img.as_buffer(), &PrepConfig::default()).expect("valid");

        assert_eq!(prepared.scale, 1);
        assert_eq!((prepared.image.width(), prepared.image.height()), (6, 6));
        assert_eq!(prepared.image.pixel(0, 0).map(|p| p[3]), Some(0));
        assert_eq!(prepared.image.pixel(1, 1).map(|p| p[3]), Some(255));
        assert_eq!(
            prepared.to_source(Coordinate::new(1, 1)),
            sil_core::Point2f { x: 0.0, y: 0.0 }
        );
    }

    #[test]
    fn downscale_maps_back_to_block_centers() {
        let img = opaque_square(16, 4, 4, 8);
        let cfg = PrepConfig {
            downscale_levels: 2,
            ..PrepConfig::default()
        };
        let prepared = preprocess(&img.as_buffer(), &cfg).expect("valid");

        assert_eq!(prepared.scale, 4);
        assert_eq!(prepared.levels_applied, 2);
        assert_eq!((prepared.image.width(), prepared.image.height()), (6, 6));

        // Prepared (2, 2) is downscaled (1, 1), covering source 4..8.
        assert_eq!(prepared.image.pixel(2, 2).map(|p| p[3]), Some(255));
        let p = prepared.to_source(Coordinate::new(2, 2));
        assert_eq!((p.x, p.y), (5.5, 5.5));
    }

    #[test]
    fn blur_and_close_run_before_padding() {
        let img = opaque_square(10, 2, 2, 6);
        let cfg = PrepConfig {
            blur_sigma: Some(1.0),
            close_gaps: true,
            ..PrepConfig::default()
        };
        let prepared = preprocess(&img.as_buffer(), &cfg).expect("valid");

        let buf = prepared.buffer();
        for i in 0..buf.width() {
            assert_eq!(buf.alpha(i, 0), Some(0));
            assert_eq!(buf.alpha(0, i), Some(0));
            assert_eq!(buf.alpha(i, buf.height() - 1), Some(0));
            assert_eq!(buf.alpha(buf.width() - 1, i), Some(0));
        }
        assert!(buf.alpha(5, 5).is_some_and(|a| a > 200));
    }

    #[test]
    fn oversized_pad_is_an_error() {
        let img = opaque_square(4, 1, 1, 2);
        let err = pad_transparent(&img.as_buffer(), usize::MAX / 2).expect_err("overflows");
        assert_eq!(
            err,
            PrepError::PadOverflow {
                width: 4,
                height: 4,
                pad: usize::MAX / 2
            }
        );

        let cfg = PrepConfig {
            pad: usize::MAX / 8,
            ..PrepConfig::default()
        };
        assert!(matches!(
            preprocess(&img.as_buffer(), &cfg),
            Err(PrepError::PadOverflow { .. })
        ));
    }

    #[test]
    fn bad_sigma_is_rejected() {
        let img = opaque_square(4, 1, 1, 2);
        let cfg = PrepConfig {
            blur_sigma: Some(0.0),
            ..PrepConfig::default()
        };
        assert_eq!(
            preprocess(&img.as_buffer(), &cfg).unwrap_err(),
            PrepError::InvalidSigma(0.0)
        );
    }
}
