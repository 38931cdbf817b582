//! Preprocessing that turns an arbitrary RGBA image into a buffer the tracer
//! handles well.
//!
//! Stages, in the order [`preprocess`] applies them:
//! 1. 2x2 mean downsampling, repeated `downscale_levels` times. Odd trailing
//!    rows/columns are dropped.
//! 2. Optional 3x3 closing of the alpha mask to bridge one-pixel gaps.
//! 3. Optional separable Gaussian blur of the alpha channel. Outside the image
//!    counts as transparent.
//! 4. Transparent padding on all four sides.
//!
//! Only alpha matters to the tracer, so blur and closing leave RGB untouched.
//! [`Prepared::to_source`] maps traced pixels back into source coordinates.

mod blur;
mod conv;
mod downsample;
mod kernel;
mod morph;
mod pipeline;

pub use blur::blur_alpha;
pub use conv::convolve_f32;
pub use downsample::{downsample_levels, downsample2x2_mean_rgba};
pub use kernel::GaussianKernel1D;
pub use morph::{close_alpha_gaps, close3x3, dilate3x3, erode3x3};
pub use pipeline::{PrepConfig, PrepError, Prepared, pad_transparent, preprocess};
