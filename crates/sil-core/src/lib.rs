//! Foundational primitives for alpha-silhouette tracing.
//!
//! ## Pixel Buffers and Stride
//! Buffers are RGBA8, row-major, 4 bytes per pixel. `stride` is the distance,
//! in bytes, between adjacent row starts and may exceed `4 * width` (padded
//! GPU readbacks, subviews). The last row only needs `4 * width` bytes.
//!
//! ## Coordinates
//! Integer pixel coordinates: `x` is the column, `y` is the row, origin at the
//! top-left, `y` grows downward. Floating-point geometry uses pixel-center
//! coordinates where integer values refer to pixel centers.
//!
//! ## Border Modes
//! Out-of-image reads during filtering support clamp, constant fill, and
//! reflect-101 behavior.

mod border;
mod error;
mod geom;
mod pixel;

pub use border::BorderMode;
pub use error::Error;
pub use geom::{Coordinate, Point2f, Polyline2f};
pub use pixel::{CHANNELS, PixelBuffer, PixelImage};
