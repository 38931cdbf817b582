//! Outer-boundary extraction for a single opaque shape on a transparent
//! background.
//!
//! The tracer finds the first pixel whose alpha exceeds the threshold in
//! row-major order, then walks the Moore neighborhood clockwise until Jacob's
//! stopping condition fires: the walk is back on the start pixel and about to
//! probe the background pixel the scan arrived from.
//!
//! Preconditions:
//! - The shape should be surrounded by at least one transparent pixel. A seed
//!   in column 0 has no west neighbor to arrive from and is reported as
//!   [`TraceError::DegenerateAdjacency`].
//! - Classification looks at alpha only; shapes that differ from the
//!   background purely in color are invisible.
//!
//! Only the outer contour of the seed's 8-connected component is produced.
//! Holes and other components are ignored.

mod contour;
mod direction;
mod error;
mod sampler;
mod tracer;

pub use contour::Contour;
pub use direction::{Direction, neighbor};
pub use error::TraceError;
pub use sampler::{DEFAULT_ALPHA_THRESHOLD, PixelSampler};
pub use tracer::{MooreTracer, Seed, TraceConfig, trace, trace_rgba};
