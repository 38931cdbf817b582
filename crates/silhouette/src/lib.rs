//! Umbrella crate for the `silhouette` workspace.
//!
//! Re-exports the pixel buffer types, the preprocessing pipeline and the
//! boundary tracer so callers only need one dependency.

pub use sil_core::*;
pub use sil_prep::*;
pub use sil_trace::*;
