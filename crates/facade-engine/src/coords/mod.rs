//! Coordinate types shared by the scene and renderers.
//!
//! Scene space is normalized device coordinates:
//! - origin at the center of the framebuffer
//! - +X right, +Y up
//! - the visible range is `[-1, 1]` on both axes
//!
//! The vertex stage forwards positions unchanged; there is no transform.

mod vertex;
mod viewport;

pub use vertex::{GpuVertex, Vertex};
pub use viewport::Viewport;
