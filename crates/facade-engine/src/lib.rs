//! Facade engine crate.
//!
//! Renders a fixed, literal scene of flat-colored 2D primitives into a window:
//! a shape registry, a shader cache keyed by color, a frame driver and the
//! winit/wgpu plumbing underneath them.

pub mod device;
pub mod window;
pub mod input;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod shader;
