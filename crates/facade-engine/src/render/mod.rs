//! GPU rendering subsystem.
//!
//! - `backend`: the `RenderBackend` seam and the handles it hands out
//! - `driver`: the per-frame render loop over a static scene
//! - `wgpu_backend`: `RenderBackend` on top of `device::Gpu`
//!
//! Convention: geometry is already in NDC; the vertex stage applies no
//! transform, so the viewport alone decides where the scene lands.

mod backend;
mod driver;
mod wgpu_backend;

#[cfg(test)]
pub(crate) mod recording;

pub use backend::{DrawCall, FrameOutcome, GeometryId, ProgramId, RenderBackend};
pub use driver::{FrameDriver, LoopState, SceneConfig, CLEAR_COLOR};
pub use wgpu_backend::WgpuBackend;
