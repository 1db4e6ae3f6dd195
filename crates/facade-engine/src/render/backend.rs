use anyhow::Result;

use crate::coords::{GpuVertex, Viewport};
use crate::paint::Color;
use crate::scene::PrimitiveKind;
use crate::shader::LinkedProgram;

/// Handle to a linked shader program owned by a backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ProgramId(pub(crate) u32);

/// Handle to an uploaded vertex buffer owned by a backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GeometryId(pub(crate) u32);

impl ProgramId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl GeometryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One draw submission.
///
/// The program and geometry to bind are carried by the call itself; a backend
/// binds both before every draw and keeps no "current" selection between
/// calls.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub program: ProgramId,
    pub geometry: GeometryId,
    pub primitive: PrimitiveKind,
    pub vertex_count: u32,
}

/// Result of attempting to render a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The frame was drawn and handed to the presentation engine.
    Presented,
    /// Nothing was drawn (transient surface error or zero-area framebuffer).
    Skipped,
}

/// GPU binding layer used by the frame driver.
///
/// Implementations own every object they hand out an id for, and release
/// them all in [`release_all`](Self::release_all).
pub trait RenderBackend {
    /// Creates GPU pipeline state for a linked program.
    fn create_program(&mut self, program: &LinkedProgram) -> Result<ProgramId>;

    /// Uploads `vertices` into a GPU-visible vertex buffer.
    fn create_geometry(&mut self, label: &str, vertices: &[GpuVertex]) -> Result<GeometryId>;

    /// Framebuffer size changed; reconfigure presentation targets.
    fn resize_framebuffer(&mut self, width: u32, height: u32);

    /// Sets the rectangle NDC is mapped onto for subsequent frames.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Clears to `clear`, issues `draws` in order and presents.
    fn render(&mut self, clear: Color, draws: &[DrawCall]) -> Result<FrameOutcome>;

    /// Destroys every program and geometry created so far.
    fn release_all(&mut self);
}
