//! GPU-less backend that records what the driver asked for.

use std::rc::Rc;

use anyhow::{bail, Result};

use crate::coords::{GpuVertex, Viewport};
use crate::paint::Color;
use crate::shader::{CompiledStage, LinkedProgram};

use super::{DrawCall, FrameOutcome, GeometryId, ProgramId, RenderBackend};

#[derive(Debug)]
pub(crate) struct RecordedProgram {
    pub label: String,
    pub vertex_source: String,
    pub fragment_source: String,
    vertex: Rc<CompiledStage>,
}

#[derive(Debug)]
pub(crate) struct RecordedGeometry {
    pub label: String,
    pub vertices: Vec<GpuVertex>,
}

#[derive(Debug)]
pub(crate) struct RecordedFrame {
    pub clear: Color,
    pub viewport: Viewport,
    pub draws: Vec<DrawCall>,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub programs: Vec<RecordedProgram>,
    pub geometries: Vec<RecordedGeometry>,
    pub frames: Vec<RecordedFrame>,
    pub viewport: Viewport,
    pub framebuffer: (u32, u32),
    pub released: bool,
    /// Fail the n-th `create_geometry` call (0-based).
    pub fail_geometry_at: Option<usize>,
}

impl RecordingBackend {
    /// Number of distinct vertex stage objects referenced by created programs.
    pub fn vertex_stage_count(&self) -> usize {
        let mut seen: Vec<&Rc<CompiledStage>> = Vec::new();
        for p in &self.programs {
            if !seen.iter().any(|s| Rc::ptr_eq(s, &p.vertex)) {
                seen.push(&p.vertex);
            }
        }
        seen.len()
    }

    pub fn live_objects(&self) -> usize {
        self.programs.len() + self.geometries.len()
    }
}

impl RenderBackend for RecordingBackend {
    fn create_program(&mut self, program: &LinkedProgram) -> Result<ProgramId> {
        let id = ProgramId(self.programs.len() as u32);
        self.programs.push(RecordedProgram {
            label: program.label.clone(),
            vertex_source: program.vertex.source.clone(),
            fragment_source: program.fragment.source.clone(),
            vertex: Rc::clone(&program.vertex),
        });
        Ok(id)
    }

    fn create_geometry(&mut self, label: &str, vertices: &[GpuVertex]) -> Result<GeometryId> {
        if self.fail_geometry_at == Some(self.geometries.len()) {
            bail!("out of buffer memory");
        }
        let id = GeometryId(self.geometries.len() as u32);
        self.geometries.push(RecordedGeometry {
            label: label.to_string(),
            vertices: vertices.to_vec(),
        });
        Ok(id)
    }

    fn resize_framebuffer(&mut self, width: u32, height: u32) {
        self.framebuffer = (width, height);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn render(&mut self, clear: Color, draws: &[DrawCall]) -> Result<FrameOutcome> {
        for d in draws {
            if d.program.index() >= self.programs.len()
                || d.geometry.index() >= self.geometries.len()
            {
                bail!("draw call references a released or unknown object: {d:?}");
            }
        }
        self.frames.push(RecordedFrame {
            clear,
            viewport: self.viewport,
            draws: draws.to_vec(),
        });
        Ok(FrameOutcome::Presented)
    }

    fn release_all(&mut self) {
        self.programs.clear();
        self.geometries.clear();
        self.released = true;
    }
}
