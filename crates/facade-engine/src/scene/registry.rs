use anyhow::{Context, Result};

use crate::render::{DrawCall, GeometryId, ProgramId, RenderBackend};
use crate::shader::ShaderCache;

use super::{SceneError, Shape, ShapeDef};

/// GPU handles retained for one uploaded shape.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Drawable {
    pub geometry: GeometryId,
    pub program: ProgramId,
}

/// Ordered, immutable list of shapes to draw.
///
/// Registration order is draw order: later shapes paint over earlier ones.
/// Shapes are never added, removed or modified after construction.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
    drawables: Vec<Drawable>,
}

impl ShapeRegistry {
    /// Validates every entry of `table`, preserving its order.
    pub fn from_table(table: &[ShapeDef]) -> Result<Self, SceneError> {
        let shapes = table
            .iter()
            .map(Shape::from_def)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            shapes,
            drawables: Vec::new(),
        })
    }

    /// Uploads each shape's vertices and resolves its program.
    ///
    /// On failure nothing is retained; the caller is expected to abort.
    pub fn upload<B>(&mut self, backend: &mut B, shaders: &mut ShaderCache) -> Result<()>
    where
        B: RenderBackend + ?Sized,
    {
        let mut drawables = Vec::with_capacity(self.shapes.len());

        for shape in &self.shapes {
            let program = shaders.get_or_compile(backend, shape.key())?;
            let geometry = backend
                .create_geometry(shape.name(), &shape.gpu_vertices())
                .with_context(|| format!("failed to upload shape `{}`", shape.name()))?;

            drawables.push(Drawable { geometry, program });
        }

        log::info!(
            "uploaded {} shapes using {} shader programs",
            drawables.len(),
            shaders.len()
        );

        self.drawables = drawables;
        Ok(())
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[inline]
    pub fn is_uploaded(&self) -> bool {
        !self.shapes.is_empty() && self.drawables.len() == self.shapes.len()
    }

    /// One draw call per shape, in registration order.
    ///
    /// Empty until [`upload`](Self::upload) has succeeded.
    pub fn draw_calls(&self) -> impl Iterator<Item = DrawCall> + '_ {
        self.shapes
            .iter()
            .zip(&self.drawables)
            .map(|(shape, d)| DrawCall {
                program: d.program,
                geometry: d.geometry,
                primitive: shape.primitive(),
                vertex_count: shape.vertex_count(),
            })
    }

    /// Drops the GPU handles. Backend objects must be released separately.
    pub fn forget_gpu_handles(&mut self) {
        self.drawables.clear();
    }
}
