use crate::coords::{GpuVertex, Vertex};
use crate::paint::ColorKey;

use super::{PrimitiveKind, SceneError};

/// Static description of a shape, suitable for `static` tables.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeDef {
    pub name: &'static str,
    pub vertices: &'static [Vertex],
    pub primitive: PrimitiveKind,
    pub key: ColorKey,
}

impl ShapeDef {
    pub const fn new(
        name: &'static str,
        primitive: PrimitiveKind,
        key: ColorKey,
        vertices: &'static [Vertex],
    ) -> Self {
        Self { name, vertices, primitive, key }
    }
}

/// A validated shape owning its vertex data.
///
/// Invariant: `vertices.len()` is accepted by `primitive`, and every vertex is
/// finite. Coordinates are otherwise kept exactly as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    name: &'static str,
    vertices: Vec<Vertex>,
    primitive: PrimitiveKind,
    key: ColorKey,
}

impl Shape {
    pub fn new(
        name: &'static str,
        primitive: PrimitiveKind,
        key: ColorKey,
        vertices: Vec<Vertex>,
    ) -> Result<Self, SceneError> {
        if !primitive.accepts(vertices.len()) {
            return Err(SceneError::VertexCount {
                shape: name,
                primitive,
                count: vertices.len(),
            });
        }
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(SceneError::NonFinite { shape: name, index });
        }

        Ok(Self { name, vertices, primitive, key })
    }

    pub fn from_def(def: &ShapeDef) -> Result<Self, SceneError> {
        Self::new(def.name, def.primitive, def.key, def.vertices.to_vec())
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn primitive(&self) -> PrimitiveKind {
        self.primitive
    }

    #[inline]
    pub fn key(&self) -> ColorKey {
        self.key
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn gpu_vertices(&self) -> Vec<GpuVertex> {
        self.vertices.iter().map(|v| v.to_gpu()).collect()
    }
}
