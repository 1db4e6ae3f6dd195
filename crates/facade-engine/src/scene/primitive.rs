/// How a shape's vertex list is assembled into primitives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    /// Exactly three vertices, one triangle.
    Triangle,
    /// Each vertex after the first two forms a triangle with the previous two.
    TriangleStrip,
    /// Exactly two vertices, one segment.
    Line,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 3] = [
        PrimitiveKind::Triangle,
        PrimitiveKind::TriangleStrip,
        PrimitiveKind::Line,
    ];

    /// Dense index, stable across runs (used to address per-primitive pipelines).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PrimitiveKind::Triangle => 0,
            PrimitiveKind::TriangleStrip => 1,
            PrimitiveKind::Line => 2,
        }
    }

    /// Whether `count` vertices form a well-formed primitive of this kind.
    #[inline]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            PrimitiveKind::Triangle => count == 3,
            PrimitiveKind::TriangleStrip => count >= 3,
            PrimitiveKind::Line => count == 2,
        }
    }

    /// Rasterizes as filled area (and therefore honors polygon mode).
    #[inline]
    pub const fn is_polygon(self) -> bool {
        !matches!(self, PrimitiveKind::Line)
    }

    pub const fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            PrimitiveKind::Triangle => wgpu::PrimitiveTopology::TriangleList,
            PrimitiveKind::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
            PrimitiveKind::Line => wgpu::PrimitiveTopology::LineList,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PrimitiveKind::Triangle => "triangle",
            PrimitiveKind::TriangleStrip => "triangle-strip",
            PrimitiveKind::Line => "line",
        }
    }
}
