use bytemuck::{Pod, Zeroable};

/// 2D position in normalized device coordinates.
///
/// The conventional range is `[-1, 1]` on both axes but nothing enforces it;
/// anything outside is simply clipped by the rasterizer.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

impl Vertex {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// GPU representation: three tightly packed floats with `z = 0`.
    #[inline]
    pub const fn to_gpu(self) -> GpuVertex {
        GpuVertex { pos: [self.x, self.y, 0.0] }
    }
}

/// Vertex as uploaded to the GPU (attribute location 0, `Float32x3`).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub pos: [f32; 3],
}

impl GpuVertex {
    pub const STRIDE: u64 = std::mem::size_of::<GpuVertex>() as u64;

    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_vertex_is_three_packed_floats() {
        assert_eq!(GpuVertex::STRIDE, 12);
    }

    #[test]
    fn to_gpu_keeps_bits_and_zeroes_z() {
        let v = Vertex::new(-0.859342358, 0.176172147);
        let g = v.to_gpu();
        assert_eq!(g.pos[0].to_bits(), v.x.to_bits());
        assert_eq!(g.pos[1].to_bits(), v.y.to_bits());
        assert_eq!(g.pos[2], 0.0);
    }

    #[test]
    fn layout_uses_location_zero() {
        let layout = GpuVertex::layout();
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }
}
