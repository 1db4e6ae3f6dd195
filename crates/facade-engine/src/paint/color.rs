/// Straight-alpha RGBA color.
///
/// Values are written to the framebuffer as-is. The scene renders into a
/// non-sRGB surface, so no transfer function is applied on the way out.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Converts to the `f64` color type used by wgpu clear operations.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    /// Formats the color as a WGSL `vec4<f32>` constructor expression.
    ///
    /// Components are printed with `{:?}` so integral values keep a decimal
    /// point (`1.0`, not `1`), which WGSL requires for `f32` literals.
    pub fn to_wgsl(self) -> String {
        format!("vec4<f32>({:?}, {:?}, {:?}, {:?})", self.r, self.g, self.b, self.a)
    }
}
