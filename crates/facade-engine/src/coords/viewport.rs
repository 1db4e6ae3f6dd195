/// Viewport rectangle in physical framebuffer pixels.
///
/// This is the region the rasterizer maps NDC `[-1, 1]` onto. It follows the
/// framebuffer size; the scene's vertex data never changes with it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Full-framebuffer viewport anchored at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// A zero-area viewport cannot be rasterized into (e.g. minimized window).
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_size_anchors_at_origin() {
        assert_eq!(Viewport::from_size(800, 600), Viewport::new(0, 0, 800, 600));
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert!(Viewport::from_size(0, 600).is_empty());
        assert!(Viewport::from_size(800, 0).is_empty());
        assert!(!Viewport::from_size(1, 1).is_empty());
    }
}
