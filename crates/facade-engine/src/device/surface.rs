use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = *formats.first()?;

    let matches_preference = |f: &wgpu::TextureFormat| f.is_srgb() == prefer_srgb;
    Some(
        formats
            .iter()
            .copied()
            .find(matches_preference)
            .unwrap_or(first),
    )
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(crate) fn has_area(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

/// Extent a surface can be configured with for `size`.
///
/// wgpu rejects 0x0 configurations; a minimized or not yet mapped window is
/// configured at 1x1 and its real size is tracked separately.
pub(crate) fn configurable_extent(size: PhysicalSize<u32>) -> (u32, u32) {
    (size.width.max(1), size.height.max(1))
}

/// Records `new_size` and, when it has area, writes it into `config`.
///
/// Returns whether the surface must be reconfigured. wgpu rejects 0x0
/// configurations, so those are only recorded.
pub(crate) fn apply_resize(
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) -> bool {
    *size = new_size;
    if !has_area(new_size) {
        return false;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    true
}

pub(crate) fn map_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, TextureFormat};

    fn config(width: u32, height: u32) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: TextureFormat::Bgra8Unorm,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    // ── surface format ────────────────────────────────────────────────────

    #[test]
    fn no_formats_yields_none() {
        assert_eq!(choose_surface_format(&[], false), None);
    }

    #[test]
    fn linear_preferred_over_srgb() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn srgb_preferred_when_requested() {
        let formats = [TextureFormat::Rgba8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    // ── alpha mode ────────────────────────────────────────────────────────

    #[test]
    fn supported_alpha_request_is_kept() {
        let supported = [CompositeAlphaMode::Opaque, CompositeAlphaMode::PreMultiplied];
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::PreMultiplied
        );
    }

    #[test]
    fn unsupported_alpha_request_uses_first() {
        let supported = [CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::PostMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_updates_config() {
        let mut cfg = config(1920, 1080);
        let mut size = PhysicalSize::new(1920, 1080);
        assert!(apply_resize(&mut cfg, &mut size, PhysicalSize::new(800, 600)));
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert_eq!(size, PhysicalSize::new(800, 600));
    }

    #[test]
    fn zero_resize_defers_configuration() {
        let mut cfg = config(1920, 1080);
        let mut size = PhysicalSize::new(1920, 1080);
        assert!(!apply_resize(&mut cfg, &mut size, PhysicalSize::new(0, 600)));
        assert_eq!((cfg.width, cfg.height), (1920, 1080));
        assert_eq!(size, PhysicalSize::new(0, 600));
    }

    #[test]
    fn zero_sizes_have_no_area() {
        assert!(has_area(PhysicalSize::new(1, 1)));
        assert!(!has_area(PhysicalSize::new(0, 0)));
        assert!(!has_area(PhysicalSize::new(1920, 0)));
    }

    #[test]
    fn zero_size_configures_at_one_pixel() {
        assert_eq!(configurable_extent(PhysicalSize::new(0, 0)), (1, 1));
        assert_eq!(configurable_extent(PhysicalSize::new(0, 1080)), (1, 1080));
        assert_eq!(configurable_extent(PhysicalSize::new(1920, 1080)), (1920, 1080));
    }

    // ── surface errors ────────────────────────────────────────────────────

    #[test]
    fn surface_error_actions() {
        use wgpu::SurfaceError as E;
        assert_eq!(map_surface_error(&E::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(map_surface_error(&E::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(map_surface_error(&E::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(map_surface_error(&E::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
