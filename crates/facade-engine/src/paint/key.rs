use super::Color;

/// Closed set of flat-color intents used by the facade scene.
///
/// Each key maps to exactly one compiled shader program; shapes refer to the
/// key, never to a color value directly.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum ColorKey {
    /// Dark navy facade body.
    Background,
    GoldAccent,
    RedAccent,
    /// Window panes and chimney shafts.
    WindowDark,
    WindowMidGray,
    /// Chimney caps.
    FrameLightGray,
}

impl ColorKey {
    pub const ALL: [ColorKey; 6] = [
        ColorKey::Background,
        ColorKey::GoldAccent,
        ColorKey::RedAccent,
        ColorKey::WindowDark,
        ColorKey::WindowMidGray,
        ColorKey::FrameLightGray,
    ];

    /// Constant fragment color for this key.
    pub const fn color(self) -> Color {
        match self {
            ColorKey::Background => Color::opaque(0.0, 0.0, 0.1),
            ColorKey::GoldAccent => Color::opaque(1.0, 0.84, 0.0),
            ColorKey::RedAccent => Color::opaque(1.0, 0.2, 0.2),
            ColorKey::WindowDark => Color::opaque(0.0, 0.0, 0.0),
            ColorKey::WindowMidGray => Color::opaque(0.376, 0.376, 0.376),
            ColorKey::FrameLightGray => Color::opaque(0.8, 0.8, 0.8),
        }
    }

    /// Stable name used for GPU object labels and log lines.
    pub const fn label(self) -> &'static str {
        match self {
            ColorKey::Background => "background",
            ColorKey::GoldAccent => "gold-accent",
            ColorKey::RedAccent => "red-accent",
            ColorKey::WindowDark => "window-dark",
            ColorKey::WindowMidGray => "window-mid-gray",
            ColorKey::FrameLightGray => "frame-light-gray",
        }
    }
}
