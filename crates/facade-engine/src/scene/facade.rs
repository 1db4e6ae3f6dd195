//! The facade scene: every shape, in draw order, with its literal coordinates.
//!
//! Coordinates are reproduced exactly, including the window panes whose
//! second triangle does not quite meet the first. Do not "fix" them.

use crate::coords::Vertex;
use crate::paint::ColorKey;

use super::{PrimitiveKind, ShapeDef};

use ColorKey::{Background, FrameLightGray, GoldAccent, RedAccent, WindowDark};
use PrimitiveKind::{Line, Triangle, TriangleStrip};

// Struct literals rather than `Vertex::new` so the slices below are
// promoted to `'static`.
macro_rules! v {
    ($x:expr, $y:expr) => {
        Vertex { x: $x, y: $y }
    };
}

/// Window size the scene was laid out for.
pub const FACADE_SIZE: (u32, u32) = (1920, 1080);

#[rustfmt::skip]
pub static FACADE: [ShapeDef; 22] = [
    // Body.
    ShapeDef::new("body", TriangleStrip, Background, &[
        v!(-0.859342358, 0.176172147),
        v!(-0.6747909, -0.847289924),
        v!(0.9622931, -0.062814224),
        v!(0.915678877, -0.825702676),
    ]),

    // Roof and plinth bands, two triangles each.
    ShapeDef::new("roof-lower", Triangle, GoldAccent, &[
        v!(-0.425500654, 0.629787495),
        v!(-0.427804008, 0.121434967),
        v!(0.914550157, -0.054878749),
    ]),
    ShapeDef::new("plinth-lower", Triangle, RedAccent, &[
        v!(-0.715003941, -0.6392917),
        v!(-0.696737808, -0.747472815),
        v!(0.921272737, -0.733989394),
    ]),
    ShapeDef::new("roof-upper", Triangle, GoldAccent, &[
        v!(0.914550157, -0.054878749),
        v!(0.914905991, 0.332624217),
        v!(-0.425500654, 0.629787495),
    ]),
    ShapeDef::new("plinth-upper", Triangle, RedAccent, &[
        v!(-0.715003941, -0.6392917),
        v!(0.921272737, -0.733989394),
        v!(0.926878075, -0.629776016),
    ]),

    // Chimney shafts.
    ShapeDef::new("chimney-east-left", Triangle, WindowDark, &[
        v!(0.807115145, 0.948392626),
        v!(0.804739094, 0.360872826),
        v!(0.870839997, 0.344757),
    ]),
    ShapeDef::new("chimney-east-right", Triangle, WindowDark, &[
        v!(0.870839997, 0.344757),
        v!(0.870839997, 0.94892829),
        v!(0.807115145, 0.948392626),
    ]),
    ShapeDef::new("chimney-west-left", Triangle, WindowDark, &[
        v!(0.645375309, 0.813711461),
        v!(0.644988866, 0.392874907),
        v!(0.711093596, 0.38092578),
    ]),
    ShapeDef::new("chimney-west-right", Triangle, WindowDark, &[
        v!(0.711093596, 0.38092578),
        v!(0.711495344, 0.818429128),
        v!(0.645375309, 0.813711461),
    ]),

    // Window panes, left to right, two triangles per pane.
    ShapeDef::new("window-1-lower", Triangle, WindowDark, &[
        v!(0.453867875, 0.262115566),
        v!(0.45005701, 0.112083808),
        v!(0.532690792, 0.100272423),
    ]),
    ShapeDef::new("window-1-upper", Triangle, WindowDark, &[
        v!(0.532690792, 0.100272423),
        v!(0.532690792, 0.242115566),
        v!(0.453867875, 0.262115566),
    ]),
    ShapeDef::new("window-2-lower", Triangle, WindowDark, &[
        v!(0.553867875, 0.242115566),
        v!(0.55005701, 0.102083808),
        v!(0.632690792, 0.09300272423),
    ]),
    ShapeDef::new("window-2-upper", Triangle, WindowDark, &[
        v!(0.632690792, 0.09300272423),
        v!(0.632690792, 0.222115566),
        v!(0.553867875, 0.242115566),
    ]),
    ShapeDef::new("window-3-lower", Triangle, WindowDark, &[
        v!(0.653867875, 0.222115566),
        v!(0.653867875, 0.09300272423),
        v!(0.732690792, 0.08700272423),
    ]),
    ShapeDef::new("window-3-upper", Triangle, WindowDark, &[
        v!(0.732690792, 0.08700272423),
        v!(0.732690792, 0.202115566),
        v!(0.653867875, 0.222115566),
    ]),
    ShapeDef::new("window-4-lower", Triangle, WindowDark, &[
        v!(0.753867875, 0.202115566),
        v!(0.753867875, 0.09000272423),
        v!(0.832690792, 0.08700272423),
    ]),
    ShapeDef::new("window-4-upper", Triangle, WindowDark, &[
        v!(0.832690792, 0.08700272423),
        v!(0.832690792, 0.192115566),
        v!(0.753867875, 0.202115566),
    ]),

    // Chimney caps.
    ShapeDef::new("cap-east-lower", Triangle, FrameLightGray, &[
        v!(0.807115145, 0.948392626),
        v!(0.807115145, 0.898392626),
        v!(0.870839997, 0.898392626),
    ]),
    ShapeDef::new("cap-east-upper", Triangle, FrameLightGray, &[
        v!(0.870839997, 0.898392626),
        v!(0.870839997, 0.948392626),
        v!(0.807115145, 0.948392626),
    ]),
    ShapeDef::new("cap-west-lower", Triangle, FrameLightGray, &[
        v!(0.645375309, 0.813711461),
        v!(0.645375309, 0.763711461),
        v!(0.711093596, 0.763711461),
    ]),
    ShapeDef::new("cap-west-upper", Triangle, FrameLightGray, &[
        v!(0.711093596, 0.763711461),
        v!(0.711495344, 0.818429128),
        v!(0.645375309, 0.813711461),
    ]),

    // Left edge post.
    ShapeDef::new("edge-post", Line, RedAccent, &[
        v!(-0.859342358, 0.176172147),
        v!(-0.859342358, 0.376172147),
    ]),
];
