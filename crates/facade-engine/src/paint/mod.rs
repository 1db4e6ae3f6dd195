//! Paint model shared between the scene and renderers.
//!
//! Every shape is filled with one flat color, selected through a
//! [`ColorKey`] rather than a raw value.

pub mod color;
mod key;

pub use color::Color;
pub use key::ColorKey;
