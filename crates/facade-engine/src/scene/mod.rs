//! Scene description.
//!
//! Responsibilities:
//! - validated shape records (vertices + primitive kind + color key)
//! - the literal facade table
//! - an ordered registry that uploads shapes and yields draw calls

mod error;
mod facade;
mod primitive;
mod registry;
mod shape;

pub use error::SceneError;
pub use facade::{FACADE, FACADE_SIZE};
pub use primitive::PrimitiveKind;
pub use registry::{Drawable, ShapeRegistry};
pub use shape::{Shape, ShapeDef};
