use std::fmt;

use super::PrimitiveKind;

/// A shape definition that cannot be drawn as declared.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    VertexCount {
        shape: &'static str,
        primitive: PrimitiveKind,
        count: usize,
    },
    NonFinite {
        shape: &'static str,
        index: usize,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::VertexCount { shape, primitive, count } => write!(
                f,
                "shape `{shape}`: {count} vertices do not form a {}",
                primitive.label()
            ),
            SceneError::NonFinite { shape, index } => {
                write!(f, "shape `{shape}`: vertex {index} is not finite")
            }
        }
    }
}

impl std::error::Error for SceneError {}
