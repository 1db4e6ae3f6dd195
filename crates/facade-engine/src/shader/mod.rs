//! Shader compilation, linking and caching.
//!
//! Pipeline:
//! - `compile` parses + validates one WGSL stage with naga
//! - `link` checks a vertex/fragment pair against each other
//! - `ShaderCache` owns the shared pass-through vertex stage and builds one
//!   flat-color program per [`ColorKey`](crate::paint::ColorKey), on demand
//!
//! Every failure here is fatal to the caller; nothing retries.

use std::fmt;

mod cache;
mod compile;
mod error;
mod link;

pub use cache::{ShaderCache, ShaderSources, COLOR_PLACEHOLDER};
pub use compile::{compile, CompiledStage};
pub use error::ShaderError;
pub use link::{link, LinkedProgram};

/// Entry point every vertex stage must define.
pub const VERTEX_ENTRY: &str = "vs_main";

/// Entry point every fragment stage must define.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        })
    }
}
