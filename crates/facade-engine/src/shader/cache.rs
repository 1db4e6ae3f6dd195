use std::borrow::Cow;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Result;

use crate::paint::{Color, ColorKey};
use crate::render::{ProgramId, RenderBackend};

use super::{compile, link, CompiledStage, Stage};

/// Placeholder in the fragment template replaced by the key's color.
pub const COLOR_PLACEHOLDER: &str = "{{COLOR}}";

/// Source text for the shader cache.
///
/// The defaults are the built-in pass-through vertex stage and flat-color
/// fragment template. Overriding them is mainly useful for exercising the
/// failure paths.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: Cow<'static, str>,
    /// Fragment stage with a [`COLOR_PLACEHOLDER`] where the color goes.
    pub fragment_template: Cow<'static, str>,
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self {
            vertex: Cow::Borrowed(include_str!("shaders/passthrough.wgsl")),
            fragment_template: Cow::Borrowed(include_str!("shaders/flat.wgsl")),
        }
    }
}

impl ShaderSources {
    /// Renders the fragment template for `color`.
    pub fn fragment_for(&self, color: Color) -> String {
        self.fragment_template
            .replace(COLOR_PLACEHOLDER, &color.to_wgsl())
    }
}

/// Compiles each flat-color program at most once.
///
/// Requests are keyed by [`ColorKey`]; the first request for a key compiles
/// its fragment stage, links it with the shared vertex stage and registers the
/// program with the backend. Subsequent requests return the stored
/// [`ProgramId`] without touching the compiler or the backend.
#[derive(Debug, Default)]
pub struct ShaderCache {
    sources: ShaderSources,
    vertex: Option<Rc<CompiledStage>>,
    programs: HashMap<ColorKey, ProgramId>,
    compiled: usize,
}

impl ShaderCache {
    pub fn new(sources: ShaderSources) -> Self {
        Self {
            sources,
            ..Self::default()
        }
    }

    /// Returns the program for `key`, compiling it on first use.
    ///
    /// Errors are either a [`ShaderError`](super::ShaderError) (recoverable by
    /// downcast) or a backend failure while creating GPU objects.
    pub fn get_or_compile<B>(&mut self, backend: &mut B, key: ColorKey) -> Result<ProgramId>
    where
        B: RenderBackend + ?Sized,
    {
        if let Some(&id) = self.programs.get(&key) {
            return Ok(id);
        }

        let vertex = self.vertex_stage()?;
        let fragment = compile(
            Stage::Fragment,
            format!("flat {}", key.label()),
            self.sources.fragment_for(key.color()),
        )?;
        let program = link(key.label(), vertex, fragment)?;

        let id = backend.create_program(&program)?;
        self.compiled += 1;
        self.programs.insert(key, id);

        log::debug!("shader cache: `{}` -> {id:?}", key.label());
        Ok(id)
    }

    /// Returns the program for `key` if it has already been compiled.
    pub fn get(&self, key: ColorKey) -> Option<ProgramId> {
        self.programs.get(&key).copied()
    }

    /// Number of distinct programs held.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Number of fragment compilations performed since construction.
    pub fn compile_count(&self) -> usize {
        self.compiled
    }

    /// Forgets every program. The backend objects must be released separately.
    pub fn clear(&mut self) {
        self.programs.clear();
        self.vertex = None;
    }

    fn vertex_stage(&mut self) -> Result<Rc<CompiledStage>> {
        if let Some(vertex) = &self.vertex {
            return Ok(Rc::clone(vertex));
        }
        let vertex = Rc::new(compile(
            Stage::Vertex,
            "passthrough",
            self.sources.vertex.to_string(),
        )?);
        self.vertex = Some(Rc::clone(&vertex));
        Ok(vertex)
    }
}
