use std::collections::BTreeSet;
use std::rc::Rc;

use naga::{Binding, BuiltIn, Handle, Module, ShaderStage, Type, TypeInner};

use super::{CompiledStage, ShaderError, Stage, FRAGMENT_ENTRY, VERTEX_ENTRY};

/// A vertex + fragment stage pair whose interfaces have been checked
/// against each other.
///
/// The vertex stage is reference-counted: every program produced by the
/// shader cache points at the same compiled pass-through stage.
#[derive(Debug)]
pub struct LinkedProgram {
    pub label: String,
    pub vertex: Rc<CompiledStage>,
    pub fragment: CompiledStage,
}

/// Links `vertex` and `fragment` into a program.
///
/// Checks performed:
/// - each stage has the expected entry point for its pipeline stage
/// - the vertex stage writes `@builtin(position)`
/// - the fragment stage writes color target `@location(0)`
/// - every `@location` the fragment stage reads is written by the vertex stage
pub fn link(
    label: impl Into<String>,
    vertex: Rc<CompiledStage>,
    fragment: CompiledStage,
) -> Result<LinkedProgram, ShaderError> {
    let label = label.into();
    let fail = |log: String| ShaderError::Link {
        label: label.clone(),
        log,
    };

    if vertex.stage != Stage::Vertex || fragment.stage != Stage::Fragment {
        return Err(fail(format!(
            "stage mismatch: expected vertex + fragment, got {} + {}",
            vertex.stage, fragment.stage
        )));
    }

    let vs = entry_point(&vertex.module, VERTEX_ENTRY, ShaderStage::Vertex).ok_or_else(|| {
        fail(format!("vertex stage `{}` has no @vertex entry point `{VERTEX_ENTRY}`", vertex.label))
    })?;
    let fs = entry_point(&fragment.module, FRAGMENT_ENTRY, ShaderStage::Fragment).ok_or_else(|| {
        fail(format!(
            "fragment stage `{}` has no @fragment entry point `{FRAGMENT_ENTRY}`",
            fragment.label
        ))
    })?;

    let vs_outputs = result_bindings(&vertex.module, vs);
    let writes_position = vs_outputs
        .iter()
        .any(|b| matches!(b, Binding::BuiltIn(BuiltIn::Position { .. })));
    if !writes_position {
        return Err(fail(format!(
            "vertex stage `{}` does not write @builtin(position)",
            vertex.label
        )));
    }

    let fs_outputs = locations(&result_bindings(&fragment.module, fs));
    if !fs_outputs.contains(&0) {
        return Err(fail(format!(
            "fragment stage `{}` does not write color target @location(0)",
            fragment.label
        )));
    }

    let provided = locations(&vs_outputs);
    let required = locations(&argument_bindings(&fragment.module, fs));
    if let Some(missing) = required.difference(&provided).next() {
        return Err(fail(format!(
            "fragment input @location({missing}) is not written by vertex stage `{}`",
            vertex.label
        )));
    }

    log::debug!("linked program `{label}` ({} + {})", vertex.label, fragment.label);

    Ok(LinkedProgram {
        label,
        vertex,
        fragment,
    })
}

fn entry_point<'m>(
    module: &'m Module,
    name: &str,
    stage: ShaderStage,
) -> Option<&'m naga::Function> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.name == name && ep.stage == stage)
        .map(|ep| &ep.function)
}

fn result_bindings(module: &Module, function: &naga::Function) -> Vec<Binding> {
    function
        .result
        .as_ref()
        .map(|r| flatten(module, r.ty, r.binding.as_ref()))
        .unwrap_or_default()
}

fn argument_bindings(module: &Module, function: &naga::Function) -> Vec<Binding> {
    function
        .arguments
        .iter()
        .flat_map(|arg| flatten(module, arg.ty, arg.binding.as_ref()))
        .collect()
}

/// Bindings carried by a value: its own, or its struct members' when the
/// value is an IO struct.
fn flatten(module: &Module, ty: Handle<Type>, binding: Option<&Binding>) -> Vec<Binding> {
    if let Some(b) = binding {
        return vec![b.clone()];
    }
    match &module.types[ty].inner {
        TypeInner::Struct { members, .. } => {
            members.iter().filter_map(|m| m.binding.clone()).collect()
        }
        _ => Vec::new(),
    }
}

fn locations(bindings: &[Binding]) -> BTreeSet<u32> {
    bindings
        .iter()
        .filter_map(|b| match b {
            Binding::Location { location, .. } => Some(*location),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::compile;

    const VS: &str = include_str!("shaders/passthrough.wgsl");
    const FS: &str = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(0.0, 0.0, 0.0, 1.0); }";

    fn vs() -> Rc<CompiledStage> {
        Rc::new(compile(Stage::Vertex, "passthrough", VS).unwrap())
    }

    fn fs(src: &str) -> CompiledStage {
        compile(Stage::Fragment, "flat", src).unwrap()
    }

    fn link_log(vertex: Rc<CompiledStage>, fragment: CompiledStage) -> String {
        match link("test", vertex, fragment).unwrap_err() {
            ShaderError::Link { log, .. } => log,
            other => panic!("expected link error, got {other:?}"),
        }
    }

    #[test]
    fn passthrough_and_flat_link() {
        let program = link("test", vs(), fs(FS)).unwrap();
        assert_eq!(program.label, "test");
        assert_eq!(program.vertex.label, "passthrough");
    }

    #[test]
    fn shared_vertex_stage_is_not_copied() {
        let vertex = vs();
        let a = link("a", Rc::clone(&vertex), fs(FS)).unwrap();
        let b = link("b", Rc::clone(&vertex), fs(FS)).unwrap();
        assert!(Rc::ptr_eq(&a.vertex, &b.vertex));
    }

    #[test]
    fn wrong_entry_point_name_fails() {
        let src = "@fragment fn main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        assert!(link_log(vs(), fs(src)).contains(FRAGMENT_ENTRY));
    }

    #[test]
    fn swapped_stages_fail() {
        let vertex = Rc::new(fs(FS));
        let fragment = compile(Stage::Vertex, "passthrough", VS).unwrap();
        assert!(link_log(vertex, fragment).contains("stage mismatch"));
    }

    #[test]
    fn unwritten_color_target_fails() {
        let src = "@fragment fn fs_main() -> @location(1) vec4<f32> { return vec4<f32>(1.0); }";
        assert!(link_log(vs(), fs(src)).contains("@location(0)"));
    }

    #[test]
    fn unmatched_varying_fails() {
        let src = "@fragment fn fs_main(@location(3) tint: vec4<f32>) -> @location(0) vec4<f32> { return tint; }";
        assert!(link_log(vs(), fs(src)).contains("@location(3)"));
    }

    #[test]
    fn struct_outputs_are_flattened() {
        let vs_src = r#"
            struct VsOut {
                @builtin(position) pos: vec4<f32>,
                @location(0) tint: vec4<f32>,
            };
            @vertex
            fn vs_main(@location(0) p: vec3<f32>) -> VsOut {
                var out: VsOut;
                out.pos = vec4<f32>(p, 1.0);
                out.tint = vec4<f32>(1.0);
                return out;
            }
        "#;
        let fs_src = "@fragment fn fs_main(@location(0) tint: vec4<f32>) -> @location(0) vec4<f32> { return tint; }";
        let vertex = Rc::new(compile(Stage::Vertex, "tinted", vs_src).unwrap());
        assert!(link("tinted", vertex, fs(fs_src)).is_ok());
    }
}
