use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::{ShaderError, Stage};

/// A single validated shader stage.
///
/// Holds the source text (handed to the GPU backend verbatim) alongside the
/// parsed module used for link-time interface checks.
#[derive(Debug)]
pub struct CompiledStage {
    pub stage: Stage,
    pub label: String,
    pub source: String,
    pub(super) module: naga::Module,
}

/// Parses and validates WGSL `source` for `stage`.
///
/// This is the CPU side of compilation; it catches everything the GPU
/// driver would reject so that a bad shader never reaches the device.
pub fn compile(
    stage: Stage,
    label: impl Into<String>,
    source: impl Into<String>,
) -> Result<CompiledStage, ShaderError> {
    let label = label.into();
    let source = source.into();

    let module = naga::front::wgsl::parse_str(&source).map_err(|e| ShaderError::Compile {
        stage,
        label: label.clone(),
        log: e.emit_to_string(&source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            stage,
            label: label.clone(),
            log: e.emit_to_string(&source),
        })?;

    log::debug!("compiled {stage} stage `{label}`");

    Ok(CompiledStage {
        stage,
        label,
        source,
        module,
    })
}
