use facade_engine::device::GpuInit;
use facade_engine::logging::LoggingConfig;

/// Settings read from the process environment.
///
/// - `FACADE_WIREFRAME`: `1`/`true`/`yes`/`on` draws filled shapes as outlines
/// - `FACADE_LOG`: log filter, takes precedence over `RUST_LOG`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerConfig {
    pub wireframe: bool,
    pub log_filter: Option<String>,
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            wireframe: lookup("FACADE_WIREFRAME")
                .as_deref()
                .is_some_and(parse_flag),
            log_filter: lookup("FACADE_LOG").filter(|f| !f.trim().is_empty()),
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log_filter.clone(),
            ..LoggingConfig::default()
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            wireframe: self.wireframe,
            ..GpuInit::default()
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
