use std::process::ExitCode;

use facade_engine::logging::init_logging;
use facade_engine::render::SceneConfig;
use facade_engine::window::{Runtime, RuntimeConfig};

mod config;

use config::ViewerConfig;

fn main() -> ExitCode {
    let config = ViewerConfig::from_env();
    init_logging(config.logging());

    log::info!(
        "starting facade viewer{}",
        if config.wireframe { " (wireframe)" } else { "" }
    );

    let result = run(&config);
    match &result {
        Ok(()) => log::info!("exited cleanly"),
        Err(e) => log::error!("{e:#}"),
    }
    ExitCode::from(exit_status(&result))
}

/// 0 on success, 255 (a `-1` return as seen by the shell) on any failure.
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 255,
    }
}

fn run(config: &ViewerConfig) -> anyhow::Result<()> {
    Runtime::run(
        RuntimeConfig::default(),
        config.gpu_init(),
        SceneConfig::default(),
    )
}
